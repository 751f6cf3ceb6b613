use std::path::PathBuf;

use crate::compose::frame::FrameRGBA;
use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{FactReelError, FactReelResult};

/// Configuration provided to a [`FrameSink`] before the first frame.
#[derive(Debug, Clone)]
pub struct SinkConfig {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Output frames-per-second.
    pub fps: Fps,
    /// Optional raw PCM audio track.
    pub audio: Option<AudioInputConfig>,
}

/// Raw PCM audio input for sinks that support audio encoding.
#[derive(Debug, Clone)]
pub struct AudioInputConfig {
    /// Path to interleaved `f32le` PCM data.
    pub path: PathBuf,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Channel count.
    pub channels: u16,
}

/// Sink contract for consuming composed frames.
///
/// `push_frame` is called in strictly increasing `FrameIndex` order between `begin` and `end`.
pub trait FrameSink {
    fn begin(&mut self, cfg: SinkConfig) -> FactReelResult<()>;
    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> FactReelResult<()>;
    fn end(&mut self) -> FactReelResult<()>;
}

/// In-memory sink for tests and previews.
///
/// Keeps every `keep_every`-th frame (all frames by default) to bound memory on long reels.
#[derive(Debug)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    keep_every: u64,
    pushed: u64,
    ended: bool,
    frames: Vec<(FrameIndex, FrameRGBA)>,
}

impl Default for InMemorySink {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::keeping_every(1)
    }

    /// Keep only frames whose index is a multiple of `n`.
    pub fn keeping_every(n: u64) -> Self {
        Self {
            cfg: None,
            keep_every: n.max(1),
            pushed: 0,
            ended: false,
            frames: Vec::new(),
        }
    }

    /// Sink configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<&SinkConfig> {
        self.cfg.as_ref()
    }

    /// Retained frames in timeline order.
    pub fn frames(&self) -> &[(FrameIndex, FrameRGBA)] {
        &self.frames
    }

    /// Total frames pushed, retained or not.
    pub fn pushed(&self) -> u64 {
        self.pushed
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> FactReelResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.pushed = 0;
        self.ended = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> FactReelResult<()> {
        if self.cfg.is_none() {
            return Err(FactReelError::evaluation("in-memory sink not started"));
        }
        self.pushed += 1;
        if idx.0.is_multiple_of(self.keep_every) {
            self.frames.push((idx, frame.clone()));
        }
        Ok(())
    }

    fn end(&mut self) -> FactReelResult<()> {
        self.ended = true;
        Ok(())
    }
}
