use std::io::{Read as _, Write as _};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, Stdio};
use std::thread::JoinHandle;

use anyhow::Context as _;

use crate::assets::media::is_tool_on_path;
use crate::compose::frame::FrameRGBA;
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{FactReelError, FactReelResult};

/// Encoder process started by [`FfmpegSink::begin`].
struct Encoder {
    child: Child,
    stdin: Option<ChildStdin>,
    stderr: JoinHandle<std::io::Result<Vec<u8>>>,
    cfg: SinkConfig,
    next_idx: u64,
}

/// Sink that encodes opaque RGBA frames to an h264 MP4 through the system `ffmpeg`.
///
/// `begin` claims the output path with an exclusive create, so an existing file is never
/// touched. Only a claimed file is removed by [`FfmpegSink::discard_output`].
pub struct FfmpegSink {
    out_path: PathBuf,
    claimed: bool,
    encoder: Option<Encoder>,
}

impl FfmpegSink {
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            claimed: false,
            encoder: None,
        }
    }

    pub fn out_path(&self) -> &Path {
        &self.out_path
    }

    /// Whether this sink created the file at [`FfmpegSink::out_path`].
    pub fn owns_output(&self) -> bool {
        self.claimed
    }

    /// Stop a running encoder and delete the output, if this sink created it.
    pub fn discard_output(&mut self) {
        if let Some(mut enc) = self.encoder.take() {
            drop(enc.stdin.take());
            let _ = enc.child.kill();
            let _ = enc.child.wait();
            let _ = enc.stderr.join();
        }
        if std::mem::take(&mut self.claimed) {
            tracing::debug!(out = %self.out_path.display(), "removing partial output");
            let _ = std::fs::remove_file(&self.out_path);
        }
    }

    fn claim_output(&mut self) -> FactReelResult<()> {
        ensure_parent_dir(&self.out_path)?;
        match std::fs::File::create_new(&self.out_path) {
            Ok(_) => {
                self.claimed = true;
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                Err(FactReelError::validation(format!(
                    "output file '{}' already exists",
                    self.out_path.display()
                )))
            }
            Err(e) => Err(anyhow::Error::new(e)
                .context(format!("failed to create '{}'", self.out_path.display()))
                .into()),
        }
    }
}

impl FrameSink for FfmpegSink {
    fn begin(&mut self, cfg: SinkConfig) -> FactReelResult<()> {
        if self.encoder.is_some() {
            return Err(FactReelError::evaluation("ffmpeg sink already started"));
        }
        validate_sink_config(&cfg)?;
        if !is_tool_on_path("ffmpeg") {
            return Err(FactReelError::evaluation(
                "ffmpeg is required for MP4 encoding, but was not found on PATH",
            ));
        }
        self.claim_output()?;

        tracing::debug!(out = %self.out_path.display(), audio = cfg.audio.is_some(), "spawning ffmpeg");
        let spawned = encoder_command(&self.out_path, &cfg)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn();
        let mut child = match spawned {
            Ok(child) => child,
            Err(e) => {
                self.discard_output();
                return Err(FactReelError::evaluation(format!(
                    "failed to spawn ffmpeg: {e}"
                )));
            }
        };

        let (Some(stdin), Some(mut stderr)) = (child.stdin.take(), child.stderr.take()) else {
            let _ = child.kill();
            self.discard_output();
            return Err(FactReelError::evaluation("ffmpeg pipes were not opened"));
        };
        let stderr = std::thread::spawn(move || {
            let mut bytes = Vec::new();
            stderr.read_to_end(&mut bytes)?;
            Ok(bytes)
        });

        self.encoder = Some(Encoder {
            child,
            stdin: Some(stdin),
            stderr,
            cfg,
            next_idx: 0,
        });
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> FactReelResult<()> {
        let enc = self
            .encoder
            .as_mut()
            .ok_or_else(|| FactReelError::evaluation("ffmpeg sink not started"))?;
        if idx.0 != enc.next_idx {
            return Err(FactReelError::evaluation(format!(
                "ffmpeg sink expected frame {}, got {}",
                enc.next_idx, idx.0
            )));
        }
        check_opaque_frame(&enc.cfg, frame)?;

        let stdin = enc
            .stdin
            .as_mut()
            .ok_or_else(|| FactReelError::evaluation("ffmpeg stdin already closed"))?;
        stdin
            .write_all(&frame.data)
            .map_err(|e| FactReelError::evaluation(format!("failed to write frame to ffmpeg: {e}")))?;
        enc.next_idx += 1;
        Ok(())
    }

    fn end(&mut self) -> FactReelResult<()> {
        let mut enc = self
            .encoder
            .take()
            .ok_or_else(|| FactReelError::evaluation("ffmpeg sink not started"))?;
        drop(enc.stdin.take());

        let status = enc
            .child
            .wait()
            .map_err(|e| FactReelError::evaluation(format!("failed to wait for ffmpeg: {e}")))?;
        let stderr = enc
            .stderr
            .join()
            .map_err(|_| FactReelError::evaluation("ffmpeg stderr reader panicked"))?
            .unwrap_or_default();

        if !status.success() {
            return Err(FactReelError::evaluation(format!(
                "ffmpeg exited with {status}: {}",
                String::from_utf8_lossy(&stderr).trim()
            )));
        }
        tracing::debug!(out = %self.out_path.display(), frames = enc.next_idx, "ffmpeg finished");
        Ok(())
    }
}

/// Build the encoder invocation: raw RGBA on stdin, optional f32le audio file, MP4 out.
///
/// The output path is already claimed by the sink, so `-y` only replaces that empty file.
fn encoder_command(out: &Path, cfg: &SinkConfig) -> Command {
    let mut cmd = Command::new("ffmpeg");
    cmd.args(["-y", "-loglevel", "error"])
        .args(["-f", "rawvideo", "-pix_fmt", "rgba"])
        .args(["-s", &format!("{}x{}", cfg.width, cfg.height)])
        .args(["-r", &format!("{}/{}", cfg.fps.num, cfg.fps.den)])
        .args(["-i", "pipe:0"]);

    match cfg.audio.as_ref() {
        Some(audio) => {
            cmd.args(["-f", "f32le"])
                .args(["-ar", &audio.sample_rate.to_string()])
                .args(["-ac", &audio.channels.to_string()])
                .arg("-i")
                .arg(&audio.path)
                .args(["-c:a", "aac", "-shortest"]);
        }
        None => {
            cmd.arg("-an");
        }
    }

    cmd.args(["-c:v", "libx264", "-pix_fmt", "yuv420p", "-movflags", "+faststart"])
        .arg(out);
    cmd
}

fn validate_sink_config(cfg: &SinkConfig) -> FactReelResult<()> {
    if cfg.fps.num == 0 || cfg.fps.den == 0 {
        return Err(FactReelError::validation("fps must be non-zero"));
    }
    if cfg.width == 0 || cfg.height == 0 {
        return Err(FactReelError::validation("frame size must be non-zero"));
    }
    // yuv420p subsamples chroma 2x2.
    if !cfg.width.is_multiple_of(2) || !cfg.height.is_multiple_of(2) {
        return Err(FactReelError::validation(format!(
            "frame size {}x{} must be even for yuv420p",
            cfg.width, cfg.height
        )));
    }
    if let Some(audio) = cfg.audio.as_ref()
        && (audio.sample_rate == 0 || audio.channels == 0)
    {
        return Err(FactReelError::validation(
            "audio sample rate and channel count must be non-zero",
        ));
    }
    Ok(())
}

/// Frames must match the configured size and be fully opaque; the reel always has a solid
/// bottom layer, so translucent pixels mean a broken timeline.
fn check_opaque_frame(cfg: &SinkConfig, frame: &FrameRGBA) -> FactReelResult<()> {
    if frame.width != cfg.width || frame.height != cfg.height {
        return Err(FactReelError::validation(format!(
            "frame size mismatch: got {}x{}, expected {}x{}",
            frame.width, frame.height, cfg.width, cfg.height
        )));
    }
    if frame.data.len() != (cfg.width as usize) * (cfg.height as usize) * 4 {
        return Err(FactReelError::validation("frame data length is not width*height*4"));
    }
    if let Some(i) = frame.data.chunks_exact(4).position(|px| px[3] != 255) {
        return Err(FactReelError::validation(format!(
            "frame has a translucent pixel at ({}, {})",
            i % cfg.width as usize,
            i / cfg.width as usize
        )));
    }
    Ok(())
}

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Path) -> FactReelResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
