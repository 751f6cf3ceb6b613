use std::path::Path;
use std::process::{Command, Stdio};

use crate::foundation::error::{FactReelError, FactReelResult};

/// Audio sample rate used for decoding and for the PCM handed to the encoder.
pub const MIX_SAMPLE_RATE: u32 = 48_000;

#[derive(Clone, Debug)]
/// Decoded interleaved floating-point PCM.
pub struct AudioPcm {
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Channel count.
    pub channels: u16,
    /// Interleaved `f32` PCM samples.
    pub interleaved_f32: Vec<f32>,
}

impl AudioPcm {
    /// Number of sample frames (one sample per channel).
    pub fn frames(&self) -> usize {
        self.interleaved_f32.len() / usize::from(self.channels.max(1))
    }

    pub fn duration_secs(&self) -> f64 {
        self.frames() as f64 / f64::from(self.sample_rate)
    }
}

/// Return `true` when `tool -version` runs successfully from `PATH`.
pub fn is_tool_on_path(tool: &str) -> bool {
    Command::new(tool)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Probe the container duration of a media file in seconds through `ffprobe`.
pub fn probe_duration_secs(source_path: &Path) -> FactReelResult<f64> {
    #[derive(serde::Deserialize)]
    struct ProbeFormat {
        duration: Option<String>,
    }
    #[derive(serde::Deserialize)]
    struct ProbeOut {
        format: ProbeFormat,
    }

    let out = Command::new("ffprobe")
        .args(["-v", "error", "-print_format", "json", "-show_format"])
        .arg(source_path)
        .output()
        .map_err(|e| FactReelError::evaluation(format!("failed to run ffprobe: {e}")))?;
    if !out.status.success() {
        return Err(FactReelError::evaluation(format!(
            "ffprobe failed for '{}': {}",
            source_path.display(),
            String::from_utf8_lossy(&out.stderr).trim()
        )));
    }

    let parsed: ProbeOut = serde_json::from_slice(&out.stdout)
        .map_err(|e| FactReelError::serde(format!("ffprobe json parse failed: {e}")))?;
    let duration = parsed
        .format
        .duration
        .ok_or_else(|| FactReelError::evaluation("missing duration from ffprobe"))?;
    let secs: f64 = duration.trim().parse().map_err(|_| {
        FactReelError::evaluation(format!("ffprobe duration is not a number: '{duration}'"))
    })?;
    if !secs.is_finite() || secs < 0.0 {
        return Err(FactReelError::evaluation(format!(
            "ffprobe duration out of range: {secs}"
        )));
    }
    Ok(secs)
}

/// Decode `duration_secs` of audio starting at `start_secs` to stereo interleaved `f32` PCM.
pub fn decode_audio_f32_stereo(
    path: &Path,
    start_secs: f64,
    duration_secs: f64,
    sample_rate: u32,
) -> FactReelResult<AudioPcm> {
    let out = Command::new("ffmpeg")
        .args(["-v", "error", "-ss", &format!("{start_secs:.6}"), "-i"])
        .arg(path)
        .args([
            "-t",
            &format!("{duration_secs:.6}"),
            "-vn",
            "-f",
            "f32le",
            "-acodec",
            "pcm_f32le",
            "-ac",
            "2",
            "-ar",
            &sample_rate.to_string(),
            "pipe:1",
        ])
        .output()
        .map_err(|e| {
            FactReelError::evaluation(format!("failed to run ffmpeg for audio decode: {e}"))
        })?;

    if !out.status.success() {
        return Err(FactReelError::evaluation(format!(
            "ffmpeg audio decode failed for '{}': {}",
            path.display(),
            String::from_utf8_lossy(&out.stderr).trim()
        )));
    }

    if !out.stdout.len().is_multiple_of(4) {
        return Err(FactReelError::evaluation(
            "decoded audio byte length is not aligned to f32 samples",
        ));
    }
    let interleaved_f32 = out
        .stdout
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect();

    Ok(AudioPcm {
        sample_rate,
        channels: 2,
        interleaved_f32,
    })
}

// No unit tests here: these functions shell out to `ffprobe`/`ffmpeg` and are covered by
// integration tests that skip when the tools are unavailable.
