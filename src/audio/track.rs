use std::path::Path;

use crate::assets::media::{AudioPcm, decode_audio_f32_stereo};
use crate::audio::select::AudioSelection;
use crate::foundation::error::{FactReelError, FactReelResult};

/// Linearly ramp the last `fade_secs` of `pcm` down to silence.
pub fn apply_fade_out(pcm: &mut AudioPcm, fade_secs: f64) {
    if fade_secs <= 0.0 {
        return;
    }
    let channels = usize::from(pcm.channels.max(1));
    let frames = pcm.frames();
    let len_sec = frames as f64 / f64::from(pcm.sample_rate);

    for (i, frame) in pcm.interleaved_f32.chunks_exact_mut(channels).enumerate() {
        let rel_sec = i as f64 / f64::from(pcm.sample_rate);
        let rem = (len_sec - rel_sec).max(0.0);
        let gain = (rem / fade_secs).clamp(0.0, 1.0) as f32;
        if gain >= 1.0 {
            continue;
        }
        for s in frame {
            *s *= gain;
        }
    }
}

/// Truncate or pad with silence so `pcm` lasts exactly `secs` (rounded to whole sample frames).
pub fn fit_to_duration(pcm: &mut AudioPcm, secs: f64) {
    let target_frames = (secs.max(0.0) * f64::from(pcm.sample_rate)).round() as usize;
    let channels = usize::from(pcm.channels.max(1));
    pcm.interleaved_f32.resize(target_frames * channels, 0.0);
}

/// Decode the selected segment, fade its tail out and fit it to the reel length.
///
/// The fade applies to the decoded material, so a track shorter than the reel fades out before
/// the padding silence begins.
#[tracing::instrument(skip(selection), fields(path = %selection.path.display()))]
pub fn prepare_audio_track(
    selection: &AudioSelection,
    duration_secs: f64,
    fade_out_secs: f64,
    sample_rate: u32,
) -> FactReelResult<AudioPcm> {
    if !duration_secs.is_finite() || duration_secs <= 0.0 {
        return Err(FactReelError::validation(
            "audio track duration must be finite and > 0",
        ));
    }
    let mut pcm = decode_audio_f32_stereo(
        &selection.path,
        selection.start_secs,
        duration_secs,
        sample_rate,
    )?;
    if pcm.interleaved_f32.is_empty() {
        return Err(FactReelError::evaluation(format!(
            "decoded no audio from '{}'",
            selection.path.display()
        )));
    }
    apply_fade_out(&mut pcm, fade_out_secs);
    fit_to_duration(&mut pcm, duration_secs);
    Ok(pcm)
}

/// Write interleaved `f32` PCM samples to a raw little-endian `.f32le` file.
pub fn write_pcm_f32le(samples_interleaved: &[f32], out_path: &Path) -> FactReelResult<()> {
    if let Some(parent) = out_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            FactReelError::evaluation(format!(
                "failed to create audio output directory '{}': {e}",
                parent.display()
            ))
        })?;
    }

    let mut bytes = Vec::<u8>::with_capacity(samples_interleaved.len() * 4);
    for &sample in samples_interleaved {
        bytes.extend_from_slice(&sample.to_le_bytes());
    }
    std::fs::write(out_path, bytes).map_err(|e| {
        FactReelError::evaluation(format!(
            "failed to write audio file '{}': {e}",
            out_path.display()
        ))
    })
}

#[cfg(test)]
#[path = "../../tests/unit/audio/track.rs"]
mod tests;
