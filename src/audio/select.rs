use std::path::{Path, PathBuf};

use anyhow::Context as _;
use rand::Rng;
use rand::seq::IndexedRandom as _;

use crate::assets::media::probe_duration_secs;
use crate::foundation::error::{FactReelError, FactReelResult};

/// File name suffixes recognized as music.
pub const AUDIO_EXTENSIONS: [&str; 2] = [".mp3", ".wav"];

/// Where in the chosen track the reel's audio starts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AudioPlacement {
    /// Uniformly random start within `[0, track - video]` when the track is longer.
    #[default]
    RandomOffset,
    /// Always start at the beginning of the track.
    FromStart,
}

/// A chosen music file and the offset to start reading it from.
#[derive(Clone, Debug, PartialEq)]
pub struct AudioSelection {
    pub path: PathBuf,
    pub start_secs: f64,
    pub source_duration_secs: f64,
}

/// List regular files in `dir` whose names end in one of [`AUDIO_EXTENSIONS`], sorted by path.
pub fn list_audio_files(dir: &Path) -> FactReelResult<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to list audio directory '{}'", dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry
            .with_context(|| format!("failed to read entry in '{}'", dir.display()))?;
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if !AUDIO_EXTENSIONS.iter().any(|ext| name.ends_with(ext)) {
            continue;
        }
        if entry.file_type().map(|t| t.is_dir()).unwrap_or(false) {
            continue;
        }
        files.push(entry.path());
    }
    files.sort();
    Ok(files)
}

/// Pick one file uniformly at random. An empty set is an error.
pub fn choose_audio_file<'a, R: Rng>(
    files: &'a [PathBuf],
    rng: &mut R,
) -> FactReelResult<&'a Path> {
    files
        .choose(rng)
        .map(PathBuf::as_path)
        .ok_or_else(|| FactReelError::validation("no audio files (.mp3/.wav) to choose from"))
}

/// Start offset into a track of `audio_secs` for a reel of `video_secs`.
///
/// Always within `[0, audio_secs - video_secs]` when the track is longer, else `0`.
pub fn pick_start_offset<R: Rng>(
    audio_secs: f64,
    video_secs: f64,
    placement: AudioPlacement,
    rng: &mut R,
) -> f64 {
    match placement {
        AudioPlacement::RandomOffset if audio_secs > video_secs => {
            rng.random_range(0.0..=(audio_secs - video_secs))
        }
        _ => 0.0,
    }
}

/// List `dir`, choose a track, probe it and pick its start offset.
#[tracing::instrument(skip(rng), fields(dir = %dir.display()))]
pub fn choose_audio<R: Rng>(
    dir: &Path,
    video_secs: f64,
    placement: AudioPlacement,
    rng: &mut R,
) -> FactReelResult<AudioSelection> {
    let files = list_audio_files(dir)?;
    let path = choose_audio_file(&files, rng)?.to_path_buf();
    let source_duration_secs = probe_duration_secs(&path)?;
    let start_secs = pick_start_offset(source_duration_secs, video_secs, placement, rng);
    tracing::info!(
        path = %path.display(),
        start_secs,
        source_duration_secs,
        candidates = files.len(),
        "selected background music"
    );
    Ok(AudioSelection {
        path,
        start_secs,
        source_duration_secs,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/audio/select.rs"]
mod tests;
