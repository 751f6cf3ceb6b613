//! Background music: picking a file and an offset, then preparing the faded PCM track.

/// Directory listing, random file choice and start offset.
pub mod select;
/// Decode, fade and serialize the chosen segment.
pub mod track;

pub use select::{AUDIO_EXTENSIONS, AudioPlacement, AudioSelection, choose_audio, choose_audio_file, list_audio_files, pick_start_offset};
pub use track::{apply_fade_out, fit_to_duration, prepare_audio_track, write_pcm_f32le};
