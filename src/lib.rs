//! factreel turns a random trivia fact into a short vertical video.
//!
//! The pipeline is linear:
//!
//! - fetch a fact and append it to the fact log ([`get_random_fact`])
//! - wrap and rasterize it onto the canvas ([`render_fact_image`])
//! - stack background, fact and title layers with fades, pick background music, and encode an
//!   MP4 through the system `ffmpeg` to a collision-free path ([`create_fact_video`])
#![forbid(unsafe_code)]

mod assets;
mod foundation;

/// Background music selection and preparation.
pub mod audio;
/// Layers, compositing and reel assembly.
pub mod compose;
/// Frame sinks.
pub mod encode;
/// Fact API client and fact log.
pub mod fact;
pub mod naming;
/// Text wrapping and rendering.
pub mod text;

pub use crate::assets::media::{
    AudioPcm, MIX_SAMPLE_RATE, decode_audio_f32_stereo, is_tool_on_path, probe_duration_secs,
};
pub use crate::foundation::core::{Canvas, Fps, FrameIndex, Rgba8Premul};
pub use crate::foundation::error::{FactReelError, FactReelResult};

pub use crate::audio::{AudioPlacement, AudioSelection};
pub use crate::compose::frame::FrameRGBA;
pub use crate::compose::layer::{Fade, Layer, LayerContent, Timeline};
pub use crate::compose::reel::{
    Reel, ReelOpts, build_timeline, compose_reel, create_fact_video, render_timeline,
};
pub use crate::encode::ffmpeg::FfmpegSink;
pub use crate::encode::sink::{AudioInputConfig, FrameSink, InMemorySink, SinkConfig};
pub use crate::fact::{DEFAULT_FACT_ENDPOINT, FactClient, FactLog, get_random_fact};
pub use crate::naming::{unique_path, unique_path_from};
pub use crate::text::raster::DEFAULT_FONT_PATH;
pub use crate::text::{FactImageOpts, TextLayoutEngine, TitleOpts, render_fact_image};
