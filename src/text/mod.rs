//! Fact text layout: greedy word wrapping, block centering, and rasterization.

/// Parley-backed shaping and measuring.
pub mod engine;
/// Canvas rasterization of placed lines.
pub mod raster;
/// Greedy line wrapping and vertical centering.
pub mod wrap;

pub use engine::{FontMeasure, TextBrushRgba8, TextLayoutEngine};
pub use raster::{FactImageOpts, TitleOpts, render_fact_image, render_fact_image_with, render_title_layer};
pub use wrap::{PlacedLine, TextExtent, TextMeasure, layout_block, wrap_words};
