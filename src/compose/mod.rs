//! Reel composition: layers, fades, frame compositing and the end-to-end build.

/// Composed frames and premultiplied compositing.
pub mod frame;
/// Timed layers with fades.
pub mod layer;
/// Fact reel assembly and encoding.
pub mod reel;
