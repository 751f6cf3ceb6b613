use std::sync::Arc;

use crate::compose::frame::{FrameRGBA, premul_over_in_place_opacity};
use crate::foundation::core::{Canvas, Fps, FrameIndex, Rgba8Premul};
use crate::foundation::error::{FactReelError, FactReelResult};

/// Linear opacity ramps at the start and end of a layer.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Fade {
    pub fade_in_secs: f64,
    pub fade_out_secs: f64,
}

impl Fade {
    pub const NONE: Fade = Fade {
        fade_in_secs: 0.0,
        fade_out_secs: 0.0,
    };

    /// Same ramp length in and out.
    pub fn symmetric(secs: f64) -> Self {
        Self {
            fade_in_secs: secs,
            fade_out_secs: secs,
        }
    }

    /// Opacity at `local_secs` into a layer lasting `duration_secs`.
    pub fn opacity_at(self, local_secs: f64, duration_secs: f64) -> f32 {
        let mut o = 1.0f64;
        if self.fade_in_secs > 0.0 {
            o *= (local_secs / self.fade_in_secs).clamp(0.0, 1.0);
        }
        if self.fade_out_secs > 0.0 {
            let rem = (duration_secs - local_secs).max(0.0);
            o *= (rem / self.fade_out_secs).clamp(0.0, 1.0);
        }
        o as f32
    }
}

/// What a layer draws.
#[derive(Clone, Debug)]
pub enum LayerContent {
    /// A full-canvas solid color.
    Solid(Rgba8Premul),
    /// A full-canvas premultiplied RGBA8 raster.
    Raster(Arc<Vec<u8>>),
}

/// One time-bounded visual clip in the reel.
#[derive(Clone, Debug)]
pub struct Layer {
    pub name: String,
    pub content: LayerContent,
    pub start_secs: f64,
    pub duration_secs: f64,
    pub fade: Fade,
}

impl Layer {
    pub fn solid(name: impl Into<String>, color: Rgba8Premul, duration_secs: f64) -> Self {
        Self {
            name: name.into(),
            content: LayerContent::Solid(color),
            start_secs: 0.0,
            duration_secs,
            fade: Fade::NONE,
        }
    }

    pub fn raster(name: impl Into<String>, rgba_premul: Vec<u8>, duration_secs: f64) -> Self {
        Self {
            name: name.into(),
            content: LayerContent::Raster(Arc::new(rgba_premul)),
            start_secs: 0.0,
            duration_secs,
            fade: Fade::NONE,
        }
    }

    pub fn with_fade(mut self, fade: Fade) -> Self {
        self.fade = fade;
        self
    }

    /// Opacity at timeline time `t`, or `None` outside `[start, start + duration)`.
    pub fn opacity_at(&self, t: f64) -> Option<f32> {
        let local = t - self.start_secs;
        if local < 0.0 || local >= self.duration_secs {
            return None;
        }
        Some(self.fade.opacity_at(local, self.duration_secs))
    }
}

/// Fixed-length stack of layers, bottom first.
#[derive(Clone, Debug)]
pub struct Timeline {
    canvas: Canvas,
    fps: Fps,
    duration_secs: f64,
    layers: Vec<Layer>,
}

impl Timeline {
    pub fn new(canvas: Canvas, fps: Fps, duration_secs: f64) -> FactReelResult<Self> {
        canvas.validate()?;
        if !duration_secs.is_finite() || duration_secs <= 0.0 {
            return Err(FactReelError::validation(
                "timeline duration must be finite and > 0",
            ));
        }
        Ok(Self {
            canvas,
            fps,
            duration_secs,
            layers: Vec::new(),
        })
    }

    /// Add `layer` on top of the current stack.
    pub fn push_layer(&mut self, layer: Layer) -> FactReelResult<()> {
        if let LayerContent::Raster(px) = &layer.content
            && px.len() != self.canvas.rgba_len()
        {
            return Err(FactReelError::validation(format!(
                "layer '{}' raster has {} bytes, expected {}",
                layer.name,
                px.len(),
                self.canvas.rgba_len()
            )));
        }
        if !layer.duration_secs.is_finite() || layer.duration_secs <= 0.0 {
            return Err(FactReelError::validation(format!(
                "layer '{}' duration must be finite and > 0",
                layer.name
            )));
        }
        self.layers.push(layer);
        Ok(())
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn fps(&self) -> Fps {
        self.fps
    }

    pub fn duration_secs(&self) -> f64 {
        self.duration_secs
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn frame_count(&self) -> u64 {
        self.fps.secs_to_frames_round(self.duration_secs)
    }

    /// Compose frame `idx` into a new buffer.
    pub fn render_frame(&self, idx: FrameIndex) -> FactReelResult<FrameRGBA> {
        let mut frame = FrameRGBA::filled(self.canvas.width, self.canvas.height, [0, 0, 0, 0]);
        self.render_into(idx, &mut frame)?;
        Ok(frame)
    }

    /// Compose frame `idx` into `frame`, which must match the canvas size.
    pub fn render_into(&self, idx: FrameIndex, frame: &mut FrameRGBA) -> FactReelResult<()> {
        if frame.width != self.canvas.width || frame.height != self.canvas.height {
            return Err(FactReelError::validation("frame size does not match canvas"));
        }
        frame.data.fill(0);

        let t = self.fps.frames_to_secs(idx.0);
        for layer in &self.layers {
            let Some(opacity) = layer.opacity_at(t) else {
                continue;
            };
            match &layer.content {
                LayerContent::Solid(c) if c.a == 255 && opacity >= 1.0 => {
                    let px = c.to_array();
                    for d in frame.data.chunks_exact_mut(4) {
                        d.copy_from_slice(&px);
                    }
                }
                LayerContent::Solid(c) => {
                    let px = c.to_array();
                    for d in frame.data.chunks_exact_mut(4) {
                        premul_over_in_place_opacity(d, &px, opacity)?;
                    }
                }
                LayerContent::Raster(px) => {
                    premul_over_in_place_opacity(&mut frame.data, px, opacity)?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/layer.rs"]
mod tests;
