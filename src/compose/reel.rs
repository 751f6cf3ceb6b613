use std::path::{Path, PathBuf};

use rand::SeedableRng as _;
use rand::rngs::StdRng;

use crate::assets::media::{AudioPcm, MIX_SAMPLE_RATE};
use crate::audio::select::{AudioPlacement, AudioSelection, choose_audio};
use crate::audio::track::{prepare_audio_track, write_pcm_f32le};
use crate::compose::frame::{FrameRGBA, rgb_to_opaque_rgba};
use crate::compose::layer::{Fade, Layer, Timeline};
use crate::encode::ffmpeg::FfmpegSink;
use crate::encode::sink::{AudioInputConfig, FrameSink, SinkConfig};
use crate::foundation::core::{Canvas, Fps, FrameIndex, Rgba8Premul};
use crate::foundation::error::{FactReelError, FactReelResult};
use crate::naming::unique_path;
use crate::text::engine::TextLayoutEngine;
use crate::text::raster::{FactImageOpts, TitleOpts, render_fact_image_with, render_title_layer};

/// Parameters of one fact reel.
#[derive(Clone, Debug)]
pub struct ReelOpts {
    pub canvas: Canvas,
    pub fps: Fps,
    pub duration_secs: f64,
    /// Fade-in and fade-out length of the fact and title layers.
    pub fade_secs: f64,
    /// Fade-out length at the end of the music.
    pub audio_fade_out_secs: f64,
    pub background: Rgba8Premul,
    /// Fact text styling; its canvas is replaced by [`ReelOpts::canvas`].
    pub fact: FactImageOpts,
    pub title: TitleOpts,
    pub audio_placement: AudioPlacement,
    /// Seed for music choice and offset; OS entropy when `None`.
    pub seed: Option<u64>,
}

impl Default for ReelOpts {
    fn default() -> Self {
        Self {
            canvas: Canvas::default(),
            fps: Fps { num: 60, den: 1 },
            duration_secs: 10.0,
            fade_secs: 1.0,
            audio_fade_out_secs: 1.0,
            background: Rgba8Premul::BLACK,
            fact: FactImageOpts::default(),
            title: TitleOpts::default(),
            audio_placement: AudioPlacement::default(),
            seed: None,
        }
    }
}

impl ReelOpts {
    /// Check the parameters the timeline itself does not see.
    pub fn validate(&self) -> FactReelResult<()> {
        // The encoder takes opaque frames only.
        if self.background.a != 255 {
            return Err(FactReelError::validation("reel background must be opaque"));
        }
        for (name, secs) in [
            ("fade_secs", self.fade_secs),
            ("audio_fade_out_secs", self.audio_fade_out_secs),
        ] {
            if !secs.is_finite() || secs < 0.0 {
                return Err(FactReelError::validation(format!(
                    "{name} must be finite and >= 0"
                )));
            }
        }
        Ok(())
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

/// A fully prepared reel: visual timeline plus optional music track.
#[derive(Debug)]
pub struct Reel {
    pub timeline: Timeline,
    pub audio: Option<AudioPcm>,
    pub selection: Option<AudioSelection>,
}

/// Build the background, fact and title layers (bottom to top) for `fact`.
#[tracing::instrument(skip_all)]
pub fn build_timeline(
    engine: &mut TextLayoutEngine,
    fact: &str,
    opts: &ReelOpts,
) -> FactReelResult<Timeline> {
    opts.validate()?;
    let mut timeline = Timeline::new(opts.canvas, opts.fps, opts.duration_secs)?;
    let fade = Fade::symmetric(opts.fade_secs);

    timeline.push_layer(Layer::solid(
        "background",
        opts.background,
        opts.duration_secs,
    ))?;

    let fact_opts = FactImageOpts {
        canvas: opts.canvas,
        ..opts.fact.clone()
    };
    let fact_img = render_fact_image_with(engine, fact, &fact_opts)?;
    timeline.push_layer(
        Layer::raster("fact", rgb_to_opaque_rgba(&fact_img), opts.duration_secs).with_fade(fade),
    )?;

    let title_px = render_title_layer(engine, opts.canvas, &opts.title)?;
    timeline.push_layer(Layer::raster("title", title_px, opts.duration_secs).with_fade(fade))?;

    Ok(timeline)
}

/// Prepare everything needed to encode a reel, without touching the output location.
///
/// With `audio_dir` set, a directory holding no `.mp3`/`.wav` files is an error.
pub fn compose_reel(
    fact: &str,
    audio_dir: Option<&Path>,
    opts: &ReelOpts,
) -> FactReelResult<Reel> {
    opts.validate()?;
    let mut engine = TextLayoutEngine::from_font_path(&opts.fact.font_path)?;
    let timeline = build_timeline(&mut engine, fact, opts)?;

    let (audio, selection) = match audio_dir {
        Some(dir) => {
            let mut rng = opts.rng();
            let selection = choose_audio(dir, opts.duration_secs, opts.audio_placement, &mut rng)?;
            let pcm = prepare_audio_track(
                &selection,
                opts.duration_secs,
                opts.audio_fade_out_secs,
                MIX_SAMPLE_RATE,
            )?;
            (Some(pcm), Some(selection))
        }
        None => (None, None),
    };

    Ok(Reel {
        timeline,
        audio,
        selection,
    })
}

impl Reel {
    /// Stream every frame (and the music, if any) into `sink`. Returns the frame count.
    pub fn render(&self, sink: &mut dyn FrameSink) -> FactReelResult<u64> {
        let mut audio_tmp = TempFileGuard(None);
        let audio_cfg = match self.audio.as_ref() {
            Some(pcm) => {
                let path = std::env::temp_dir().join(format!(
                    "factreel_audio_{}_{}.f32le",
                    std::process::id(),
                    std::time::SystemTime::now()
                        .duration_since(std::time::UNIX_EPOCH)
                        .map(|d| d.as_nanos())
                        .unwrap_or(0)
                ));
                write_pcm_f32le(&pcm.interleaved_f32, &path)?;
                audio_tmp.0 = Some(path.clone());
                Some(AudioInputConfig {
                    path,
                    sample_rate: pcm.sample_rate,
                    channels: pcm.channels,
                })
            }
            None => None,
        };

        render_timeline(&self.timeline, audio_cfg, sink)
    }
}

/// Push all frames of `timeline` through `sink` in order.
pub fn render_timeline(
    timeline: &Timeline,
    audio: Option<AudioInputConfig>,
    sink: &mut dyn FrameSink,
) -> FactReelResult<u64> {
    let canvas = timeline.canvas();
    sink.begin(SinkConfig {
        width: canvas.width,
        height: canvas.height,
        fps: timeline.fps(),
        audio,
    })?;

    let frames = timeline.frame_count();
    let mut frame = FrameRGBA::filled(canvas.width, canvas.height, [0, 0, 0, 0]);
    let pushed = (0..frames).try_for_each(|i| {
        timeline.render_into(FrameIndex(i), &mut frame)?;
        sink.push_frame(FrameIndex(i), &frame)
    });
    if let Err(e) = pushed {
        // Let the sink release its resources; the first error is the one reported.
        let _ = sink.end();
        return Err(e);
    }
    sink.end()?;
    Ok(frames)
}

/// Compose the fact reel and encode it to the first free path derived from `output_path`.
///
/// Returns the path actually written. On failure any partial output of this run is removed; a
/// file created meanwhile by someone else at the same path is left alone.
#[tracing::instrument(skip(fact, opts), fields(out = %output_path.display()))]
pub fn create_fact_video(
    fact: &str,
    output_path: &Path,
    audio_dir: Option<&Path>,
    opts: &ReelOpts,
) -> FactReelResult<PathBuf> {
    let reel = compose_reel(fact, audio_dir, opts)?;

    let out = unique_path(output_path);
    let mut sink = FfmpegSink::new(&out);

    match reel.render(&mut sink) {
        Ok(frames) => {
            tracing::info!(out = %out.display(), frames, audio = reel.audio.is_some(), "wrote reel");
            Ok(out)
        }
        Err(e) => {
            if !sink.owns_output() && out.exists() {
                tracing::warn!(out = %out.display(), "output path was taken before encoding started");
            }
            sink.discard_output();
            Err(e)
        }
    }
}

struct TempFileGuard(Option<PathBuf>);

impl Drop for TempFileGuard {
    fn drop(&mut self) {
        if let Some(path) = self.0.take() {
            let _ = std::fs::remove_file(path);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/reel.rs"]
mod tests;
