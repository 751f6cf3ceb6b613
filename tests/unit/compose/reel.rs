use super::*;
use crate::encode::sink::InMemorySink;
use crate::foundation::error::FactReelError;
use crate::test_support::system_font;

fn small_opts(font: PathBuf) -> ReelOpts {
    let mut opts = ReelOpts {
        canvas: Canvas {
            width: 216,
            height: 384,
        },
        fps: Fps::whole(10).unwrap(),
        duration_secs: 2.0,
        ..ReelOpts::default()
    };
    opts.fact.font_path = font;
    opts.fact.font_size_px = 12.0;
    opts.fact.padding_x = 20;
    opts.title.font_size_px = 14.0;
    opts.title.top = 20;
    opts.title.box_height = 20;
    opts
}

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("factreel_reel_{name}_{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

struct FailingSink {
    fail_at: u64,
    ended: bool,
}

impl FrameSink for FailingSink {
    fn begin(&mut self, _cfg: SinkConfig) -> FactReelResult<()> {
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, _frame: &FrameRGBA) -> FactReelResult<()> {
        if idx.0 == self.fail_at {
            return Err(FactReelError::evaluation("disk full"));
        }
        Ok(())
    }

    fn end(&mut self) -> FactReelResult<()> {
        self.ended = true;
        Ok(())
    }
}

#[test]
fn defaults_describe_a_ten_second_portrait_reel() {
    let opts = ReelOpts::default();
    assert_eq!((opts.canvas.width, opts.canvas.height), (1080, 1920));
    assert_eq!(opts.fps.as_f64(), 60.0);
    assert_eq!(opts.duration_secs, 10.0);
    assert_eq!(opts.fade_secs, 1.0);
    assert_eq!(opts.title.text, "Random Fact");
    assert_eq!(opts.audio_placement, AudioPlacement::RandomOffset);
}

#[test]
fn render_timeline_pushes_every_frame_in_order() {
    let canvas = Canvas {
        width: 8,
        height: 8,
    };
    let mut tl = Timeline::new(canvas, Fps::whole(30).unwrap(), 1.0).unwrap();
    tl.push_layer(Layer::solid("bg", Rgba8Premul::BLACK, 1.0))
        .unwrap();

    let mut sink = InMemorySink::new();
    let n = render_timeline(&tl, None, &mut sink).unwrap();

    assert_eq!(n, 30);
    assert!(sink.is_ended());
    assert_eq!(sink.frames().len(), 30);
    let cfg = sink.config().unwrap();
    assert_eq!((cfg.width, cfg.height), (8, 8));
    assert!(cfg.audio.is_none());
    for (i, (idx, _)) in sink.frames().iter().enumerate() {
        assert_eq!(idx.0, i as u64);
    }
}

#[test]
fn render_timeline_stops_at_first_sink_error_and_ends_sink() {
    let canvas = Canvas {
        width: 4,
        height: 4,
    };
    let tl = Timeline::new(canvas, Fps::whole(10).unwrap(), 1.0).unwrap();
    let mut sink = FailingSink {
        fail_at: 3,
        ended: false,
    };
    let err = render_timeline(&tl, None, &mut sink).unwrap_err();
    assert!(err.to_string().contains("disk full"));
    assert!(sink.ended);
}

#[test]
fn translucent_background_is_rejected_up_front() {
    let dir = scratch_dir("translucent");
    let opts = ReelOpts {
        background: Rgba8Premul {
            r: 0,
            g: 0,
            b: 0,
            a: 128,
        },
        ..ReelOpts::default()
    };
    let out = dir.join("reel.mp4");

    let err = create_fact_video("x", &out, None, &opts).unwrap_err();
    assert!(matches!(err, FactReelError::Validation(_)), "{err}");
    assert!(!out.exists());
}

#[test]
fn failed_run_leaves_existing_videos_untouched() {
    let dir = scratch_dir("keep");
    let out = dir.join("reel.mp4");
    std::fs::write(&out, b"yesterday").unwrap();
    let mut opts = ReelOpts::default();
    opts.fact.font_path = dir.join("missing.ttf");

    assert!(create_fact_video("x", &out, None, &opts).is_err());
    assert_eq!(std::fs::read(&out).unwrap(), b"yesterday");
    assert!(!dir.join("reel_1.mp4").exists());
}

#[test]
fn missing_font_fails_before_any_output() {
    let dir = scratch_dir("nofont");
    let mut opts = ReelOpts::default();
    opts.fact.font_path = dir.join("missing.ttf");
    let out = dir.join("videos").join("reel.mp4");

    assert!(create_fact_video("x", &out, None, &opts).is_err());
    assert!(!out.exists());
}

#[test]
fn build_timeline_stacks_background_fact_title() {
    let Some(font) = system_font() else {
        eprintln!("skipping: no system font found");
        return;
    };
    let opts = small_opts(font);
    let mut engine = TextLayoutEngine::from_font_path(&opts.fact.font_path).unwrap();
    let tl = build_timeline(&mut engine, "The sky is blue.", &opts).unwrap();

    let names: Vec<&str> = tl.layers().iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, vec!["background", "fact", "title"]);
    assert_eq!(tl.layers()[1].fade, Fade::symmetric(1.0));
    assert_eq!(tl.frame_count(), 20);

    // First frame is fully faded out: only the black background shows.
    let first = tl.render_frame(FrameIndex(0)).unwrap();
    assert!(first.data.chunks_exact(4).all(|px| px == [0, 0, 0, 255]));

    // Mid-reel, white text pixels are present.
    let mid = tl.render_frame(FrameIndex(10)).unwrap();
    assert!(mid.data.chunks_exact(4).any(|px| px[0] > 200));
}

#[test]
fn text_only_audio_directory_fails_selection() {
    let Some(font) = system_font() else {
        eprintln!("skipping: no system font found");
        return;
    };
    let dir = scratch_dir("txtonly");
    let music = dir.join("music");
    std::fs::create_dir_all(&music).unwrap();
    std::fs::write(music.join("lyrics.txt"), b"la la").unwrap();
    let out = dir.join("videos").join("2024-01-01_daily_fact.mp4");

    let opts = small_opts(font);
    let err = create_fact_video("The sky is blue.", &out, Some(&music), &opts).unwrap_err();
    assert!(matches!(err, FactReelError::Validation(_)), "{err}");
    assert!(!out.exists());
}

#[test]
fn reel_without_music_renders_into_memory() {
    let Some(font) = system_font() else {
        eprintln!("skipping: no system font found");
        return;
    };
    let opts = small_opts(font);
    let reel = compose_reel("Octopuses have three hearts.", None, &opts).unwrap();
    assert!(reel.audio.is_none());
    assert!(reel.selection.is_none());

    let mut sink = InMemorySink::keeping_every(5);
    let n = reel.render(&mut sink).unwrap();
    assert_eq!(n, 20);
    assert_eq!(sink.pushed(), 20);
    assert_eq!(sink.frames().len(), 4);
}
