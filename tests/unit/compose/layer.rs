use super::*;

const SMALL: Canvas = Canvas {
    width: 4,
    height: 2,
};

fn fps(n: u32) -> Fps {
    Fps::whole(n).unwrap()
}

#[test]
fn symmetric_fade_ramps_in_and_out() {
    let f = Fade::symmetric(1.0);
    assert_eq!(f.opacity_at(0.0, 10.0), 0.0);
    assert!((f.opacity_at(0.5, 10.0) - 0.5).abs() < 1e-6);
    assert_eq!(f.opacity_at(5.0, 10.0), 1.0);
    assert!((f.opacity_at(9.5, 10.0) - 0.5).abs() < 1e-6);
    assert_eq!(f.opacity_at(10.0, 10.0), 0.0);
}

#[test]
fn no_fade_is_fully_opaque() {
    assert_eq!(Fade::NONE.opacity_at(0.0, 10.0), 1.0);
    assert_eq!(Fade::NONE.opacity_at(9.99, 10.0), 1.0);
}

#[test]
fn layer_is_hidden_outside_its_window() {
    let mut l = Layer::solid("bg", Rgba8Premul::WHITE, 2.0);
    l.start_secs = 1.0;
    assert!(l.opacity_at(0.5).is_none());
    assert_eq!(l.opacity_at(1.0), Some(1.0));
    assert!(l.opacity_at(3.0).is_none());
}

#[test]
fn frame_count_follows_fps_and_duration() {
    let tl = Timeline::new(SMALL, fps(60), 10.0).unwrap();
    assert_eq!(tl.frame_count(), 600);
}

#[test]
fn timeline_rejects_bad_duration_and_raster_size() {
    assert!(Timeline::new(SMALL, fps(30), 0.0).is_err());
    let mut tl = Timeline::new(SMALL, fps(30), 1.0).unwrap();
    assert!(tl.push_layer(Layer::raster("x", vec![0; 3], 1.0)).is_err());
    assert!(tl.push_layer(Layer::raster("x", vec![0; 32], 1.0)).is_ok());
}

#[test]
fn layers_stack_bottom_to_top() {
    let mut tl = Timeline::new(SMALL, fps(10), 1.0).unwrap();
    tl.push_layer(Layer::solid("bg", Rgba8Premul::BLACK, 1.0)).unwrap();

    // Opaque red on the left half only.
    let mut raster = vec![0u8; SMALL.rgba_len()];
    for y in 0..2usize {
        for x in 0..2usize {
            let i = (y * 4 + x) * 4;
            raster[i..i + 4].copy_from_slice(&[255, 0, 0, 255]);
        }
    }
    tl.push_layer(Layer::raster("fact", raster, 1.0)).unwrap();

    let frame = tl.render_frame(FrameIndex(5)).unwrap();
    assert_eq!(frame.pixel(0, 0), [255, 0, 0, 255]);
    assert_eq!(frame.pixel(3, 1), [0, 0, 0, 255]);
}

#[test]
fn faded_raster_is_dimmed_over_black() {
    let mut tl = Timeline::new(SMALL, fps(10), 10.0).unwrap();
    tl.push_layer(Layer::solid("bg", Rgba8Premul::BLACK, 10.0)).unwrap();
    tl.push_layer(
        Layer::raster("fact", vec![255; SMALL.rgba_len()], 10.0).with_fade(Fade::symmetric(1.0)),
    )
    .unwrap();

    let first = tl.render_frame(FrameIndex(0)).unwrap();
    assert_eq!(first.pixel(1, 1), [0, 0, 0, 255]);

    let mid_fade = tl.render_frame(FrameIndex(5)).unwrap();
    assert_eq!(mid_fade.pixel(1, 1), [128, 128, 128, 255]);

    let steady = tl.render_frame(FrameIndex(50)).unwrap();
    assert_eq!(steady.pixel(1, 1), [255, 255, 255, 255]);
}

#[test]
fn render_into_rejects_mismatched_frame() {
    let tl = Timeline::new(SMALL, fps(10), 1.0).unwrap();
    let mut wrong = FrameRGBA::filled(2, 2, [0; 4]);
    assert!(tl.render_into(FrameIndex(0), &mut wrong).is_err());
}
