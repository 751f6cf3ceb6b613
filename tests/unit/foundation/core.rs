use super::*;

#[test]
fn fps_rejects_zero_parts() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(60, 0).is_err());
    assert!(Fps::whole(60).is_ok());
}

#[test]
fn fps_converts_between_frames_and_seconds() {
    let fps = Fps::whole(60).unwrap();
    assert_eq!(fps.secs_to_frames_round(10.0), 600);
    assert!((fps.frames_to_secs(30) - 0.5).abs() < 1e-12);

    let ntsc = Fps::new(30_000, 1001).unwrap();
    assert_eq!(ntsc.secs_to_frames_round(10.0), 300);
}

#[test]
fn canvas_validation_rejects_empty_and_oversized() {
    assert!(Canvas { width: 0, height: 10 }.validate().is_err());
    assert!(Canvas { width: 70_000, height: 10 }.validate().is_err());
    assert!(Canvas::default().validate().is_ok());
    assert_eq!(Canvas::default().rgba_len(), 1080 * 1920 * 4);
}

#[test]
fn solid_colors_are_opaque() {
    assert_eq!(Rgba8Premul::BLACK.to_array(), [0, 0, 0, 255]);
    assert_eq!(Rgba8Premul::WHITE.to_array(), [255, 255, 255, 255]);
}
