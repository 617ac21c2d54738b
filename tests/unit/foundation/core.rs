use super::*;

#[test]
fn frame_range_contains_boundaries() {
    let r = FrameRange::new(FrameIndex(2), FrameIndex(5)).unwrap();
    assert!(!r.contains(FrameIndex(1)));
    assert!(r.contains(FrameIndex(2)));
    assert!(r.contains(FrameIndex(4)));
    assert!(!r.contains(FrameIndex(5)));
}

#[test]
fn frame_range_local_is_offset_from_start() {
    let r = FrameRange::new(FrameIndex(10), FrameIndex(20)).unwrap();
    assert_eq!(r.local(FrameIndex(10)), Some(FrameIndex(0)));
    assert_eq!(r.local(FrameIndex(19)), Some(FrameIndex(9)));
    assert_eq!(r.local(FrameIndex(20)), None);
    assert!(FrameRange::new(FrameIndex(3), FrameIndex(2)).is_err());
}

#[test]
fn ntsc_fps_scales_by_den_over_num() {
    let fps = Fps::new(30000, 1001).unwrap();
    assert!((fps.as_f64() - 30000.0 / 1001.0).abs() < 1e-12);
    assert_eq!(fps.frames_to_secs(30000), 1001.0);
    assert!((fps.frames_to_secs(123) - 123.0 * 1001.0 / 30000.0).abs() < 1e-12);
}

#[test]
fn integral_fps_gives_exact_frame_over_fps() {
    let fps = Fps::new(30, 1).unwrap();
    assert_eq!(fps.frames_to_secs(60), 2.0);
    assert_eq!(fps.frames_to_secs(75), 75.0 / 30.0);
    assert_eq!(FrameClock::new(FrameIndex(15), fps).time_secs(), 0.5);
}

#[test]
fn zero_rates_and_canvases_are_rejected() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());
    assert!(Canvas::new(0, 10).is_err());
    assert!(Canvas::new(10, 10).is_ok());
}
