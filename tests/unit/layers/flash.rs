use super::*;

use crate::foundation::core::{Canvas, Fps, FrameIndex};

fn ctx(frame: u64) -> FrameCtx {
    FrameCtx {
        frame: FrameIndex(frame),
        fps: Fps::new(30, 1).unwrap(),
        canvas: Canvas::new(1920, 1080).unwrap(),
    }
}

fn beats() -> BeatTimeline {
    BeatTimeline::new(vec![1.0, 2.0]).unwrap()
}

#[test]
fn peaks_exactly_on_a_beat() {
    let layer = FlashLayer::new(FlashConfig::default()).unwrap();
    let recs = layer.eval_frame(ctx(30), &beats());
    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0].element, Element::Flash);
    assert_eq!(recs[0].get_num("intensity"), Some(1.0));
    assert!((recs[0].get_num("opacity").unwrap() - 0.15).abs() < 1e-12);
    // 0.15 * 255 = 38.25 -> 0x26
    assert_eq!(recs[0].get_text("color"), Some("#FFFFFF26"));
}

#[test]
fn fades_out_within_an_eighth_of_a_second() {
    let layer = FlashLayer::new(FlashConfig::default()).unwrap();
    let one_frame_after = layer.eval_frame(ctx(31), &beats());
    let i = one_frame_after[0].get_num("intensity").unwrap();
    assert!((i - (1.0 - 8.0 / 30.0)).abs() < 1e-9, "{i}");

    let gone = layer.eval_frame(ctx(34), &beats());
    assert_eq!(gone[0].get_num("intensity"), Some(0.0));
    assert_eq!(gone[0].get_text("color"), Some("#FFFFFF00"));
}

#[test]
fn silent_before_the_first_beat() {
    let layer = FlashLayer::new(FlashConfig::default()).unwrap();
    let recs = layer.eval_frame(ctx(0), &beats());
    assert_eq!(recs[0].get_num("opacity"), Some(0.0));
}

#[test]
fn rejects_out_of_range_opacity_and_bad_decay() {
    let bad = FlashConfig {
        max_opacity: 1.5,
        ..FlashConfig::default()
    };
    assert!(FlashLayer::new(bad).is_err());
    let bad = FlashConfig {
        decay_rate: 0.0,
        ..FlashConfig::default()
    };
    assert!(FlashLayer::new(bad).is_err());
}
