use super::*;

use crate::foundation::core::{Canvas, Fps, FrameIndex};

fn ctx(frame: u64) -> FrameCtx {
    FrameCtx {
        frame: FrameIndex(frame),
        fps: Fps::new(30, 1).unwrap(),
        canvas: Canvas::new(1920, 1080).unwrap(),
    }
}

fn layer() -> PulseRingLayer {
    PulseRingLayer::new(PulseRingConfig::default()).unwrap()
}

#[test]
fn three_rings_with_one_dashed() {
    let recs = layer().eval_frame(ctx(0), &BeatTimeline::empty());
    assert_eq!(recs.len(), 3);
    assert!(recs.iter().all(|r| r.element == Element::Ring));
    assert_eq!(recs[0].get_text("dash"), None);
    assert_eq!(recs[1].get_text("dash"), Some("8 12"));
    assert_eq!(recs[2].get_text("dash"), None);
}

#[test]
fn resting_state_without_beats() {
    let recs = layer().eval_frame(ctx(0), &BeatTimeline::empty());
    assert_eq!(recs[0].get_num("radius"), Some(120.0));
    assert!((recs[0].get_num("opacity").unwrap() - 0.1).abs() < 1e-12);
    assert_eq!(recs[0].get_num("glow"), Some(0.0));
    assert!((recs[2].get_num("radius").unwrap() - 48.0).abs() < 1e-9);
}

#[test]
fn full_swell_on_the_beat() {
    let beats = BeatTimeline::new(vec![2.0]).unwrap();
    let recs = layer().eval_frame(ctx(60), &beats);
    assert!((recs[0].get_num("radius").unwrap() - 192.0).abs() < 1e-9);
    assert!((recs[0].get_num("opacity").unwrap() - 0.9).abs() < 1e-12);
    assert_eq!(recs[0].get_num("glow"), Some(12.0));
    assert!((recs[1].get_num("opacity").unwrap() - 0.54).abs() < 1e-12);
}

#[test]
fn scale_decays_slower_than_opacity() {
    // Square-root shaping keeps the radius wide while the linear opacity falls off.
    let beats = BeatTimeline::new(vec![1.0]).unwrap();
    let recs = layer().eval_frame(ctx(36), &beats);
    let decay: f64 = 1.0 - 0.2 * 3.5;
    let radius = recs[0].get_num("radius").unwrap();
    assert!((radius - 120.0 * (1.0 + 0.6 * decay.sqrt())).abs() < 1e-6, "{radius}");
    let opacity = recs[0].get_num("opacity").unwrap();
    assert!((opacity - 0.5).abs() < 1e-6, "{opacity}");
}

#[test]
fn rings_spin_with_the_frame_counter() {
    let recs = layer().eval_frame(ctx(100), &BeatTimeline::empty());
    assert!((recs[0].get_num("rotation_deg").unwrap() - 30.0).abs() < 1e-9);
    assert!((recs[1].get_num("rotation_deg").unwrap() + 45.0).abs() < 1e-9);
    assert!((recs[2].get_num("rotation_deg").unwrap() - 60.0).abs() < 1e-9);
}

#[test]
fn opacity_breakpoints_must_be_well_formed() {
    let bad = PulseRingConfig {
        opacity_in: vec![0.0, 0.3],
        ..PulseRingConfig::default()
    };
    assert!(PulseRingLayer::new(bad).is_err());
    let bad = PulseRingConfig {
        scale_curve: DecayCurve::Power(-1.0),
        ..PulseRingConfig::default()
    };
    assert!(PulseRingLayer::new(bad).is_err());
}
