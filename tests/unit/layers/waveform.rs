use super::*;

use crate::foundation::core::{Canvas, Fps, FrameIndex};

fn ctx(frame: u64) -> FrameCtx {
    FrameCtx {
        frame: FrameIndex(frame),
        fps: Fps::new(30, 1).unwrap(),
        canvas: Canvas::new(1920, 1080).unwrap(),
    }
}

#[test]
fn outline_closes_on_its_first_point() {
    let layer = WaveformCircleLayer::new(WaveformCircleConfig::default()).unwrap();
    let recs = layer.eval_frame(ctx(42), &BeatTimeline::empty());
    assert_eq!(recs.len(), 1);
    let pts = recs[0].get_points("points").unwrap();
    assert_eq!(pts.len(), 65);
    assert_eq!(pts[0], pts[64]);
    let d = recs[0].get_text("d").unwrap();
    assert!(d.starts_with("M "));
    assert!(d.ends_with(" Z"));
}

#[test]
fn displacement_grows_on_the_beat() {
    let cfg = WaveformCircleConfig::default();
    let field = EntityField::generate(cfg.points, &cfg.seed, &FIELDS, ctx(0).canvas);
    let center = Point::new(cfg.cx, cfg.cy);
    let max_offset = |intensity: f64| {
        waveform_path(&field, 0.5, intensity, center, cfg.radius)
            .points
            .iter()
            .map(|p| ((p.x - center.x).hypot(p.y - center.y) - cfg.radius).abs())
            .fold(0.0, f64::max)
    };
    let quiet = max_offset(0.0);
    let loud = max_offset(1.0);
    assert!(loud > quiet * 2.0, "quiet {quiet} loud {loud}");
    // a1 + a2 < 1.4 and the gain tops out at 70 px
    assert!(loud <= 1.4 * 70.0);
}

#[test]
fn flat_field_draws_a_circle() {
    let row = vec![1.0, 1.0, 0.0, 0.0, 0.0, 0.0];
    let field = EntityField::from_rows(&FIELDS, vec![row; 8]).unwrap();
    let path = waveform_path(&field, 1.0, 0.5, Point::new(0.0, 0.0), 100.0);
    assert_eq!(path.points.len(), 9);
    for p in &path.points {
        assert!((p.x.hypot(p.y) - 100.0).abs() < 1e-9);
    }
}

#[test]
fn beat_brightens_the_stroke() {
    let layer = WaveformCircleLayer::new(WaveformCircleConfig::default()).unwrap();
    let beats = BeatTimeline::new(vec![1.0]).unwrap();
    let idle = layer.eval_frame(ctx(0), &beats);
    let hit = layer.eval_frame(ctx(30), &beats);
    assert_eq!(idle[0].get_num("stroke_width"), Some(2.0));
    assert_eq!(hit[0].get_num("stroke_width"), Some(4.0));
    assert!((hit[0].get_num("opacity").unwrap() - 1.0).abs() < 1e-12);
    assert_eq!(hit[0].get_text("color_start"), Some("#4CC9F0"));
}

#[test]
fn zero_points_yield_nothing() {
    let cfg = WaveformCircleConfig {
        points: 0,
        ..WaveformCircleConfig::default()
    };
    let layer = WaveformCircleLayer::new(cfg).unwrap();
    assert!(layer.eval_frame(ctx(0), &BeatTimeline::empty()).is_empty());
    assert!(
        waveform_path(&EntityField::empty(&FIELDS), 0.0, 1.0, Point::ZERO, 10.0)
            .points
            .is_empty()
    );
}
