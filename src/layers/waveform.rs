//! Closed circular waveform: every sample point ripples radially with two harmonics.

use std::f64::consts::TAU;

use crate::animation::signal::{Harmonic, Wave, harmonic_sum, lift};
use crate::beat::envelope::BeatEnvelope;
use crate::beat::timeline::BeatTimeline;
use crate::field::cache::FieldCache;
use crate::field::generator::EntityField;
use crate::field::spec::FieldSpec;
use crate::foundation::color::Color;
use crate::foundation::core::{FrameCtx, Point};
use crate::foundation::error::{BeatfxError, BeatfxResult};
use crate::layers::record::{Element, PathGeometry, RenderRecord};
use crate::layers::{FrameEvaluator, validate_count};

pub const FIELDS: [FieldSpec; 6] = [
    FieldSpec::affine("f1", 1.5, 3.0),
    FieldSpec::affine("f2", 0.5, 2.0),
    FieldSpec::affine("p1", 0.0, TAU),
    FieldSpec::affine("p2", 0.0, TAU),
    FieldSpec::affine("a1", 0.3, 0.7),
    FieldSpec::affine("a2", 0.1, 0.3),
];

const F1: usize = 0;
const F2: usize = 1;
const P1: usize = 2;
const P2: usize = 3;
const A1: usize = 4;
const A2: usize = 5;

/// Lobes per revolution of each harmonic.
const LOBES: [f64; 2] = [3.0, 5.0];
const BASE_DISPLACEMENT_PX: f64 = 25.0;
const BEAT_DISPLACEMENT_PX: f64 = 45.0;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WaveformCircleConfig {
    /// Sample points around the circle.
    pub points: usize,
    pub radius: f64,
    /// Gradient `[start, end]`.
    pub colors: [Color; 2],
    pub cx: f64,
    pub cy: f64,
    pub seed: String,
    pub decay_rate: f64,
}

impl Default for WaveformCircleConfig {
    fn default() -> Self {
        Self {
            points: 64,
            radius: 180.0,
            colors: [Color::rgb(0x4C, 0xC9, 0xF0), Color::rgb(0x72, 0x09, 0xB7)],
            cx: 960.0,
            cy: 540.0,
            seed: "waveform".to_owned(),
            decay_rate: 3.0,
        }
    }
}

impl WaveformCircleConfig {
    pub fn validate(&self) -> BeatfxResult<()> {
        validate_count("waveform_circle points", self.points)?;
        for (name, v) in [("radius", self.radius), ("cx", self.cx), ("cy", self.cy)] {
            if !v.is_finite() {
                return Err(BeatfxError::configuration(format!(
                    "waveform_circle {name} must be finite, got {v}"
                )));
            }
        }
        BeatEnvelope::new(self.decay_rate).map(|_| ())
    }
}

/// Closed outline for one frame: `points + 1` vertices, the last repeating the first.
pub fn waveform_path(
    field: &EntityField,
    t: f64,
    intensity: f64,
    center: Point,
    radius: f64,
) -> PathGeometry {
    let n = field.len();
    if n == 0 {
        return PathGeometry::default();
    }
    let gain = lift(BASE_DISPLACEMENT_PX, intensity, BEAT_DISPLACEMENT_PX);
    let points = (0..=n)
        .map(|i| {
            let idx = i % n;
            let angle = (idx as f64 / n as f64) * TAU;
            let hs = [
                Harmonic::new(
                    Wave::Sine,
                    field.at(idx, A1),
                    field.at(idx, F1),
                    field.at(idx, P1),
                )
                .with_spatial(LOBES[0]),
                Harmonic::new(
                    Wave::Cosine,
                    field.at(idx, A2),
                    field.at(idx, F2),
                    field.at(idx, P2),
                )
                .with_spatial(LOBES[1]),
            ];
            let r = radius + harmonic_sum(&hs, t, angle) * gain;
            Point::new(center.x + angle.cos() * r, center.y + angle.sin() * r)
        })
        .collect();
    PathGeometry::new(points)
}

pub fn eval_waveform_circle(
    ctx: FrameCtx,
    field: &EntityField,
    beats: &BeatTimeline,
    cfg: &WaveformCircleConfig,
    envelope: &BeatEnvelope,
) -> Vec<RenderRecord> {
    if !field.has_columns(&FIELDS) {
        tracing::warn!("waveform field has unexpected columns; emitting nothing");
        return Vec::new();
    }
    if field.is_empty() {
        return Vec::new();
    }
    let t = ctx.time_secs();
    let intensity = envelope.evaluate(beats, t);
    let path = waveform_path(field, t, intensity, Point::new(cfg.cx, cfg.cy), cfg.radius);
    let [start, end] = cfg.colors;

    vec![
        RenderRecord::new(Element::Waveform, 0)
            .text("d", path.to_svg_d())
            .points("points", path.points)
            .num("fill_opacity", lift(0.08, intensity, 0.12))
            .num("stroke_width", lift(2.0, intensity, 2.0))
            .num("opacity", lift(0.7, intensity, 0.3))
            .num("glow", lift(8.0, intensity, 16.0))
            .color("color_start", start)
            .color("color_end", end),
    ]
}

#[derive(Clone, Debug)]
pub struct WaveformCircleLayer {
    cfg: WaveformCircleConfig,
    envelope: BeatEnvelope,
    cache: FieldCache,
}

impl WaveformCircleLayer {
    pub fn new(cfg: WaveformCircleConfig) -> BeatfxResult<Self> {
        cfg.validate()?;
        let envelope = BeatEnvelope::new(cfg.decay_rate)?;
        Ok(Self {
            cfg,
            envelope,
            cache: FieldCache::new(),
        })
    }

    pub fn config(&self) -> &WaveformCircleConfig {
        &self.cfg
    }
}

impl FrameEvaluator for WaveformCircleLayer {
    fn eval_frame(&self, ctx: FrameCtx, beats: &BeatTimeline) -> Vec<RenderRecord> {
        let field =
            self.cache
                .get_or_generate(self.cfg.points, &self.cfg.seed, &FIELDS, ctx.canvas);
        eval_waveform_circle(ctx, &field, beats, &self.cfg, &self.envelope)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layers/waveform.rs"]
mod tests;
