//! Soft, blurred shapes drifting on Lissajous-like paths, nudged by beats.

use std::f64::consts::TAU;

use crate::animation::signal::{boost, lift};
use crate::beat::envelope::BeatEnvelope;
use crate::beat::timeline::BeatTimeline;
use crate::field::cache::FieldCache;
use crate::field::generator::EntityField;
use crate::field::spec::FieldSpec;
use crate::foundation::color::Color;
use crate::foundation::core::FrameCtx;
use crate::foundation::error::BeatfxResult;
use crate::layers::record::{Element, RenderRecord};
use crate::layers::{FrameEvaluator, palette_color, validate_count, validate_palette};

pub const FIELDS: [FieldSpec; 7] = [
    FieldSpec::canvas_x("x"),
    FieldSpec::canvas_y("y"),
    FieldSpec::affine("sz", 30.0, 100.0),
    FieldSpec::affine("spd", 0.2, 0.5),
    FieldSpec::affine("ph", 0.0, TAU),
    FieldSpec::bucket("tp", 3),
    FieldSpec::affine("rot", -20.0, 40.0),
];

const X: usize = 0;
const Y: usize = 1;
const SIZE: usize = 2;
const SPEED: usize = 3;
const PHASE: usize = 4;
const TYPE: usize = 5;
const ROT: usize = 6;

const DRIFT_X_PX: f64 = 40.0;
const DRIFT_Y_PX: f64 = 30.0;
const DRIFT_Y_SPEED: f64 = 0.7;
const ROTATION_PER_FRAME: f64 = 0.05;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    Circle,
    Diamond,
    Triangle,
}

impl ShapeKind {
    pub fn from_tag(tag: f64) -> Self {
        match tag as i64 {
            1 => Self::Diamond,
            2 => Self::Triangle,
            _ => Self::Circle,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Circle => "circle",
            Self::Diamond => "diamond",
            Self::Triangle => "triangle",
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FloatingShapesConfig {
    pub count: usize,
    pub colors: Vec<Color>,
    pub seed: String,
    pub decay_rate: f64,
}

impl Default for FloatingShapesConfig {
    fn default() -> Self {
        Self {
            count: 8,
            colors: vec![
                Color::rgb(0xF7, 0x25, 0x85),
                Color::rgb(0x72, 0x09, 0xB7),
                Color::rgb(0x3A, 0x0C, 0xA3),
                Color::rgb(0x43, 0x61, 0xEE),
                Color::rgb(0x4C, 0xC9, 0xF0),
            ],
            seed: "shapes".to_owned(),
            decay_rate: 3.0,
        }
    }
}

impl FloatingShapesConfig {
    pub fn validate(&self) -> BeatfxResult<()> {
        validate_count("floating_shapes count", self.count)?;
        validate_palette("floating_shapes", &self.colors)?;
        BeatEnvelope::new(self.decay_rate).map(|_| ())
    }
}

/// Per-frame shape parameters for a pre-generated field.
pub fn eval_floating_shapes(
    ctx: FrameCtx,
    field: &EntityField,
    beats: &BeatTimeline,
    cfg: &FloatingShapesConfig,
    envelope: &BeatEnvelope,
) -> Vec<RenderRecord> {
    if !field.has_columns(&FIELDS) {
        tracing::warn!("floating shapes field has unexpected columns; emitting nothing");
        return Vec::new();
    }
    let t = ctx.time_secs();
    let frame = ctx.frame.0 as f64;
    let pulse = envelope.evaluate(beats, t);
    let scale = boost(1.0, pulse, 0.15);
    let opacity = lift(0.06, pulse, 0.04);

    field
        .rows()
        .map(|e| {
            let speed = e.at(SPEED);
            let phase = e.at(PHASE);
            let size = e.at(SIZE);
            let x = e.at(X) + (t * speed + phase).sin() * DRIFT_X_PX;
            let y = e.at(Y) + (t * speed * DRIFT_Y_SPEED + phase).cos() * DRIFT_Y_PX;
            RenderRecord::new(Element::Shape, e.index)
                .num("x", x)
                .num("y", y)
                .num("size", size)
                .num("rotation_deg", frame * e.at(ROT) * ROTATION_PER_FRAME)
                .num("scale", scale)
                .num("opacity", opacity)
                .num("blur", 20.0 + size * 0.3)
                .text("shape", ShapeKind::from_tag(e.at(TYPE)).as_str())
                .color("color", palette_color(&cfg.colors, e.index))
        })
        .collect()
}

#[derive(Clone, Debug)]
pub struct FloatingShapesLayer {
    cfg: FloatingShapesConfig,
    envelope: BeatEnvelope,
    cache: FieldCache,
}

impl FloatingShapesLayer {
    pub fn new(cfg: FloatingShapesConfig) -> BeatfxResult<Self> {
        cfg.validate()?;
        let envelope = BeatEnvelope::new(cfg.decay_rate)?;
        Ok(Self {
            cfg,
            envelope,
            cache: FieldCache::new(),
        })
    }

    pub fn config(&self) -> &FloatingShapesConfig {
        &self.cfg
    }

    pub fn field_cache(&self) -> &FieldCache {
        &self.cache
    }
}

impl FrameEvaluator for FloatingShapesLayer {
    fn eval_frame(&self, ctx: FrameCtx, beats: &BeatTimeline) -> Vec<RenderRecord> {
        let field = self
            .cache
            .get_or_generate(self.cfg.count, &self.cfg.seed, &FIELDS, ctx.canvas);
        eval_floating_shapes(ctx, &field, beats, &self.cfg, &self.envelope)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layers/floating.rs"]
mod tests;
