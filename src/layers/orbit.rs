//! Dots circling concentric rings, alternating direction per ring.

use std::f64::consts::TAU;

use crate::animation::signal::{boost, lift};
use crate::beat::envelope::BeatEnvelope;
use crate::beat::timeline::BeatTimeline;
use crate::field::cache::FieldCache;
use crate::field::generator::EntityField;
use crate::field::spec::FieldSpec;
use crate::foundation::color::Color;
use crate::foundation::core::FrameCtx;
use crate::foundation::error::{BeatfxError, BeatfxResult};
use crate::layers::record::{Element, RenderRecord};
use crate::layers::{FrameEvaluator, palette_color, validate_count, validate_palette};

pub const FIELDS: [FieldSpec; 2] = [
    FieldSpec::affine("spd", 0.3, 0.6),
    FieldSpec::affine("sz", 3.0, 5.0),
];

const SPEED: usize = 0;
const SIZE: usize = 1;

const RADIUS_PUNCH_PX: f64 = 20.0;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OrbitDotsConfig {
    pub dots_per_ring: usize,
    pub rings: usize,
    pub colors: Vec<Color>,
    pub cx: f64,
    pub cy: f64,
    pub base_radius: f64,
    /// Radial distance between consecutive rings.
    pub ring_spacing: f64,
    pub seed: String,
    pub decay_rate: f64,
}

impl Default for OrbitDotsConfig {
    fn default() -> Self {
        Self {
            dots_per_ring: 12,
            rings: 3,
            colors: vec![
                Color::rgb(0xF7, 0x25, 0x85),
                Color::rgb(0x4C, 0xC9, 0xF0),
                Color::rgb(0x72, 0x09, 0xB7),
                Color::rgb(0x43, 0x61, 0xEE),
            ],
            cx: 960.0,
            cy: 540.0,
            base_radius: 260.0,
            ring_spacing: 50.0,
            seed: "orbit".to_owned(),
            decay_rate: 3.0,
        }
    }
}

impl OrbitDotsConfig {
    pub fn dot_count(&self) -> usize {
        self.rings.saturating_mul(self.dots_per_ring)
    }

    pub fn validate(&self) -> BeatfxResult<()> {
        validate_count("orbit_dots rings * dots_per_ring", self.dot_count())?;
        validate_palette("orbit_dots", &self.colors)?;
        for (name, v) in [
            ("cx", self.cx),
            ("cy", self.cy),
            ("base_radius", self.base_radius),
            ("ring_spacing", self.ring_spacing),
        ] {
            if !v.is_finite() {
                return Err(BeatfxError::configuration(format!(
                    "orbit_dots {name} must be finite, got {v}"
                )));
            }
        }
        BeatEnvelope::new(self.decay_rate).map(|_| ())
    }
}

/// Dot records for a pre-generated field laid out ring-major (`idx = ring * per_ring + d`).
pub fn eval_orbit_dots(
    ctx: FrameCtx,
    field: &EntityField,
    beats: &BeatTimeline,
    cfg: &OrbitDotsConfig,
    envelope: &BeatEnvelope,
) -> Vec<RenderRecord> {
    if !field.has_columns(&FIELDS) {
        tracing::warn!("orbit dots field has unexpected columns; emitting nothing");
        return Vec::new();
    }
    let per_ring = cfg.dots_per_ring;
    if per_ring == 0 {
        return Vec::new();
    }
    let t = ctx.time_secs();
    let pulse = envelope.evaluate(beats, t);
    let opacity = lift(0.6, pulse, 0.4);
    let glow = lift(6.0, pulse, 10.0);

    field
        .rows()
        .map(|e| {
            let ring = e.index / per_ring;
            let d = e.index % per_ring;
            let direction = if ring % 2 == 0 { 1.0 } else { -1.0 };
            let base_angle = (d as f64 / per_ring as f64) * TAU;
            let angle = base_angle + t * e.at(SPEED) * direction;
            let orbit_radius = cfg.base_radius + ring as f64 * cfg.ring_spacing;
            let radius = orbit_radius + pulse * RADIUS_PUNCH_PX;
            RenderRecord::new(Element::Dot, e.index)
                .num("x", cfg.cx + angle.cos() * radius)
                .num("y", cfg.cy + angle.sin() * radius)
                .num("size", boost(e.at(SIZE), pulse, 0.5))
                .num("ring", ring as f64)
                .num("angle", angle)
                .num("glow", glow)
                .num("opacity", opacity)
                .color("color", palette_color(&cfg.colors, e.index))
        })
        .collect()
}

#[derive(Clone, Debug)]
pub struct OrbitDotsLayer {
    cfg: OrbitDotsConfig,
    envelope: BeatEnvelope,
    cache: FieldCache,
}

impl OrbitDotsLayer {
    pub fn new(cfg: OrbitDotsConfig) -> BeatfxResult<Self> {
        cfg.validate()?;
        let envelope = BeatEnvelope::new(cfg.decay_rate)?;
        Ok(Self {
            cfg,
            envelope,
            cache: FieldCache::new(),
        })
    }

    pub fn config(&self) -> &OrbitDotsConfig {
        &self.cfg
    }
}

impl FrameEvaluator for OrbitDotsLayer {
    fn eval_frame(&self, ctx: FrameCtx, beats: &BeatTimeline) -> Vec<RenderRecord> {
        let field = self.cache.get_or_generate(
            self.cfg.dot_count(),
            &self.cfg.seed,
            &FIELDS,
            ctx.canvas,
        );
        eval_orbit_dots(ctx, &field, beats, &self.cfg, &self.envelope)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layers/orbit.rs"]
mod tests;
