//! Pseudo spectrum bars: each bar is a three-harmonic oscillator punched up by beats.

use std::f64::consts::TAU;

use crate::animation::signal::{Harmonic, Wave, boost_capped, harmonic_sum, lift};
use crate::beat::envelope::BeatEnvelope;
use crate::beat::timeline::BeatTimeline;
use crate::field::cache::FieldCache;
use crate::field::generator::{EntityField, EntityRow};
use crate::field::spec::FieldSpec;
use crate::foundation::color::Color;
use crate::foundation::core::FrameCtx;
use crate::foundation::error::{BeatfxError, BeatfxResult};
use crate::layers::record::{Element, RenderRecord};
use crate::layers::{FrameEvaluator, validate_count};

pub const FIELDS: [FieldSpec; 9] = [
    FieldSpec::affine("f1", 0.8, 3.0),
    FieldSpec::affine("f2", 1.5, 4.0),
    FieldSpec::affine("f3", 0.3, 1.5),
    FieldSpec::affine("p1", 0.0, TAU),
    FieldSpec::affine("p2", 0.0, TAU),
    FieldSpec::affine("p3", 0.0, TAU),
    FieldSpec::affine("a1", 0.3, 0.7),
    FieldSpec::affine("a2", 0.1, 0.3),
    FieldSpec::affine("a3", 0.05, 0.15),
];

const GAP_PX: f64 = 2.0;
const MIN_LEVEL: f64 = 0.05;
const BEAT_BOOST: f64 = 0.8;
const GLOW_THRESHOLD: f64 = 0.3;
const MIRROR_HEIGHT: f64 = 0.6;
const MIRROR_ALPHA_START: u8 = 0x80;
const MIRROR_ALPHA_END: u8 = 0x20;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FrequencyBarsConfig {
    pub count: usize,
    /// Gradient `[start, end]`.
    pub colors: [Color; 2],
    /// Width of the whole bar area in pixels.
    pub width: f64,
    pub max_height: f64,
    /// Left edge of the bar area.
    pub x: f64,
    /// Baseline the bars grow up from.
    pub y: f64,
    pub mirror: bool,
    pub seed: String,
    pub decay_rate: f64,
}

impl Default for FrequencyBarsConfig {
    fn default() -> Self {
        Self {
            count: 48,
            colors: [Color::rgb(0xF7, 0x25, 0x85), Color::rgb(0x43, 0x61, 0xEE)],
            width: 900.0,
            max_height: 200.0,
            x: 510.0,
            y: 540.0,
            mirror: true,
            seed: "freq".to_owned(),
            decay_rate: 4.0,
        }
    }
}

impl FrequencyBarsConfig {
    pub fn validate(&self) -> BeatfxResult<()> {
        validate_count("frequency_bars count", self.count)?;
        for (name, v) in [("width", self.width), ("max_height", self.max_height)] {
            if !v.is_finite() || v < 0.0 {
                return Err(BeatfxError::configuration(format!(
                    "frequency_bars {name} must be finite and >= 0, got {v}"
                )));
            }
        }
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(BeatfxError::configuration(
                "frequency_bars position must be finite",
            ));
        }
        BeatEnvelope::new(self.decay_rate).map(|_| ())
    }
}

fn harmonics(e: &EntityRow<'_>) -> [Harmonic; 3] {
    // Columns: f1 f2 f3 p1 p2 p3 a1 a2 a3.
    [
        Harmonic::new(Wave::UnipolarSine, e.at(6), e.at(0), e.at(3)),
        Harmonic::new(Wave::UnipolarSine, e.at(7), e.at(1), e.at(4)),
        Harmonic::new(Wave::UnipolarSine, e.at(8), e.at(2), e.at(5)),
    ]
}

/// Normalized bar level in `[0.05, 1]` before any beat boost.
pub fn bar_level(harmonics: &[Harmonic], t: f64) -> f64 {
    let raw = harmonic_sum(harmonics, t, 0.0);
    if raw.is_nan() {
        return MIN_LEVEL;
    }
    raw.clamp(MIN_LEVEL, 1.0)
}

/// Bar (and optional mirror bar) records for a pre-generated field.
pub fn eval_frequency_bars(
    ctx: FrameCtx,
    field: &EntityField,
    beats: &BeatTimeline,
    cfg: &FrequencyBarsConfig,
    envelope: &BeatEnvelope,
) -> Vec<RenderRecord> {
    if !field.has_columns(&FIELDS) {
        tracing::warn!("frequency bars field has unexpected columns; emitting nothing");
        return Vec::new();
    }
    let count = field.len();
    if count == 0 {
        return Vec::new();
    }
    let t = ctx.time_secs();
    let punch = envelope.evaluate(beats, t);
    let n = count as f64;
    let bar_width = ((cfg.width - (n - 1.0) * GAP_PX) / n).max(0.0);
    let opacity = lift(0.7, punch, 0.3);
    let glow = if punch > GLOW_THRESHOLD {
        8.0 * punch
    } else {
        0.0
    };
    let [start, end] = cfg.colors;

    let mut out = Vec::with_capacity(if cfg.mirror { count * 2 } else { count });
    for e in field.rows() {
        let level = bar_level(&harmonics(&e), t);
        let height = boost_capped(level, punch, BEAT_BOOST, 1.0) * cfg.max_height;
        let x = cfg.x + e.index as f64 * (bar_width + GAP_PX);

        out.push(
            RenderRecord::new(Element::Bar, e.index)
                .num("x", x)
                .num("y", cfg.y - height)
                .num("width", bar_width)
                .num("height", height)
                .num("level", level)
                .num("corner_radius", bar_width / 2.0)
                .num("opacity", opacity)
                .num("glow", glow)
                .num("color_progress", e.index as f64 / n)
                .color("color_start", start)
                .color("color_end", end),
        );
        if cfg.mirror {
            out.push(
                RenderRecord::new(Element::BarMirror, e.index)
                    .num("x", x)
                    .num("y", cfg.y)
                    .num("width", bar_width)
                    .num("height", height * MIRROR_HEIGHT)
                    .num("corner_radius", bar_width / 2.0)
                    .num("opacity", lift(0.35, punch, 0.15))
                    .color(
                        "color_start",
                        Color {
                            a: MIRROR_ALPHA_START,
                            ..start
                        },
                    )
                    .color(
                        "color_end",
                        Color {
                            a: MIRROR_ALPHA_END,
                            ..end
                        },
                    ),
            );
        }
    }
    out
}

#[derive(Clone, Debug)]
pub struct FrequencyBarsLayer {
    cfg: FrequencyBarsConfig,
    envelope: BeatEnvelope,
    cache: FieldCache,
}

impl FrequencyBarsLayer {
    pub fn new(cfg: FrequencyBarsConfig) -> BeatfxResult<Self> {
        cfg.validate()?;
        let envelope = BeatEnvelope::new(cfg.decay_rate)?;
        Ok(Self {
            cfg,
            envelope,
            cache: FieldCache::new(),
        })
    }

    pub fn config(&self) -> &FrequencyBarsConfig {
        &self.cfg
    }

    pub fn field_cache(&self) -> &FieldCache {
        &self.cache
    }
}

impl FrameEvaluator for FrequencyBarsLayer {
    fn eval_frame(&self, ctx: FrameCtx, beats: &BeatTimeline) -> Vec<RenderRecord> {
        let field = self
            .cache
            .get_or_generate(self.cfg.count, &self.cfg.seed, &FIELDS, ctx.canvas);
        eval_frequency_bars(ctx, &field, beats, &self.cfg, &self.envelope)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layers/bars.rs"]
mod tests;
