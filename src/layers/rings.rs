//! Three concentric rings that swell on the beat and spin slowly between beats.

use crate::animation::remap::{Remap, RemapOpts};
use crate::animation::signal::DecayCurve;
use crate::beat::envelope::BeatEnvelope;
use crate::beat::timeline::BeatTimeline;
use crate::foundation::color::Color;
use crate::foundation::core::FrameCtx;
use crate::foundation::error::{BeatfxError, BeatfxResult};
use crate::layers::FrameEvaluator;
use crate::layers::record::{Element, RenderRecord};

struct RingStyle {
    radius: f64,
    stroke: f64,
    opacity: f64,
    rotation: f64,
    glow: f64,
    dash: Option<&'static str>,
}

/// Outer glowing ring, dashed inner ring, thin solid core ring.
const RING_STYLES: [RingStyle; 3] = [
    RingStyle {
        radius: 1.0,
        stroke: 1.0,
        opacity: 1.0,
        rotation: 1.0,
        glow: 12.0,
        dash: None,
    },
    RingStyle {
        radius: 0.7,
        stroke: 0.5,
        opacity: 0.6,
        rotation: -1.5,
        glow: 0.0,
        dash: Some("8 12"),
    },
    RingStyle {
        radius: 0.4,
        stroke: 0.3,
        opacity: 0.4,
        rotation: 2.0,
        glow: 0.0,
        dash: None,
    },
];

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PulseRingConfig {
    pub color: Color,
    pub base_radius: f64,
    /// Radius multiplier reached exactly on a beat.
    pub beat_scale: f64,
    pub stroke_width: f64,
    pub cx: f64,
    pub cy: f64,
    pub decay_rate: f64,
    /// Reshapes the envelope for the scale only; opacity follows the linear envelope.
    pub scale_curve: DecayCurve,
    /// Ambient spin of the outer ring.
    pub rotation_deg_per_frame: f64,
    /// Opacity breakpoints over the linear envelope `[input, output]`.
    pub opacity_in: Vec<f64>,
    pub opacity_out: Vec<f64>,
}

impl Default for PulseRingConfig {
    fn default() -> Self {
        Self {
            color: Color::rgb(0xF7, 0x25, 0x85),
            base_radius: 120.0,
            beat_scale: 1.6,
            stroke_width: 3.0,
            cx: 960.0,
            cy: 540.0,
            decay_rate: 3.5,
            scale_curve: DecayCurve::Power(0.5),
            rotation_deg_per_frame: 0.3,
            opacity_in: vec![0.0, 0.3, 1.0],
            opacity_out: vec![0.1, 0.5, 0.9],
        }
    }
}

impl PulseRingConfig {
    pub fn validate(&self) -> BeatfxResult<()> {
        for (name, v) in [
            ("base_radius", self.base_radius),
            ("beat_scale", self.beat_scale),
            ("stroke_width", self.stroke_width),
            ("cx", self.cx),
            ("cy", self.cy),
            ("rotation_deg_per_frame", self.rotation_deg_per_frame),
        ] {
            if !v.is_finite() {
                return Err(BeatfxError::configuration(format!(
                    "pulse_ring {name} must be finite, got {v}"
                )));
            }
        }
        self.opacity_map()?;
        BeatEnvelope::with_curve(self.decay_rate, self.scale_curve).map(|_| ())
    }

    fn opacity_map(&self) -> BeatfxResult<Remap> {
        Remap::new(&self.opacity_in, &self.opacity_out, RemapOpts::clamped())
    }
}

#[derive(Clone, Debug)]
pub struct PulseRingLayer {
    cfg: PulseRingConfig,
    envelope: BeatEnvelope,
    opacity: Remap,
}

impl PulseRingLayer {
    pub fn new(cfg: PulseRingConfig) -> BeatfxResult<Self> {
        cfg.validate()?;
        let envelope = BeatEnvelope::with_curve(cfg.decay_rate, cfg.scale_curve)?;
        let opacity = cfg.opacity_map()?;
        Ok(Self {
            cfg,
            envelope,
            opacity,
        })
    }

    pub fn config(&self) -> &PulseRingConfig {
        &self.cfg
    }
}

impl FrameEvaluator for PulseRingLayer {
    fn eval_frame(&self, ctx: FrameCtx, beats: &BeatTimeline) -> Vec<RenderRecord> {
        let sample = self.envelope.sample(beats, ctx.time_secs());
        let decay = sample.intensity;
        let scale = 1.0 + (self.cfg.beat_scale - 1.0) * sample.shaped();
        let opacity = self.opacity.apply(decay);
        let rotation = ctx.frame.0 as f64 * self.cfg.rotation_deg_per_frame;
        let radius = self.cfg.base_radius * scale;

        RING_STYLES
            .iter()
            .enumerate()
            .map(|(i, s)| {
                let rec = RenderRecord::new(Element::Ring, i)
                    .num("cx", self.cfg.cx)
                    .num("cy", self.cfg.cy)
                    .num("radius", radius * s.radius)
                    .num("stroke_width", self.cfg.stroke_width * s.stroke)
                    .num("opacity", opacity * s.opacity)
                    .num("rotation_deg", rotation * s.rotation)
                    .num("glow", s.glow * decay)
                    .color("color", self.cfg.color);
                match s.dash {
                    Some(dash) => rec.text("dash", dash),
                    None => rec,
                }
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layers/rings.rs"]
mod tests;
