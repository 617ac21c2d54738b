//! Full-frame radial flash on every (down)beat.

use crate::beat::envelope::BeatEnvelope;
use crate::beat::timeline::BeatTimeline;
use crate::foundation::color::Color;
use crate::foundation::core::FrameCtx;
use crate::foundation::error::{BeatfxError, BeatfxResult};
use crate::layers::FrameEvaluator;
use crate::layers::record::{Element, RenderRecord};

/// Radius (fraction of the overlay) where the gradient reaches full transparency.
const GRADIENT_EXTENT: f64 = 0.7;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FlashConfig {
    pub color: Color,
    pub max_opacity: f64,
    pub decay_rate: f64,
}

impl Default for FlashConfig {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            max_opacity: 0.15,
            decay_rate: 8.0,
        }
    }
}

impl FlashConfig {
    pub fn validate(&self) -> BeatfxResult<()> {
        if !(0.0..=1.0).contains(&self.max_opacity) {
            return Err(BeatfxError::configuration(format!(
                "flash max_opacity must be within [0, 1], got {}",
                self.max_opacity
            )));
        }
        self.envelope().map(|_| ())
    }

    pub fn envelope(&self) -> BeatfxResult<BeatEnvelope> {
        BeatEnvelope::new(self.decay_rate)
    }
}

#[derive(Clone, Debug)]
pub struct FlashLayer {
    cfg: FlashConfig,
    envelope: BeatEnvelope,
}

impl FlashLayer {
    pub fn new(cfg: FlashConfig) -> BeatfxResult<Self> {
        cfg.validate()?;
        let envelope = cfg.envelope()?;
        Ok(Self { cfg, envelope })
    }

    pub fn config(&self) -> &FlashConfig {
        &self.cfg
    }
}

impl FrameEvaluator for FlashLayer {
    fn eval_frame(&self, ctx: FrameCtx, beats: &BeatTimeline) -> Vec<RenderRecord> {
        let intensity = self.envelope.evaluate(beats, ctx.time_secs());
        let opacity = intensity * self.cfg.max_opacity;
        vec![
            RenderRecord::new(Element::Flash, 0)
                .num("intensity", intensity)
                .num("opacity", opacity)
                .text("color", self.cfg.color.to_hex_with_alpha(opacity))
                .num("extent", GRADIENT_EXTENT),
        ]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layers/flash.rs"]
mod tests;
