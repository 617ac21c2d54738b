//! Beat-reactive visual layers.
//!
//! Every layer is a pure function of `(layer-local frame, fps, canvas, beat timeline, static
//! config)`. Nothing carries over between frames except the per-layer entity field memo,
//! which only ever holds values equal to a fresh generation.

pub mod bars;
pub mod flash;
pub mod floating;
pub mod orbit;
pub mod record;
pub mod rings;
pub mod waveform;

use crate::beat::timeline::BeatTimeline;
use crate::foundation::color::Color;
use crate::foundation::core::FrameCtx;
use crate::foundation::error::{BeatfxError, BeatfxResult};
use crate::layers::record::RenderRecord;

use self::bars::{FrequencyBarsConfig, FrequencyBarsLayer};
use self::flash::{FlashConfig, FlashLayer};
use self::floating::{FloatingShapesConfig, FloatingShapesLayer};
use self::orbit::{OrbitDotsConfig, OrbitDotsLayer};
use self::rings::{PulseRingConfig, PulseRingLayer};
use self::waveform::{WaveformCircleConfig, WaveformCircleLayer};

/// Upper bound on entities a single layer may request.
pub const MAX_ENTITIES: usize = 1 << 20;

/// Stateless per-frame evaluation of one layer.
pub trait FrameEvaluator {
    /// Render parameters for `ctx.frame`, in paint order.
    fn eval_frame(&self, ctx: FrameCtx, beats: &BeatTimeline) -> Vec<RenderRecord>;
}

/// Static layer configuration as written in a composition document.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", content = "params", rename_all = "snake_case")]
pub enum LayerSpec {
    Flash(FlashConfig),
    FloatingShapes(FloatingShapesConfig),
    FrequencyBars(FrequencyBarsConfig),
    OrbitDots(OrbitDotsConfig),
    PulseRing(PulseRingConfig),
    WaveformCircle(WaveformCircleConfig),
}

impl LayerSpec {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Flash(_) => "flash",
            Self::FloatingShapes(_) => "floating_shapes",
            Self::FrequencyBars(_) => "frequency_bars",
            Self::OrbitDots(_) => "orbit_dots",
            Self::PulseRing(_) => "pulse_ring",
            Self::WaveformCircle(_) => "waveform_circle",
        }
    }

    /// Validate and build the runtime layer. All configuration errors surface here.
    pub fn build(&self) -> BeatfxResult<Layer> {
        Ok(match self {
            Self::Flash(c) => Layer::Flash(FlashLayer::new(c.clone())?),
            Self::FloatingShapes(c) => Layer::FloatingShapes(FloatingShapesLayer::new(c.clone())?),
            Self::FrequencyBars(c) => Layer::FrequencyBars(FrequencyBarsLayer::new(c.clone())?),
            Self::OrbitDots(c) => Layer::OrbitDots(OrbitDotsLayer::new(c.clone())?),
            Self::PulseRing(c) => Layer::PulseRing(PulseRingLayer::new(c.clone())?),
            Self::WaveformCircle(c) => Layer::WaveformCircle(WaveformCircleLayer::new(c.clone())?),
        })
    }
}

/// A validated, ready-to-evaluate layer.
#[derive(Clone, Debug)]
pub enum Layer {
    Flash(FlashLayer),
    FloatingShapes(FloatingShapesLayer),
    FrequencyBars(FrequencyBarsLayer),
    OrbitDots(OrbitDotsLayer),
    PulseRing(PulseRingLayer),
    WaveformCircle(WaveformCircleLayer),
}

impl FrameEvaluator for Layer {
    fn eval_frame(&self, ctx: FrameCtx, beats: &BeatTimeline) -> Vec<RenderRecord> {
        match self {
            Self::Flash(l) => l.eval_frame(ctx, beats),
            Self::FloatingShapes(l) => l.eval_frame(ctx, beats),
            Self::FrequencyBars(l) => l.eval_frame(ctx, beats),
            Self::OrbitDots(l) => l.eval_frame(ctx, beats),
            Self::PulseRing(l) => l.eval_frame(ctx, beats),
            Self::WaveformCircle(l) => l.eval_frame(ctx, beats),
        }
    }
}

/// `colors[i % len]`, white for an empty palette.
pub(crate) fn palette_color(colors: &[Color], i: usize) -> Color {
    if colors.is_empty() {
        return Color::WHITE;
    }
    colors[i % colors.len()]
}

pub(crate) fn validate_palette(layer: &str, colors: &[Color]) -> BeatfxResult<()> {
    if colors.is_empty() {
        return Err(BeatfxError::configuration(format!(
            "{layer} needs at least one color"
        )));
    }
    Ok(())
}

pub(crate) fn validate_count(what: &str, count: usize) -> BeatfxResult<()> {
    if count > MAX_ENTITIES {
        return Err(BeatfxError::configuration(format!(
            "{what} must be <= {MAX_ENTITIES}, got {count}"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/layers/mod.rs"]
mod tests;
