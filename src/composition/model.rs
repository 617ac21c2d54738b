use std::collections::BTreeMap;

use crate::foundation::core::{Canvas, Fps, FrameIndex, FrameRange};
use crate::foundation::error::{BeatfxError, BeatfxResult};
use crate::layers::LayerSpec;

/// JSON-facing composition document.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompositionDef {
    pub fps: Fps,
    pub canvas: Canvas,
    /// Total frames.
    pub duration: FrameIndex,
    /// Named beat lists, in seconds. Layers refer to them by key. Ordering is checked when
    /// the composition is built.
    #[serde(default)]
    pub timelines: BTreeMap<String, Vec<f64>>,
    #[serde(default)]
    pub layers: Vec<LayerInstanceDef>,
}

/// One placed layer: where it lives on the timeline, which beats drive it, what it draws.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LayerInstanceDef {
    pub id: String,
    /// Placement `[start, end)`; the whole composition when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<FrameRange>,
    #[serde(default)]
    pub z: i32,
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    /// Frames over which the wrapper opacity ramps up from 0 at the start of the range.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub fade_in: u64,
    /// Frames over which the wrapper opacity ramps down to 0 at the end of the range.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub fade_out: u64,
    /// Key into [`CompositionDef::timelines`]. A layer without one never sees a beat.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeline: Option<String>,
    #[serde(flatten)]
    pub spec: LayerSpec,
}

fn default_opacity() -> f64 {
    1.0
}

fn is_zero(v: &u64) -> bool {
    *v == 0
}

impl CompositionDef {
    /// Structural checks that do not need any layer to be built.
    pub fn validate(&self) -> BeatfxResult<()> {
        Fps::new(self.fps.num, self.fps.den)?;
        Canvas::new(self.canvas.width, self.canvas.height)?;
        if self.duration.0 == 0 {
            return Err(BeatfxError::validation("duration must be > 0 frames"));
        }

        let mut seen = std::collections::HashSet::new();
        for layer in &self.layers {
            if layer.id.trim().is_empty() {
                return Err(BeatfxError::validation("layer id must be non-empty"));
            }
            if !seen.insert(layer.id.as_str()) {
                return Err(BeatfxError::validation(format!(
                    "duplicate layer id '{}'",
                    layer.id
                )));
            }
            let range = layer.range_or(self.duration);
            if range.start.0 > range.end.0 {
                return Err(BeatfxError::validation(format!(
                    "layer '{}' has invalid range (start > end)",
                    layer.id
                )));
            }
            if range.end.0 > self.duration.0 {
                return Err(BeatfxError::validation(format!(
                    "layer '{}' range exceeds composition duration",
                    layer.id
                )));
            }
            if layer.fade_in.saturating_add(layer.fade_out) > range.len_frames() {
                return Err(BeatfxError::validation(format!(
                    "layer '{}' fades ({} in + {} out) exceed its {} frames",
                    layer.id,
                    layer.fade_in,
                    layer.fade_out,
                    range.len_frames()
                )));
            }
            if !layer.opacity.is_finite() || !(0.0..=1.0).contains(&layer.opacity) {
                return Err(BeatfxError::validation(format!(
                    "layer '{}' opacity must be within [0, 1], got {}",
                    layer.id, layer.opacity
                )));
            }
            if let Some(key) = &layer.timeline
                && !self.timelines.contains_key(key)
            {
                return Err(BeatfxError::validation(format!(
                    "layer '{}' references missing timeline '{key}'",
                    layer.id
                )));
            }
        }
        Ok(())
    }
}

impl LayerInstanceDef {
    pub fn range_or(&self, duration: FrameIndex) -> FrameRange {
        self.range.unwrap_or(FrameRange {
            start: FrameIndex(0),
            end: duration,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/model.rs"]
mod tests;
