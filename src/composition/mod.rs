//! Composition documents and their validated runtime form.

pub mod model;

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;

use crate::animation::remap::remap;
use crate::beat::timeline::BeatTimeline;
use crate::foundation::core::{Canvas, Fps, FrameIndex, FrameRange};
use crate::foundation::error::{BeatfxError, BeatfxResult};
use crate::layers::Layer;

pub use model::{CompositionDef, LayerInstanceDef};

/// A layer placed on the composition timeline, built and ready to evaluate.
#[derive(Clone, Debug)]
pub struct LayerInstance {
    pub id: String,
    pub kind: &'static str,
    pub range: FrameRange,
    pub z: i32,
    pub opacity: f64,
    pub fade_in: u64,
    pub fade_out: u64,
    pub(crate) timeline: Arc<BeatTimeline>,
    pub(crate) layer: Layer,
}

impl LayerInstance {
    pub fn timeline(&self) -> &BeatTimeline {
        &self.timeline
    }

    pub fn layer(&self) -> &Layer {
        &self.layer
    }

    /// Wrapper opacity at `local`, with the linear fade-in and fade-out ramps applied.
    ///
    /// The first frame of a fade-in is fully transparent and frame `fade_in` is the first at
    /// full strength; fade-outs mirror that from the last frame of the range.
    pub fn opacity_at(&self, local: FrameIndex) -> f64 {
        let f = local.0 as f64;
        let mut k = 1.0;
        if self.fade_in > 0 {
            k *= remap(f, (0.0, self.fade_in as f64), (0.0, 1.0), true, true, None);
        }
        if self.fade_out > 0 {
            let remaining = self.range.len_frames().saturating_sub(local.0 + 1) as f64;
            k *= remap(
                remaining,
                (0.0, self.fade_out as f64),
                (0.0, 1.0),
                true,
                true,
                None,
            );
        }
        self.opacity * k
    }
}

/// Validated composition. Every layer is built up front, so evaluation itself cannot hit a
/// configuration error.
#[derive(Clone, Debug)]
pub struct Composition {
    def: CompositionDef,
    layers: Vec<LayerInstance>,
}

impl Composition {
    /// Parse a composition from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> BeatfxResult<Self> {
        let def: CompositionDef = serde_json::from_reader(r)
            .map_err(|e| BeatfxError::serde(format!("parse composition JSON: {e}")))?;
        Self::from_def(def)
    }

    /// Parse a composition from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> BeatfxResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            BeatfxError::validation(format!("open composition JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    #[tracing::instrument(skip(def), fields(layers = def.layers.len()))]
    pub fn from_def(def: CompositionDef) -> BeatfxResult<Self> {
        def.validate()?;

        let mut timelines: BTreeMap<&str, Arc<BeatTimeline>> = BTreeMap::new();
        for (key, beats) in &def.timelines {
            let tl = BeatTimeline::new(beats.clone()).map_err(|e| match e {
                BeatfxError::Configuration(msg) => {
                    BeatfxError::configuration(format!("timeline '{key}': {msg}"))
                }
                other => other,
            })?;
            timelines.insert(key.as_str(), Arc::new(tl));
        }
        let silent = Arc::new(BeatTimeline::empty());

        let mut layers = Vec::with_capacity(def.layers.len());
        for l in &def.layers {
            let layer = l.spec.build().map_err(|e| match e {
                BeatfxError::Configuration(msg) => {
                    BeatfxError::configuration(format!("layer '{}': {msg}", l.id))
                }
                other => other,
            })?;
            let timeline = match &l.timeline {
                Some(key) => timelines
                    .get(key.as_str())
                    .cloned()
                    .ok_or_else(|| BeatfxError::validation(format!("missing timeline '{key}'")))?,
                None => silent.clone(),
            };
            layers.push(LayerInstance {
                id: l.id.clone(),
                kind: l.spec.kind_name(),
                range: l.range_or(def.duration),
                z: l.z,
                opacity: l.opacity,
                fade_in: l.fade_in,
                fade_out: l.fade_out,
                timeline,
                layer,
            });
        }
        tracing::debug!(timelines = timelines.len(), "composition built");

        Ok(Self { def, layers })
    }

    pub fn fps(&self) -> Fps {
        self.def.fps
    }

    pub fn canvas(&self) -> Canvas {
        self.def.canvas
    }

    /// Declared duration in frames.
    pub fn duration_frames(&self) -> u64 {
        self.def.duration.0
    }

    pub fn frame_range(&self) -> FrameRange {
        FrameRange {
            start: FrameIndex(0),
            end: self.def.duration,
        }
    }

    pub fn layers(&self) -> &[LayerInstance] {
        &self.layers
    }

    pub fn def(&self) -> &CompositionDef {
        &self.def
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/mod.rs"]
mod tests;
