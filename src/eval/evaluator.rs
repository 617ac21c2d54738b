use rayon::prelude::*;

use crate::composition::{Composition, LayerInstance};
use crate::foundation::core::{FrameCtx, FrameIndex, FrameRange};
use crate::foundation::error::{BeatfxError, BeatfxResult};
use crate::layers::FrameEvaluator;
use crate::layers::record::RenderRecord;

/// All active layers of one frame, in paint order.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct EvaluatedFrame {
    pub frame: FrameIndex,
    pub layers: Vec<EvaluatedLayer>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct EvaluatedLayer {
    pub id: String,
    pub kind: &'static str,
    pub z: i32,
    /// Wrapper opacity applied on top of every record's own opacity, fades included.
    pub opacity: f64,
    /// Frame index inside the layer's range.
    pub local_frame: FrameIndex,
    pub records: Vec<RenderRecord>,
}

/// Range evaluation knobs.
#[derive(Clone, Debug, Default)]
pub struct EvalOpts {
    pub parallel: bool,
    /// Worker count for the dedicated pool; rayon picks when `None`.
    pub threads: Option<usize>,
}

pub struct Evaluator;

impl Evaluator {
    #[tracing::instrument(skip(comp))]
    pub fn eval_frame(comp: &Composition, frame: FrameIndex) -> BeatfxResult<EvaluatedFrame> {
        if frame.0 >= comp.duration_frames() {
            return Err(BeatfxError::evaluation(format!(
                "frame {} is out of bounds (duration {})",
                frame.0,
                comp.duration_frames()
            )));
        }

        let mut active: Vec<(usize, &LayerInstance, FrameIndex)> = comp
            .layers()
            .iter()
            .enumerate()
            .filter_map(|(i, l)| l.range.local(frame).map(|local| (i, l, local)))
            .collect();
        active.sort_by_key(|(i, l, _)| (l.z, *i));

        let layers = active
            .into_iter()
            .map(|(_, l, local)| eval_layer(comp, l, local))
            .collect();

        Ok(EvaluatedFrame { frame, layers })
    }

    /// Evaluate every frame of `range`, in frame order.
    ///
    /// The parallel path runs on its own pool and produces exactly what the sequential path
    /// does; each frame is independent of every other.
    #[tracing::instrument(skip(comp))]
    pub fn eval_range(
        comp: &Composition,
        range: FrameRange,
        opts: &EvalOpts,
    ) -> BeatfxResult<Vec<EvaluatedFrame>> {
        if range.start.0 > range.end.0 {
            return Err(BeatfxError::evaluation("frame range start must be <= end"));
        }
        if range.end.0 > comp.duration_frames() {
            return Err(BeatfxError::evaluation(format!(
                "frame range end {} exceeds duration {}",
                range.end.0,
                comp.duration_frames()
            )));
        }

        if !opts.parallel {
            return (range.start.0..range.end.0)
                .map(|f| Self::eval_frame(comp, FrameIndex(f)))
                .collect();
        }

        let pool = build_thread_pool(opts.threads)?;
        tracing::debug!(threads = pool.current_num_threads(), "parallel range evaluation");
        let indices: Vec<u64> = (range.start.0..range.end.0).collect();
        let frames = pool.install(|| {
            indices
                .par_iter()
                .map(|&f| Self::eval_frame(comp, FrameIndex(f)))
                .collect::<Vec<_>>()
        });
        frames.into_iter().collect()
    }
}

fn eval_layer(comp: &Composition, l: &LayerInstance, local: FrameIndex) -> EvaluatedLayer {
    let ctx = FrameCtx {
        frame: local,
        fps: comp.fps(),
        canvas: comp.canvas(),
    };
    EvaluatedLayer {
        id: l.id.clone(),
        kind: l.kind,
        z: l.z,
        opacity: l.opacity_at(local),
        local_frame: local,
        records: l.layer().eval_frame(ctx, l.timeline()),
    }
}

fn build_thread_pool(threads: Option<usize>) -> BeatfxResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(BeatfxError::validation(
            "eval threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| BeatfxError::evaluation(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/eval/evaluator.rs"]
mod tests;
