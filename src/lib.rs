//! beatfx evaluates beat-synchronized procedural visual layers for fixed-length video.
//!
//! Every frame is a pure function of its inputs: the frame index, the frame rate, the canvas,
//! a beat timeline and static layer configuration. The public API is composition-oriented:
//!
//! - Load and validate a [`Composition`]
//! - Evaluate single frames or whole ranges with the [`Evaluator`]
//! - Hand the resulting [`RenderRecord`]s to a rendering surface such as [`adapter::svg`]
#![forbid(unsafe_code)]

mod foundation;

pub mod adapter;
pub mod animation;
pub mod beat;
pub mod composition;
pub mod eval;
pub mod field;
pub mod layers;

pub use crate::foundation::color::Color;
pub use crate::foundation::core::{
    BezPath, Canvas, Fps, FrameClock, FrameCtx, FrameIndex, FrameRange, Point, Vec2,
};
pub use crate::foundation::error::{BeatfxError, BeatfxResult};

pub use crate::beat::envelope::{BeatEnvelope, BeatEnvelopeSample};
pub use crate::beat::timeline::BeatTimeline;
pub use crate::composition::{Composition, CompositionDef, LayerInstanceDef};
pub use crate::eval::{EvalOpts, EvaluatedFrame, EvaluatedLayer, Evaluator};
pub use crate::field::generator::{EntityField, generate};
pub use crate::field::random::random;
pub use crate::layers::record::{Element, PathGeometry, PropValue, RenderRecord};
pub use crate::layers::{FrameEvaluator, Layer, LayerSpec};
