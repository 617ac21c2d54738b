pub mod evaluator;

pub use evaluator::{EvalOpts, EvaluatedFrame, EvaluatedLayer, Evaluator};
