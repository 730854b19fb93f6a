//! Decision module - the input state of an AHP decision and its evaluation.
//!
//! `DecisionModel` owns the mutable inputs (criteria, alternatives, signal
//! maps). `DecisionAnalysis` is a pure value recomputed from a model on
//! every evaluation; nothing derived is cached on the model.

mod analysis;
mod model;

pub use analysis::{
    ConsistencyViolation, CriterionAnalysis, DecisionAnalysis, MatrixAnalysis, ViolationScope,
};
pub use model::{Alternative, Criterion, DecisionModel, DEFAULT_ALTERNATIVES, DEFAULT_CRITERIA};
