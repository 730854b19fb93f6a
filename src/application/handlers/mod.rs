//! Application handlers.
//!
//! Command handlers that orchestrate domain operations.

mod evaluate_decision;

pub use evaluate_decision::{
    ConsistencyPolicy, DecisionReport, EvaluateDecisionCommand, EvaluateDecisionHandler,
};
