//! Application layer - Commands and Handlers.
//!
//! This layer orchestrates domain operations: it runs the AHP pipeline over a
//! decision model and applies the configured consistency policy.

pub mod handlers;

pub use handlers::{
    ConsistencyPolicy, DecisionReport, EvaluateDecisionCommand, EvaluateDecisionHandler,
};
