//! AHP Module - Pure domain services for the Analytic Hierarchy Process.
//!
//! # Components
//!
//! - `PairwiseSignals` - Sparse upper-triangle map of preference signals
//! - `ComparisonMatrix` - Reciprocal comparison matrix built from signals
//! - `PriorityCalculator` - Mean-of-normalized-columns priority vector
//! - `ConsistencyEvaluator` - Consistency index / ratio against Saaty's random index
//! - `Aggregator` - Weighted final scores and ranking
//!
//! All functions are pure and stateless. Degenerate input (empty entity sets,
//! zero column sums, zero priorities) yields defined sentinel values instead
//! of errors.

mod aggregator;
mod consistency;
mod matrix;
mod priority;
mod signals;

pub use aggregator::{Aggregator, FinalScore};
pub use consistency::{
    random_index, ConsistencyEvaluator, ConsistencyResult, CONSISTENCY_THRESHOLD, RANDOM_INDEX,
};
pub use matrix::ComparisonMatrix;
pub use priority::PriorityCalculator;
pub use signals::{PairwiseSignals, PairwiseSignalsBuilder};
