//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (preference signals, IDs, errors)
//! - `ahp` - Pure AHP services (matrix, priorities, consistency, aggregation)
//! - `decision` - Decision model and its end-to-end analysis

pub mod ahp;
pub mod decision;
pub mod foundation;
