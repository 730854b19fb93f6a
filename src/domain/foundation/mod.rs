//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types
//! that form the vocabulary of the AHP domain.

mod errors;
mod ids;
mod preference;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{AlternativeId, CriterionId};
pub use preference::{saaty_ratio_for, PreferenceSignal, PreferredSide};
