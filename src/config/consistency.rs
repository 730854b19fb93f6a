//! Consistency gate configuration

use serde::Deserialize;

use super::error::ValidationError;

/// How consistency violations are treated when evaluating a decision
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ConsistencyConfig {
    /// Consistency ratio above which comparisons are considered unreliable
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    /// Withhold the final ranking while any comparison group is inconsistent
    #[serde(default = "default_block_on_violation")]
    pub block_on_violation: bool,
}

impl ConsistencyConfig {
    /// Validate consistency configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.threshold.is_finite() || self.threshold <= 0.0 || self.threshold > 1.0 {
            return Err(ValidationError::InvalidThreshold(self.threshold));
        }
        Ok(())
    }
}

impl Default for ConsistencyConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            block_on_violation: default_block_on_violation(),
        }
    }
}

fn default_threshold() -> f64 {
    0.10
}

fn default_block_on_violation() -> bool {
    true
}
