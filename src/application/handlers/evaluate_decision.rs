//! EvaluateDecisionHandler - Command handler that ranks the alternatives of a decision.
//!
//! Runs the AHP pipeline over the model, then applies the consistency gate:
//! when the policy blocks on violations, the ranking is withheld and the first
//! violation (criteria first, then alternatives per criterion) is reported.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::ConsistencyConfig;
use crate::domain::ahp::{FinalScore, CONSISTENCY_THRESHOLD};
use crate::domain::decision::{ConsistencyViolation, DecisionAnalysis, DecisionModel};
use crate::domain::foundation::DomainError;

/// How consistency violations affect the result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConsistencyPolicy {
    pub threshold: f64,
    pub block_on_violation: bool,
}

impl Default for ConsistencyPolicy {
    fn default() -> Self {
        Self {
            threshold: CONSISTENCY_THRESHOLD,
            block_on_violation: true,
        }
    }
}

impl From<&ConsistencyConfig> for ConsistencyPolicy {
    fn from(config: &ConsistencyConfig) -> Self {
        Self {
            threshold: config.threshold,
            block_on_violation: config.block_on_violation,
        }
    }
}

/// Command to evaluate a decision.
#[derive(Debug, Clone)]
pub struct EvaluateDecisionCommand {
    pub model: DecisionModel,
}

/// Result of a successful evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionReport {
    pub analysis: DecisionAnalysis,
    /// Ranked alternatives; `None` when withheld by the consistency policy.
    pub ranking: Option<Vec<FinalScore>>,
    /// First consistency violation, if any.
    pub violation: Option<ConsistencyViolation>,
}

impl DecisionReport {
    /// Returns true if the ranking was withheld.
    pub fn is_blocked(&self) -> bool {
        self.ranking.is_none()
    }

    /// Returns the top-ranked alternative, if a ranking is available.
    pub fn winner(&self) -> Option<&FinalScore> {
        self.ranking.as_ref().and_then(|r| r.first())
    }
}

/// Handler for evaluating decisions.
pub struct EvaluateDecisionHandler {
    policy: ConsistencyPolicy,
}

impl EvaluateDecisionHandler {
    pub fn new(policy: ConsistencyPolicy) -> Self {
        Self { policy }
    }

    pub fn handle(&self, cmd: EvaluateDecisionCommand) -> Result<DecisionReport, DomainError> {
        let model = cmd.model;

        // 1. Validate the policy and require something to rank
        let threshold = self.policy.threshold;
        if !(threshold > 0.0 && threshold <= 1.0) {
            return Err(DomainError::validation(
                "threshold",
                "Consistency threshold must be in (0, 1]",
            )
            .with_detail("value", threshold.to_string()));
        }
        if model.criteria().is_empty() {
            return Err(DomainError::validation(
                "criteria",
                "At least one criterion is required",
            ));
        }
        if model.alternatives().is_empty() {
            return Err(DomainError::validation(
                "alternatives",
                "At least one alternative is required",
            ));
        }

        debug!(
            criteria = model.criteria().len(),
            alternatives = model.alternatives().len(),
            threshold = self.policy.threshold,
            "Evaluating decision"
        );

        // 2. Run the pipeline
        let analysis = model.evaluate(self.policy.threshold);

        // 3. Apply the consistency gate
        let violation = analysis.first_violation();
        if let Some(v) = &violation {
            warn!(
                cr = v.consistency.cr,
                threshold = v.threshold,
                "{}",
                v.message()
            );
        }

        let blocked = violation.is_some() && self.policy.block_on_violation;
        let ranking = if blocked {
            None
        } else {
            Some(analysis.ranking.clone())
        };

        if let Some(top) = ranking.as_ref().and_then(|r| r.first()) {
            info!(winner = %top.name, score = top.score, "Decision evaluated");
        } else {
            info!("Decision evaluated; ranking withheld");
        }

        Ok(DecisionReport {
            analysis,
            ranking,
            violation,
        })
    }
}
