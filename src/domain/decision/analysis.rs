//! Decision Analysis - the full AHP pipeline evaluated over a decision model.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::ahp::{
    Aggregator, ComparisonMatrix, ConsistencyEvaluator, ConsistencyResult, FinalScore,
    PairwiseSignals, PriorityCalculator,
};
use crate::domain::foundation::CriterionId;

use super::DecisionModel;

/// Matrix, priorities and consistency derived from one signal map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixAnalysis {
    pub matrix: ComparisonMatrix,
    pub priorities: Vec<f64>,
    pub consistency: ConsistencyResult,
}

impl MatrixAnalysis {
    /// Builds the matrix for `n` entities and derives its priorities and consistency.
    pub fn compute(n: usize, signals: &PairwiseSignals) -> Self {
        let matrix = ComparisonMatrix::from_signals(n, signals);
        let priorities = PriorityCalculator::priority_vector(&matrix);
        let consistency = ConsistencyEvaluator::evaluate(&matrix, &priorities);
        Self {
            matrix,
            priorities,
            consistency,
        }
    }
}

/// Alternative comparisons evaluated for one criterion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionAnalysis {
    pub criterion_id: CriterionId,
    pub criterion_name: String,
    /// Priority of this criterion among all criteria.
    pub weight: f64,
    pub alternatives: MatrixAnalysis,
}

/// Which comparison group failed the consistency check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViolationScope {
    Criteria,
    Alternatives {
        criterion_id: CriterionId,
        criterion_name: String,
    },
}

/// A comparison group whose consistency ratio exceeds the threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsistencyViolation {
    pub scope: ViolationScope,
    pub consistency: ConsistencyResult,
    pub threshold: f64,
}

impl ConsistencyViolation {
    /// Returns the user-facing message for this violation.
    pub fn message(&self) -> String {
        let ratio = format!(
            "CR {:.1}% exceeds {:.1}%",
            self.consistency.cr_percentage(),
            self.threshold * 100.0
        );
        match &self.scope {
            ViolationScope::Criteria => {
                format!("Criteria comparisons are inconsistent ({}); review the weights", ratio)
            }
            ViolationScope::Alternatives { criterion_name, .. } => format!(
                "Alternative comparisons for \"{}\" are inconsistent ({}); review them",
                criterion_name, ratio
            ),
        }
    }
}

impl fmt::Display for ConsistencyViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

/// Everything derived from a decision model in one evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionAnalysis {
    pub criteria: MatrixAnalysis,
    /// One entry per criterion, in declaration order.
    pub per_criterion: Vec<CriterionAnalysis>,
    /// Final scores in alternative declaration order.
    pub scores: Vec<FinalScore>,
    /// Final scores sorted descending.
    pub ranking: Vec<FinalScore>,
    pub threshold: f64,
}

impl DecisionAnalysis {
    /// Evaluates the model.
    ///
    /// # Algorithm
    /// 1. Criteria matrix -> criterion weights and consistency
    /// 2. For each criterion, alternatives matrix -> alternative priorities and consistency
    /// 3. Weighted sum across criteria -> final scores, then ranking
    pub fn compute(model: &DecisionModel, threshold: f64) -> Self {
        let n_alt = model.alternatives().len();
        let empty = PairwiseSignals::new();

        let criteria = MatrixAnalysis::compute(model.criteria().len(), model.criteria_signals());

        let per_criterion: Vec<CriterionAnalysis> = model
            .criteria()
            .iter()
            .zip(&criteria.priorities)
            .map(|(criterion, &weight)| {
                let signals = model.alternative_signals(criterion.id).unwrap_or(&empty);
                CriterionAnalysis {
                    criterion_id: criterion.id,
                    criterion_name: criterion.name.clone(),
                    weight,
                    alternatives: MatrixAnalysis::compute(n_alt, signals),
                }
            })
            .collect();

        let alternative_priorities: Vec<Vec<f64>> = per_criterion
            .iter()
            .map(|c| c.alternatives.priorities.clone())
            .collect();

        let scores = Aggregator::aggregate(
            &criteria.priorities,
            &alternative_priorities,
            &model.alternative_names(),
        );
        let ranking = Aggregator::rank(scores.clone());

        Self {
            criteria,
            per_criterion,
            scores,
            ranking,
            threshold,
        }
    }

    fn check(&self, scope: ViolationScope, consistency: ConsistencyResult) -> Option<ConsistencyViolation> {
        if consistency.is_consistent(self.threshold) {
            None
        } else {
            Some(ConsistencyViolation {
                scope,
                consistency,
                threshold: self.threshold,
            })
        }
    }

    /// Iterates violations lazily: criteria first, then each criterion's
    /// alternatives in declaration order.
    fn violation_iter(&self) -> impl Iterator<Item = ConsistencyViolation> + '_ {
        let criteria = self.check(ViolationScope::Criteria, self.criteria.consistency);
        let alternatives = self.per_criterion.iter().filter_map(move |c| {
            self.check(
                ViolationScope::Alternatives {
                    criterion_id: c.criterion_id,
                    criterion_name: c.criterion_name.clone(),
                },
                c.alternatives.consistency,
            )
        });
        criteria.into_iter().chain(alternatives)
    }

    /// Returns every consistency violation in reporting order.
    pub fn violations(&self) -> Vec<ConsistencyViolation> {
        self.violation_iter().collect()
    }

    /// Returns the first violation, stopping at the first failing check.
    pub fn first_violation(&self) -> Option<ConsistencyViolation> {
        self.violation_iter().next()
    }

    /// Returns true when every comparison group passes the consistency check.
    pub fn is_reliable(&self) -> bool {
        self.first_violation().is_none()
    }

    /// Returns the criterion weights paired with criterion names.
    pub fn criterion_weights(&self) -> Vec<(&str, f64)> {
        self.per_criterion
            .iter()
            .map(|c| (c.criterion_name.as_str(), c.weight))
            .collect()
    }
}
