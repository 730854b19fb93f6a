//! Aggregator - combines criterion weights with per-criterion alternative priorities.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Weighted final score of one alternative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalScore {
    pub name: String,
    pub score: f64,
}

impl FinalScore {
    /// Creates a new final score.
    pub fn new(name: impl Into<String>, score: f64) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }

    /// Returns the score as a percentage.
    pub fn percentage(&self) -> f64 {
        self.score * 100.0
    }
}

/// Weighted-sum aggregation and ranking.
pub struct Aggregator;

impl Aggregator {
    /// Computes `score[a] = sum_c criteria[c] * alternatives[c][a]`.
    ///
    /// Results follow the order of `alternative_names`.
    ///
    /// # Edge Cases
    /// - No criteria or no alternatives: Returns empty Vec
    /// - Missing, empty or wrongly sized alternative vector for a criterion:
    ///   uniform `1 / n_a` weighting is used for that criterion
    pub fn aggregate<S: AsRef<str>>(
        criteria_priorities: &[f64],
        alternative_priorities: &[Vec<f64>],
        alternative_names: &[S],
    ) -> Vec<FinalScore> {
        let n_alt = alternative_names.len();
        if n_alt == 0 || criteria_priorities.is_empty() {
            return Vec::new();
        }

        let uniform = 1.0 / n_alt as f64;
        let mut scores = vec![0.0; n_alt];

        for (c, weight) in criteria_priorities.iter().enumerate() {
            match alternative_priorities.get(c) {
                Some(priorities) if priorities.len() == n_alt => {
                    for (score, p) in scores.iter_mut().zip(priorities) {
                        *score += weight * p;
                    }
                }
                _ => {
                    for score in scores.iter_mut() {
                        *score += weight * uniform;
                    }
                }
            }
        }

        alternative_names
            .iter()
            .zip(scores)
            .map(|(name, score)| FinalScore::new(name.as_ref(), score))
            .collect()
    }

    /// Sorts scores descending. Ties keep their original order.
    pub fn rank(mut scores: Vec<FinalScore>) -> Vec<FinalScore> {
        scores.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        scores
    }

    /// Aggregates and ranks in one step.
    pub fn aggregate_ranked<S: AsRef<str>>(
        criteria_priorities: &[f64],
        alternative_priorities: &[Vec<f64>],
        alternative_names: &[S],
    ) -> Vec<FinalScore> {
        Self::rank(Self::aggregate(
            criteria_priorities,
            alternative_priorities,
            alternative_names,
        ))
    }
}
