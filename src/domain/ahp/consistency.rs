//! Consistency Evaluator - consistency index and ratio of a comparison matrix.

use serde::{Deserialize, Serialize};

use super::ComparisonMatrix;

/// Consistency ratios above this value mark the comparisons as unreliable.
pub const CONSISTENCY_THRESHOLD: f64 = 0.10;

/// Saaty's Random Index for matrix sizes 1..=10.
pub const RANDOM_INDEX: [f64; 10] = [0.0, 0.0, 0.58, 0.90, 1.12, 1.24, 1.32, 1.41, 1.45, 1.49];

/// Returns the Random Index for an `n x n` matrix.
///
/// Sizes above 10 reuse the value for 10.
pub fn random_index(n: usize) -> f64 {
    match n {
        0 => 0.0,
        1..=10 => RANDOM_INDEX[n - 1],
        _ => RANDOM_INDEX[9],
    }
}

/// Consistency index and ratio of one matrix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ConsistencyResult {
    pub ci: f64,
    pub cr: f64,
}

impl ConsistencyResult {
    /// A perfectly consistent result.
    pub const PERFECT: Self = Self { ci: 0.0, cr: 0.0 };

    /// Returns true unless `cr` exceeds `threshold`.
    pub fn is_consistent(&self, threshold: f64) -> bool {
        self.cr <= threshold
    }

    /// Returns the consistency ratio as a percentage.
    pub fn cr_percentage(&self) -> f64 {
        self.cr * 100.0
    }
}

/// Consistency checks for comparison matrices.
pub struct ConsistencyEvaluator;

impl ConsistencyEvaluator {
    /// Estimates the principal eigenvalue from the matrix and its priorities.
    ///
    /// For each row `W_i = sum_j m[i][j] * p[j]` and `lambda_i = W_i / p[i]`
    /// (zero when `p[i]` is zero); the estimate is the mean of `lambda_i`.
    pub fn lambda_max(matrix: &ComparisonMatrix, priorities: &[f64]) -> f64 {
        let n = matrix.size();
        if n == 0 {
            return 0.0;
        }

        let priority = |j: usize| priorities.get(j).copied().unwrap_or(0.0);

        let total: f64 = matrix
            .rows()
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let weighted: f64 = row
                    .iter()
                    .enumerate()
                    .map(|(j, value)| value * priority(j))
                    .sum();
                let p = priority(i);
                if p != 0.0 {
                    weighted / p
                } else {
                    0.0
                }
            })
            .sum();

        total / n as f64
    }

    /// Computes the consistency index and ratio.
    ///
    /// # Edge Cases
    /// - `n <= 2`: Always perfectly consistent
    /// - Random index of zero: CR is 0
    pub fn evaluate(matrix: &ComparisonMatrix, priorities: &[f64]) -> ConsistencyResult {
        let n = matrix.size();
        if n <= 2 {
            return ConsistencyResult::PERFECT;
        }

        let lambda_max = Self::lambda_max(matrix, priorities);
        let ci = (lambda_max - n as f64) / (n as f64 - 1.0);
        let ri = random_index(n);
        let cr = if ri == 0.0 { 0.0 } else { ci / ri };

        ConsistencyResult { ci, cr }
    }
}
