//! Priority Calculator - derives priority weights from a comparison matrix.

use super::ComparisonMatrix;

/// Mean-of-normalized-columns approximation of the principal eigenvector.
pub struct PriorityCalculator;

impl PriorityCalculator {
    /// Divides every entry by its column sum.
    ///
    /// A zero column sum yields a zero column instead of dividing by zero.
    pub fn normalize(matrix: &ComparisonMatrix) -> Vec<Vec<f64>> {
        let rows = matrix.rows();
        let n = rows.len();

        let column_sums: Vec<f64> = (0..n)
            .map(|j| rows.iter().map(|row| row[j]).sum())
            .collect();

        rows.iter()
            .map(|row| {
                row.iter()
                    .zip(&column_sums)
                    .map(|(&value, &sum)| if sum != 0.0 { value / sum } else { 0.0 })
                    .collect()
            })
            .collect()
    }

    /// Computes the priority vector of a matrix.
    ///
    /// # Algorithm
    /// 1. Column-normalize the matrix.
    /// 2. Average each row of the normalized matrix.
    /// 3. Re-normalize the row means so they sum to 1.
    ///
    /// # Edge Cases
    /// - Empty matrix: Returns empty Vec
    /// - Row means summing to 0: Returns all zeros
    pub fn priority_vector(matrix: &ComparisonMatrix) -> Vec<f64> {
        if matrix.is_empty() {
            return Vec::new();
        }

        let normalized = Self::normalize(matrix);
        let row_means: Vec<f64> = normalized
            .iter()
            .map(|row| row.iter().sum::<f64>() / row.len() as f64)
            .collect();

        let total: f64 = row_means.iter().sum();
        if total == 0.0 {
            return vec![0.0; row_means.len()];
        }

        row_means.into_iter().map(|mean| mean / total).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ahp::PairwiseSignals;
    use proptest::prelude::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn empty_matrix_has_no_priorities() {
        assert!(PriorityCalculator::priority_vector(&ComparisonMatrix::empty()).is_empty());
    }

    #[test]
    fn single_entity_gets_full_weight() {
        let matrix = ComparisonMatrix::from_signals(1, &PairwiseSignals::new());
        assert_eq!(PriorityCalculator::priority_vector(&matrix), vec![1.0]);
    }

    #[test]
    fn missing_signals_give_uniform_priorities() {
        let matrix = ComparisonMatrix::from_signals(4, &PairwiseSignals::new());
        let priorities = PriorityCalculator::priority_vector(&matrix);
        for p in priorities {
            assert!((p - 0.25).abs() < EPS);
        }
    }

    #[test]
    fn two_by_two_priorities_follow_ratio() {
        // A is 3x as important as B
        let signals = PairwiseSignals::builder().pair(0, 1, 2).build().unwrap();
        let matrix = ComparisonMatrix::from_signals(2, &signals);
        let priorities = PriorityCalculator::priority_vector(&matrix);

        assert!((priorities[0] - 0.75).abs() < EPS);
        assert!((priorities[1] - 0.25).abs() < EPS);
    }

    #[test]
    fn normalize_makes_columns_sum_to_one() {
        let signals = PairwiseSignals::builder()
            .pair(0, 1, 3)
            .pair(1, 2, -2)
            .build()
            .unwrap();
        let matrix = ComparisonMatrix::from_signals(3, &signals);
        let normalized = PriorityCalculator::normalize(&matrix);

        for j in 0..3 {
            let sum: f64 = normalized.iter().map(|row| row[j]).sum();
            assert!((sum - 1.0).abs() < EPS);
        }
    }

    #[test]
    fn zero_columns_normalize_to_zero() {
        let matrix = ComparisonMatrix::try_from_rows(vec![vec![0.0, 1.0], vec![0.0, 1.0]]).unwrap();
        let normalized = PriorityCalculator::normalize(&matrix);
        assert_eq!(normalized[0][0], 0.0);
        assert_eq!(normalized[1][0], 0.0);
        assert!((normalized[0][1] - 0.5).abs() < EPS);
    }

    #[test]
    fn all_zero_matrix_gives_zero_priorities() {
        let matrix = ComparisonMatrix::try_from_rows(vec![vec![0.0; 3]; 3]).unwrap();
        assert_eq!(PriorityCalculator::priority_vector(&matrix), vec![0.0; 3]);
    }

    #[test]
    fn consistent_matrix_recovers_underlying_weights() {
        // weights 4:2:1 -> ratios 2, 4, 2 (signals 1, 3, 1)
        let signals = PairwiseSignals::builder()
            .pair(0, 1, 1)
            .pair(0, 2, 3)
            .pair(1, 2, 1)
            .build()
            .unwrap();
        let matrix = ComparisonMatrix::from_signals(3, &signals);
        let priorities = PriorityCalculator::priority_vector(&matrix);

        assert!((priorities[0] - 4.0 / 7.0).abs() < EPS);
        assert!((priorities[1] - 2.0 / 7.0).abs() < EPS);
        assert!((priorities[2] - 1.0 / 7.0).abs() < EPS);
    }

    proptest! {
        #[test]
        fn priorities_sum_to_one(
            n in 1usize..9,
            raw in proptest::collection::vec((0usize..9, 0usize..9, -8i32..=8), 0..40)
        ) {
            let mut signals = PairwiseSignals::new();
            for (i, j, s) in raw {
                if i != j {
                    signals.set(i, j, s).unwrap();
                }
            }
            let matrix = ComparisonMatrix::from_signals(n, &signals);
            let priorities = PriorityCalculator::priority_vector(&matrix);

            prop_assert_eq!(priorities.len(), n);
            let total: f64 = priorities.iter().sum();
            prop_assert!((total - 1.0).abs() < 1e-9);
            prop_assert!(priorities.iter().all(|&p| p >= 0.0));
        }
    }
}
