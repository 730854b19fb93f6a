//! Comparison Matrix - square reciprocal matrix built from pairwise signals.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

use super::PairwiseSignals;

/// An `n x n` pairwise comparison matrix.
///
/// Matrices produced by [`ComparisonMatrix::build`] have a unit diagonal,
/// strictly positive entries and satisfy `m[i][j] * m[j][i] == 1`.
/// Deserialized matrices go through [`ComparisonMatrix::try_from_rows`], so
/// they are always square.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")]
pub struct ComparisonMatrix {
    rows: Vec<Vec<f64>>,
}

impl ComparisonMatrix {
    /// Creates an empty (0 x 0) matrix.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates the `n x n` identity matrix (all pairs equally important).
    pub fn identity(n: usize) -> Self {
        let rows = (0..n)
            .map(|i| (0..n).map(|j| if i == j { 1.0 } else { 0.0 }).collect())
            .collect();
        Self { rows }
    }

    /// Builds the comparison matrix for a named entity set.
    ///
    /// Only the number of names matters; position is identity.
    pub fn build<S: AsRef<str>>(names: &[S], signals: &PairwiseSignals) -> Self {
        Self::from_signals(names.len(), signals)
    }

    /// Builds the `n x n` comparison matrix from a sparse signal map.
    ///
    /// # Algorithm
    /// Start from the identity, then for every pair `i < j` set
    /// `m[i][j] = ratio(signal(i, j))` and `m[j][i] = 1 / m[i][j]`.
    /// Missing signals are neutral, so off-diagonal zeros never survive.
    pub fn from_signals(n: usize, signals: &PairwiseSignals) -> Self {
        let mut matrix = Self::identity(n);

        for i in 0..n {
            for j in (i + 1)..n {
                let signal = signals.get(i, j);
                matrix.rows[i][j] = signal.saaty_ratio();
                matrix.rows[j][i] = signal.reciprocal_ratio();
            }
        }

        matrix
    }

    /// Wraps externally supplied rows, checking that they form a square matrix.
    pub fn try_from_rows(rows: Vec<Vec<f64>>) -> Result<Self, ValidationError> {
        let n = rows.len();
        if let Some(bad) = rows.iter().position(|row| row.len() != n) {
            return Err(ValidationError::invalid_format(
                "matrix",
                format!("row {} has {} columns, expected {}", bad, rows[bad].len(), n),
            ));
        }
        Ok(Self { rows })
    }

    /// Number of rows (and columns).
    pub fn size(&self) -> usize {
        self.rows.len()
    }

    /// Returns true for the 0 x 0 matrix.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the entry at row `i`, column `j`.
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        self.rows.get(i).and_then(|row| row.get(j)).copied()
    }

    /// Returns the rows as slices.
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// Consumes the matrix, returning its rows.
    pub fn into_rows(self) -> Vec<Vec<f64>> {
        self.rows
    }

    /// Checks the reciprocal property and unit diagonal within `tolerance`.
    pub fn is_reciprocal(&self, tolerance: f64) -> bool {
        let n = self.size();
        (0..n).all(|i| {
            (self.rows[i][i] - 1.0).abs() <= tolerance
                && (0..n).all(|j| (self.rows[i][j] * self.rows[j][i] - 1.0).abs() <= tolerance)
        })
    }
}

impl TryFrom<Vec<Vec<f64>>> for ComparisonMatrix {
    type Error = ValidationError;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self, Self::Error> {
        Self::try_from_rows(rows)
    }
}

impl From<ComparisonMatrix> for Vec<Vec<f64>> {
    fn from(matrix: ComparisonMatrix) -> Self {
        matrix.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn empty_entity_set_builds_empty_matrix() {
        let names: Vec<&str> = Vec::new();
        let matrix = ComparisonMatrix::build(&names, &PairwiseSignals::new());
        assert!(matrix.is_empty());
        assert_eq!(matrix.size(), 0);
    }

    #[test]
    fn single_entity_builds_unit_matrix() {
        let matrix = ComparisonMatrix::build(&["only"], &PairwiseSignals::new());
        assert_eq!(matrix.rows(), &[vec![1.0]]);
    }

    #[test]
    fn no_signals_builds_all_ones() {
        let matrix = ComparisonMatrix::build(&["A", "B", "C"], &PairwiseSignals::new());
        for row in matrix.rows() {
            for &value in row {
                assert_eq!(value, 1.0);
            }
        }
    }

    #[test]
    fn zero_signal_yields_identity_ratio() {
        let signals = PairwiseSignals::builder().pair(0, 1, 0).build().unwrap();
        let matrix = ComparisonMatrix::build(&["A", "B"], &signals);
        assert_eq!(matrix.get(0, 1), Some(1.0));
        assert_eq!(matrix.get(1, 0), Some(1.0));
    }

    #[test]
    fn signals_fill_upper_and_reciprocal_lower_triangle() {
        let signals = PairwiseSignals::builder()
            .pair(0, 1, 4)
            .pair(0, 2, -4)
            .pair(1, 2, -8)
            .build()
            .unwrap();
        let matrix = ComparisonMatrix::build(&["A", "B", "C"], &signals);

        assert!((matrix.get(0, 1).unwrap() - 5.0).abs() < EPS);
        assert!((matrix.get(1, 0).unwrap() - 0.2).abs() < EPS);
        assert!((matrix.get(0, 2).unwrap() - 0.2).abs() < EPS);
        assert!((matrix.get(2, 0).unwrap() - 5.0).abs() < EPS);
        assert!((matrix.get(1, 2).unwrap() - 1.0 / 9.0).abs() < EPS);
        assert!((matrix.get(2, 1).unwrap() - 9.0).abs() < EPS);
        assert!(matrix.is_reciprocal(EPS));
    }

    #[test]
    fn signals_beyond_entity_count_are_ignored() {
        let signals = PairwiseSignals::builder().pair(0, 5, 3).build().unwrap();
        let matrix = ComparisonMatrix::from_signals(2, &signals);
        assert_eq!(matrix.rows(), &[vec![1.0, 1.0], vec![1.0, 1.0]]);
    }

    #[test]
    fn try_from_rows_rejects_ragged_input() {
        assert!(ComparisonMatrix::try_from_rows(vec![vec![1.0, 2.0], vec![0.5]]).is_err());
        assert!(ComparisonMatrix::try_from_rows(vec![vec![1.0, 2.0], vec![0.5, 1.0]]).is_ok());
    }

    #[test]
    fn serializes_as_nested_arrays() {
        let matrix = ComparisonMatrix::identity(2);
        assert_eq!(serde_json::to_string(&matrix).unwrap(), "[[1.0,0.0],[0.0,1.0]]");
    }

    proptest! {
        #[test]
        fn built_matrices_are_reciprocal(
            n in 0usize..8,
            raw in proptest::collection::vec((0usize..8, 0usize..8, -8i32..=8), 0..40)
        ) {
            let mut signals = PairwiseSignals::new();
            for (i, j, s) in raw {
                if i != j {
                    signals.set(i, j, s).unwrap();
                }
            }
            let matrix = ComparisonMatrix::from_signals(n, &signals);

            prop_assert_eq!(matrix.size(), n);
            prop_assert!(matrix.is_reciprocal(1e-9));
            for row in matrix.rows() {
                for &value in row {
                    prop_assert!(value > 0.0);
                }
            }
        }
    }

    #[test]
    fn ragged_rows_fail_to_deserialize() {
        let result = serde_json::from_str::<ComparisonMatrix>("[[1.0],[1.0,1.0]]");
        assert!(result.is_err());
    }

    #[test]
    fn square_rows_deserialize_as_plain_nested_arrays() {
        let matrix: ComparisonMatrix = serde_json::from_str("[[1.0,3.0],[0.5,1.0]]").unwrap();
        assert_eq!(matrix.size(), 2);
        assert_eq!(matrix.get(1, 0), Some(0.5));
        assert_eq!(
            serde_json::to_string(&matrix).unwrap(),
            "[[1.0,3.0],[0.5,1.0]]"
        );
    }
}
