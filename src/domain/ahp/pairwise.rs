//! PairwiseMatrix - square positive reciprocal judgment matrix.

use nalgebra::DMatrix;
use thiserror::Error;

use crate::domain::criteria::CriteriaError;

/// Tolerance on `a[i][j] * a[j][i] == 1` when validating reciprocity.
///
/// Loose by design: judgment matrices are typed in by humans, so `1/3`
/// often arrives as `0.33`.
pub const RECIPROCITY_TOLERANCE: f64 = 1e-2;

/// Tolerance on unit diagonal entries.
const DIAGONAL_TOLERANCE: f64 = 1e-9;

/// Errors raised by the AHP engine.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AhpError {
    #[error("invalid pairwise matrix: {reason}")]
    InvalidMatrix { reason: String },

    #[error("no random index calibration for matrix size {size} (max {max})")]
    UnsupportedSize { size: usize, max: usize },

    #[error(transparent)]
    Criteria(#[from] CriteriaError),
}

impl AhpError {
    pub(crate) fn invalid_matrix(reason: impl Into<String>) -> Self {
        AhpError::InvalidMatrix { reason: reason.into() }
    }
}

/// A square, strictly positive, reciprocal pairwise comparison matrix.
///
/// Entry `[i, j]` is the judged importance of criterion `i` relative to
/// criterion `j`; the diagonal is 1 and `[j, i]` is the reciprocal of
/// `[i, j]`. All invariants are enforced at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct PairwiseMatrix {
    values: DMatrix<f64>,
}

impl PairwiseMatrix {
    /// Builds a matrix from row slices, validating all invariants.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self, AhpError> {
        let n = rows.len();
        if n == 0 {
            return Err(AhpError::invalid_matrix("matrix is empty"));
        }
        for (i, row) in rows.iter().enumerate() {
            if row.len() != n {
                return Err(AhpError::invalid_matrix(format!(
                    "row {} has {} entries, expected {}",
                    i,
                    row.len(),
                    n
                )));
            }
        }
        let values = DMatrix::from_fn(n, n, |i, j| rows[i][j]);
        Self::from_dmatrix(values)
    }

    fn from_dmatrix(values: DMatrix<f64>) -> Result<Self, AhpError> {
        let n = values.nrows();
        for i in 0..n {
            for j in 0..n {
                let v = values[(i, j)];
                if !v.is_finite() || v <= 0.0 {
                    return Err(AhpError::invalid_matrix(format!(
                        "entry [{i},{j}] = {v} is not strictly positive"
                    )));
                }
            }
        }
        for i in 0..n {
            let d = values[(i, i)];
            if (d - 1.0).abs() > DIAGONAL_TOLERANCE {
                return Err(AhpError::invalid_matrix(format!(
                    "diagonal entry [{i},{i}] = {d}, expected 1"
                )));
            }
        }
        for i in 0..n {
            for j in (i + 1)..n {
                let product = values[(i, j)] * values[(j, i)];
                if (product - 1.0).abs() > RECIPROCITY_TOLERANCE {
                    return Err(AhpError::invalid_matrix(format!(
                        "entries [{i},{j}] and [{j},{i}] are not reciprocal \
                         (product {product})"
                    )));
                }
            }
        }
        Ok(Self { values })
    }

    /// Returns the matrix order (number of criteria compared).
    pub fn n(&self) -> usize {
        self.values.nrows()
    }

    /// Returns the judgment at `[i, j]`.
    pub fn value(&self, i: usize, j: usize) -> f64 {
        self.values[(i, j)]
    }

    pub(crate) fn as_dmatrix(&self) -> &DMatrix<f64> {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_rows_accepts_valid_reciprocal_matrix() {
        let m = PairwiseMatrix::from_rows(&[
            vec![1.0, 3.0, 5.0],
            vec![1.0 / 3.0, 1.0, 2.0],
            vec![1.0 / 5.0, 1.0 / 2.0, 1.0],
        ])
        .unwrap();
        assert_eq!(m.n(), 3);
        assert_eq!(m.value(0, 1), 3.0);
    }

    #[test]
    fn from_rows_accepts_single_entry_matrix() {
        let m = PairwiseMatrix::from_rows(&[vec![1.0]]).unwrap();
        assert_eq!(m.n(), 1);
    }

    #[test]
    fn from_rows_rejects_empty_input() {
        assert!(matches!(
            PairwiseMatrix::from_rows(&[]),
            Err(AhpError::InvalidMatrix { .. })
        ));
    }

    #[test]
    fn from_rows_rejects_non_square_input() {
        let err = PairwiseMatrix::from_rows(&[vec![1.0, 2.0], vec![0.5, 1.0, 3.0]]);
        assert!(matches!(err, Err(AhpError::InvalidMatrix { .. })));
    }

    #[test]
    fn from_rows_rejects_non_positive_entries() {
        let err = PairwiseMatrix::from_rows(&[vec![1.0, 0.0], vec![2.0, 1.0]]);
        assert!(matches!(err, Err(AhpError::InvalidMatrix { .. })));
        let err = PairwiseMatrix::from_rows(&[vec![1.0, -3.0], vec![-1.0 / 3.0, 1.0]]);
        assert!(matches!(err, Err(AhpError::InvalidMatrix { .. })));
    }

    #[test]
    fn from_rows_rejects_non_finite_entries() {
        let err = PairwiseMatrix::from_rows(&[vec![1.0, f64::NAN], vec![1.0, 1.0]]);
        assert!(matches!(err, Err(AhpError::InvalidMatrix { .. })));
    }

    #[test]
    fn from_rows_rejects_off_unit_diagonal() {
        let err = PairwiseMatrix::from_rows(&[vec![2.0, 1.0], vec![1.0, 1.0]]);
        assert!(matches!(err, Err(AhpError::InvalidMatrix { .. })));
    }

    #[test]
    fn from_rows_rejects_broken_reciprocity() {
        let err = PairwiseMatrix::from_rows(&[vec![1.0, 4.0], vec![1.0, 1.0]]);
        assert!(matches!(err, Err(AhpError::InvalidMatrix { .. })));
    }

    #[test]
    fn from_rows_tolerates_rounded_human_reciprocals() {
        // 0.33 for 1/3 is within the reciprocity tolerance.
        let m = PairwiseMatrix::from_rows(&[vec![1.0, 3.0], vec![0.33, 1.0]]);
        assert!(m.is_ok());
    }
}
