//! Direction-aware normalization of decision matrices.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AlternativeId, Direction};

use super::{CriterionColumn, DecisionMatrix, TopsisError};

/// How raw performance values are rescaled before weighting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalizationMode {
    /// Per-column `(x - min) / (max - min)`, inverted for cost columns.
    /// Zero-variance columns have no defined scale and are rejected.
    #[default]
    MinMax,
    /// Per-column division by the Euclidean norm; cost columns are
    /// inverted after normalization so higher always means preferred.
    Vector,
}

/// A decision matrix rescaled so every column is comparable and higher
/// values are always preferred, regardless of the column's direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedMatrix {
    columns: Vec<CriterionColumn>,
    alternatives: Vec<AlternativeId>,
    values: Vec<Vec<f64>>,
}

impl NormalizedMatrix {
    /// Returns the criteria column descriptors.
    pub fn columns(&self) -> &[CriterionColumn] {
        &self.columns
    }

    /// Returns the alternative ids in row order.
    pub fn alternatives(&self) -> &[AlternativeId] {
        &self.alternatives
    }

    /// Returns the normalized value at the given row and column.
    pub fn value(&self, row: usize, col: usize) -> f64 {
        self.values[row][col]
    }
}

/// Normalizes a decision matrix under the given mode.
pub fn normalize(
    matrix: &DecisionMatrix,
    mode: NormalizationMode,
) -> Result<NormalizedMatrix, TopsisError> {
    if matrix.alternative_count() == 0 {
        return Err(TopsisError::EmptyMatrix("alternatives"));
    }
    let rows = matrix.alternative_count();
    let cols = matrix.criterion_count();
    let mut values = vec![vec![0.0; cols]; rows];

    for (c, column) in matrix.columns().iter().enumerate() {
        let raw = matrix.column_values(c);
        match mode {
            NormalizationMode::MinMax => {
                let min = raw.iter().copied().fold(f64::INFINITY, f64::min);
                let max = raw.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                let span = max - min;
                if span == 0.0 {
                    return Err(TopsisError::DegenerateColumn {
                        column: column.id.clone(),
                    });
                }
                for (r, &x) in raw.iter().enumerate() {
                    values[r][c] = match column.direction {
                        Direction::Benefit => (x - min) / span,
                        Direction::Cost => (max - x) / span,
                    };
                }
            }
            NormalizationMode::Vector => {
                let norm = raw.iter().map(|x| x * x).sum::<f64>().sqrt();
                if norm == 0.0 {
                    return Err(TopsisError::DegenerateColumn {
                        column: column.id.clone(),
                    });
                }
                for (r, &x) in raw.iter().enumerate() {
                    let v = x / norm;
                    values[r][c] = match column.direction {
                        Direction::Benefit => v,
                        Direction::Cost => 1.0 - v,
                    };
                }
            }
        }
    }

    Ok(NormalizedMatrix {
        columns: matrix.columns().to_vec(),
        alternatives: matrix.alternatives().to_vec(),
        values,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::CriterionId;
    use approx::assert_relative_eq;

    fn aid(s: &str) -> AlternativeId {
        AlternativeId::new(s).unwrap()
    }

    fn cid(s: &str) -> CriterionId {
        CriterionId::new(s).unwrap()
    }

    fn matrix(directions: &[Direction], rows: &[(&str, Vec<f64>)]) -> DecisionMatrix {
        let columns = directions
            .iter()
            .enumerate()
            .map(|(i, &d)| CriterionColumn::new(cid(&format!("c{i}")), d))
            .collect();
        let mut m = DecisionMatrix::new(columns).unwrap();
        for (id, values) in rows {
            m.add_alternative(aid(id), values.clone()).unwrap();
        }
        m
    }

    #[test]
    fn min_max_scales_benefit_columns_to_unit_interval() {
        let m = matrix(
            &[Direction::Benefit],
            &[("a1", vec![5.0]), ("a2", vec![7.0]), ("a3", vec![8.0])],
        );
        let n = normalize(&m, NormalizationMode::MinMax).unwrap();
        assert_relative_eq!(n.value(0, 0), 0.0);
        assert_relative_eq!(n.value(1, 0), 2.0 / 3.0);
        assert_relative_eq!(n.value(2, 0), 1.0);
    }

    #[test]
    fn min_max_inverts_cost_columns() {
        let m = matrix(
            &[Direction::Cost],
            &[("a1", vec![10.0]), ("a2", vec![30.0])],
        );
        let n = normalize(&m, NormalizationMode::MinMax).unwrap();
        // Cheapest alternative ends up at 1 (most preferred).
        assert_relative_eq!(n.value(0, 0), 1.0);
        assert_relative_eq!(n.value(1, 0), 0.0);
    }

    #[test]
    fn min_max_rejects_zero_variance_column() {
        let m = matrix(
            &[Direction::Benefit],
            &[("a1", vec![4.0]), ("a2", vec![4.0])],
        );
        let err = normalize(&m, NormalizationMode::MinMax).unwrap_err();
        assert!(matches!(err, TopsisError::DegenerateColumn { .. }));
    }

    #[test]
    fn vector_mode_produces_unit_norm_columns() {
        let m = matrix(
            &[Direction::Benefit],
            &[("a1", vec![3.0]), ("a2", vec![4.0])],
        );
        let n = normalize(&m, NormalizationMode::Vector).unwrap();
        let norm = (n.value(0, 0).powi(2) + n.value(1, 0).powi(2)).sqrt();
        assert_relative_eq!(norm, 1.0, epsilon = 1e-12);
        assert_relative_eq!(n.value(0, 0), 0.6);
        assert_relative_eq!(n.value(1, 0), 0.8);
    }

    #[test]
    fn vector_mode_inverts_cost_columns() {
        let m = matrix(
            &[Direction::Cost],
            &[("a1", vec![3.0]), ("a2", vec![4.0])],
        );
        let n = normalize(&m, NormalizationMode::Vector).unwrap();
        assert_relative_eq!(n.value(0, 0), 1.0 - 0.6);
        assert_relative_eq!(n.value(1, 0), 1.0 - 0.8);
        // Lower raw cost is now the higher normalized value.
        assert!(n.value(0, 0) > n.value(1, 0));
    }

    #[test]
    fn vector_mode_rejects_all_zero_column() {
        let m = matrix(
            &[Direction::Benefit],
            &[("a1", vec![0.0]), ("a2", vec![0.0])],
        );
        let err = normalize(&m, NormalizationMode::Vector).unwrap_err();
        assert!(matches!(err, TopsisError::DegenerateColumn { .. }));
    }

    #[test]
    fn normalize_rejects_matrix_without_alternatives() {
        let m = matrix(&[Direction::Benefit], &[]);
        assert!(matches!(
            normalize(&m, NormalizationMode::MinMax),
            Err(TopsisError::EmptyMatrix(_))
        ));
    }
}
