//! DecisionMatrix - alternatives scored against criteria columns.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::foundation::{AlternativeId, CriterionId, Direction};

/// Errors raised by the TOPSIS engine.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TopsisError {
    #[error("expected {expected} values, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("duplicate alternative id: {id}")]
    DuplicateAlternative { id: AlternativeId },

    #[error("value {value} for alternative {alternative} on criterion {column} is not finite")]
    NonFiniteValue {
        alternative: AlternativeId,
        column: CriterionId,
        value: f64,
    },

    #[error("decision matrix has no {0}")]
    EmptyMatrix(&'static str),

    #[error("criterion {column} has zero variance; its scale is undefined")]
    DegenerateColumn { column: CriterionId },

    #[error("alternative {alternative} is equidistant from both ideals at distance zero")]
    DegenerateScore { alternative: AlternativeId },
}

/// One column of the decision matrix: a leaf criterion and its direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriterionColumn {
    pub id: CriterionId,
    pub direction: Direction,
}

impl CriterionColumn {
    /// Creates a column descriptor.
    pub fn new(id: CriterionId, direction: Direction) -> Self {
        Self { id, direction }
    }
}

/// Alternatives (rows, order-preserving) by criteria (columns) of raw
/// performance values.
///
/// Fully populated by construction: every row must supply one finite
/// value per column. Missing-data handling belongs to the ingestion
/// collaborator upstream of this type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionMatrix {
    columns: Vec<CriterionColumn>,
    alternatives: Vec<AlternativeId>,
    values: Vec<Vec<f64>>,
}

impl DecisionMatrix {
    /// Creates an empty matrix over the given criteria columns.
    pub fn new(columns: Vec<CriterionColumn>) -> Result<Self, TopsisError> {
        if columns.is_empty() {
            return Err(TopsisError::EmptyMatrix("criteria columns"));
        }
        Ok(Self {
            columns,
            alternatives: Vec::new(),
            values: Vec::new(),
        })
    }

    /// Appends an alternative's row of performance values.
    pub fn add_alternative(
        &mut self,
        id: AlternativeId,
        values: Vec<f64>,
    ) -> Result<(), TopsisError> {
        if self.alternatives.contains(&id) {
            return Err(TopsisError::DuplicateAlternative { id });
        }
        if values.len() != self.columns.len() {
            return Err(TopsisError::DimensionMismatch {
                expected: self.columns.len(),
                actual: values.len(),
            });
        }
        for (column, &value) in self.columns.iter().zip(&values) {
            if !value.is_finite() {
                return Err(TopsisError::NonFiniteValue {
                    alternative: id,
                    column: column.id.clone(),
                    value,
                });
            }
        }
        self.alternatives.push(id);
        self.values.push(values);
        Ok(())
    }

    /// Returns the number of alternatives (rows).
    pub fn alternative_count(&self) -> usize {
        self.alternatives.len()
    }

    /// Returns the number of criteria (columns).
    pub fn criterion_count(&self) -> usize {
        self.columns.len()
    }

    /// Returns the alternative ids in row order.
    pub fn alternatives(&self) -> &[AlternativeId] {
        &self.alternatives
    }

    /// Returns the criteria column descriptors.
    pub fn columns(&self) -> &[CriterionColumn] {
        &self.columns
    }

    /// Returns the raw value at the given row and column.
    pub fn value(&self, row: usize, col: usize) -> f64 {
        self.values[row][col]
    }

    /// Returns one column of raw values, in row order.
    pub fn column_values(&self, col: usize) -> Vec<f64> {
        self.values.iter().map(|row| row[col]).collect()
    }
}
