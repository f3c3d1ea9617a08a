//! PriorityVector - normalized criterion weights with a consistency verdict.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// Tolerance accepted on the sum of caller-supplied weights.
const SUM_TOLERANCE: f64 = 1e-6;

/// An ordered sequence of non-negative weights summing to 1, together
/// with the consistency ratio of the judgment matrix that produced it.
///
/// Vectors built directly from weights (rather than from a pairwise
/// matrix) carry a consistency ratio of 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorityVector {
    weights: Vec<f64>,
    consistency_ratio: f64,
}

impl PriorityVector {
    /// Creates a priority vector from explicit weights.
    ///
    /// Weights must be finite, non-negative, and sum to 1 within a small
    /// tolerance; the stored vector is renormalized to sum to exactly 1.
    pub fn new(weights: Vec<f64>) -> Result<Self, ValidationError> {
        if weights.is_empty() {
            return Err(ValidationError::empty_field("weights"));
        }
        for &w in &weights {
            if !w.is_finite() {
                return Err(ValidationError::not_finite("weights", w));
            }
            if w < 0.0 {
                return Err(ValidationError::out_of_range("weights", 0.0, 1.0, w));
            }
        }
        let sum: f64 = weights.iter().sum();
        if (sum - 1.0).abs() > SUM_TOLERANCE {
            return Err(ValidationError::invalid(
                "weights",
                format!("must sum to 1, got {sum}"),
            ));
        }
        Ok(Self::renormalized(weights, 0.0))
    }

    /// Creates a uniform vector of `n` equal weights.
    pub fn uniform(n: usize) -> Result<Self, ValidationError> {
        if n == 0 {
            return Err(ValidationError::empty_field("weights"));
        }
        Ok(Self::renormalized(vec![1.0 / n as f64; n], 0.0))
    }

    /// Renormalizes and wraps weights the engine has already validated.
    pub(crate) fn renormalized(mut weights: Vec<f64>, consistency_ratio: f64) -> Self {
        let sum: f64 = weights.iter().sum();
        for w in &mut weights {
            *w /= sum;
        }
        Self {
            weights,
            consistency_ratio,
        }
    }

    /// Returns the weights in criterion order.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Returns the weight at the given criterion index.
    pub fn get(&self, index: usize) -> Option<f64> {
        self.weights.get(index).copied()
    }

    /// Returns the number of weights.
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Returns true if the vector has no entries.
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Returns the consistency ratio of the source judgment matrix.
    pub fn consistency_ratio(&self) -> f64 {
        self.consistency_ratio
    }

    /// Returns true if the consistency ratio is within the threshold.
    ///
    /// An inconsistent vector is still usable; this is a diagnostic for
    /// the caller to decide whether to request revised judgments.
    pub fn is_consistent(&self, threshold: f64) -> bool {
        self.consistency_ratio <= threshold
    }
}
