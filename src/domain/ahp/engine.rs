//! AHP engine - priority vectors from pairwise judgments.

use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::DEFAULT_CONSISTENCY_THRESHOLD;
use crate::domain::criteria::CriteriaSpec;
use crate::domain::foundation::CriterionId;

use super::consistency::{consistency_ratio, MAX_SUPPORTED_SIZE};
use super::{AhpError, PairwiseMatrix, PriorityVector};

/// L1 convergence threshold for the power iteration.
const POWER_TOLERANCE: f64 = 1e-12;

/// Iteration cap for the power iteration.
const POWER_MAX_ITERATIONS: usize = 10_000;

/// How the priority vector is derived from a judgment matrix.
///
/// Both methods satisfy the consistency-ratio bounds; the geometric mean
/// is Saaty's row-product approximation, the eigenvector the exact
/// principal direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityMethod {
    #[default]
    EigenVector,
    GeometricMean,
}

/// Derives the priority vector and consistency ratio for one judgment
/// matrix using the default eigenvector method.
pub fn compute_weights(matrix: &PairwiseMatrix) -> Result<PriorityVector, AhpError> {
    compute_weights_with(matrix, PriorityMethod::default())
}

/// Derives the priority vector and consistency ratio for one judgment
/// matrix with an explicit priority method.
///
/// A consistency ratio above the conventional 0.10 threshold is reported
/// on the returned vector, never treated as a failure: the caller decides
/// whether to request revised judgments.
pub fn compute_weights_with(
    matrix: &PairwiseMatrix,
    method: PriorityMethod,
) -> Result<PriorityVector, AhpError> {
    let n = matrix.n();
    if n > MAX_SUPPORTED_SIZE {
        return Err(AhpError::UnsupportedSize {
            size: n,
            max: MAX_SUPPORTED_SIZE,
        });
    }
    let a = matrix.as_dmatrix();
    let raw = match method {
        PriorityMethod::EigenVector => principal_eigenvector(a),
        PriorityMethod::GeometricMean => geometric_mean_vector(a),
    };
    let lambda_max = lambda_max_estimate(a, &raw);
    let ratio = consistency_ratio(lambda_max, n)?;
    debug!(n, ?method, lambda_max, consistency_ratio = ratio, "derived priority vector");
    if ratio > DEFAULT_CONSISTENCY_THRESHOLD {
        warn!(
            consistency_ratio = ratio,
            threshold = DEFAULT_CONSISTENCY_THRESHOLD,
            "judgment matrix is inconsistent; returning vector anyway"
        );
    }
    Ok(PriorityVector::renormalized(raw, ratio))
}

/// Derives one priority vector per named judgment matrix, preserving
/// input order. Mirrors the one-matrix-per-category workflow where each
/// hierarchy dimension arrives as its own sheet.
pub fn compute_group_weights(
    groups: &[(String, PairwiseMatrix)],
) -> Result<Vec<(String, PriorityVector)>, AhpError> {
    groups
        .iter()
        .map(|(name, matrix)| Ok((name.clone(), compute_weights(matrix)?)))
        .collect()
}

/// Global leaf weights composed across a criteria hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HierarchyWeights {
    /// Leaf criterion ids, in the order of the weight vector.
    pub leaves: Vec<CriterionId>,
    /// Global leaf weights; the consistency ratio is the worst ratio
    /// observed across all sibling-group judgment matrices.
    pub weights: PriorityVector,
    /// Consistency ratio per sibling group, keyed by the group's parent
    /// (`None` for the top-level group).
    pub group_consistency: Vec<(Option<CriterionId>, f64)>,
}

/// Weights a whole hierarchy: one judgment matrix per sibling group.
///
/// Each matrix is reduced to a priority vector and assigned to its group
/// on `spec`; leaf weights are then composed by multiplying each leaf's
/// own-level weight with all ancestor weights. The composed weights sum
/// to 1 across all leaves.
pub fn weight_hierarchy(
    spec: &mut CriteriaSpec,
    groups: &[(Option<CriterionId>, PairwiseMatrix)],
) -> Result<HierarchyWeights, AhpError> {
    let mut group_consistency = Vec::with_capacity(groups.len());
    for (parent, matrix) in groups {
        let vector = compute_weights(matrix)?;
        spec.assign_group_weights(parent.as_ref(), vector.weights())?;
        group_consistency.push((parent.clone(), vector.consistency_ratio()));
    }
    let resolved = spec.global_leaf_weights()?;
    let worst_ratio = group_consistency
        .iter()
        .map(|(_, cr)| *cr)
        .fold(0.0, f64::max);
    let (leaves, weights): (Vec<CriterionId>, Vec<f64>) = resolved.into_iter().unzip();
    Ok(HierarchyWeights {
        leaves,
        weights: PriorityVector::renormalized(weights, worst_ratio),
        group_consistency,
    })
}

/// Principal eigenvector by power iteration, L1-normalized each step.
///
/// The judgment matrix is strictly positive, so the Perron vector is
/// strictly positive and the iteration converges geometrically.
fn principal_eigenvector(a: &DMatrix<f64>) -> Vec<f64> {
    let n = a.nrows();
    let mut w = DVector::from_element(n, 1.0 / n as f64);
    for _ in 0..POWER_MAX_ITERATIONS {
        let mut next = a * &w;
        let sum = next.sum();
        next /= sum;
        let delta: f64 = next.iter().zip(w.iter()).map(|(a, b)| (a - b).abs()).sum();
        w = next;
        if delta < POWER_TOLERANCE {
            break;
        }
    }
    w.iter().copied().collect()
}

/// Saaty's geometric mean of each row, computed in log space.
fn geometric_mean_vector(a: &DMatrix<f64>) -> Vec<f64> {
    let n = a.nrows();
    (0..n)
        .map(|i| {
            let ln_sum: f64 = (0..n).map(|j| a[(i, j)].ln()).sum();
            (ln_sum / n as f64).exp()
        })
        .collect()
}

/// Principal eigenvalue estimate: mean of `(A w)_i / w_i`.
///
/// Scale-invariant in `w`, so the raw (unnormalized) vector is fine.
fn lambda_max_estimate(a: &DMatrix<f64>, weights: &[f64]) -> f64 {
    let n = a.nrows();
    let w = DVector::from_column_slice(weights);
    let aw = a * w;
    aw.iter().zip(weights).map(|(p, &wi)| p / wi).sum::<f64>() / n as f64
}
