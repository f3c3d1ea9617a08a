//! AHP module - pairwise judgments to criterion weights.
//!
//! Implements the Analytic Hierarchy Process: reciprocal pairwise
//! comparison matrices are reduced to normalized priority vectors, each
//! carrying a consistency ratio diagnostic against Saaty's random index
//! calibration.

mod consistency;
mod engine;
mod pairwise;
mod priority;

pub use consistency::{consistency_ratio, MAX_SUPPORTED_SIZE};
pub use engine::{
    compute_group_weights, compute_weights, compute_weights_with, weight_hierarchy,
    HierarchyWeights, PriorityMethod,
};
pub use pairwise::{AhpError, PairwiseMatrix, RECIPROCITY_TOLERANCE};
pub use priority::PriorityVector;
