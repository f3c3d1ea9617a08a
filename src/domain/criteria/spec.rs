//! CriteriaSpec - ordered criterion hierarchy with weight resolution.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::foundation::{CriterionId, Direction};

use super::Criterion;

/// Tolerance for sibling-group and global weight sums.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// Errors raised while building or resolving a criteria hierarchy.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CriteriaError {
    #[error("duplicate criterion id: {id}")]
    DuplicateCriterion { id: CriterionId },

    #[error("criterion {id} references unknown parent {parent}")]
    UnknownParent { id: CriterionId, parent: CriterionId },

    #[error("unknown criterion id: {id}")]
    UnknownCriterion { id: CriterionId },

    #[error("sibling group under {group} has {expected} criteria but {actual} weights were supplied")]
    GroupSizeMismatch {
        group: String,
        expected: usize,
        actual: usize,
    },

    #[error("weight {weight} for criterion {id} is not a finite non-negative number")]
    InvalidWeight { id: CriterionId, weight: f64 },

    #[error("weights for sibling group under {group} sum to {sum}, expected 1")]
    GroupSumMismatch { group: String, sum: f64 },

    #[error("criterion {id} has no resolved weight")]
    UnresolvedWeight { id: CriterionId },

    #[error("criteria hierarchy has no leaf criteria")]
    NoLeaves,
}

/// The criterion hierarchy, in insertion order.
///
/// Criteria must be added parent-first; a parent that has not been added
/// yet is rejected, which also rules out cycles by construction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CriteriaSpec {
    criteria: Vec<Criterion>,
}

impl CriteriaSpec {
    /// Creates an empty spec.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a criterion, validating id uniqueness and parent existence.
    pub fn add(&mut self, criterion: Criterion) -> Result<(), CriteriaError> {
        if self.get(&criterion.id).is_some() {
            return Err(CriteriaError::DuplicateCriterion { id: criterion.id });
        }
        if let Some(parent) = &criterion.parent {
            if self.get(parent).is_none() {
                return Err(CriteriaError::UnknownParent {
                    id: criterion.id.clone(),
                    parent: parent.clone(),
                });
            }
        }
        self.criteria.push(criterion);
        Ok(())
    }

    /// Returns the number of criteria in the hierarchy.
    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    /// Returns true if no criteria have been added.
    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    /// Finds a criterion by id.
    pub fn get(&self, id: &CriterionId) -> Option<&Criterion> {
        self.criteria.iter().find(|c| &c.id == id)
    }

    /// Returns the sibling group under the given parent, in insertion order.
    ///
    /// `None` selects the top-level group.
    pub fn children_of(&self, parent: Option<&CriterionId>) -> Vec<&Criterion> {
        self.criteria
            .iter()
            .filter(|c| c.parent.as_ref() == parent)
            .collect()
    }

    /// Returns the leaf criteria (those with no children), in insertion order.
    pub fn leaves(&self) -> Vec<&Criterion> {
        self.criteria
            .iter()
            .filter(|c| !self.has_children(&c.id))
            .collect()
    }

    /// Returns the leaf criterion ids, in insertion order.
    pub fn leaf_ids(&self) -> Vec<CriterionId> {
        self.leaves().into_iter().map(|c| c.id.clone()).collect()
    }

    /// Returns the optimization direction of each leaf, in leaf order.
    pub fn leaf_directions(&self) -> Vec<Direction> {
        self.leaves().into_iter().map(|c| c.direction).collect()
    }

    fn has_children(&self, id: &CriterionId) -> bool {
        self.criteria.iter().any(|c| c.parent.as_ref() == Some(id))
    }

    /// Assigns own-level weights to the sibling group under `parent`.
    ///
    /// `weights` must match the group in length and order, be finite and
    /// non-negative, and sum to 1 within [`WEIGHT_SUM_TOLERANCE`].
    pub fn assign_group_weights(
        &mut self,
        parent: Option<&CriterionId>,
        weights: &[f64],
    ) -> Result<(), CriteriaError> {
        let group_label = match parent {
            Some(id) => id.to_string(),
            None => "(root)".to_string(),
        };
        let member_ids: Vec<CriterionId> = self
            .children_of(parent)
            .into_iter()
            .map(|c| c.id.clone())
            .collect();
        if member_ids.len() != weights.len() {
            return Err(CriteriaError::GroupSizeMismatch {
                group: group_label,
                expected: member_ids.len(),
                actual: weights.len(),
            });
        }
        for (id, &w) in member_ids.iter().zip(weights) {
            if !w.is_finite() || w < 0.0 {
                return Err(CriteriaError::InvalidWeight {
                    id: id.clone(),
                    weight: w,
                });
            }
        }
        let sum: f64 = weights.iter().sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(CriteriaError::GroupSumMismatch {
                group: group_label,
                sum,
            });
        }
        for (id, &w) in member_ids.iter().zip(weights) {
            let criterion = self
                .criteria
                .iter_mut()
                .find(|c| &c.id == id)
                .expect("group member resolved above");
            criterion.weight = Some(w);
        }
        Ok(())
    }

    /// Composes global leaf weights from resolved own-level weights.
    ///
    /// Each leaf's global weight is its own weight multiplied by every
    /// ancestor's weight up the hierarchy. When every sibling group sums
    /// to 1, the returned weights sum to 1 as well; this invariant is
    /// re-checked and a violation reported as [`CriteriaError::GroupSumMismatch`].
    pub fn global_leaf_weights(&self) -> Result<Vec<(CriterionId, f64)>, CriteriaError> {
        let leaves = self.leaves();
        if leaves.is_empty() {
            return Err(CriteriaError::NoLeaves);
        }
        let mut resolved = Vec::with_capacity(leaves.len());
        for leaf in leaves {
            let mut weight = 1.0;
            let mut current = Some(leaf);
            while let Some(criterion) = current {
                let own = criterion
                    .weight
                    .ok_or_else(|| CriteriaError::UnresolvedWeight {
                        id: criterion.id.clone(),
                    })?;
                weight *= own;
                current = match &criterion.parent {
                    Some(parent) => Some(self.get(parent).ok_or_else(|| {
                        CriteriaError::UnknownCriterion { id: parent.clone() }
                    })?),
                    None => None,
                };
            }
            resolved.push((leaf.id.clone(), weight));
        }
        let sum: f64 = resolved.iter().map(|(_, w)| w).sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(CriteriaError::GroupSumMismatch {
                group: "(global leaves)".to_string(),
                sum,
            });
        }
        Ok(resolved)
    }
}
