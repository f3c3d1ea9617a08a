//! Criterion record - one node in the decision hierarchy.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CriterionId, Direction};

/// A criterion or sub-criterion against which alternatives are scored.
///
/// `weight` is the criterion's share within its sibling group, assigned
/// after AHP weighting; it stays `None` until then.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Criterion {
    pub id: CriterionId,
    pub name: String,
    pub direction: Direction,
    /// Parent criterion for sub-criteria; `None` for top-level criteria.
    pub parent: Option<CriterionId>,
    /// Own-level weight within the sibling group, in [0,1].
    pub weight: Option<f64>,
}

impl Criterion {
    /// Creates a top-level criterion.
    pub fn new(id: CriterionId, name: impl Into<String>, direction: Direction) -> Self {
        Self {
            id,
            name: name.into(),
            direction,
            parent: None,
            weight: None,
        }
    }

    /// Creates a sub-criterion under the given parent.
    pub fn child_of(
        parent: CriterionId,
        id: CriterionId,
        name: impl Into<String>,
        direction: Direction,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            direction,
            parent: Some(parent),
            weight: None,
        }
    }

    /// Returns true if this criterion sits at the top of the hierarchy.
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}
