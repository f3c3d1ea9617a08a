//! Direction enum - whether more of a criterion is better or worse.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Optimization direction of a criterion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Higher values are preferred (e.g. revenue, coverage).
    #[default]
    Benefit,
    /// Lower values are preferred (e.g. cost, risk).
    Cost,
}

impl Direction {
    /// Returns true for benefit criteria.
    pub fn is_benefit(&self) -> bool {
        matches!(self, Direction::Benefit)
    }

    /// Returns true for cost criteria.
    pub fn is_cost(&self) -> bool {
        matches!(self, Direction::Cost)
    }

    /// Returns the display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Direction::Benefit => "Benefit",
            Direction::Cost => "Cost",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
