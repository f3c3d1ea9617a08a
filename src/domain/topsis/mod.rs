//! TOPSIS module - ranking alternatives by closeness to the ideal solution.
//!
//! A decision matrix is normalized (direction-aware), weighted by a
//! priority vector, and each alternative scored by its relative Euclidean
//! distance to the ideal and anti-ideal points. Ranking is deterministic:
//! descending closeness, ties broken by ascending alternative id.

mod decision_matrix;
mod engine;
mod normalize;

pub use decision_matrix::{CriterionColumn, DecisionMatrix, TopsisError};
pub use engine::{rank, rescale_scores, RankResult, RescaledScore};
pub use normalize::{normalize, NormalizationMode, NormalizedMatrix};
