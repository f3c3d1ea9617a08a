//! Domain layer - decision-analysis engines and their value objects.
//!
//! Data flows strictly forward through the pipeline: a [`criteria::CriteriaSpec`]
//! describes what is being compared, [`ahp`] turns pairwise judgments into
//! criterion weights, [`topsis`] scores and ranks alternatives against those
//! weights, and [`sensitivity`] probes how stable the resulting ranks are
//! under weight perturbation. No module mutates another's inputs.

pub mod ahp;
pub mod criteria;
pub mod foundation;
pub mod sensitivity;
pub mod topsis;
