//! Criteria module - the hierarchy of criteria being compared.
//!
//! [`CriteriaSpec`] is the single source of truth for criterion direction
//! and hierarchy. It receives per-group weights from the AHP engine and
//! composes them into global leaf weights for the TOPSIS stage.

mod criterion;
mod spec;

pub use criterion::Criterion;
pub use spec::{CriteriaError, CriteriaSpec, WEIGHT_SUM_TOLERANCE};
