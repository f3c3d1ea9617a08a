//! Sensitivity analyzer - perturbation sweeps over criterion weights.

use std::collections::HashMap;
use thiserror::Error;
use tracing::debug;

use crate::config::{ConfigError, SweepConfig};
use crate::domain::ahp::PriorityVector;
use crate::domain::foundation::AlternativeId;
use crate::domain::topsis::{rank, DecisionMatrix, NormalizationMode, TopsisError};

use super::{
    AlternativeStability, CriterionSweep, PerturbationStep, SensitivityReport, Stability,
    StepOutcome,
};

/// Steps whose delta is this close to zero repeat the baseline and are
/// skipped.
const ZERO_DELTA_TOLERANCE: f64 = 1e-12;

/// Errors that abort a sensitivity analysis outright.
///
/// Failures inside individual perturbation steps are recorded in the
/// report instead; only a broken configuration or an unrankable baseline
/// stops the sweep.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SensitivityError {
    #[error("baseline ranking failed: {0}")]
    Baseline(#[from] TopsisError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Sweeps every criterion's weight through the configured range and
/// aggregates the rank movement of every alternative.
///
/// For each criterion `k` and delta `d`, the adjusted vector sets
/// `w[k] = baseline[k] * (1 + d)`, clips at zero, and renormalizes the
/// whole vector, which redistributes the remainder across the other
/// weights while preserving their relative ratios.
pub fn analyze(
    matrix: &DecisionMatrix,
    baseline: &PriorityVector,
    mode: NormalizationMode,
    sweep: &SweepConfig,
) -> Result<SensitivityReport, SensitivityError> {
    sweep.validate()?;
    let baseline_results = rank(matrix, baseline, mode)?;
    let baseline_ranks: HashMap<&AlternativeId, u32> = baseline_results
        .iter()
        .map(|r| (&r.id, r.rank))
        .collect();
    let mut max_shift: HashMap<&AlternativeId, u32> = baseline_results
        .iter()
        .map(|r| (&r.id, 0))
        .collect();

    let deltas = sweep.deltas();
    let mut sweeps = Vec::with_capacity(matrix.criterion_count());
    for (k, column) in matrix.columns().iter().enumerate() {
        let mut steps = Vec::with_capacity(deltas.len());
        for &delta in &deltas {
            if delta.abs() < ZERO_DELTA_TOLERANCE {
                continue;
            }
            let outcome = match perturbed_weights(baseline.weights(), k, delta) {
                Ok(weights) => {
                    let adjusted = PriorityVector::renormalized(weights, 0.0);
                    match rank(matrix, &adjusted, mode) {
                        Ok(results) => {
                            for r in &results {
                                let shift = r.rank.abs_diff(baseline_ranks[&r.id]);
                                let entry = max_shift
                                    .get_mut(&r.id)
                                    .expect("alternative present in baseline");
                                *entry = (*entry).max(shift);
                            }
                            StepOutcome::Ranked(results)
                        }
                        Err(err) => StepOutcome::Failed {
                            reason: err.to_string(),
                        },
                    }
                }
                Err(reason) => StepOutcome::Failed { reason },
            };
            steps.push(PerturbationStep { delta, outcome });
        }
        debug!(
            criterion = %column.id,
            steps = steps.len(),
            failed = steps.iter().filter(|s| s.is_failed()).count(),
            "completed perturbation sweep"
        );
        sweeps.push(CriterionSweep {
            criterion: column.id.clone(),
            steps,
        });
    }

    let stability = baseline_results
        .iter()
        .map(|r| {
            let shift = max_shift[&r.id];
            AlternativeStability {
                id: r.id.clone(),
                baseline_rank: r.rank,
                max_rank_shift: shift,
                stability: if shift <= sweep.rank_tolerance {
                    Stability::Robust
                } else {
                    Stability::Fragile
                },
            }
        })
        .collect();

    Ok(SensitivityReport {
        baseline: baseline_results,
        sweeps,
        stability,
    })
}

/// Applies one relative perturbation and renormalizes to sum 1.
fn perturbed_weights(base: &[f64], k: usize, delta: f64) -> Result<Vec<f64>, String> {
    let mut weights = base.to_vec();
    weights[k] = (weights[k] * (1.0 + delta)).max(0.0);
    let total: f64 = weights.iter().sum();
    if total <= 0.0 || !total.is_finite() {
        return Err(format!(
            "perturbed weights sum to {total} and cannot be renormalized"
        ));
    }
    for w in &mut weights {
        *w /= total;
    }
    Ok(weights)
}
