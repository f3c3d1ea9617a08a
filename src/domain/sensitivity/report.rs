//! Sensitivity report structures.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AlternativeId, CriterionId};
use crate::domain::topsis::RankResult;

/// Rank-stability classification of one alternative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stability {
    /// Rank never moved beyond the configured tolerance.
    Robust,
    /// Rank moved beyond the tolerance under at least one perturbation.
    Fragile,
}

/// Outcome of ranking under one perturbed weight vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepOutcome {
    /// The full ranking under the perturbed weights.
    Ranked(Vec<RankResult>),
    /// The ranking failed; the step is recorded and the sweep continues.
    Failed { reason: String },
}

/// One perturbation step of one criterion's sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerturbationStep {
    /// Relative weight change applied, e.g. -0.2 for -20%.
    pub delta: f64,
    pub outcome: StepOutcome,
}

impl PerturbationStep {
    /// Returns true if this step's ranking failed.
    pub fn is_failed(&self) -> bool {
        matches!(self.outcome, StepOutcome::Failed { .. })
    }
}

/// All perturbation steps applied to one criterion's weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionSweep {
    pub criterion: CriterionId,
    pub steps: Vec<PerturbationStep>,
}

/// Stability verdict for one alternative across the whole sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlternativeStability {
    pub id: AlternativeId,
    pub baseline_rank: u32,
    /// Largest rank movement observed over all successful steps.
    pub max_rank_shift: u32,
    pub stability: Stability,
}

/// Aggregated result of a full perturbation sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityReport {
    /// Ranking under the unperturbed baseline weights.
    pub baseline: Vec<RankResult>,
    /// One sweep per criterion, in decision-matrix column order.
    pub sweeps: Vec<CriterionSweep>,
    /// One verdict per alternative, in baseline rank order.
    pub stability: Vec<AlternativeStability>,
}

impl SensitivityReport {
    /// Returns true if every perturbation step produced a ranking.
    pub fn is_fully_ranked(&self) -> bool {
        self.sweeps
            .iter()
            .all(|sweep| sweep.steps.iter().all(|step| !step.is_failed()))
    }

    /// Enumerates the steps that failed, with the criterion, the delta,
    /// and the recorded reason.
    pub fn failed_steps(&self) -> Vec<(&CriterionId, f64, &str)> {
        let mut failed = Vec::new();
        for sweep in &self.sweeps {
            for step in &sweep.steps {
                if let StepOutcome::Failed { reason } = &step.outcome {
                    failed.push((&sweep.criterion, step.delta, reason.as_str()));
                }
            }
        }
        failed
    }

    /// Returns the stability verdict for one alternative.
    pub fn stability_of(&self, id: &AlternativeId) -> Option<Stability> {
        self.stability
            .iter()
            .find(|s| &s.id == id)
            .map(|s| s.stability)
    }

    /// Returns the alternatives classified as fragile, in baseline rank order.
    pub fn fragile_alternatives(&self) -> Vec<&AlternativeId> {
        self.stability
            .iter()
            .filter(|s| s.stability == Stability::Fragile)
            .map(|s| &s.id)
            .collect()
    }
}
