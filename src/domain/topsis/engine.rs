//! TOPSIS ranking engine.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::ahp::PriorityVector;
use crate::domain::foundation::AlternativeId;

use super::{normalize, DecisionMatrix, NormalizationMode, TopsisError};

/// One alternative's ranking outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankResult {
    pub id: AlternativeId,
    /// Relative closeness to the ideal solution, in [0,1].
    pub closeness: f64,
    /// 1 = best. Ties in closeness are broken by ascending id.
    pub rank: u32,
}

/// Ranks the alternatives of a decision matrix under the given weights.
///
/// Returns results in rank order (best first). The ordering is a total
/// order: descending closeness, then ascending alternative id, so
/// identical inputs always produce identical output.
pub fn rank(
    matrix: &DecisionMatrix,
    weights: &PriorityVector,
    mode: NormalizationMode,
) -> Result<Vec<RankResult>, TopsisError> {
    if weights.len() != matrix.criterion_count() {
        return Err(TopsisError::DimensionMismatch {
            expected: matrix.criterion_count(),
            actual: weights.len(),
        });
    }
    let normalized = normalize(matrix, mode)?;
    let rows = matrix.alternative_count();
    let cols = matrix.criterion_count();

    // Weighted-normalized matrix; direction is already folded in, so the
    // per-column max is the ideal point and the min the anti-ideal.
    let mut weighted = vec![vec![0.0; cols]; rows];
    for r in 0..rows {
        for c in 0..cols {
            weighted[r][c] = normalized.value(r, c) * weights.weights()[c];
        }
    }
    let mut ideal = vec![f64::NEG_INFINITY; cols];
    let mut anti_ideal = vec![f64::INFINITY; cols];
    for row in &weighted {
        for (c, &v) in row.iter().enumerate() {
            ideal[c] = ideal[c].max(v);
            anti_ideal[c] = anti_ideal[c].min(v);
        }
    }

    let mut scored: Vec<(AlternativeId, f64)> = Vec::with_capacity(rows);
    for (r, row) in weighted.iter().enumerate() {
        let d_plus = distance(row, &ideal);
        let d_minus = distance(row, &anti_ideal);
        let denom = d_plus + d_minus;
        if denom == 0.0 {
            return Err(TopsisError::DegenerateScore {
                alternative: matrix.alternatives()[r].clone(),
            });
        }
        scored.push((matrix.alternatives()[r].clone(), d_minus / denom));
    }

    scored.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    let results: Vec<RankResult> = scored
        .into_iter()
        .enumerate()
        .map(|(i, (id, closeness))| RankResult {
            id,
            closeness,
            rank: i as u32 + 1,
        })
        .collect();
    debug!(
        alternatives = rows,
        criteria = cols,
        ?mode,
        best = %results[0].id,
        "ranked decision matrix"
    );
    Ok(results)
}

fn distance(row: &[f64], reference: &[f64]) -> f64 {
    row.iter()
        .zip(reference)
        .map(|(v, r)| (v - r) * (v - r))
        .sum::<f64>()
        .sqrt()
}

/// A closeness coefficient rescaled for presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RescaledScore {
    pub id: AlternativeId,
    pub score: f64,
}

/// Rescales closeness coefficients to `[epsilon, 1]` for presentation
/// layers that cannot render a zero score.
///
/// This never feeds back into ranking: raw closeness coefficients are the
/// contract, the rescaled form is cosmetic. When every coefficient is
/// equal the spread is undefined and all scores map to 1.
pub fn rescale_scores(results: &[RankResult], epsilon: f64) -> Vec<RescaledScore> {
    let min = results.iter().map(|r| r.closeness).fold(f64::INFINITY, f64::min);
    let max = results.iter().map(|r| r.closeness).fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;
    results
        .iter()
        .map(|r| RescaledScore {
            id: r.id.clone(),
            score: if span == 0.0 {
                1.0
            } else {
                (r.closeness - min) / span * (1.0 - epsilon) + epsilon
            },
        })
        .collect()
}
