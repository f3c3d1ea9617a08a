//! End-to-end pipeline tests: pairwise judgments through AHP weighting,
//! TOPSIS ranking, and a sensitivity sweep over the same inputs.

use rank_sherpa::config::{AnalysisConfig, SweepConfig};
use rank_sherpa::domain::ahp::{
    compute_group_weights, weight_hierarchy, PairwiseMatrix, PriorityVector,
};
use rank_sherpa::domain::criteria::{CriteriaSpec, Criterion};
use rank_sherpa::domain::foundation::{AlternativeId, CriterionId, Direction};
use rank_sherpa::domain::sensitivity::{analyze, Stability};
use rank_sherpa::domain::topsis::{
    rank, rescale_scores, CriterionColumn, DecisionMatrix, NormalizationMode,
};

fn aid(s: &str) -> AlternativeId {
    AlternativeId::new(s).unwrap()
}

fn cid(s: &str) -> CriterionId {
    CriterionId::new(s).unwrap()
}

/// Two pillars (economy weighted over environment 3:1), economy split
/// 2:1 into GDP and unemployment, environment carried by air quality.
fn region_criteria() -> (CriteriaSpec, Vec<(Option<CriterionId>, PairwiseMatrix)>) {
    let mut spec = CriteriaSpec::new();
    spec.add(Criterion::new(cid("economy"), "Economy", Direction::Benefit))
        .unwrap();
    spec.add(Criterion::new(
        cid("environment"),
        "Environment",
        Direction::Benefit,
    ))
    .unwrap();
    spec.add(Criterion::child_of(
        cid("economy"),
        cid("gdp"),
        "GDP per capita",
        Direction::Benefit,
    ))
    .unwrap();
    spec.add(Criterion::child_of(
        cid("economy"),
        cid("unemployment"),
        "Unemployment rate",
        Direction::Cost,
    ))
    .unwrap();
    spec.add(Criterion::child_of(
        cid("environment"),
        cid("air"),
        "Air quality index",
        Direction::Benefit,
    ))
    .unwrap();

    let groups = vec![
        (
            None,
            PairwiseMatrix::from_rows(&[vec![1.0, 3.0], vec![1.0 / 3.0, 1.0]]).unwrap(),
        ),
        (
            Some(cid("economy")),
            PairwiseMatrix::from_rows(&[vec![1.0, 2.0], vec![1.0 / 2.0, 1.0]]).unwrap(),
        ),
        (
            Some(cid("environment")),
            PairwiseMatrix::from_rows(&[vec![1.0]]).unwrap(),
        ),
    ];
    (spec, groups)
}

fn region_matrix(spec: &CriteriaSpec) -> DecisionMatrix {
    let columns = spec
        .leaves()
        .into_iter()
        .map(|c| CriterionColumn::new(c.id.clone(), c.direction))
        .collect();
    let mut matrix = DecisionMatrix::new(columns).unwrap();
    matrix
        .add_alternative(aid("north"), vec![30_000.0, 5.0, 70.0])
        .unwrap();
    matrix
        .add_alternative(aid("south"), vec![25_000.0, 3.0, 90.0])
        .unwrap();
    matrix
        .add_alternative(aid("east"), vec![35_000.0, 9.0, 50.0])
        .unwrap();
    matrix
}

#[test]
fn hierarchy_weights_compose_and_sum_to_one() {
    let (mut spec, groups) = region_criteria();
    let hierarchy = weight_hierarchy(&mut spec, &groups).unwrap();

    assert_eq!(
        hierarchy.leaves,
        vec![cid("gdp"), cid("unemployment"), cid("air")]
    );
    let w = hierarchy.weights.weights();
    // 0.75 * 2/3, 0.75 * 1/3, and 0.25.
    assert!((w[0] - 0.5).abs() < 1e-9);
    assert!((w[1] - 0.25).abs() < 1e-9);
    assert!((w[2] - 0.25).abs() < 1e-9);
    assert!((w.iter().sum::<f64>() - 1.0).abs() < 1e-9);

    // Matrices of order 1 and 2 are consistent by construction.
    assert_eq!(hierarchy.weights.consistency_ratio(), 0.0);
    assert!(hierarchy
        .group_consistency
        .iter()
        .all(|(_, cr)| *cr == 0.0));
}

#[test]
fn full_pipeline_ranks_regions_deterministically() {
    let (mut spec, groups) = region_criteria();
    let hierarchy = weight_hierarchy(&mut spec, &groups).unwrap();
    let matrix = region_matrix(&spec);
    let config = AnalysisConfig::default();
    config.validate().unwrap();

    let results = rank(&matrix, &hierarchy.weights, config.normalization).unwrap();

    // GDP dominates at half the total weight, so the GDP leader wins
    // despite the worst unemployment and air scores.
    assert_eq!(results[0].id, aid("east"));
    assert_eq!(results[1].id, aid("north"));
    assert_eq!(results[2].id, aid("south"));
    assert_eq!(
        results.iter().map(|r| r.rank).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );
    for r in &results {
        assert!((0.0..=1.0).contains(&r.closeness));
    }

    // Identical inputs reproduce identical output.
    let again = rank(&matrix, &hierarchy.weights, config.normalization).unwrap();
    assert_eq!(results, again);
}

#[test]
fn sensitivity_report_covers_every_criterion_and_alternative() {
    let (mut spec, groups) = region_criteria();
    let hierarchy = weight_hierarchy(&mut spec, &groups).unwrap();
    let matrix = region_matrix(&spec);

    let report = analyze(
        &matrix,
        &hierarchy.weights,
        NormalizationMode::MinMax,
        &SweepConfig::default(),
    )
    .unwrap();

    assert_eq!(report.sweeps.len(), 3);
    assert_eq!(report.stability.len(), 3);
    assert!(report.is_fully_ranked());
    assert_eq!(report.baseline[0].id, aid("east"));

    // Verdicts must agree with the recorded rank shifts.
    for verdict in &report.stability {
        let expected = if verdict.max_rank_shift <= SweepConfig::default().rank_tolerance {
            Stability::Robust
        } else {
            Stability::Fragile
        };
        assert_eq!(verdict.stability, expected);
    }

    // The report is a plain structured record for presentation layers.
    let json = serde_json::to_string(&report).unwrap();
    assert!(json.contains("\"baseline\""));
    assert!(json.contains("\"sweeps\""));
}

#[test]
fn batch_group_weighting_matches_single_matrix_runs() {
    let pillars = PairwiseMatrix::from_rows(&[vec![1.0, 3.0], vec![1.0 / 3.0, 1.0]]).unwrap();
    let economy = PairwiseMatrix::from_rows(&[vec![1.0, 2.0], vec![1.0 / 2.0, 1.0]]).unwrap();
    let groups = vec![
        ("pillars".to_string(), pillars),
        ("economy".to_string(), economy),
    ];
    let out = compute_group_weights(&groups).unwrap();
    assert_eq!(out.len(), 2);
    assert_eq!(out[0].0, "pillars");
    assert!((out[0].1.weights()[0] - 0.75).abs() < 1e-9);
    assert!((out[1].1.weights()[0] - 2.0 / 3.0).abs() < 1e-9);
}

#[test]
fn rescaled_scores_track_rank_order() {
    let (mut spec, groups) = region_criteria();
    let hierarchy = weight_hierarchy(&mut spec, &groups).unwrap();
    let matrix = region_matrix(&spec);
    let results = rank(&matrix, &hierarchy.weights, NormalizationMode::MinMax).unwrap();

    let rescaled = rescale_scores(&results, 0.01);
    assert_eq!(rescaled[0].id, results[0].id);
    assert!((rescaled[0].score - 1.0).abs() < 1e-12);
    assert!((rescaled[2].score - 0.01).abs() < 1e-12);
}

#[test]
fn equal_weights_shortcut_skips_ahp() {
    // Callers without pairwise judgments can rank with uniform weights.
    let (mut spec, groups) = region_criteria();
    weight_hierarchy(&mut spec, &groups).unwrap();
    let matrix = region_matrix(&spec);
    let weights = PriorityVector::uniform(matrix.criterion_count()).unwrap();
    let results = rank(&matrix, &weights, NormalizationMode::Vector).unwrap();
    assert_eq!(results.len(), 3);
    assert_eq!(results[0].rank, 1);
}
