use super::common::*;
use crate::scoring::{
    classify_cluster, classify_risk, compute_composite, compute_gap, estimate_probability,
    evaluate_target, fit_line, normalize_practical_index, ClusterLabel, MetricDirection,
    RiskLabel, SubjectValues, TrendPoint,
};

#[test]
fn composite_and_probability_for_reference_student() {
    let profile = scenario_profile();
    let target = scenario_target();
    let values = SubjectValues::from_profile(&profile, 0.0, &target.weights).expect("values");

    let total = compute_composite(&values, &target.weights).expect("composite");
    assert!((total - 313.0).abs() < 1e-9, "total was {total}");

    let probability = estimate_probability(total, target.cutline).expect("probability");
    assert_eq!(probability, 99);
    assert_eq!(classify_risk(f64::from(probability)), RiskLabel::Safe);

    let result = evaluate_target(&values, &target).expect("evaluation");
    assert_eq!(result.probability_percent, 99);
}

#[test]
fn grade_gap_against_better_reference() {
    let gap = compute_gap(2.0, 1.0, MetricDirection::LowerIsBetter).expect("gap");
    assert_eq!(gap.delta, -1.0);
    assert!(!gap.favorable);
}

#[test]
fn trend_fit_through_two_points() {
    let fit = fit_line(&[TrendPoint::new(20.0, 40.0), TrendPoint::new(100.0, 120.0)])
        .expect("fit");
    assert!((fit.slope - 1.0).abs() < 1e-9);
    assert!((fit.intercept - 20.0).abs() < 1e-9);
}

#[test]
fn cluster_for_strong_student() {
    assert_eq!(classify_cluster(80.0, 85.0), ClusterLabel::Elite);
}

#[test]
fn practical_table_matches_reference_values() {
    assert_eq!(normalize_practical_index("A+"), 98.0);
    assert_eq!(normalize_practical_index("B"), 78.0);
    assert_eq!(normalize_practical_index("C"), 65.0);
}
