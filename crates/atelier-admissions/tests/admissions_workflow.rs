use std::sync::Arc;

use chrono::NaiveDate;

use atelier_admissions::admissions::{
    AdmissionsService, CompareRequest, ScoreOverrides, SimulationRequest,
};
use atelier_admissions::narrative::TemplateNarrator;
use atelier_admissions::roster::{EvaluationSubmission, InMemoryRoster, StudentId};
use atelier_admissions::scoring::{PracticalLevel, RiskLabel, TargetId};

fn seeded_service() -> AdmissionsService<InMemoryRoster, InMemoryRoster> {
    let roster = Arc::new(InMemoryRoster::seeded());
    AdmissionsService::new(roster.clone(), roster, Arc::new(TemplateNarrator::default()))
}

fn simulation(student: &str, target: &str) -> SimulationRequest {
    SimulationRequest {
        student_id: Some(StudentId(student.to_string())),
        profile: None,
        practical_score: None,
        target_id: TargetId(target.to_string()),
        overrides: ScoreOverrides::default(),
    }
}

#[test]
fn weaker_studio_evaluation_lowers_the_risk_label() {
    let service = seeded_service();

    let before = service
        .simulate(simulation("stu-005", "snu-design"))
        .expect("baseline simulation");
    assert_eq!(before.composite.probability_percent, 91);
    assert_eq!(before.risk, RiskLabel::Safe);

    service
        .record_evaluation(
            &StudentId("stu-005".to_string()),
            EvaluationSubmission {
                recorded_on: NaiveDate::from_ymd_opt(2025, 11, 3).expect("valid date"),
                instructor: "Studio review board".to_string(),
                practical_level: PracticalLevel::C,
                practical_score: 40.0,
                comment: Some("Unfinished mock exam piece".to_string()),
                academic: None,
            },
        )
        .expect("evaluation stored");

    let after = service
        .simulate(simulation("stu-005", "snu-design"))
        .expect("follow-up simulation");
    assert_eq!(after.composite.probability_percent, 76);
    assert_eq!(after.risk, RiskLabel::Stable);

    let student = service
        .student(&StudentId("stu-005".to_string()))
        .expect("student stored");
    assert_eq!(student.evaluations.len(), 2);
    assert_eq!(
        student.latest_evaluation().map(|entry| entry.practical_level),
        Some(PracticalLevel::C)
    );
}

#[test]
fn comparison_across_every_target_is_sorted() {
    let service = seeded_service();
    let target_ids = service
        .targets()
        .expect("targets")
        .into_iter()
        .map(|target| target.id)
        .collect::<Vec<_>>();

    let comparison = service
        .compare_targets(CompareRequest {
            student_id: StudentId("stu-004".to_string()),
            target_ids,
            overrides: ScoreOverrides::default(),
        })
        .expect("comparison");

    assert_eq!(comparison.outcomes.len(), 5);
    for pair in comparison.outcomes.windows(2) {
        assert!(pair[0].composite.probability_percent >= pair[1].composite.probability_percent);
    }
    let design = comparison
        .outcomes
        .iter()
        .find(|outcome| outcome.target_id.0 == "snu-design")
        .expect("snu-design compared");
    assert_eq!(design.composite.probability_percent, 99);
}

#[test]
fn seeded_peer_groups_produce_scatter_and_trend() {
    let service = seeded_service();

    let analytics = service
        .peer_analytics(&TargetId("snu-design".to_string()))
        .expect("peer analytics");

    assert_eq!(analytics.entries.len(), 3);
    assert!(analytics.trend.is_some());
    for entry in &analytics.entries {
        assert!((20.0..=98.0).contains(&entry.indices.academic_index));
        assert!((20.0..=98.0).contains(&entry.indices.practical_index));
    }
    let total: usize = analytics.cluster_counts.values().sum();
    assert_eq!(total, 3);
}

#[test]
fn dashboard_accounts_for_every_seeded_student() {
    let service = seeded_service();

    let dashboard = service.dashboard().expect("dashboard");

    assert_eq!(dashboard.total_students, 12);
    assert_eq!(dashboard.targets.len(), 5);
    for summary in &dashboard.targets {
        let labelled: usize = summary.risk_counts.values().sum();
        assert_eq!(labelled + summary.unscored, summary.students);
    }
}
