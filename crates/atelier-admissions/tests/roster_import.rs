use std::io::Cursor;
use std::sync::Arc;

use atelier_admissions::admissions::AdmissionsService;
use atelier_admissions::narrative::TemplateNarrator;
use atelier_admissions::roster::{
    InMemoryRoster, RepositoryError, RosterImportError, RosterImporter, Student,
};
use atelier_admissions::scoring::{PracticalLevel, TargetId};

fn intake() -> Vec<Student> {
    let data = include_bytes!("../fixtures/spring_intake.csv");
    RosterImporter::from_reader(&data[..]).expect("intake imports")
}

#[test]
fn importer_reads_fixture_export() {
    let students = intake();

    assert_eq!(students.len(), 3);
    let go_eun = students
        .iter()
        .find(|student| student.id.0 == "stu-102")
        .expect("stu-102 imported");
    assert_eq!(go_eun.practical_level, Some(PracticalLevel::BPlus));
    assert!(go_eun.academic.mathematics.standard_score.is_none());

    let moon = students
        .iter()
        .find(|student| student.id.0 == "stu-103")
        .expect("stu-103 imported");
    assert_eq!(moon.practical_level, None);
    assert_eq!(moon.practical_score, 0.0);
    assert_eq!(moon.academic.elective_2.standard_score, None);
}

#[test]
fn imported_students_join_the_seeded_dashboard() {
    let roster = Arc::new(InMemoryRoster::seeded());
    let added = roster.insert_students(intake()).expect("insert succeeds");
    assert_eq!(added, 3);

    let service = AdmissionsService::new(
        roster.clone(),
        roster,
        Arc::new(TemplateNarrator::default()),
    );
    let dashboard = service.dashboard().expect("dashboard builds");

    assert_eq!(dashboard.total_students, 15);
    let painting = dashboard
        .targets
        .iter()
        .find(|summary| summary.target_id == TargetId("hongik-painting".to_string()))
        .expect("painting summary");
    // stu-102 has no math score and painting weights math
    assert_eq!(painting.unscored, 1);
}

#[test]
fn reimporting_the_same_students_conflicts() {
    let roster = InMemoryRoster::seeded();
    roster.insert_students(intake()).expect("first insert");

    let err = roster.insert_students(intake()).unwrap_err();
    assert!(matches!(err, RepositoryError::Conflict));
}

#[test]
fn unknown_level_names_the_student() {
    let csv = "Student ID,Name,Cohort,Target ID,Korean,Math,English Grade,Elective 1,Elective 2,Practical Level,Practical Score\n\
stu-200,Ha Rin,2027,snu-design,110,100,3,55,55,S+,80\n";

    match RosterImporter::from_reader(Cursor::new(csv)) {
        Err(RosterImportError::InvalidLevel { student_id, label }) => {
            assert_eq!(student_id, "stu-200");
            assert_eq!(label, "S+");
        }
        other => panic!("expected invalid level, got {other:?}"),
    }
}

#[test]
fn missing_file_is_an_io_error() {
    let err = RosterImporter::from_path("fixtures/does-not-exist.csv").unwrap_err();
    assert!(matches!(err, RosterImportError::Io(_)));
}

#[test]
fn non_finite_cells_never_reach_the_roster() {
    let csv = "Student ID,Name,Cohort,Target ID,Korean,Math,English Grade,Elective 1,Elective 2,Practical Level,Practical Score\n\
stu-900,Kim Hana,2027,snu-design,NaN,100,2,60,58,A,inf\n";

    let err = RosterImporter::from_reader(Cursor::new(csv)).unwrap_err();
    assert!(matches!(err, RosterImportError::InvalidScore { .. }));

    let roster = Arc::new(InMemoryRoster::seeded());
    let service = AdmissionsService::new(
        roster.clone(),
        roster,
        Arc::new(TemplateNarrator::default()),
    );
    let analytics = service
        .peer_analytics(&TargetId("snu-design".to_string()))
        .expect("peer group stays scorable");
    assert_eq!(analytics.entries.len(), 3);
}
