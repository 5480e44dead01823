use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::admissions::{admissions_router, AdmissionsService};
use crate::narrative::TemplateNarrator;
use crate::roster::{InMemoryRoster, RepositoryError, Student, StudentId, StudentRepository};
use crate::scoring::{
    AcademicProfile, AdmissionTrack, PracticalLevel, SubjectScore, TargetId, TargetProfile,
    WeightVector,
};

pub(super) fn painting_target() -> TargetProfile {
    TargetProfile {
        id: TargetId("hongik-painting".to_string()),
        university: "Hongik University".to_string(),
        major: "Painting".to_string(),
        track: AdmissionTrack::GroupA,
        weights: WeightVector {
            primary_language: 1.0,
            mathematics: 0.8,
            foreign_language: 0.5,
            electives: 1.0,
            practical: 0.0,
        },
        cutline: 300.0,
    }
}

pub(super) fn design_target() -> TargetProfile {
    TargetProfile {
        id: TargetId("snu-design".to_string()),
        university: "Seoul National University".to_string(),
        major: "Design".to_string(),
        track: AdmissionTrack::GroupB,
        weights: WeightVector {
            primary_language: 0.6,
            mathematics: 0.4,
            foreign_language: 0.3,
            electives: 0.5,
            practical: 1.2,
        },
        cutline: 400.0,
    }
}

pub(super) fn profile(korean: f64, math: f64, english_grade: u8, electives: (f64, f64)) -> AcademicProfile {
    AcademicProfile {
        primary_language: SubjectScore::standard(korean),
        mathematics: SubjectScore::standard(math),
        foreign_language: SubjectScore::graded(english_grade),
        elective_1: SubjectScore::standard(electives.0),
        elective_2: SubjectScore::standard(electives.1),
    }
}

pub(super) fn student(
    id: &str,
    target: &str,
    academic: AcademicProfile,
    level: Option<PracticalLevel>,
    practical_score: f64,
) -> Student {
    Student {
        id: StudentId(id.to_string()),
        name: format!("Student {id}"),
        cohort: "2026".to_string(),
        target_id: TargetId(target.to_string()),
        academic,
        practical_level: level,
        practical_score,
        evaluations: Vec::new(),
    }
}

/// Three painting students around a raw mean of 100 and one design student.
pub(super) fn roster() -> InMemoryRoster {
    InMemoryRoster::new(
        vec![painting_target(), design_target()],
        vec![
            student(
                "stu-a",
                "hongik-painting",
                profile(120.0, 110.0, 2, (60.0, 60.0)),
                Some(PracticalLevel::A),
                88.0,
            ),
            student(
                "stu-b",
                "hongik-painting",
                profile(100.0, 100.0, 4, (50.0, 50.0)),
                Some(PracticalLevel::C),
                64.0,
            ),
            student(
                "stu-c",
                "hongik-painting",
                profile(110.0, 90.0, 3, (55.0, 45.0)),
                Some(PracticalLevel::APlus),
                96.0,
            ),
            student(
                "stu-d",
                "snu-design",
                profile(130.0, 125.0, 1, (66.0, 64.0)),
                Some(PracticalLevel::BPlus),
                85.0,
            ),
        ],
    )
}

pub(super) type TestService = AdmissionsService<InMemoryRoster, InMemoryRoster>;

pub(super) fn build_service_with(roster: InMemoryRoster) -> TestService {
    let roster = Arc::new(roster);
    AdmissionsService::new(roster.clone(), roster, Arc::new(TemplateNarrator::default()))
}

pub(super) fn build_service() -> TestService {
    build_service_with(roster())
}

pub(super) fn router_with_service(service: TestService) -> axum::Router {
    admissions_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) struct UnavailableRoster;

impl StudentRepository for UnavailableRoster {
    fn fetch(&self, _id: &StudentId) -> Result<Option<Student>, RepositoryError> {
        Err(RepositoryError::Unavailable("storage offline".to_string()))
    }

    fn list(&self) -> Result<Vec<Student>, RepositoryError> {
        Err(RepositoryError::Unavailable("storage offline".to_string()))
    }

    fn by_target(&self, _target_id: &TargetId) -> Result<Vec<Student>, RepositoryError> {
        Err(RepositoryError::Unavailable("storage offline".to_string()))
    }

    fn upsert(&self, _student: Student) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("storage offline".to_string()))
    }
}
