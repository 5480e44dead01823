//! Demo dataset the dashboard boots from. All coefficients are hand-authored.

use chrono::NaiveDate;

use crate::scoring::{
    AcademicProfile, AdmissionTrack, PracticalLevel, SubjectScore, TargetId, TargetProfile,
    WeightVector,
};

use super::domain::{EvaluationEntry, Student, StudentId};

fn target(
    id: &str,
    university: &str,
    major: &str,
    track: AdmissionTrack,
    weights: [f64; 5],
    cutline: f64,
) -> TargetProfile {
    let [primary_language, mathematics, foreign_language, electives, practical] = weights;
    TargetProfile {
        id: TargetId(id.to_string()),
        university: university.to_string(),
        major: major.to_string(),
        track,
        weights: WeightVector {
            primary_language,
            mathematics,
            foreign_language,
            electives,
            practical,
        },
        cutline,
    }
}

pub fn seed_targets() -> Vec<TargetProfile> {
    vec![
        target(
            "hongik-painting",
            "Hongik University",
            "Painting",
            AdmissionTrack::GroupA,
            [1.0, 0.8, 0.5, 1.0, 0.0],
            320.0,
        ),
        target(
            "snu-design",
            "Seoul National University",
            "Design",
            AdmissionTrack::GroupB,
            [0.6, 0.4, 0.3, 0.5, 1.2],
            270.0,
        ),
        target(
            "kookmin-visual",
            "Kookmin University",
            "Visual Communication Design",
            AdmissionTrack::GroupA,
            [0.5, 0.2, 0.3, 0.4, 1.0],
            195.0,
        ),
        target(
            "ewha-sculpture",
            "Ewha Womans University",
            "Sculpture",
            AdmissionTrack::GroupC,
            [0.4, 0.3, 0.2, 0.4, 1.5],
            225.0,
        ),
        target(
            "konkuk-media",
            "Konkuk University",
            "Media Art",
            AdmissionTrack::GroupC,
            [0.5, 0.5, 0.3, 0.5, 0.8],
            215.0,
        ),
    ]
}

struct SeedRow {
    id: &'static str,
    name: &'static str,
    cohort: &'static str,
    target: &'static str,
    korean: f64,
    math: f64,
    english_grade: u8,
    electives: (f64, f64),
    level: PracticalLevel,
    practical_score: f64,
}

#[rustfmt::skip]
const SEED_ROWS: [SeedRow; 12] = [
    SeedRow { id: "stu-001", name: "Kim Seoyeon", cohort: "2026", target: "hongik-painting", korean: 128.0, math: 112.0, english_grade: 2, electives: (63.0, 61.0), level: PracticalLevel::A, practical_score: 88.0 },
    SeedRow { id: "stu-002", name: "Lee Jihoon", cohort: "2026", target: "hongik-painting", korean: 116.0, math: 104.0, english_grade: 3, electives: (58.0, 60.0), level: PracticalLevel::BPlus, practical_score: 82.0 },
    SeedRow { id: "stu-003", name: "Park Minji", cohort: "2026", target: "hongik-painting", korean: 109.0, math: 96.0, english_grade: 4, electives: (55.0, 52.0), level: PracticalLevel::APlus, practical_score: 95.0 },
    SeedRow { id: "stu-004", name: "Choi Yuna", cohort: "2026", target: "snu-design", korean: 134.0, math: 128.0, english_grade: 1, electives: (67.0, 66.0), level: PracticalLevel::APlus, practical_score: 96.0 },
    SeedRow { id: "stu-005", name: "Jung Hyunwoo", cohort: "2026", target: "snu-design", korean: 121.0, math: 118.0, english_grade: 2, electives: (62.0, 64.0), level: PracticalLevel::B, practical_score: 76.0 },
    SeedRow { id: "stu-006", name: "Kang Eunbi", cohort: "2026", target: "snu-design", korean: 126.0, math: 109.0, english_grade: 2, electives: (65.0, 59.0), level: PracticalLevel::A, practical_score: 90.0 },
    SeedRow { id: "stu-007", name: "Yoon Dohyun", cohort: "2027", target: "kookmin-visual", korean: 102.0, math: 88.0, english_grade: 4, electives: (50.0, 54.0), level: PracticalLevel::A, practical_score: 89.0 },
    SeedRow { id: "stu-008", name: "Han Soyeon", cohort: "2027", target: "kookmin-visual", korean: 111.0, math: 97.0, english_grade: 3, electives: (56.0, 57.0), level: PracticalLevel::C, practical_score: 64.0 },
    SeedRow { id: "stu-009", name: "Shin Jiwoo", cohort: "2027", target: "ewha-sculpture", korean: 118.0, math: 92.0, english_grade: 3, electives: (60.0, 58.0), level: PracticalLevel::BPlus, practical_score: 84.0 },
    SeedRow { id: "stu-010", name: "Oh Harin", cohort: "2027", target: "ewha-sculpture", korean: 99.0, math: 85.0, english_grade: 5, electives: (48.0, 51.0), level: PracticalLevel::APlus, practical_score: 97.0 },
    SeedRow { id: "stu-011", name: "Lim Taeyang", cohort: "2026", target: "konkuk-media", korean: 113.0, math: 115.0, english_grade: 2, electives: (61.0, 63.0), level: PracticalLevel::B, practical_score: 79.0 },
    SeedRow { id: "stu-012", name: "Seo Arin", cohort: "2026", target: "konkuk-media", korean: 107.0, math: 101.0, english_grade: 3, electives: (57.0, 55.0), level: PracticalLevel::BPlus, practical_score: 83.0 },
];

fn seed_evaluation_date() -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(2025, 9, 1)
}

pub fn seed_students() -> Vec<Student> {
    SEED_ROWS
        .iter()
        .map(|row| {
            let evaluations = seed_evaluation_date()
                .map(|recorded_on| EvaluationEntry {
                    recorded_on,
                    instructor: "Studio review board".to_string(),
                    practical_level: row.level,
                    practical_score: row.practical_score,
                    comment: None,
                })
                .into_iter()
                .collect();

            Student {
                id: StudentId(row.id.to_string()),
                name: row.name.to_string(),
                cohort: row.cohort.to_string(),
                target_id: TargetId(row.target.to_string()),
                academic: AcademicProfile {
                    primary_language: SubjectScore::standard(row.korean).with_name("Korean"),
                    mathematics: SubjectScore::standard(row.math).with_name("Mathematics"),
                    foreign_language: SubjectScore::graded(row.english_grade).with_name("English"),
                    elective_1: SubjectScore::standard(row.electives.0).with_name("Elective 1"),
                    elective_2: SubjectScore::standard(row.electives.1).with_name("Elective 2"),
                },
                practical_level: Some(row.level),
                practical_score: row.practical_score,
                evaluations,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_student_points_at_a_seeded_target() {
        let targets: HashSet<TargetId> = seed_targets().into_iter().map(|t| t.id).collect();
        for student in seed_students() {
            assert!(targets.contains(&student.target_id), "{:?}", student.id);
        }
    }

    #[test]
    fn seeded_weights_are_valid() {
        for target in seed_targets() {
            assert!(target.weights.validate().is_ok());
            assert!(target.cutline > 0.0);
        }
    }

    #[test]
    fn student_ids_are_unique() {
        let students = seed_students();
        let ids: HashSet<&StudentId> = students.iter().map(|s| &s.id).collect();
        assert_eq!(ids.len(), students.len());
    }
}
