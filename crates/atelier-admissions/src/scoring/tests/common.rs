use crate::scoring::domain::{
    AcademicProfile, AdmissionTrack, SubjectScore, TargetId, TargetProfile, WeightVector,
};

pub(super) fn scenario_weights() -> WeightVector {
    WeightVector {
        primary_language: 1.0,
        mathematics: 0.8,
        foreign_language: 0.5,
        electives: 1.0,
        practical: 0.0,
    }
}

pub(super) fn scenario_target() -> TargetProfile {
    TargetProfile {
        id: TargetId("hongik-painting".to_string()),
        university: "Hongik University".to_string(),
        major: "Painting".to_string(),
        track: AdmissionTrack::GroupA,
        weights: scenario_weights(),
        cutline: 135.0,
    }
}

pub(super) fn scenario_profile() -> AcademicProfile {
    AcademicProfile {
        primary_language: SubjectScore::standard(120.0).with_name("Korean"),
        mathematics: SubjectScore::standard(110.0).with_name("Mathematics"),
        foreign_language: SubjectScore::graded(2).with_name("English"),
        elective_1: SubjectScore::standard(60.0).with_name("Social 1"),
        elective_2: SubjectScore::standard(60.0).with_name("Social 2"),
    }
}
