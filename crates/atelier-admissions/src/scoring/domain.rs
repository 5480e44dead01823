use std::fmt;

use serde::{Deserialize, Serialize};

use super::ScoringError;

/// Identifier wrapper for admission targets (university + major).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TargetId(pub String);

/// One subject result as entered by staff. At least one of `standard_score` or `grade`
/// must be present for the slot to be usable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubjectScore {
    #[serde(default)]
    pub standard_score: Option<f64>,
    #[serde(default)]
    pub percentile: Option<f64>,
    #[serde(default)]
    pub grade: Option<u8>,
    #[serde(default)]
    pub subject_name: Option<String>,
}

impl SubjectScore {
    pub fn standard(score: f64) -> Self {
        Self {
            standard_score: Some(score),
            ..Self::default()
        }
    }

    pub fn graded(grade: u8) -> Self {
        Self {
            grade: Some(grade),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.subject_name = Some(name.into());
        self
    }

}

/// Fixed subject slots of an academic profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubjectSlot {
    PrimaryLanguage,
    Mathematics,
    ForeignLanguage,
    Elective1,
    Elective2,
}

impl SubjectSlot {
    pub const ALL: [SubjectSlot; 5] = [
        SubjectSlot::PrimaryLanguage,
        SubjectSlot::Mathematics,
        SubjectSlot::ForeignLanguage,
        SubjectSlot::Elective1,
        SubjectSlot::Elective2,
    ];

    pub fn field_name(self) -> &'static str {
        match self {
            SubjectSlot::PrimaryLanguage => "primary_language",
            SubjectSlot::Mathematics => "mathematics",
            SubjectSlot::ForeignLanguage => "foreign_language",
            SubjectSlot::Elective1 => "elective_1",
            SubjectSlot::Elective2 => "elective_2",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SubjectSlot::PrimaryLanguage => "Korean",
            SubjectSlot::Mathematics => "Mathematics",
            SubjectSlot::ForeignLanguage => "English",
            SubjectSlot::Elective1 => "Elective 1",
            SubjectSlot::Elective2 => "Elective 2",
        }
    }
}

/// Five subject results for one evaluation cycle. Re-entry replaces the whole profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AcademicProfile {
    pub primary_language: SubjectScore,
    pub mathematics: SubjectScore,
    pub foreign_language: SubjectScore,
    pub elective_1: SubjectScore,
    pub elective_2: SubjectScore,
}

impl AcademicProfile {
    pub fn slot(&self, slot: SubjectSlot) -> &SubjectScore {
        match slot {
            SubjectSlot::PrimaryLanguage => &self.primary_language,
            SubjectSlot::Mathematics => &self.mathematics,
            SubjectSlot::ForeignLanguage => &self.foreign_language,
            SubjectSlot::Elective1 => &self.elective_1,
            SubjectSlot::Elective2 => &self.elective_2,
        }
    }

    pub fn slot_mut(&mut self, slot: SubjectSlot) -> &mut SubjectScore {
        match slot {
            SubjectSlot::PrimaryLanguage => &mut self.primary_language,
            SubjectSlot::Mathematics => &mut self.mathematics,
            SubjectSlot::ForeignLanguage => &mut self.foreign_language,
            SubjectSlot::Elective1 => &mut self.elective_1,
            SubjectSlot::Elective2 => &mut self.elective_2,
        }
    }

    /// Rejects non-finite standard scores and percentiles before they reach storage.
    pub fn validate(&self) -> Result<(), ScoringError> {
        for slot in SubjectSlot::ALL {
            let score = self.slot(slot);
            for value in [score.standard_score, score.percentile].into_iter().flatten() {
                if !value.is_finite() {
                    return Err(ScoringError::OutOfRange {
                        field: slot.field_name(),
                        value,
                    });
                }
            }
        }
        Ok(())
    }

    /// Peer-comparable raw score: mean of the standard scores present in the
    /// primary-language, mathematics and elective slots.
    pub fn raw_academic_score(&self) -> Result<f64, ScoringError> {
        let scores: Vec<f64> = [
            SubjectSlot::PrimaryLanguage,
            SubjectSlot::Mathematics,
            SubjectSlot::Elective1,
            SubjectSlot::Elective2,
        ]
        .iter()
        .filter_map(|slot| self.slot(*slot).standard_score)
        .collect();

        if scores.is_empty() {
            return Err(ScoringError::InsufficientData {
                what: "standard scores for raw academic score".to_string(),
            });
        }
        if let Some(value) = scores.iter().find(|value| !value.is_finite()) {
            return Err(ScoringError::OutOfRange {
                field: "standard_score",
                value: *value,
            });
        }

        Ok(scores.iter().sum::<f64>() / scores.len() as f64)
    }
}

/// Practical (studio) evaluation level awarded by instructors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PracticalLevel {
    #[serde(rename = "A+")]
    APlus,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "B+")]
    BPlus,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "C")]
    C,
}

impl PracticalLevel {
    pub const ALL: [PracticalLevel; 5] = [
        PracticalLevel::APlus,
        PracticalLevel::A,
        PracticalLevel::BPlus,
        PracticalLevel::B,
        PracticalLevel::C,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PracticalLevel::APlus => "A+",
            PracticalLevel::A => "A",
            PracticalLevel::BPlus => "B+",
            PracticalLevel::B => "B",
            PracticalLevel::C => "C",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|level| level.label().eq_ignore_ascii_case(trimmed))
    }
}

impl fmt::Display for PracticalLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The three admission tracks a target can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdmissionTrack {
    GroupA,
    GroupB,
    GroupC,
}

impl AdmissionTrack {
    pub fn label(self) -> &'static str {
        match self {
            AdmissionTrack::GroupA => "Group A",
            AdmissionTrack::GroupB => "Group B",
            AdmissionTrack::GroupC => "Group C",
        }
    }
}

/// Per-target subject weights. Weights are not normalized and need not sum to one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightVector {
    pub primary_language: f64,
    pub mathematics: f64,
    pub foreign_language: f64,
    pub electives: f64,
    pub practical: f64,
}

impl WeightVector {
    pub(crate) fn entries(&self) -> [(&'static str, f64); 5] {
        [
            ("primary_language", self.primary_language),
            ("mathematics", self.mathematics),
            ("foreign_language", self.foreign_language),
            ("electives", self.electives),
            ("practical", self.practical),
        ]
    }

    pub(crate) fn validate(&self) -> Result<(), ScoringError> {
        for (field, weight) in self.entries() {
            if !weight.is_finite() || weight < 0.0 {
                return Err(ScoringError::OutOfRange {
                    field,
                    value: weight,
                });
            }
        }
        Ok(())
    }
}

/// A named admission target with its weights and historical cutline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetProfile {
    pub id: TargetId,
    pub university: String,
    pub major: String,
    pub track: AdmissionTrack,
    pub weights: WeightVector,
    pub cutline: f64,
}

impl TargetProfile {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.university, self.major)
    }
}

/// Composite total and probability for one (profile, practical, target) triple.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompositeResult {
    pub total: f64,
    pub probability_percent: u8,
}

/// Academic and practical indices of a student within a peer group.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndexPair {
    pub academic_index: f64,
    pub practical_index: f64,
}
