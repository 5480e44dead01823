use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::scoring::{AcademicProfile, PracticalLevel, TargetId};

/// Identifier wrapper for enrolled students.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StudentId(pub String);

/// Roster entry for one academy student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    pub name: String,
    pub cohort: String,
    pub target_id: TargetId,
    pub academic: AcademicProfile,
    pub practical_level: Option<PracticalLevel>,
    /// Studio exam score fed to the composite's practical term.
    pub practical_score: f64,
    #[serde(default)]
    pub evaluations: Vec<EvaluationEntry>,
}

impl Student {
    pub fn latest_evaluation(&self) -> Option<&EvaluationEntry> {
        self.evaluations
            .iter()
            .max_by_key(|entry| entry.recorded_on)
    }
}

/// Instructor evaluation captured on the evaluation-entry page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationEntry {
    pub recorded_on: NaiveDate,
    pub instructor: String,
    pub practical_level: PracticalLevel,
    pub practical_score: f64,
    #[serde(default)]
    pub comment: Option<String>,
}

/// Payload for recording a new evaluation. A provided academic profile replaces the
/// stored one wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationSubmission {
    pub recorded_on: NaiveDate,
    pub instructor: String,
    pub practical_level: PracticalLevel,
    pub practical_score: f64,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub academic: Option<AcademicProfile>,
}
