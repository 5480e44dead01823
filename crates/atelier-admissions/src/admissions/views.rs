use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::roster::StudentId;
use crate::scoring::{
    AcademicProfile, AdmissionTrack, ClusterLabel, CompositeResult, Gap, IndexPair, LineFit,
    LineType, MetricDirection, RiskLabel, SubjectSlot, TargetId, TermContribution,
};

/// What-if adjustments applied on top of a student's stored scores.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreOverrides {
    #[serde(default)]
    pub korean: Option<f64>,
    #[serde(default)]
    pub math: Option<f64>,
    #[serde(default)]
    pub english_grade: Option<u8>,
    #[serde(default)]
    pub elective_1: Option<f64>,
    #[serde(default)]
    pub elective_2: Option<f64>,
    #[serde(default)]
    pub practical_score: Option<f64>,
}

impl ScoreOverrides {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    pub(crate) fn apply(&self, profile: &mut AcademicProfile, practical_score: &mut f64) {
        let standard = [
            (SubjectSlot::PrimaryLanguage, self.korean),
            (SubjectSlot::Mathematics, self.math),
            (SubjectSlot::Elective1, self.elective_1),
            (SubjectSlot::Elective2, self.elective_2),
        ];
        for (slot, value) in standard {
            if let Some(value) = value {
                profile.slot_mut(slot).standard_score = Some(value);
            }
        }
        if let Some(grade) = self.english_grade {
            profile.foreign_language.grade = Some(grade);
        }
        if let Some(score) = self.practical_score {
            *practical_score = score;
        }
    }
}

/// Simulator input: either a rostered student or an ad-hoc profile, against one target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRequest {
    #[serde(default)]
    pub student_id: Option<StudentId>,
    #[serde(default)]
    pub profile: Option<AcademicProfile>,
    #[serde(default)]
    pub practical_score: Option<f64>,
    pub target_id: TargetId,
    #[serde(default)]
    pub overrides: ScoreOverrides,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationOutcome {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_id: Option<StudentId>,
    pub target_id: TargetId,
    pub target_name: String,
    pub track: AdmissionTrack,
    pub composite: CompositeResult,
    pub risk: RiskLabel,
    pub cutline: f64,
    /// Composite total against the cutline, higher is better.
    pub cutline_gap: Gap,
    pub contributions: Vec<TermContribution>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompareRequest {
    pub student_id: StudentId,
    pub target_ids: Vec<TargetId>,
    #[serde(default)]
    pub overrides: ScoreOverrides,
}

/// Outcomes across several targets, most likely admission first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetComparison {
    pub student_id: StudentId,
    pub outcomes: Vec<SimulationOutcome>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeerEntry {
    pub student_id: StudentId,
    pub name: String,
    pub raw_score: f64,
    pub indices: IndexPair,
    pub line: LineType,
    pub cluster: ClusterLabel,
}

/// Peer scatter data for one target group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeerAnalytics {
    pub target_id: TargetId,
    pub peer_mean: f64,
    pub entries: Vec<PeerEntry>,
    /// Students left out because their profile lacks standard scores.
    pub skipped: Vec<StudentId>,
    pub cluster_counts: BTreeMap<ClusterLabel, usize>,
    /// Academic index on x, practical index on y. `None` when no line can be fitted.
    pub trend: Option<LineFit>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectGap {
    pub subject: SubjectSlot,
    pub label: String,
    pub student_value: f64,
    pub peer_average: f64,
    pub direction: MetricDirection,
    pub gap: Gap,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectGapReport {
    pub student_id: StudentId,
    pub target_id: TargetId,
    pub peer_count: usize,
    pub gaps: Vec<SubjectGap>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetSummary {
    pub target_id: TargetId,
    pub target_name: String,
    pub track: AdmissionTrack,
    pub cutline: f64,
    pub students: usize,
    pub risk_counts: BTreeMap<RiskLabel, usize>,
    /// Students whose probability could not be computed.
    pub unscored: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_probability: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub total_students: usize,
    pub targets: Vec<TargetSummary>,
}
