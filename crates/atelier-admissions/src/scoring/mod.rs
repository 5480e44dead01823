//! Admissions scoring engine.
//!
//! Raw subject scores are normalized into bounded indices, combined into a per-target
//! composite, converted into an admission probability and bucketed into labels. Every
//! function here is pure: no I/O, no clocks, no randomness, no shared state.

pub mod classify;
pub mod cluster;
pub mod composite;
pub mod domain;
pub mod gap;
pub mod normalizer;
pub mod probability;
pub mod trend;

#[cfg(test)]
mod tests;

pub use classify::{classify_line, classify_risk, LineType, RiskLabel};
pub use cluster::{classify_cluster, ClusterLabel};
pub use composite::{
    compute_composite, english_pseudo_score, CompositeTerm, SubjectValues, TermContribution,
};
pub use domain::{
    AcademicProfile, AdmissionTrack, CompositeResult, IndexPair, PracticalLevel, SubjectScore,
    SubjectSlot, TargetId, TargetProfile, WeightVector,
};
pub use gap::{compute_gap, Gap, MetricDirection};
pub use normalizer::{
    index_pair, normalize_academic_index, normalize_practical_index, peer_mean,
    ACADEMIC_INDEX_SCALE, INDEX_CEILING, INDEX_FLOOR, UNMAPPED_PRACTICAL_INDEX,
};
pub use probability::{estimate_probability, evaluate_target, CUTLINE_HEADROOM, PROBABILITY_CAP};
pub use trend::{fit_line, LineFit, TrendPoint};

/// Recoverable scoring failures. Invalid inputs are rejected here instead of letting
/// NaN or infinities reach the threshold comparisons.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScoringError {
    #[error("insufficient data: {what}")]
    InsufficientData { what: String },
    #[error("trend fit is degenerate: all x values are identical")]
    DegenerateFit,
    #[error("{field} is out of range: {value}")]
    OutOfRange { field: &'static str, value: f64 },
}

pub(crate) fn ensure_finite(field: &'static str, value: f64) -> Result<f64, ScoringError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ScoringError::OutOfRange { field, value })
    }
}
