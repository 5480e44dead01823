use super::domain::{IndexPair, PracticalLevel};
use super::{ensure_finite, ScoringError};

/// Index points per raw-score point of deviation from the peer mean.
pub const ACADEMIC_INDEX_SCALE: f64 = 2.5;
pub const INDEX_FLOOR: f64 = 20.0;
pub const INDEX_CEILING: f64 = 98.0;
/// Index assigned to a practical label outside the level table.
pub const UNMAPPED_PRACTICAL_INDEX: f64 = 50.0;

const ACADEMIC_INDEX_CENTER: f64 = 50.0;

const PRACTICAL_INDEX_TABLE: [(PracticalLevel, f64); 5] = [
    (PracticalLevel::APlus, 98.0),
    (PracticalLevel::A, 92.0),
    (PracticalLevel::BPlus, 85.0),
    (PracticalLevel::B, 78.0),
    (PracticalLevel::C, 65.0),
];

fn clamp_index(value: f64) -> f64 {
    value.clamp(INDEX_FLOOR, INDEX_CEILING)
}

/// Position of a raw score relative to the peer mean, 50 at the mean.
pub fn normalize_academic_index(raw_score: f64, peer_mean: f64) -> Result<f64, ScoringError> {
    let raw_score = ensure_finite("raw_score", raw_score)?;
    let peer_mean = ensure_finite("peer_mean", peer_mean)?;

    Ok(clamp_index(
        ACADEMIC_INDEX_CENTER + (raw_score - peer_mean) * ACADEMIC_INDEX_SCALE,
    ))
}

/// Mean raw score of a peer group.
pub fn peer_mean(raw_scores: &[f64]) -> Result<f64, ScoringError> {
    if raw_scores.is_empty() {
        return Err(ScoringError::InsufficientData {
            what: "peer group is empty".to_string(),
        });
    }
    for value in raw_scores {
        ensure_finite("peer_raw_score", *value)?;
    }

    Ok(raw_scores.iter().sum::<f64>() / raw_scores.len() as f64)
}

impl PracticalLevel {
    pub fn index(self) -> f64 {
        PRACTICAL_INDEX_TABLE
            .iter()
            .find(|(level, _)| *level == self)
            .map(|(_, index)| clamp_index(*index))
            .unwrap_or(UNMAPPED_PRACTICAL_INDEX)
    }
}

/// Practical index for a free-text level label; unknown labels map to 50.
pub fn normalize_practical_index(label: &str) -> f64 {
    PracticalLevel::parse(label)
        .map(PracticalLevel::index)
        .unwrap_or(UNMAPPED_PRACTICAL_INDEX)
}

/// Index pair for a student against a peer mean. A missing practical level counts as unmapped.
pub fn index_pair(
    raw_score: f64,
    peer_mean: f64,
    practical_level: Option<PracticalLevel>,
) -> Result<IndexPair, ScoringError> {
    Ok(IndexPair {
        academic_index: normalize_academic_index(raw_score, peer_mean)?,
        practical_index: practical_level
            .map(PracticalLevel::index)
            .unwrap_or(UNMAPPED_PRACTICAL_INDEX),
    })
}
