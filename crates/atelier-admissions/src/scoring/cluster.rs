use serde::{Deserialize, Serialize};
use std::fmt;

const ELITE_THRESHOLD: f64 = 70.0;
const DOMINANCE_MARGIN: f64 = 10.0;

/// Coarse peer cluster derived from how the two indices compare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClusterLabel {
    Balanced,
    Elite,
    AcademicDriven,
    PracticalDriven,
}

impl ClusterLabel {
    pub fn label(self) -> &'static str {
        match self {
            ClusterLabel::Balanced => "Balanced",
            ClusterLabel::Elite => "Elite",
            ClusterLabel::AcademicDriven => "Academic-driven",
            ClusterLabel::PracticalDriven => "Practical-driven",
        }
    }
}

impl fmt::Display for ClusterLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub fn classify_cluster(academic_index: f64, practical_index: f64) -> ClusterLabel {
    if academic_index > ELITE_THRESHOLD && practical_index > ELITE_THRESHOLD {
        ClusterLabel::Elite
    } else if academic_index > practical_index + DOMINANCE_MARGIN {
        ClusterLabel::AcademicDriven
    } else if practical_index > academic_index + DOMINANCE_MARGIN {
        ClusterLabel::PracticalDriven
    } else {
        ClusterLabel::Balanced
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elite_wins_before_dominance() {
        assert_eq!(classify_cluster(80.0, 85.0), ClusterLabel::Elite);
        assert_eq!(classify_cluster(71.0, 98.0), ClusterLabel::Elite);
    }

    #[test]
    fn dominance_needs_a_strict_margin() {
        assert_eq!(classify_cluster(65.0, 40.0), ClusterLabel::AcademicDriven);
        assert_eq!(classify_cluster(60.0, 50.0), ClusterLabel::Balanced);
        assert_eq!(classify_cluster(50.0, 92.0), ClusterLabel::PracticalDriven);
        assert_eq!(classify_cluster(55.0, 65.0), ClusterLabel::Balanced);
    }
}
