use serde::{Deserialize, Serialize};
use std::fmt;

/// Probability bucket shown next to every simulated target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLabel {
    Safe,
    Stable,
    Reach,
    Risk,
}

impl RiskLabel {
    pub const ALL: [RiskLabel; 4] = [
        RiskLabel::Safe,
        RiskLabel::Stable,
        RiskLabel::Reach,
        RiskLabel::Risk,
    ];

    pub fn label(self) -> &'static str {
        match self {
            RiskLabel::Safe => "Safe",
            RiskLabel::Stable => "Stable",
            RiskLabel::Reach => "Reach",
            RiskLabel::Risk => "Risk",
        }
    }
}

impl fmt::Display for RiskLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Line type used by the peer scatter view, derived from an index pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineType {
    Safe,
    Stable,
    Reach,
}

impl LineType {
    pub fn label(self) -> &'static str {
        match self {
            LineType::Safe => "Safe",
            LineType::Stable => "Stable",
            LineType::Reach => "Reach",
        }
    }
}

impl fmt::Display for LineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Inclusive lower bounds, evaluated top-down. NaN falls through to `Risk`.
pub fn classify_risk(probability: f64) -> RiskLabel {
    match probability {
        p if p >= 90.0 => RiskLabel::Safe,
        p if p >= 75.0 => RiskLabel::Stable,
        p if p >= 50.0 => RiskLabel::Reach,
        _ => RiskLabel::Risk,
    }
}

pub fn classify_line(academic_index: f64, practical_index: f64) -> LineType {
    if academic_index > 75.0 && practical_index > 75.0 {
        LineType::Safe
    } else if academic_index > 60.0 || practical_index > 80.0 {
        LineType::Stable
    } else {
        LineType::Reach
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn risk_thresholds_are_inclusive_lower_bounds() {
        assert_eq!(classify_risk(99.0), RiskLabel::Safe);
        assert_eq!(classify_risk(90.0), RiskLabel::Safe);
        assert_eq!(classify_risk(89.999), RiskLabel::Stable);
        assert_eq!(classify_risk(75.0), RiskLabel::Stable);
        assert_eq!(classify_risk(74.9), RiskLabel::Reach);
        assert_eq!(classify_risk(50.0), RiskLabel::Reach);
        assert_eq!(classify_risk(49.99), RiskLabel::Risk);
        assert_eq!(classify_risk(0.0), RiskLabel::Risk);
        assert_eq!(classify_risk(-12.0), RiskLabel::Risk);
        assert_eq!(classify_risk(f64::NAN), RiskLabel::Risk);
    }

    #[test]
    fn line_type_requires_both_indices_for_safe() {
        assert_eq!(classify_line(76.0, 76.0), LineType::Safe);
        assert_eq!(classify_line(75.0, 90.0), LineType::Stable);
        assert_eq!(classify_line(61.0, 20.0), LineType::Stable);
        assert_eq!(classify_line(40.0, 81.0), LineType::Stable);
        assert_eq!(classify_line(60.0, 80.0), LineType::Reach);
    }
}
