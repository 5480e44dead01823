use serde::{Deserialize, Serialize};

use super::{ensure_finite, ScoringError};

/// Which way a metric improves. Grades rank 1 as best, so they are `LowerIsBetter`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricDirection {
    HigherIsBetter,
    LowerIsBetter,
}

/// Signed difference oriented so that a non-negative delta is always favorable.
/// Display code colors by `favorable`, never by the raw sign of the inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Gap {
    pub delta: f64,
    pub favorable: bool,
}

impl Gap {
    pub fn signed_label(&self) -> String {
        if self.delta >= 0.0 {
            format!("+{:.1}", self.delta)
        } else {
            format!("{:.1}", self.delta)
        }
    }
}

pub fn compute_gap(
    student_value: f64,
    reference_value: f64,
    direction: MetricDirection,
) -> Result<Gap, ScoringError> {
    let student_value = ensure_finite("student_value", student_value)?;
    let reference_value = ensure_finite("reference_value", reference_value)?;

    let delta = match direction {
        MetricDirection::HigherIsBetter => student_value - reference_value,
        MetricDirection::LowerIsBetter => reference_value - student_value,
    };

    Ok(Gap {
        delta,
        favorable: delta >= 0.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn worse_grade_is_unfavorable() {
        let gap = compute_gap(2.0, 1.0, MetricDirection::LowerIsBetter).unwrap();
        assert_eq!(gap.delta, -1.0);
        assert!(!gap.favorable);
        assert_eq!(gap.signed_label(), "-1.0");
    }

    #[test]
    fn better_grade_is_favorable() {
        let gap = compute_gap(1.0, 3.0, MetricDirection::LowerIsBetter).unwrap();
        assert_eq!(gap.delta, 2.0);
        assert!(gap.favorable);
    }

    #[test]
    fn higher_score_above_reference_is_favorable() {
        let gap = compute_gap(128.0, 120.5, MetricDirection::HigherIsBetter).unwrap();
        assert_eq!(gap.delta, 7.5);
        assert!(gap.favorable);
        assert_eq!(gap.signed_label(), "+7.5");
    }

    #[test]
    fn equal_values_are_favorable() {
        let gap = compute_gap(100.0, 100.0, MetricDirection::HigherIsBetter).unwrap();
        assert!(gap.favorable);
    }

    #[test]
    fn rejects_non_finite() {
        assert!(compute_gap(f64::NAN, 1.0, MetricDirection::HigherIsBetter).is_err());
    }
}
