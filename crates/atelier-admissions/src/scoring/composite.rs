use serde::{Deserialize, Serialize};

use super::domain::{AcademicProfile, SubjectSlot, WeightVector};
use super::{ensure_finite, ScoringError};

const ENGLISH_GRADE_PENALTY: f64 = 5.0;

/// Grades rank 1 as best, so the English grade is inverted into a pseudo-score.
/// Grades worse than 20 yield a negative value, which is kept as-is.
pub fn english_pseudo_score(grade: f64) -> f64 {
    100.0 - grade * ENGLISH_GRADE_PENALTY
}

/// Subject values fed to the composite, already pulled out of a profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubjectValues {
    pub primary_language: f64,
    pub mathematics: f64,
    pub foreign_language_grade: f64,
    pub elective_1: f64,
    pub elective_2: f64,
    pub practical: f64,
}

/// Terms of the weighted sum, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompositeTerm {
    PrimaryLanguage,
    Mathematics,
    ForeignLanguage,
    Electives,
    Practical,
}

impl CompositeTerm {
    pub fn label(self) -> &'static str {
        match self {
            CompositeTerm::PrimaryLanguage => "Korean",
            CompositeTerm::Mathematics => "Mathematics",
            CompositeTerm::ForeignLanguage => "English",
            CompositeTerm::Electives => "Electives",
            CompositeTerm::Practical => "Practical",
        }
    }
}

/// Discrete contribution to a composite total, kept so the simulator can show its work.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TermContribution {
    pub term: CompositeTerm,
    pub value: f64,
    pub weight: f64,
    pub points: f64,
}

impl SubjectValues {
    /// Extract composite inputs from a profile. A slot may be missing only when its weight is zero.
    pub fn from_profile(
        profile: &AcademicProfile,
        practical_score: f64,
        weights: &WeightVector,
    ) -> Result<Self, ScoringError> {
        weights.validate()?;

        let standard = |slot: SubjectSlot, weight: f64| -> Result<f64, ScoringError> {
            match profile.slot(slot).standard_score {
                Some(score) => Ok(score),
                None if weight == 0.0 => Ok(0.0),
                None => Err(ScoringError::InsufficientData {
                    what: format!("{} standard score", slot.label()),
                }),
            }
        };

        let foreign_language_grade = match profile.foreign_language.grade {
            Some(grade) => f64::from(grade),
            None if weights.foreign_language == 0.0 => 0.0,
            None => {
                return Err(ScoringError::InsufficientData {
                    what: format!("{} grade", SubjectSlot::ForeignLanguage.label()),
                })
            }
        };

        Ok(Self {
            primary_language: standard(SubjectSlot::PrimaryLanguage, weights.primary_language)?,
            mathematics: standard(SubjectSlot::Mathematics, weights.mathematics)?,
            foreign_language_grade,
            elective_1: standard(SubjectSlot::Elective1, weights.electives)?,
            elective_2: standard(SubjectSlot::Elective2, weights.electives)?,
            practical: practical_score,
        })
    }

    fn validate(&self) -> Result<(), ScoringError> {
        ensure_finite("primary_language", self.primary_language)?;
        ensure_finite("mathematics", self.mathematics)?;
        ensure_finite("foreign_language_grade", self.foreign_language_grade)?;
        ensure_finite("elective_1", self.elective_1)?;
        ensure_finite("elective_2", self.elective_2)?;
        ensure_finite("practical", self.practical)?;
        Ok(())
    }

    /// Per-term breakdown of the weighted sum.
    pub fn contributions(
        &self,
        weights: &WeightVector,
    ) -> Result<Vec<TermContribution>, ScoringError> {
        self.validate()?;
        weights.validate()?;

        let electives_mean = (self.elective_1 + self.elective_2) / 2.0;
        let terms = [
            (
                CompositeTerm::PrimaryLanguage,
                self.primary_language,
                weights.primary_language,
            ),
            (
                CompositeTerm::Mathematics,
                self.mathematics,
                weights.mathematics,
            ),
            (
                CompositeTerm::ForeignLanguage,
                english_pseudo_score(self.foreign_language_grade),
                weights.foreign_language,
            ),
            (CompositeTerm::Electives, electives_mean, weights.electives),
            (CompositeTerm::Practical, self.practical, weights.practical),
        ];

        terms
            .into_iter()
            .map(|(term, value, weight)| {
                Ok(TermContribution {
                    term,
                    value: ensure_finite("term_value", value)?,
                    weight,
                    points: ensure_finite("term_points", value * weight)?,
                })
            })
            .collect()
    }
}

/// Weighted sum of subject values. The scale is target-specific and only meaningful
/// against the same target's cutline.
pub fn compute_composite(
    values: &SubjectValues,
    weights: &WeightVector,
) -> Result<f64, ScoringError> {
    let total = values
        .contributions(weights)?
        .iter()
        .map(|contribution| contribution.points)
        .sum();
    ensure_finite("total", total)
}
