use crate::admissions::views::{SimulationOutcome, SubjectGap};
use crate::scoring::{CompositeTerm, RiskLabel};

use super::schema::{
    ChatRole, ChatTurn, CompareEntry, CompareSection, ExplainSection, NarrativeContext,
    NarrativeRequest, SimulateSection, StructuredNarrative,
};
use super::{NarrativeError, NarrativeService};

pub const DEFAULT_CHUNK_CHARS: usize = 80;

/// Deterministic offline narrator. Used when no hosted model is configured and in tests.
#[derive(Debug, Clone)]
pub struct TemplateNarrator {
    max_chunk_chars: usize,
}

impl Default for TemplateNarrator {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK_CHARS)
    }
}

impl TemplateNarrator {
    pub fn new(max_chunk_chars: usize) -> Self {
        Self {
            max_chunk_chars: max_chunk_chars.max(1),
        }
    }

    fn explain(&self, outcome: &SimulationOutcome, gaps: &[SubjectGap]) -> StructuredNarrative {
        let strengths = gaps
            .iter()
            .filter(|gap| gap.gap.favorable && gap.gap.delta > 0.0)
            .map(|gap| format!("{} {} vs peers", gap.label, gap.gap.signed_label()))
            .collect();
        let weaknesses = gaps
            .iter()
            .filter(|gap| !gap.gap.favorable)
            .map(|gap| format!("{} {} vs peers", gap.label, gap.gap.signed_label()))
            .collect();

        let top_term = outcome
            .contributions
            .iter()
            .max_by(|a, b| a.points.total_cmp(&b.points))
            .map(|contribution| contribution.term.label())
            .unwrap_or(CompositeTerm::PrimaryLanguage.label());

        StructuredNarrative {
            mode: super::NarrativeMode::Explain,
            headline: format!(
                "{}: {}% ({})",
                outcome.target_name, outcome.composite.probability_percent, outcome.risk
            ),
            explain: Some(ExplainSection {
                summary: format!(
                    "Composite {:.1} against a cutline of {:.1} ({}). {} carries the largest share of the total.",
                    outcome.composite.total,
                    outcome.cutline,
                    outcome.cutline_gap.signed_label(),
                    top_term
                ),
                strengths,
                weaknesses,
            }),
            compare: None,
            simulate: None,
        }
    }

    fn compare(&self, outcomes: &[SimulationOutcome]) -> StructuredNarrative {
        let ranking: Vec<CompareEntry> = outcomes
            .iter()
            .map(|outcome| CompareEntry {
                target: outcome.target_name.clone(),
                probability: outcome.composite.probability_percent,
                verdict: outcome.risk.label().to_string(),
            })
            .collect();

        let recommendation = match outcomes
            .iter()
            .find(|outcome| matches!(outcome.risk, RiskLabel::Safe | RiskLabel::Stable))
        {
            Some(anchor) => format!(
                "Anchor the application on {} and treat the remaining targets as reach options.",
                anchor.target_name
            ),
            None => "No target is currently Stable or better; raise the weakest weighted subject before committing.".to_string(),
        };

        let headline = match outcomes.first() {
            Some(best) => format!(
                "Best fit: {} at {}%",
                best.target_name, best.composite.probability_percent
            ),
            None => "No targets compared".to_string(),
        };

        StructuredNarrative {
            mode: super::NarrativeMode::Compare,
            headline,
            explain: None,
            compare: Some(CompareSection {
                ranking,
                recommendation,
            }),
            simulate: None,
        }
    }

    fn simulate(
        &self,
        baseline: &SimulationOutcome,
        scenario: &SimulationOutcome,
    ) -> StructuredNarrative {
        let before = baseline.composite.probability_percent;
        let after = scenario.composite.probability_percent;

        let mut advice = Vec::new();
        for (old, new) in baseline.contributions.iter().zip(&scenario.contributions) {
            let change = new.points - old.points;
            if change.abs() > f64::EPSILON {
                advice.push(format!(
                    "{} moves the composite by {:+.1} points",
                    new.term.label(),
                    change
                ));
            }
        }
        if scenario.risk != baseline.risk {
            advice.push(format!(
                "Risk label shifts from {} to {}",
                baseline.risk, scenario.risk
            ));
        }

        StructuredNarrative {
            mode: super::NarrativeMode::Simulate,
            headline: format!("{}: {}% -> {}%", scenario.target_name, before, after),
            explain: None,
            compare: None,
            simulate: Some(SimulateSection {
                scenario: format!(
                    "Composite {:.1} -> {:.1}",
                    baseline.composite.total, scenario.composite.total
                ),
                probability_before: before,
                probability_after: after,
                advice,
            }),
        }
    }

    fn chunk(&self, text: &str) -> Vec<String> {
        let mut chunks = Vec::new();
        let mut current = String::new();

        for word in text.split_whitespace() {
            let needed = if current.is_empty() {
                word.chars().count()
            } else {
                current.chars().count() + 1 + word.chars().count()
            };
            if needed > self.max_chunk_chars && !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
        }
        if !current.is_empty() {
            chunks.push(current);
        }

        chunks
    }
}

impl NarrativeService for TemplateNarrator {
    fn generate(&self, request: &NarrativeRequest) -> Result<StructuredNarrative, NarrativeError> {
        if request.prompt.trim().is_empty() {
            return Err(NarrativeError::EmptyPrompt);
        }

        let narrative = match &request.context {
            NarrativeContext::Explain { outcome, gaps } => self.explain(outcome, gaps),
            NarrativeContext::Compare { comparison } => self.compare(&comparison.outcomes),
            NarrativeContext::Simulate { baseline, scenario } => {
                self.simulate(baseline, scenario)
            }
        };

        narrative.validate()?;
        Ok(narrative)
    }

    fn chat(&self, turns: &[ChatTurn]) -> Result<Vec<String>, NarrativeError> {
        let question = turns
            .iter()
            .rev()
            .find(|turn| turn.role == ChatRole::User)
            .map(|turn| turn.content.trim())
            .filter(|content| !content.is_empty())
            .ok_or(NarrativeError::EmptyPrompt)?;

        let reply = format!(
            "Noted: \"{question}\". Run a simulation for the student and target in question to see \
             the composite, probability and risk label; the compare view ranks several targets at \
             once, and the peer view shows where the student sits against classmates aiming for \
             the same program."
        );

        Ok(self.chunk(&reply))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::narrative::{parse_structured, NarrativeMode};

    #[test]
    fn chat_chunks_respect_limit() {
        let narrator = TemplateNarrator::new(24);
        let chunks = narrator
            .chat(&[ChatTurn {
                role: ChatRole::User,
                content: "Is Hongik realistic?".to_string(),
            }])
            .expect("reply");
        assert!(chunks.len() > 1);
        assert!(chunks
            .iter()
            .all(|chunk| chunk.chars().count() <= 24 || !chunk.contains(' ')));
    }

    #[test]
    fn chat_requires_a_user_turn() {
        let narrator = TemplateNarrator::default();
        let err = narrator
            .chat(&[ChatTurn {
                role: ChatRole::Assistant,
                content: "Hello".to_string(),
            }])
            .unwrap_err();
        assert!(matches!(err, NarrativeError::EmptyPrompt));
    }

    #[test]
    fn parse_structured_enforces_mode_section() {
        let ok = r#"{"mode":"compare","headline":"h","compare":{"ranking":[],"recommendation":"r"}}"#;
        let narrative = parse_structured(ok).expect("valid");
        assert_eq!(narrative.mode, NarrativeMode::Compare);

        let missing = r#"{"mode":"explain","headline":"h"}"#;
        assert!(matches!(
            parse_structured(missing),
            Err(NarrativeError::SchemaMismatch(_))
        ));

        let extra = r#"{"mode":"simulate","headline":"h","simulate":{"scenario":"s","probability_before":1,"probability_after":2},"explain":{"summary":"x"}}"#;
        assert!(matches!(
            parse_structured(extra),
            Err(NarrativeError::SchemaMismatch(_))
        ));

        assert!(matches!(
            parse_structured("not json"),
            Err(NarrativeError::Malformed(_))
        ));
    }
}
