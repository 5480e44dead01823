use serde::{Deserialize, Serialize};

use crate::admissions::views::{SimulationOutcome, SubjectGap, TargetComparison};

use super::NarrativeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NarrativeMode {
    Explain,
    Compare,
    Simulate,
}

impl NarrativeMode {
    pub fn label(self) -> &'static str {
        match self {
            NarrativeMode::Explain => "explain",
            NarrativeMode::Compare => "compare",
            NarrativeMode::Simulate => "simulate",
        }
    }
}

/// Numeric results the commentary is written around. The engine produces these; the
/// narrative service only reads them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum NarrativeContext {
    Explain {
        outcome: SimulationOutcome,
        gaps: Vec<SubjectGap>,
    },
    Compare {
        comparison: TargetComparison,
    },
    Simulate {
        baseline: SimulationOutcome,
        scenario: SimulationOutcome,
    },
}

impl NarrativeContext {
    pub fn mode(&self) -> NarrativeMode {
        match self {
            NarrativeContext::Explain { .. } => NarrativeMode::Explain,
            NarrativeContext::Compare { .. } => NarrativeMode::Compare,
            NarrativeContext::Simulate { .. } => NarrativeMode::Simulate,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NarrativeRequest {
    pub prompt: String,
    pub context: NarrativeContext,
}

/// Structured reply. Exactly the sub-object matching `mode` must be present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredNarrative {
    pub mode: NarrativeMode,
    pub headline: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explain: Option<ExplainSection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compare: Option<CompareSection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub simulate: Option<SimulateSection>,
}

impl StructuredNarrative {
    pub fn validate(&self) -> Result<(), NarrativeError> {
        let present = [
            (NarrativeMode::Explain, self.explain.is_some()),
            (NarrativeMode::Compare, self.compare.is_some()),
            (NarrativeMode::Simulate, self.simulate.is_some()),
        ];

        for (mode, is_present) in present {
            if mode == self.mode && !is_present {
                return Err(NarrativeError::SchemaMismatch(format!(
                    "mode '{}' requires a '{}' object",
                    self.mode.label(),
                    mode.label()
                )));
            }
            if mode != self.mode && is_present {
                return Err(NarrativeError::SchemaMismatch(format!(
                    "mode '{}' must not carry a '{}' object",
                    self.mode.label(),
                    mode.label()
                )));
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplainSection {
    pub summary: String,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompareEntry {
    pub target: String,
    pub probability: u8,
    pub verdict: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompareSection {
    pub ranking: Vec<CompareEntry>,
    pub recommendation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulateSection {
    pub scenario: String,
    pub probability_before: u8,
    pub probability_after: u8,
    #[serde(default)]
    pub advice: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub content: String,
}

/// Parse and validate a structured reply returned by a text-generation backend.
pub fn parse_structured(raw: &str) -> Result<StructuredNarrative, NarrativeError> {
    let narrative: StructuredNarrative = serde_json::from_str(raw)?;
    narrative.validate()?;
    Ok(narrative)
}
