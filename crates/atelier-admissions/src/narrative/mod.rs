//! Boundary to the generative text service that writes commentary around scoring results.
//!
//! The scoring engine never calls into this module; it only consumes outcomes the engine
//! has already produced.

pub mod schema;
pub mod template;

pub use schema::{
    parse_structured, ChatRole, ChatTurn, CompareEntry, CompareSection, ExplainSection,
    NarrativeContext, NarrativeMode, NarrativeRequest, SimulateSection, StructuredNarrative,
};
pub use template::TemplateNarrator;

/// Text-generation backend. Structured replies follow the fixed schema; chat replies are
/// delivered as ordered text chunks.
pub trait NarrativeService: Send + Sync {
    fn generate(&self, request: &NarrativeRequest) -> Result<StructuredNarrative, NarrativeError>;
    fn chat(&self, turns: &[ChatTurn]) -> Result<Vec<String>, NarrativeError>;
}

#[derive(Debug, thiserror::Error)]
pub enum NarrativeError {
    #[error("prompt is empty")]
    EmptyPrompt,
    #[error("malformed narrative payload: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("narrative does not match schema: {0}")]
    SchemaMismatch(String),
    #[error("narrative service unavailable: {0}")]
    Unavailable(String),
}
