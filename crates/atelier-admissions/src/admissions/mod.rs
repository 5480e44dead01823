//! Dashboard, simulator and peer analytics built on top of the scoring engine.

pub mod router;
pub mod service;
pub mod views;

#[cfg(test)]
mod tests;

pub use router::admissions_router;
pub use service::{AdmissionsService, AdmissionsServiceError, NarrativeQuery};
pub use views::{
    CompareRequest, DashboardSummary, PeerAnalytics, PeerEntry, ScoreOverrides,
    SimulationOutcome, SimulationRequest, SubjectGap, SubjectGapReport, TargetComparison,
    TargetSummary,
};
