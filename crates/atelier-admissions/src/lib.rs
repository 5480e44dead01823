//! Scoring engine, roster analytics and admissions simulator for an art-admissions academy.
//!
//! The [`scoring`] module is pure computation with no I/O. [`roster`] holds storage,
//! [`admissions`] composes both into the dashboard, simulator and peer views, and
//! [`narrative`] wraps the text-generation backend that comments on engine output.

pub mod admissions;
pub mod config;
pub mod error;
pub mod narrative;
pub mod roster;
pub mod scoring;
pub mod telemetry;
