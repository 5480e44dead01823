//! Student roster records, storage traits and the seeded demo dataset.

pub mod domain;
pub mod import;
pub mod memory;
pub mod repository;
pub mod seed;

pub use domain::{EvaluationEntry, EvaluationSubmission, Student, StudentId};
pub use import::{RosterImportError, RosterImporter};
pub use memory::InMemoryRoster;
pub use repository::{RepositoryError, StudentRepository, TargetRepository};
pub use seed::{seed_students, seed_targets};
