use crate::scoring::{TargetId, TargetProfile};

use super::domain::{Student, StudentId};

/// Storage abstraction over the roster so the service can be exercised in isolation.
pub trait StudentRepository: Send + Sync {
    fn fetch(&self, id: &StudentId) -> Result<Option<Student>, RepositoryError>;
    fn list(&self) -> Result<Vec<Student>, RepositoryError>;
    fn by_target(&self, target_id: &TargetId) -> Result<Vec<Student>, RepositoryError>;
    fn upsert(&self, student: Student) -> Result<(), RepositoryError>;
}

/// Read-only catalogue of admission targets.
pub trait TargetRepository: Send + Sync {
    fn fetch(&self, id: &TargetId) -> Result<Option<TargetProfile>, RepositoryError>;
    fn list(&self) -> Result<Vec<TargetProfile>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
