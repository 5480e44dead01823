use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::scoring::{TargetId, TargetProfile};

use super::domain::{Student, StudentId};
use super::repository::{RepositoryError, StudentRepository, TargetRepository};
use super::seed::{seed_students, seed_targets};

/// Process-local roster store standing in for the browser key-value persistence.
#[derive(Debug, Default, Clone)]
pub struct InMemoryRoster {
    students: Arc<Mutex<BTreeMap<StudentId, Student>>>,
    targets: Arc<Mutex<BTreeMap<TargetId, TargetProfile>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, RepositoryError> {
    mutex
        .lock()
        .map_err(|_| RepositoryError::Unavailable("roster mutex poisoned".to_string()))
}

impl InMemoryRoster {
    pub fn new(targets: Vec<TargetProfile>, students: Vec<Student>) -> Self {
        let targets = targets
            .into_iter()
            .map(|target| (target.id.clone(), target))
            .collect();
        let students = students
            .into_iter()
            .map(|student| (student.id.clone(), student))
            .collect();

        Self {
            students: Arc::new(Mutex::new(students)),
            targets: Arc::new(Mutex::new(targets)),
        }
    }

    pub fn seeded() -> Self {
        Self::new(seed_targets(), seed_students())
    }

    /// Adds students, refusing ids that already exist.
    pub fn insert_students(&self, students: Vec<Student>) -> Result<usize, RepositoryError> {
        let mut guard = lock(&self.students)?;
        if students.iter().any(|student| guard.contains_key(&student.id)) {
            return Err(RepositoryError::Conflict);
        }
        let count = students.len();
        for student in students {
            guard.insert(student.id.clone(), student);
        }
        Ok(count)
    }
}

impl StudentRepository for InMemoryRoster {
    fn fetch(&self, id: &StudentId) -> Result<Option<Student>, RepositoryError> {
        Ok(lock(&self.students)?.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<Student>, RepositoryError> {
        Ok(lock(&self.students)?.values().cloned().collect())
    }

    fn by_target(&self, target_id: &TargetId) -> Result<Vec<Student>, RepositoryError> {
        Ok(lock(&self.students)?
            .values()
            .filter(|student| &student.target_id == target_id)
            .cloned()
            .collect())
    }

    fn upsert(&self, student: Student) -> Result<(), RepositoryError> {
        lock(&self.students)?.insert(student.id.clone(), student);
        Ok(())
    }
}

impl TargetRepository for InMemoryRoster {
    fn fetch(&self, id: &TargetId) -> Result<Option<TargetProfile>, RepositoryError> {
        Ok(lock(&self.targets)?.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<TargetProfile>, RepositoryError> {
        Ok(lock(&self.targets)?.values().cloned().collect())
    }
}
