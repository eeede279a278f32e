//! Process-local tutor repository.
//!
//! Used when no storage URL is configured and by the HTTP integration tests.
//! Records live only as long as the process.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use mockable::Clock;
use uuid::Uuid;

use crate::domain::ports::{TutorRepository, TutorRepositoryError};
use crate::domain::{NewTutor, Tutor, TutorChanges, TutorId};

/// In-memory implementation of [`TutorRepository`].
///
/// Ids are UUID v4 strings and timestamps come from the injected clock.
/// [`InMemoryTutorRepository::set_schema_missing`] makes every call fail as if
/// the table had never been provisioned.
pub struct InMemoryTutorRepository {
    table: String,
    clock: Arc<dyn Clock>,
    tutors: RwLock<Vec<Tutor>>,
    schema_missing: AtomicBool,
}

impl InMemoryTutorRepository {
    /// Create an empty store named `table`.
    pub fn new(table: impl Into<String>, clock: Arc<dyn Clock>) -> Self {
        Self {
            table: table.into(),
            clock,
            tutors: RwLock::new(Vec::new()),
            schema_missing: AtomicBool::new(false),
        }
    }

    /// Toggle the unprovisioned-table state.
    pub fn set_schema_missing(&self, missing: bool) {
        self.schema_missing.store(missing, Ordering::SeqCst);
    }

    fn ensure_schema(&self) -> Result<(), TutorRepositoryError> {
        if self.schema_missing.load(Ordering::SeqCst) {
            Err(TutorRepositoryError::schema_missing(self.table.as_str()))
        } else {
            Ok(())
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<Tutor>>, TutorRepositoryError> {
        self.ensure_schema()?;
        self.tutors
            .read()
            .map_err(|_| TutorRepositoryError::query("tutor store lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<Tutor>>, TutorRepositoryError> {
        self.ensure_schema()?;
        self.tutors
            .write()
            .map_err(|_| TutorRepositoryError::query("tutor store lock poisoned"))
    }
}

fn position_of(tutors: &[Tutor], id: &TutorId) -> Result<usize, TutorRepositoryError> {
    tutors
        .iter()
        .position(|tutor| &tutor.id == id)
        .ok_or_else(|| TutorRepositoryError::not_found(id.as_ref()))
}

#[async_trait]
impl TutorRepository for InMemoryTutorRepository {
    async fn list(&self) -> Result<Vec<Tutor>, TutorRepositoryError> {
        let mut tutors = self.read()?.clone();
        tutors.sort_by(|left, right| right.created_at.cmp(&left.created_at));
        Ok(tutors)
    }

    async fn find(&self, id: &TutorId) -> Result<Tutor, TutorRepositoryError> {
        let tutors = self.read()?;
        let index = position_of(&tutors, id)?;
        Ok(tutors[index].clone())
    }

    async fn create(&self, tutor: NewTutor) -> Result<Tutor, TutorRepositoryError> {
        let id = TutorId::new(Uuid::new_v4().to_string())
            .map_err(|err| TutorRepositoryError::query(err.to_string()))?;
        let stored = Tutor::from_new(id, tutor, self.clock.utc(), None);
        self.write()?.push(stored.clone());
        Ok(stored)
    }

    async fn update(
        &self,
        id: &TutorId,
        changes: TutorChanges,
    ) -> Result<Tutor, TutorRepositoryError> {
        let mut tutors = self.write()?;
        let index = position_of(&tutors, id)?;
        let tutor = &mut tutors[index];
        if !changes.is_empty() {
            changes.apply_to(tutor);
            tutor.updated_at = self.clock.utc();
        }
        Ok(tutor.clone())
    }

    async fn delete(&self, id: &TutorId) -> Result<(), TutorRepositoryError> {
        let mut tutors = self.write()?;
        let index = position_of(&tutors, id)?;
        tutors.remove(index);
        Ok(())
    }
}
