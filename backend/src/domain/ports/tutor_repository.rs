//! Port for tutor persistence.
//!
//! [`TutorRepository`] is the gateway between the domain and the hosted table
//! that stores tutor records. Each method maps to exactly one storage round
//! trip; adapters never cache, batch or retry.

use async_trait::async_trait;

use crate::domain::{NewTutor, Tutor, TutorChanges, TutorId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by tutor repository adapters.
    pub enum TutorRepositoryError {
        /// No record carries the requested id.
        NotFound { id: String } => "tutor {id} not found",
        /// The backing table has not been provisioned.
        SchemaMissing { table: String } => "table {table} does not exist",
        /// The storage service could not be reached.
        Connection { message: String } =>
            "tutor repository connection failed: {message}",
        /// The storage service rejected or failed the operation.
        Query { message: String } => "tutor repository query failed: {message}",
    }
}

/// Port for tutor storage and retrieval.
///
/// Adapters own `id`, `rating`, `created_at` and `updated_at`; callers never
/// supply them.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TutorRepository: Send + Sync {
    /// Every stored tutor, newest first. Empty when the table is empty.
    async fn list(&self) -> Result<Vec<Tutor>, TutorRepositoryError>;

    /// The tutor with `id`, or [`TutorRepositoryError::NotFound`].
    async fn find(&self, id: &TutorId) -> Result<Tutor, TutorRepositoryError>;

    /// Insert a validated record and return it as stored.
    async fn create(&self, tutor: NewTutor) -> Result<Tutor, TutorRepositoryError>;

    /// Merge `changes` into the stored record and return the result.
    ///
    /// Fails with [`TutorRepositoryError::NotFound`] when no record matches.
    async fn update(
        &self,
        id: &TutorId,
        changes: TutorChanges,
    ) -> Result<Tutor, TutorRepositoryError>;

    /// Remove the record permanently.
    ///
    /// Fails with [`TutorRepositoryError::NotFound`] when nothing was deleted.
    async fn delete(&self, id: &TutorId) -> Result<(), TutorRepositoryError>;
}
