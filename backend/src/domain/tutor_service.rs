//! Tutor domain service.
//!
//! Implements the driving ports [`TutorsQuery`] and [`TutorsCommand`] by
//! running payloads through the schema validator and delegating persistence to
//! a [`TutorRepository`]. Every repository failure is translated here into the
//! transport-agnostic [`Error`] with the operation-specific message clients
//! see.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::Value;
use tracing::{error, warn};

use crate::domain::ports::{TutorRepository, TutorRepositoryError, TutorsCommand, TutorsQuery};
use crate::domain::tutor_validation::{
    TutorValidationError, validate_new_tutor, validate_tutor_changes,
};
use crate::domain::{Error, Tutor, TutorId};

/// Message returned when the tutors table has not been provisioned.
pub const SCHEMA_MISSING_MESSAGE: &str =
    "Database table not found. Please run the SQL schema to create the tutors table.";
/// Message returned when a tutor id matches no record.
pub const TUTOR_NOT_FOUND_MESSAGE: &str = "Tutor not found";
/// Message returned when a payload fails validation.
pub const VALIDATION_ERROR_MESSAGE: &str = "Validation error";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    List,
    Get,
    Create,
    Update,
    Delete,
}

impl Operation {
    fn as_str(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Get => "get",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }

    fn failure_message(self) -> &'static str {
        match self {
            Self::List => "Failed to fetch tutors",
            Self::Get => "Failed to fetch tutor",
            Self::Create => "Failed to create tutor",
            Self::Update => "Failed to update tutor",
            Self::Delete => "Failed to delete tutor",
        }
    }
}

/// Tutor service implementing the tutor driving ports.
#[derive(Clone)]
pub struct TutorService<R> {
    repository: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> TutorService<R> {
    /// Create a new service over `repository`, reading "today" from `clock`.
    pub fn new(repository: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }
}

impl<R> TutorService<R>
where
    R: TutorRepository,
{
    fn map_validation_error(error: TutorValidationError) -> Error {
        let details = serde_json::to_value(error.violations()).unwrap_or(Value::Null);
        Error::invalid_request(VALIDATION_ERROR_MESSAGE).with_details(details)
    }

    fn map_repository_error(
        operation: Operation,
        id: Option<&TutorId>,
        error: TutorRepositoryError,
    ) -> Error {
        let tutor_id = id.map(TutorId::as_ref);
        match error {
            TutorRepositoryError::SchemaMissing { table } if operation != Operation::Delete => {
                warn!(operation = operation.as_str(), %table, "tutor table is missing");
                Error::schema_missing(SCHEMA_MISSING_MESSAGE).with_details(Value::String(format!(
                    "The {table} table does not exist in the hosted database. \
                     Create it using the provided SQL schema."
                )))
            }
            TutorRepositoryError::NotFound { .. }
                if matches!(operation, Operation::Get | Operation::Update) =>
            {
                Error::not_found(TUTOR_NOT_FOUND_MESSAGE)
            }
            other => {
                error!(
                    operation = operation.as_str(),
                    tutor_id,
                    error = %other,
                    "tutor repository operation failed"
                );
                Error::storage(operation.failure_message())
                    .with_details(Value::String(other.to_string()))
            }
        }
    }
}

#[async_trait]
impl<R> TutorsQuery for TutorService<R>
where
    R: TutorRepository,
{
    async fn list_tutors(&self) -> Result<Vec<Tutor>, Error> {
        self.repository
            .list()
            .await
            .map_err(|err| Self::map_repository_error(Operation::List, None, err))
    }

    async fn get_tutor(&self, id: &TutorId) -> Result<Tutor, Error> {
        self.repository
            .find(id)
            .await
            .map_err(|err| Self::map_repository_error(Operation::Get, Some(id), err))
    }
}

#[async_trait]
impl<R> TutorsCommand for TutorService<R>
where
    R: TutorRepository,
{
    async fn create_tutor(&self, payload: Value) -> Result<Tutor, Error> {
        let today = self.clock.utc().date_naive();
        let new_tutor =
            validate_new_tutor(&payload, today).map_err(Self::map_validation_error)?;
        self.repository
            .create(new_tutor)
            .await
            .map_err(|err| Self::map_repository_error(Operation::Create, None, err))
    }

    async fn update_tutor(&self, id: &TutorId, payload: Value) -> Result<Tutor, Error> {
        let changes = validate_tutor_changes(&payload).map_err(Self::map_validation_error)?;
        let result = if changes.is_empty() {
            self.repository.find(id).await
        } else {
            self.repository.update(id, changes).await
        };
        result.map_err(|err| Self::map_repository_error(Operation::Update, Some(id), err))
    }

    async fn delete_tutor(&self, id: &TutorId) -> Result<(), Error> {
        self.repository
            .delete(id)
            .await
            .map_err(|err| Self::map_repository_error(Operation::Delete, Some(id), err))
    }
}

#[cfg(test)]
mod tests;
