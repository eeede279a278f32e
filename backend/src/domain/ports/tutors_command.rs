//! Driving port for tutor writes.
//!
//! Payloads arrive as raw JSON: validation is part of the use case, not of
//! the transport.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{Error, Tutor, TutorId};

/// Write-side tutor use cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TutorsCommand: Send + Sync {
    /// Validate `payload` against the create schema and store it.
    async fn create_tutor(&self, payload: Value) -> Result<Tutor, Error>;

    /// Validate `payload` against the update schema and merge it into `id`.
    async fn update_tutor(&self, id: &TutorId, payload: Value) -> Result<Tutor, Error>;

    /// Remove `id` permanently.
    async fn delete_tutor(&self, id: &TutorId) -> Result<(), Error>;
}
