//! Driving port for tutor reads.
//!
//! HTTP handlers call this port so they never touch the repository or its
//! error type directly.

use async_trait::async_trait;

use crate::domain::{Error, Tutor, TutorId};

/// Read-side tutor use cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TutorsQuery: Send + Sync {
    /// All tutors, newest first.
    async fn list_tutors(&self) -> Result<Vec<Tutor>, Error>;

    /// A single tutor by id.
    async fn get_tutor(&self, id: &TutorId) -> Result<Tutor, Error>;
}
