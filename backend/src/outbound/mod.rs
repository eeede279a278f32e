//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **postgrest**: the hosted tutors table behind a PostgREST endpoint.
//! - **memory**: a process-local store for development and tests.
//!
//! Adapters are thin translators between domain types and storage
//! representations. They contain no business logic.

pub mod memory;
pub mod postgrest;
