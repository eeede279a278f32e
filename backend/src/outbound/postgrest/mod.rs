//! PostgREST outbound adapter.
//!
//! Implements the `TutorRepository` port against a Supabase-style REST
//! endpoint (`{base}/rest/v1/{table}`).

mod dto;
mod http_repository;

pub use http_repository::{PostgrestSettings, PostgrestSetupError, PostgrestTutorRepository};
