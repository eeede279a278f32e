//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! using utoipa's external schema registration.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The requested tutor does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The tutors table has not been created in the hosted database.
    #[schema(rename = "schema_missing")]
    SchemaMissing,
    /// The hosted database rejected or failed the operation.
    #[schema(rename = "storage_error")]
    StorageError,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(rename = "error", example = "Validation error")]
    message: String,
    /// Field violations, storage messages or setup guidance.
    details: Option<serde_json::Value>,
    /// Correlation identifier matching the `trace-id` response header.
    #[schema(rename = "traceId", example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
}

/// OpenAPI schema for [`crate::domain::Tutor`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Tutor, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct TutorSchema {
    /// Storage-assigned identifier.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    id: String,
    #[schema(example = "Ada Lovelace")]
    name: String,
    #[schema(example = "ada@example.com")]
    email: String,
    #[schema(example = "Mathematics")]
    subject: String,
    subjects: Vec<String>,
    #[schema(example = 45.0)]
    hourly_rate: f64,
    /// Years of experience.
    experience: f64,
    location: String,
    languages: Vec<String>,
    bio: String,
    avatar: Option<String>,
    is_verified: bool,
    is_active: bool,
    is_approved: bool,
    total_students: u64,
    total_lessons: u64,
    total_earnings: u64,
    #[schema(example = "2 hours")]
    response_time: String,
    #[schema(value_type = String, format = Date, example = "2025-01-31")]
    join_date: String,
    #[schema(value_type = String, format = Date, example = "2025-01-31")]
    last_active: String,
    /// Managed by storage; never set through the API.
    rating: Option<f64>,
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
    #[schema(value_type = String, format = DateTime)]
    updated_at: String,
}

/// Create payload. Unknown fields are ignored.
#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct NewTutorSchema {
    name: String,
    email: String,
    subject: String,
    /// At least one entry.
    subjects: Vec<String>,
    /// Zero or more.
    hourly_rate: f64,
    /// Zero or more.
    experience: f64,
    location: String,
    /// At least one entry.
    languages: Vec<String>,
    /// At least 10 characters.
    bio: String,
    /// Absolute URL.
    avatar: Option<String>,
    /// Defaults to `false`.
    is_verified: Option<bool>,
    /// Defaults to `true`.
    is_active: Option<bool>,
    /// Defaults to `false`.
    is_approved: Option<bool>,
    total_students: Option<u64>,
    total_lessons: Option<u64>,
    total_earnings: Option<u64>,
    /// Defaults to `"2 hours"`.
    response_time: Option<String>,
    /// Defaults to the creation date.
    #[schema(value_type = Option<String>, format = Date)]
    join_date: Option<String>,
    /// Defaults to the creation date.
    #[schema(value_type = Option<String>, format = Date)]
    last_active: Option<String>,
}

/// Update payload. Every field is optional; `joinDate` cannot be changed.
#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct TutorChangesSchema {
    name: Option<String>,
    email: Option<String>,
    subject: Option<String>,
    subjects: Option<Vec<String>>,
    hourly_rate: Option<f64>,
    experience: Option<f64>,
    location: Option<String>,
    languages: Option<Vec<String>>,
    bio: Option<String>,
    avatar: Option<String>,
    is_verified: Option<bool>,
    is_active: Option<bool>,
    is_approved: Option<bool>,
    total_students: Option<u64>,
    total_lessons: Option<u64>,
    total_earnings: Option<u64>,
    response_time: Option<String>,
    #[schema(value_type = Option<String>, format = Date)]
    last_active: Option<String>,
}
