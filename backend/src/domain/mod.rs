//! Domain primitives, services and ports.
//!
//! Purpose: define the tutor record, the payload schemas that guard it and the
//! service orchestrating validation and persistence. Nothing here knows about
//! HTTP or the hosted database.
//!
//! Public surface:
//! - `Error`, `ErrorCode`: transport-agnostic error payload and its stable code.
//! - `Tutor`, `NewTutor`, `TutorChanges`, `TutorId`: the tutor data model.
//! - `validate_new_tutor`, `validate_tutor_changes`: payload schemas.
//! - `TutorService`: implementation of the tutor driving ports.
//! - `TraceId`: request correlation identifier.

pub mod error;
pub mod ports;
pub mod trace_id;
pub mod tutor;
pub mod tutor_service;
pub mod tutor_validation;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::tutor::{
    DEFAULT_RESPONSE_TIME, NewTutor, Tutor, TutorChanges, TutorId, TutorIdValidationError,
};
pub use self::tutor_service::{
    SCHEMA_MISSING_MESSAGE, TUTOR_NOT_FOUND_MESSAGE, TutorService, VALIDATION_ERROR_MESSAGE,
};
pub use self::tutor_validation::{
    FieldViolation, TutorValidationError, ViolationCode, validate_new_tutor,
    validate_tutor_changes,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use eduista::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("Tutor not found"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
