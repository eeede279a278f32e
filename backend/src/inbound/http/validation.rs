//! Request-shape helpers for inbound HTTP adapters.
//!
//! Body validation belongs to the domain; this module only covers what the
//! transport itself can get wrong: unreadable JSON and unusable path ids.

use actix_web::HttpRequest;
use actix_web::error::JsonPayloadError;
use serde_json::json;
use tracing::debug;

use crate::domain::{Error, TutorId};

/// Turn body extraction failures into `invalid_request` errors.
///
/// Details carry a single violation against the document root (`$`), in the
/// same array shape domain validation uses.
///
/// Registered through `web::JsonConfig::error_handler`.
pub fn json_error_handler(err: JsonPayloadError, _request: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "rejecting unreadable JSON body");
    let reason = match &err {
        JsonPayloadError::ContentType => "content type must be application/json".to_owned(),
        JsonPayloadError::OverflowKnownLength { .. } | JsonPayloadError::Overflow { .. } => {
            "request body is too large".to_owned()
        }
        other => other.to_string(),
    };
    Error::invalid_request("Invalid JSON body")
        .with_details(json!([{ "field": "$", "code": "invalid_json", "message": reason }]))
        .into()
}

/// Validate a tutor id taken from the request path.
pub(crate) fn parse_tutor_id(raw: String) -> Result<TutorId, Error> {
    TutorId::new(raw).map_err(|err| {
        Error::invalid_request("Invalid tutor id").with_details(json!([{
            "field": "id",
            "code": "invalid_id",
            "message": err.to_string(),
        }]))
    })
}
