//! Translation of core outcomes into HTTP responses.
//!
//! This is the only place that decides status codes. Internal failures are logged in
//! full and answered with a generic body.

use axum::{extract::rejection::JsonRejection, http::StatusCode};
use pas_core::PatientError;
use uuid::Uuid;

pub(crate) type ApiError = (StatusCode, String);

pub(crate) const INTERNAL_ERROR: &str = "Internal error";

/// Parses a path segment as a patient id.
pub(crate) fn parse_patient_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|e| {
        tracing::warn!("Invalid patient UUID {:?}: {}", raw, e);
        (StatusCode::BAD_REQUEST, "Invalid patient UUID".to_string())
    })
}

/// Any JSON body rejection is a client error, whatever axum would pick by default.
pub(crate) fn bad_body(rejection: JsonRejection) -> ApiError {
    tracing::warn!("Rejected request body: {}", rejection.body_text());
    (StatusCode::BAD_REQUEST, rejection.body_text())
}

pub(crate) fn internal(context: &str, err: &PatientError) -> ApiError {
    tracing::error!("{} error: {:?}", context, err);
    (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR.to_string())
}

/// Maps a core error to a response.
///
/// Validation messages are returned as-is; they describe the caller's input.
pub(crate) fn from_patient_error(context: &str, err: PatientError) -> ApiError {
    match err {
        PatientError::PatientNotFound(_) => {
            (StatusCode::NOT_FOUND, "Patient not found".to_string())
        }
        PatientError::InvalidInput(message) => (StatusCode::BAD_REQUEST, message),
        other => internal(context, &other),
    }
}
