//! Patient endpoints.
//!
//! Every handler validates its path and body before calling the service, so a rejected
//! request never reaches the store.

use crate::error::{bad_body, from_patient_error, parse_patient_id, ApiError};
use crate::AppState;
use api_shared::{PatientDto, PatientVisitDto};
use axum::{
    extract::{rejection::JsonRejection, Path as AxumPath, State},
    http::{header, StatusCode},
    response::Json,
};
use pas_core::{constants::API_PREFIX, validate_patient};

#[utoipa::path(
    get,
    path = "/api/patients",
    responses(
        (status = 200, description = "List of patients", body = [PatientDto]),
        (status = 500, description = "Internal server error")
    )
)]
/// List all patients in the system
///
/// No filtering, sorting or paging happens here; clients do that over the full list.
///
/// # Returns
/// * `Ok(Json<Vec<PatientDto>>)` - Every stored patient, possibly none
/// * `Err((StatusCode, String))` - Internal server error if listing fails
#[axum::debug_handler]
pub(crate) async fn list_patients(
    State(state): State<AppState>,
) -> Result<Json<Vec<PatientDto>>, ApiError> {
    state
        .patients
        .get_all_patients()
        .map(Json)
        .map_err(|e| from_patient_error("List patients", e))
}

#[utoipa::path(
    get,
    path = "/api/patients/{id}",
    params(("id" = String, Path, description = "Patient UUID")),
    responses(
        (status = 200, description = "Patient", body = PatientDto),
        (status = 400, description = "Invalid patient UUID"),
        (status = 404, description = "Patient not found"),
        (status = 500, description = "Internal server error")
    )
)]
#[axum::debug_handler]
pub(crate) async fn get_patient(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
) -> Result<Json<PatientDto>, ApiError> {
    let id = parse_patient_id(&id)?;

    match state.patients.get_patient_by_id(id) {
        Ok(Some(patient)) => Ok(Json(patient)),
        Ok(None) => Err((StatusCode::NOT_FOUND, "Patient not found".to_string())),
        Err(e) => Err(from_patient_error("Get patient", e)),
    }
}

#[utoipa::path(
    get,
    path = "/api/patients/{id}/visits",
    params(("id" = String, Path, description = "Patient UUID")),
    responses(
        (
            status = 200,
            description = "Visit history, one row per visit and hospital",
            body = [PatientVisitDto]
        ),
        (status = 400, description = "Invalid patient UUID"),
        (status = 404, description = "No visits found for this patient"),
        (status = 500, description = "Internal server error")
    )
)]
/// Visit history of one patient
///
/// An unknown patient and a patient without visits are indistinguishable here: both
/// answer 404 rather than an empty list.
///
/// # Errors
/// Returns `400 Bad Request` for a malformed id, `404 Not Found` when there are no
/// visits, and `500 Internal Server Error` if the lookup fails.
#[axum::debug_handler]
pub(crate) async fn get_patient_visits(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
) -> Result<Json<Vec<PatientVisitDto>>, ApiError> {
    let id = parse_patient_id(&id)?;

    let visits = state
        .patients
        .get_patient_visits(id)
        .map_err(|e| from_patient_error("Get patient visits", e))?;

    if visits.is_empty() {
        return Err((
            StatusCode::NOT_FOUND,
            "No visits found for this patient".to_string(),
        ));
    }
    Ok(Json(visits))
}

#[utoipa::path(
    post,
    path = "/api/patients",
    request_body = PatientDto,
    responses(
        (status = 201, description = "Patient created", body = PatientDto),
        (status = 400, description = "Bad request"),
        (status = 500, description = "Internal server error")
    )
)]
/// Create a new patient record
///
/// The server assigns `id` and `createdDate`; any values sent for them are ignored.
///
/// # Returns
/// * `201 Created` with a `Location` header pointing at the new patient and the stored
///   patient as the body
///
/// # Errors
/// Returns `400 Bad Request` if the body is missing, malformed or fails validation, and
/// `500 Internal Server Error` if the store rejects the write.
#[axum::debug_handler]
pub(crate) async fn create_patient(
    State(state): State<AppState>,
    body: Result<Json<PatientDto>, JsonRejection>,
) -> Result<(StatusCode, [(header::HeaderName, String); 1], Json<PatientDto>), ApiError> {
    let Json(dto) = body.map_err(bad_body)?;
    let patient = validate_patient(&dto).map_err(|e| from_patient_error("Create patient", e))?;

    let created = state
        .patients
        .create_patient(patient)
        .map_err(|e| from_patient_error("Create patient", e))?;

    let location = format!("{}/patients/{}", API_PREFIX, created.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(created),
    ))
}

#[utoipa::path(
    put,
    path = "/api/patients/{id}",
    params(("id" = String, Path, description = "Patient UUID")),
    request_body = PatientDto,
    responses(
        (status = 204, description = "Patient updated"),
        (status = 400, description = "Bad request"),
        (status = 404, description = "Patient not found"),
        (status = 500, description = "Internal server error")
    )
)]
/// Replace a patient's details
///
/// This is a full replace, not a patch: first name, last name, email and date of birth
/// are all taken from the body. A body `id` is optional, but if given it must match the
/// path.
#[axum::debug_handler]
pub(crate) async fn update_patient(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
    body: Result<Json<PatientDto>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let id = parse_patient_id(&id)?;
    let Json(dto) = body.map_err(bad_body)?;

    if !dto.id.is_nil() && dto.id != id {
        tracing::warn!("Body id {} does not match path id {}", dto.id, id);
        return Err((
            StatusCode::BAD_REQUEST,
            "Patient id in body does not match path".to_string(),
        ));
    }

    let patient = validate_patient(&dto).map_err(|e| from_patient_error("Update patient", e))?;

    state
        .patients
        .update_patient(id, patient)
        .map_err(|e| from_patient_error("Update patient", e))?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/api/patients/{id}",
    params(("id" = String, Path, description = "Patient UUID")),
    responses(
        (status = 204, description = "Patient deleted"),
        (status = 400, description = "Invalid patient UUID"),
        (status = 404, description = "Patient not found"),
        (status = 500, description = "Internal server error")
    )
)]
#[axum::debug_handler]
pub(crate) async fn delete_patient(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_patient_id(&id)?;

    state
        .patients
        .delete_patient(id)
        .map_err(|e| from_patient_error("Delete patient", e))?;
    Ok(StatusCode::NO_CONTENT)
}
