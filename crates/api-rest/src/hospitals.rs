use crate::error::{from_patient_error, ApiError};
use crate::AppState;
use api_shared::HospitalDto;
use axum::{extract::State, response::Json};

#[utoipa::path(
    get,
    path = "/api/hospitals",
    responses(
        (status = 200, description = "List of hospitals ordered by name", body = [HospitalDto]),
        (status = 500, description = "Internal server error")
    )
)]
#[axum::debug_handler]
pub(crate) async fn list_hospitals(
    State(state): State<AppState>,
) -> Result<Json<Vec<HospitalDto>>, ApiError> {
    state
        .patients
        .get_all_hospitals()
        .map(Json)
        .map_err(|e| from_patient_error("List hospitals", e))
}
