use crate::AppState;
use api_shared::{HealthRes, HealthService};
use axum::{extract::State, response::Json};

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
///
/// Returns the current health status of the service.
/// This endpoint is used for monitoring and load balancer health checks.
///
/// # Returns
/// * `Json<HealthRes>` - Health status response containing service status
#[axum::debug_handler]
pub(crate) async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    get,
    path = "/api/patients/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Same payload as `/health`, reachable under the patients route prefix.
#[axum::debug_handler]
pub(crate) async fn patients_health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}
