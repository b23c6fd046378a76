//! # API REST
//!
//! REST API implementation for the patient administration system.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (status codes, JSON rejections, CORS, request tracing)
//!
//! Uses `api-shared` for wire types and `pas-core` for everything behind the handlers.

#![warn(rust_2018_idioms)]

mod error;
mod health;
mod hospitals;
mod patients;

use axum::{routing::get, Router};
use pas_core::constants::API_PREFIX;
use pas_core::PatientsService;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Application state for the REST API server
///
/// Contains shared state that needs to be accessible to all request handlers.
/// The service is cheap to clone; every clone shares the same repository.
#[derive(Clone)]
pub struct AppState {
    pub patients: PatientsService,
}

impl AppState {
    pub fn new(patients: PatientsService) -> Self {
        Self { patients }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        health::patients_health,
        patients::list_patients,
        patients::get_patient,
        patients::get_patient_visits,
        patients::create_patient,
        patients::update_patient,
        patients::delete_patient,
        hospitals::list_hospitals,
    ),
    components(schemas(
        api_shared::HealthRes,
        api_shared::PatientDto,
        api_shared::PatientVisitDto,
        api_shared::HospitalDto,
    ))
)]
pub struct ApiDoc;

/// Builds the full HTTP application.
///
/// Patient and hospital routes are mounted under [`API_PREFIX`]; `/health` and the
/// Swagger UI sit at the root.
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route(
            "/patients",
            get(patients::list_patients).post(patients::create_patient),
        )
        .route("/patients/health", get(health::patients_health))
        .route(
            "/patients/:id",
            get(patients::get_patient)
                .put(patients::update_patient)
                .delete(patients::delete_patient),
        )
        .route("/patients/:id/visits", get(patients::get_patient_visits))
        .route("/hospitals", get(hospitals::list_hospitals));

    Router::new()
        .route("/health", get(health::health))
        .nest(API_PREFIX, api)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
