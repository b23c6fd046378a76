use api_rest::{router, AppState};
use api_shared::{HealthRes, HospitalDto, PatientDto, PatientVisitDto};
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::{TimeZone, Utc};
use http_body_util::BodyExt;
use pas_core::entities::{
    EntityMeta, HospitalEntity, PatientEntity, PatientHospitalRelation, PatientRecord,
    VisitEntity, VisitRecord,
};
use pas_core::{
    InMemoryPatientsRepository, InMemoryStore, PatientError, PatientResult, PatientsRepository,
    PatientsService,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

fn app() -> (Router, Arc<InMemoryStore>) {
    let store = Arc::new(InMemoryStore::new());
    let repo = Arc::new(InMemoryPatientsRepository::new(store.clone()));
    (router(AppState::new(PatientsService::new(repo))), store)
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Option<String>, Vec<u8>) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).expect("request should build"))
        .await
        .expect("router should answer");

    let status = response.status();
    let location = response
        .headers()
        .get(header::LOCATION)
        .map(|v| v.to_str().expect("ascii header").to_string());
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes()
        .to_vec();
    (status, location, bytes)
}

fn patient_body(first: &str, last: &str) -> Value {
    json!({
        "firstName": first,
        "lastName": last,
        "email": "a.b@example.com",
        "dateOfBirth": "1985-06-15"
    })
}

async fn create(app: &Router, first: &str, last: &str) -> PatientDto {
    let body = Some(patient_body(first, last));
    let (status, _, bytes) = send(app, Method::POST, "/api/patients", body).await;
    assert_eq!(status, StatusCode::CREATED);
    serde_json::from_slice(&bytes).expect("created patient should parse")
}

fn seed_visit(store: &InMemoryStore, patient_id: Uuid, hospital_names: &[&str]) -> Uuid {
    let visit = VisitEntity {
        meta: EntityMeta::new_now(),
        date: Utc.with_ymd_and_hms(2024, 2, 10, 8, 0, 0).unwrap(),
    };
    store.upsert_visit(visit.clone());

    for name in hospital_names {
        let hospital = HospitalEntity {
            meta: EntityMeta::new_now(),
            name: name.to_string(),
            address: format!("{} Road", name),
        };
        store.upsert_hospital(hospital.clone());
        store
            .link(PatientHospitalRelation {
                patient_id,
                hospital_id: hospital.id(),
                visit_id: visit.id(),
            })
            .expect("link should succeed");
    }
    visit.id()
}

#[tokio::test]
async fn create_then_get_returns_patient_with_created_date() {
    let (app, _) = app();

    let (status, location, bytes) =
        send(&app, Method::POST, "/api/patients", Some(patient_body("A", "B"))).await;
    assert_eq!(status, StatusCode::CREATED);
    let created: PatientDto = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(location, Some(format!("/api/patients/{}", created.id)));

    let uri = format!("/api/patients/{}", created.id);
    let (status, _, bytes) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    let fetched: PatientDto = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(fetched.first_name, "A");
    assert_eq!(fetched.last_name, "B");
    assert!(fetched.created_date.is_some());
}

#[tokio::test]
async fn create_ignores_client_supplied_id() {
    let (app, _) = app();
    let requested = Uuid::new_v4();
    let mut body = patient_body("A", "B");
    body["id"] = json!(requested);

    let (status, _, bytes) = send(&app, Method::POST, "/api/patients", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    let created: PatientDto = serde_json::from_slice(&bytes).unwrap();
    assert_ne!(created.id, requested);
}

#[tokio::test]
async fn list_starts_empty_and_grows() {
    let (app, _) = app();

    let (status, _, bytes) = send(&app, Method::GET, "/api/patients", None).await;
    assert_eq!(status, StatusCode::OK);
    let listed: Vec<PatientDto> = serde_json::from_slice(&bytes).unwrap();
    assert!(listed.is_empty());

    create(&app, "A", "B").await;
    create(&app, "C", "D").await;

    let (_, _, bytes) = send(&app, Method::GET, "/api/patients", None).await;
    let listed: Vec<PatientDto> = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(listed.len(), 2);
}

#[tokio::test]
async fn put_to_unknown_patient_is_not_found() {
    let (app, _) = app();
    let uri = format!("/api/patients/{}", Uuid::new_v4());

    let (status, _, _) = send(&app, Method::PUT, &uri, Some(patient_body("A", "B"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn put_replaces_fields() {
    let (app, _) = app();
    let created = create(&app, "A", "B").await;
    let uri = format!("/api/patients/{}", created.id);

    let (status, _, bytes) = send(&app, Method::PUT, &uri, Some(patient_body("C", "D"))).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(bytes.is_empty());

    let (_, _, bytes) = send(&app, Method::GET, &uri, None).await;
    let fetched: PatientDto = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(fetched.first_name, "C");
    assert_eq!(fetched.last_name, "D");
    assert_eq!(fetched.created_date, created.created_date);
}

#[tokio::test]
async fn put_with_mismatched_body_id_is_bad_request() {
    let (app, _) = app();
    let created = create(&app, "A", "B").await;
    let mut body = patient_body("C", "D");
    body["id"] = json!(Uuid::new_v4());

    let uri = format!("/api/patients/{}", created.id);
    let (status, _, _) = send(&app, Method::PUT, &uri, Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_then_get_is_not_found() {
    let (app, _) = app();
    let created = create(&app, "A", "B").await;
    let uri = format!("/api/patients/{}", created.id);

    let (status, _, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _, _) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_ids_are_bad_request() {
    let (app, _) = app();

    for (method, uri) in [
        (Method::GET, "/api/patients/abc"),
        (Method::GET, "/api/patients/abc/visits"),
        (Method::DELETE, "/api/patients/abc"),
    ] {
        let (status, _, bytes) = send(&app, method, uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(String::from_utf8(bytes).unwrap(), "Invalid patient UUID");
    }

    let body = Some(patient_body("A", "B"));
    let (status, _, _) = send(&app, Method::PUT, "/api/patients/abc", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn invalid_bodies_are_rejected_before_any_write() {
    let (app, store) = app();

    let (status, _, _) = send(&app, Method::POST, "/api/patients", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let partial = Some(json!({ "firstName": "A" }));
    let (status, _, _) = send(&app, Method::POST, "/api/patients", partial).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let blank = Some(patient_body("  ", "B"));
    let (status, _, bytes) = send(&app, Method::POST, "/api/patients", blank).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(String::from_utf8(bytes).unwrap(), "firstName is required");

    let mut bad_email = patient_body("A", "B");
    bad_email["email"] = json!("not-an-email");
    let (status, _, _) = send(&app, Method::POST, "/api/patients", Some(bad_email)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert_eq!(store.stats().patients, 0);
}

#[tokio::test]
async fn patient_without_visits_is_not_found() {
    let (app, _) = app();
    let created = create(&app, "A", "B").await;

    let uri = format!("/api/patients/{}/visits", created.id);
    let (status, _, _) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn same_visit_at_two_hospitals_returns_two_rows() {
    let (app, store) = app();
    let created = create(&app, "A", "B").await;
    let visit_id = seed_visit(&store, created.id, &["North", "South"]);

    let uri = format!("/api/patients/{}/visits", created.id);
    let (status, _, bytes) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);

    let visits: Vec<PatientVisitDto> = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(visits.len(), 2);
    assert!(visits.iter().all(|v| v.visit_id == visit_id));

    let raw: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(raw[0].get("hospitalName").is_some());
    assert!(raw[0].get("hospitalAddress").is_some());
}

#[tokio::test]
async fn shared_visit_lists_every_hospital_on_it() {
    let (app, store) = app();
    let ann = create(&app, "Ann", "B").await;
    let bob = create(&app, "Bob", "B").await;
    let visit_id = seed_visit(&store, ann.id, &["General"]);

    let royal = HospitalEntity {
        meta: EntityMeta::new_now(),
        name: "Royal".into(),
        address: "Royal Road".into(),
    };
    store.upsert_hospital(royal.clone());
    store
        .link(PatientHospitalRelation {
            patient_id: bob.id,
            hospital_id: royal.id(),
            visit_id,
        })
        .expect("link should succeed");

    let uri = format!("/api/patients/{}/visits", ann.id);
    let (status, _, bytes) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);

    let visits: Vec<PatientVisitDto> = serde_json::from_slice(&bytes).unwrap();
    let mut names: Vec<&str> = visits.iter().map(|v| v.hospital_name.as_str()).collect();
    names.sort();
    assert_eq!(names, vec!["General", "Royal"]);
}

#[tokio::test]
async fn deleting_a_patient_drops_its_visit_rows() {
    let (app, store) = app();
    let created = create(&app, "A", "B").await;
    seed_visit(&store, created.id, &["North"]);

    send(&app, Method::DELETE, &format!("/api/patients/{}", created.id), None).await;

    assert_eq!(store.stats().relations, 0);
    assert_eq!(store.stats().visits, 1);
}

#[tokio::test]
async fn hospitals_are_listed() {
    let (app, store) = app();
    let created = create(&app, "A", "B").await;
    seed_visit(&store, created.id, &["Royal"]);

    let (status, _, bytes) = send(&app, Method::GET, "/api/hospitals", None).await;
    assert_eq!(status, StatusCode::OK);
    let hospitals: Vec<HospitalDto> = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(hospitals.len(), 1);
    assert_eq!(hospitals[0].name, "Royal");
}

#[tokio::test]
async fn health_endpoints_answer() {
    let (app, _) = app();

    for uri in ["/health", "/api/patients/health"] {
        let (status, _, bytes) = send(&app, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::OK);
        let health: HealthRes = serde_json::from_slice(&bytes).unwrap();
        assert!(health.ok);
    }
}

#[tokio::test]
async fn openapi_document_is_served() {
    let (app, _) = app();

    let (status, _, bytes) = send(&app, Method::GET, "/api-docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    let doc: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(doc["paths"].get("/api/patients/{id}/visits").is_some());
}

/// Repository whose every call fails, to exercise the 500 path.
struct BrokenRepository;

impl PatientsRepository for BrokenRepository {
    fn get_patients(&self) -> PatientResult<Vec<PatientRecord>> {
        Err(PatientError::Storage("connection lost".into()))
    }

    fn get_patient_by_id(&self, _: Uuid) -> PatientResult<Option<PatientRecord>> {
        Err(PatientError::Storage("connection lost".into()))
    }

    fn get_visits_by_patient_id(&self, _: Uuid) -> PatientResult<Vec<VisitRecord>> {
        Err(PatientError::Storage("connection lost".into()))
    }

    fn add_patient(&self, _: PatientEntity) -> PatientResult<()> {
        Err(PatientError::Storage("connection lost".into()))
    }

    fn update_patient(&self, _: PatientEntity) -> PatientResult<PatientEntity> {
        Err(PatientError::Storage("connection lost".into()))
    }

    fn delete_patient(&self, _: Uuid) -> PatientResult<()> {
        Err(PatientError::Storage("connection lost".into()))
    }

    fn get_hospitals(&self) -> PatientResult<Vec<HospitalEntity>> {
        Err(PatientError::Storage("connection lost".into()))
    }
}

#[tokio::test]
async fn repository_failures_become_generic_internal_errors() {
    let app = router(AppState::new(PatientsService::new(Arc::new(BrokenRepository))));
    let id = Uuid::new_v4();

    for (method, uri, body) in [
        (Method::GET, "/api/patients".to_string(), None),
        (Method::GET, format!("/api/patients/{}", id), None),
        (Method::GET, format!("/api/patients/{}/visits", id), None),
        (Method::POST, "/api/patients".to_string(), Some(patient_body("A", "B"))),
        (Method::PUT, format!("/api/patients/{}", id), Some(patient_body("A", "B"))),
        (Method::DELETE, format!("/api/patients/{}", id), None),
        (Method::GET, "/api/hospitals".to_string(), None),
    ] {
        let (status, _, bytes) = send(&app, method, &uri, body).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{}", uri);
        assert_eq!(String::from_utf8(bytes).unwrap(), "Internal error");
    }
}
