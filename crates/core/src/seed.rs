//! Startup data seeding.
//!
//! A JSON fixture describing hospitals, visits and patients is loaded once when the
//! process starts. Records are matched by id: existing ones are updated in place and
//! new ones inserted. Join rows are nested under each patient and are checked for
//! referential integrity as they are linked.
//!
//! ```json
//! {
//!   "hospitals": [{ "id": "…", "name": "…", "address": "…" }],
//!   "visits":    [{ "id": "…", "date": "2024-01-15T09:30:00Z" }],
//!   "patients":  [{
//!     "id": "…", "firstName": "…", "lastName": "…", "email": "…",
//!     "dateOfBirth": "1990-01-01", "createdDate": "2024-01-01T00:00:00Z",
//!     "patientHospitals": [{ "hospitalId": "…", "visitId": "…" }]
//!   }]
//! }
//! ```

use crate::config::CoreConfig;
use crate::entities::{EntityMeta, PatientEntity, PatientHospitalRelation};
use crate::error::{PatientError, PatientResult};
use crate::mapping::{hospital_from_dto, visit_from_dto};
use crate::store::{InMemoryStore, Upsert};
use api_shared::{HospitalDto, VisitDto};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use uuid::Uuid;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DataSeed {
    pub hospitals: Vec<SeedHospital>,
    pub visits: Vec<SeedVisit>,
    pub patients: Vec<SeedPatient>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedHospital {
    #[serde(flatten)]
    pub hospital: HospitalDto,
    #[serde(default)]
    pub created_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedVisit {
    #[serde(flatten)]
    pub visit: VisitDto,
    #[serde(default)]
    pub created_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedPatient {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub date_of_birth: NaiveDate,
    #[serde(default)]
    pub created_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub patient_hospitals: Vec<SeedLink>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedLink {
    pub hospital_id: Uuid,
    pub visit_id: Uuid,
}

/// What a seed run changed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub inserted: usize,
    pub updated: usize,
    pub linked: usize,
}

impl SeedSummary {
    fn record(&mut self, outcome: Upsert) {
        match outcome {
            Upsert::Inserted => self.inserted += 1,
            Upsert::Updated => self.updated += 1,
        }
    }
}

/// Reads and parses a seed file.
///
/// # Returns
///
/// `Ok(None)` if the file does not exist; a missing fixture is not an error.
///
/// # Errors
///
/// Returns `SeedRead` if the file exists but cannot be read, and `SeedParse` if its
/// contents are not a valid seed document.
pub fn load_seed(path: &Path) -> PatientResult<Option<DataSeed>> {
    if !path.exists() {
        tracing::warn!("seed file not found: {}", path.display());
        return Ok(None);
    }

    let raw = fs::read_to_string(path).map_err(PatientError::SeedRead)?;
    let seed = serde_json::from_str(&raw).map_err(PatientError::SeedParse)?;
    Ok(Some(seed))
}

/// Applies a parsed seed to the store.
///
/// Hospitals and visits go first so that patient join rows can be checked against
/// them.
///
/// # Errors
///
/// Returns `DanglingReference` if a join row names a hospital or visit that is
/// neither in the seed nor already stored. Records applied before the failing join
/// row stay applied.
pub fn apply_seed(store: &InMemoryStore, seed: DataSeed) -> PatientResult<SeedSummary> {
    let now = Utc::now();
    let mut summary = SeedSummary::default();

    for entry in seed.hospitals {
        let created = entry.created_date.unwrap_or(now);
        summary.record(store.upsert_hospital(hospital_from_dto(entry.hospital, created)));
    }

    for entry in seed.visits {
        let created = entry.created_date.unwrap_or(now);
        summary.record(store.upsert_visit(visit_from_dto(entry.visit, created)));
    }

    let mut links = Vec::new();
    for patient in seed.patients {
        links.extend(patient.patient_hospitals.iter().map(|link| {
            PatientHospitalRelation {
                patient_id: patient.id,
                hospital_id: link.hospital_id,
                visit_id: link.visit_id,
            }
        }));

        summary.record(store.upsert_patient(PatientEntity {
            meta: EntityMeta::with_id(patient.id, patient.created_date.unwrap_or(now)),
            first_name: patient.first_name,
            last_name: patient.last_name,
            email: patient.email,
            date_of_birth: patient.date_of_birth,
        }));
    }

    for relation in links {
        if store.link(relation)? {
            summary.linked += 1;
        }
    }

    Ok(summary)
}

/// Loads and applies the configured seed file, if any.
pub fn seed_from_config(
    cfg: &CoreConfig,
    store: &InMemoryStore,
) -> PatientResult<Option<SeedSummary>> {
    let Some(path) = cfg.seed_file() else {
        tracing::info!("seeding disabled");
        return Ok(None);
    };

    let Some(seed) = load_seed(path)? else {
        return Ok(None);
    };

    let summary = apply_seed(store, seed)?;
    tracing::info!(
        "seeded from {}: {} inserted, {} updated, {} join rows",
        path.display(),
        summary.inserted,
        summary.updated,
        summary.linked
    );
    Ok(Some(summary))
}
