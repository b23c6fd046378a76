//! Persisted entity shapes.
//!
//! Three entity kinds share a common base of identity and timestamps. Patients,
//! hospitals and visits are tied together only through [`PatientHospitalRelation`]
//! join rows; entities never hold references to each other directly.
//!
//! The `*Record` types are resolved read views assembled by the store: an entity
//! together with everything its join rows point at, fetched eagerly.

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

/// Identity and timestamps common to every entity.
///
/// `created_date` is set once when the entity is first stored. `updated_date` is
/// refreshed by every mutating write.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntityMeta {
    pub id: Uuid,
    pub created_date: DateTime<Utc>,
    pub updated_date: DateTime<Utc>,
}

impl EntityMeta {
    /// Metadata for a brand new entity with a freshly generated id.
    pub fn new_now() -> Self {
        Self::with_id(Uuid::new_v4(), Utc::now())
    }

    pub fn with_id(id: Uuid, created_date: DateTime<Utc>) -> Self {
        Self {
            id,
            created_date,
            updated_date: created_date,
        }
    }

    pub(crate) fn touch(&mut self) {
        self.updated_date = Utc::now();
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatientEntity {
    pub meta: EntityMeta,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub date_of_birth: NaiveDate,
}

impl PatientEntity {
    pub fn id(&self) -> Uuid {
        self.meta.id
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HospitalEntity {
    pub meta: EntityMeta,
    pub name: String,
    pub address: String,
}

impl HospitalEntity {
    pub fn id(&self) -> Uuid {
        self.meta.id
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VisitEntity {
    pub meta: EntityMeta,
    pub date: DateTime<Utc>,
}

impl VisitEntity {
    pub fn id(&self) -> Uuid {
        self.meta.id
    }
}

/// Join row: one patient seen at one hospital during one visit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PatientHospitalRelation {
    pub patient_id: Uuid,
    pub hospital_id: Uuid,
    pub visit_id: Uuid,
}

/// A join row of a patient with both ends resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedLink {
    pub hospital: HospitalEntity,
    pub visit: VisitEntity,
}

/// A patient with all of its join rows resolved to hospitals and visits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatientRecord {
    pub patient: PatientEntity,
    pub links: Vec<ResolvedLink>,
}

/// A join row seen from the visit side.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VisitLink {
    pub patient_id: Uuid,
    pub hospital: HospitalEntity,
}

/// A visit with all of its join rows resolved to hospitals.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VisitRecord {
    pub visit: VisitEntity,
    pub links: Vec<VisitLink>,
}
