//! Conversions between persisted entities and wire DTOs.
//!
//! Patient, hospital and visit conversions are plain field-for-field copies and are
//! loss-free in both directions (apart from server-assigned fields on the way in).
//! The visit history conversion, [`project_visits`], is a one-way projection.

use crate::entities::{EntityMeta, HospitalEntity, PatientEntity, VisitEntity, VisitRecord};
use crate::validation::NewPatient;
use api_shared::{HospitalDto, PatientDto, PatientVisitDto, VisitDto};
use chrono::{DateTime, Utc};

impl From<&PatientEntity> for PatientDto {
    fn from(entity: &PatientEntity) -> Self {
        PatientDto {
            id: entity.meta.id,
            first_name: entity.first_name.clone(),
            last_name: entity.last_name.clone(),
            email: entity.email.clone(),
            date_of_birth: entity.date_of_birth,
            created_date: Some(entity.meta.created_date),
        }
    }
}

impl NewPatient {
    /// Builds a new entity around server-assigned metadata.
    pub fn into_entity(self, meta: EntityMeta) -> PatientEntity {
        PatientEntity {
            meta,
            first_name: self.first_name.into_inner(),
            last_name: self.last_name.into_inner(),
            email: self.email.into_inner(),
            date_of_birth: self.date_of_birth,
        }
    }

    /// Overwrites every client-controlled field of `entity`.
    ///
    /// This is full-replace semantics: no field of `entity` that a client controls
    /// survives the call.
    pub fn apply_to(self, entity: &mut PatientEntity) {
        entity.first_name = self.first_name.into_inner();
        entity.last_name = self.last_name.into_inner();
        entity.email = self.email.into_inner();
        entity.date_of_birth = self.date_of_birth;
    }
}

impl From<&HospitalEntity> for HospitalDto {
    fn from(entity: &HospitalEntity) -> Self {
        HospitalDto {
            id: entity.meta.id,
            name: entity.name.clone(),
            address: entity.address.clone(),
        }
    }
}

pub fn hospital_from_dto(dto: HospitalDto, created_date: DateTime<Utc>) -> HospitalEntity {
    HospitalEntity {
        meta: EntityMeta::with_id(dto.id, created_date),
        name: dto.name,
        address: dto.address,
    }
}

impl From<&VisitEntity> for VisitDto {
    fn from(entity: &VisitEntity) -> Self {
        VisitDto {
            id: entity.meta.id,
            date: entity.date,
        }
    }
}

pub fn visit_from_dto(dto: VisitDto, created_date: DateTime<Utc>) -> VisitEntity {
    VisitEntity {
        meta: EntityMeta::with_id(dto.id, created_date),
        date: dto.date,
    }
}

/// Flattens resolved visits into visit history rows.
///
/// Every join row of every visit becomes one row carrying the visit id and date and
/// the hospital's name and address. Patient linkage is dropped, so the result cannot
/// be mapped back onto join rows.
pub fn project_visits(visits: &[VisitRecord]) -> Vec<PatientVisitDto> {
    visits
        .iter()
        .flat_map(|record| {
            record.links.iter().map(move |link| PatientVisitDto {
                visit_id: record.visit.meta.id,
                date: record.visit.date,
                hospital_name: link.hospital.name.clone(),
                hospital_address: link.hospital.address.clone(),
            })
        })
        .collect()
}
