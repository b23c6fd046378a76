//! In-memory, map-backed data store.
//!
//! The store owns one table per entity kind plus the join rows that connect them.
//! All tables sit behind a single [`RwLock`], so every operation sees a consistent
//! snapshot and every write is applied atomically with respect to readers.
//!
//! Invariants maintained here rather than by callers:
//! - a join row is only accepted when its patient, hospital and visit all exist;
//! - removing a patient removes every join row that references it;
//! - `created_date` never changes after insertion and `updated_date` is refreshed on
//!   every write that goes through [`InMemoryStore::modify_patient`] or an upsert.
//!
//! Reads return owned, fully resolved copies; no lock is held once a call returns.

use crate::entities::{
    HospitalEntity, PatientEntity, PatientHospitalRelation, PatientRecord, ResolvedLink,
    VisitEntity, VisitLink, VisitRecord,
};
use crate::error::{PatientError, PatientResult};
use parking_lot::RwLock;
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

/// Whether an upsert created a new row or overwrote an existing one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Upsert {
    Inserted,
    Updated,
}

/// Row counts, used for startup logging.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StoreStats {
    pub patients: usize,
    pub hospitals: usize,
    pub visits: usize,
    pub relations: usize,
}

#[derive(Default)]
struct Tables {
    patients: HashMap<Uuid, PatientEntity>,
    hospitals: HashMap<Uuid, HospitalEntity>,
    visits: HashMap<Uuid, VisitEntity>,
    relations: Vec<PatientHospitalRelation>,
}

impl Tables {
    fn resolve_patient(&self, patient: &PatientEntity) -> PatientRecord {
        let links = self
            .relations
            .iter()
            .filter(|rel| rel.patient_id == patient.id())
            .filter_map(|rel| {
                Some(ResolvedLink {
                    hospital: self.hospitals.get(&rel.hospital_id)?.clone(),
                    visit: self.visits.get(&rel.visit_id)?.clone(),
                })
            })
            .collect();

        PatientRecord {
            patient: patient.clone(),
            links,
        }
    }

    /// Resolves a visit through every join row that names it.
    fn resolve_visit(&self, visit: &VisitEntity) -> VisitRecord {
        let links = self
            .relations
            .iter()
            .filter(|rel| rel.visit_id == visit.id())
            .filter_map(|rel| {
                Some(VisitLink {
                    patient_id: rel.patient_id,
                    hospital: self.hospitals.get(&rel.hospital_id)?.clone(),
                })
            })
            .collect();

        VisitRecord {
            visit: visit.clone(),
            links,
        }
    }
}

#[derive(Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> StoreStats {
        let tables = self.tables.read();
        StoreStats {
            patients: tables.patients.len(),
            hospitals: tables.hospitals.len(),
            visits: tables.visits.len(),
            relations: tables.relations.len(),
        }
    }

    // ------------------------------------------------------------------
    // Patients
    // ------------------------------------------------------------------

    /// Stores a new patient. Fails if the id is already taken.
    pub fn insert_patient(&self, patient: PatientEntity) -> PatientResult<()> {
        let mut tables = self.tables.write();
        if tables.patients.contains_key(&patient.id()) {
            return Err(PatientError::DuplicateId {
                kind: "patient",
                id: patient.id(),
            });
        }
        tables.patients.insert(patient.id(), patient);
        Ok(())
    }

    /// Inserts the patient, or overwrites the mutable fields of the existing one.
    pub fn upsert_patient(&self, patient: PatientEntity) -> Upsert {
        let mut tables = self.tables.write();
        match tables.patients.entry(patient.id()) {
            Entry::Occupied(mut entry) => {
                let existing = entry.get_mut();
                existing.first_name = patient.first_name;
                existing.last_name = patient.last_name;
                existing.email = patient.email;
                existing.date_of_birth = patient.date_of_birth;
                existing.meta.touch();
                Upsert::Updated
            }
            Entry::Vacant(entry) => {
                entry.insert(patient);
                Upsert::Inserted
            }
        }
    }

    /// Applies `change` to the stored patient and refreshes its update timestamp.
    ///
    /// The identity and creation timestamp are restored after `change` runs, so a
    /// caller cannot reassign them even by accident.
    pub fn modify_patient<F>(&self, id: Uuid, change: F) -> PatientResult<PatientEntity>
    where
        F: FnOnce(&mut PatientEntity),
    {
        let mut tables = self.tables.write();
        let patient = tables
            .patients
            .get_mut(&id)
            .ok_or(PatientError::PatientNotFound(id))?;

        let meta = patient.meta.clone();
        change(&mut *patient);
        patient.meta = meta;
        patient.meta.touch();

        Ok(patient.clone())
    }

    /// Removes a patient together with every join row that references it.
    pub fn remove_patient(&self, id: Uuid) -> PatientResult<PatientEntity> {
        let mut tables = self.tables.write();
        let removed = tables
            .patients
            .remove(&id)
            .ok_or(PatientError::PatientNotFound(id))?;

        let before = tables.relations.len();
        tables.relations.retain(|rel| rel.patient_id != id);
        let dropped = before - tables.relations.len();
        if dropped > 0 {
            tracing::debug!("removed {} join rows for patient {}", dropped, id);
        }

        Ok(removed)
    }

    /// All patients, resolved, ordered by creation time then id.
    pub fn patients(&self) -> Vec<PatientRecord> {
        let tables = self.tables.read();
        let mut patients: Vec<&PatientEntity> = tables.patients.values().collect();
        patients.sort_by(|a, b| {
            a.meta
                .created_date
                .cmp(&b.meta.created_date)
                .then_with(|| a.id().cmp(&b.id()))
        });
        patients
            .into_iter()
            .map(|p| tables.resolve_patient(p))
            .collect()
    }

    pub fn patient(&self, id: Uuid) -> Option<PatientRecord> {
        let tables = self.tables.read();
        tables.patients.get(&id).map(|p| tables.resolve_patient(p))
    }

    /// Distinct visits reachable from the patient's join rows.
    ///
    /// Each visit appears once, in the order its first join row was recorded, and
    /// carries all of its own join rows resolved to hospitals. That includes rows of
    /// other patients who share the visit.
    pub fn visits_for_patient(&self, patient_id: Uuid) -> Vec<VisitRecord> {
        let tables = self.tables.read();
        let mut seen = HashSet::new();

        tables
            .relations
            .iter()
            .filter(|rel| rel.patient_id == patient_id)
            .filter(|rel| seen.insert(rel.visit_id))
            .filter_map(|rel| tables.visits.get(&rel.visit_id))
            .map(|visit| tables.resolve_visit(visit))
            .collect()
    }

    // ------------------------------------------------------------------
    // Hospitals and visits
    // ------------------------------------------------------------------

    pub fn upsert_hospital(&self, hospital: HospitalEntity) -> Upsert {
        let mut tables = self.tables.write();
        match tables.hospitals.entry(hospital.id()) {
            Entry::Occupied(mut entry) => {
                let existing = entry.get_mut();
                existing.name = hospital.name;
                existing.address = hospital.address;
                existing.meta.touch();
                Upsert::Updated
            }
            Entry::Vacant(entry) => {
                entry.insert(hospital);
                Upsert::Inserted
            }
        }
    }

    pub fn hospitals(&self) -> Vec<HospitalEntity> {
        let tables = self.tables.read();
        let mut hospitals: Vec<HospitalEntity> = tables.hospitals.values().cloned().collect();
        hospitals.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id().cmp(&b.id())));
        hospitals
    }

    pub fn upsert_visit(&self, visit: VisitEntity) -> Upsert {
        let mut tables = self.tables.write();
        match tables.visits.entry(visit.id()) {
            Entry::Occupied(mut entry) => {
                let existing = entry.get_mut();
                existing.date = visit.date;
                existing.meta.touch();
                Upsert::Updated
            }
            Entry::Vacant(entry) => {
                entry.insert(visit);
                Upsert::Inserted
            }
        }
    }

    // ------------------------------------------------------------------
    // Join rows
    // ------------------------------------------------------------------

    /// Records a join row after checking that all three ends exist.
    ///
    /// Returns `false` when an identical row is already present.
    pub fn link(&self, relation: PatientHospitalRelation) -> PatientResult<bool> {
        let mut tables = self.tables.write();

        if !tables.patients.contains_key(&relation.patient_id) {
            return Err(PatientError::DanglingReference {
                kind: "patient",
                id: relation.patient_id,
            });
        }
        if !tables.hospitals.contains_key(&relation.hospital_id) {
            return Err(PatientError::DanglingReference {
                kind: "hospital",
                id: relation.hospital_id,
            });
        }
        if !tables.visits.contains_key(&relation.visit_id) {
            return Err(PatientError::DanglingReference {
                kind: "visit",
                id: relation.visit_id,
            });
        }

        if tables.relations.contains(&relation) {
            return Ok(false);
        }
        tables.relations.push(relation);
        Ok(true)
    }
}
