//! Patient repository.
//!
//! [`PatientsRepository`] is the seam the patient service depends on. The in-memory
//! implementation resolves every association eagerly with explicit joins over the
//! store; nothing is loaded lazily after a call returns.

use crate::entities::{HospitalEntity, PatientEntity, PatientRecord, VisitRecord};
use crate::error::PatientResult;
use crate::store::InMemoryStore;
use std::sync::Arc;
use uuid::Uuid;

/// Read/write access to patients and the visit history derived from join rows.
pub trait PatientsRepository: Send + Sync {
    /// All patients, each with join rows resolved to hospitals and visits.
    fn get_patients(&self) -> PatientResult<Vec<PatientRecord>>;

    /// A single resolved patient, or `None` when the id is unknown.
    fn get_patient_by_id(&self, patient_id: Uuid) -> PatientResult<Option<PatientRecord>>;

    /// Distinct visits reachable from the patient's join rows.
    ///
    /// An unknown patient simply has no visits.
    fn get_visits_by_patient_id(&self, patient_id: Uuid) -> PatientResult<Vec<VisitRecord>>;

    fn add_patient(&self, patient: PatientEntity) -> PatientResult<()>;

    /// Replaces the stored patient's mutable fields with those of `patient`.
    ///
    /// Fails with `PatientNotFound` if no patient has that id.
    fn update_patient(&self, patient: PatientEntity) -> PatientResult<PatientEntity>;

    /// Fails with `PatientNotFound` if no patient has that id.
    fn delete_patient(&self, patient_id: Uuid) -> PatientResult<()>;

    fn get_hospitals(&self) -> PatientResult<Vec<HospitalEntity>>;
}

/// [`PatientsRepository`] backed by the shared [`InMemoryStore`].
#[derive(Clone)]
pub struct InMemoryPatientsRepository {
    store: Arc<InMemoryStore>,
}

impl InMemoryPatientsRepository {
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }
}

impl PatientsRepository for InMemoryPatientsRepository {
    fn get_patients(&self) -> PatientResult<Vec<PatientRecord>> {
        Ok(self.store.patients())
    }

    fn get_patient_by_id(&self, patient_id: Uuid) -> PatientResult<Option<PatientRecord>> {
        Ok(self.store.patient(patient_id))
    }

    fn get_visits_by_patient_id(&self, patient_id: Uuid) -> PatientResult<Vec<VisitRecord>> {
        Ok(self.store.visits_for_patient(patient_id))
    }

    fn add_patient(&self, patient: PatientEntity) -> PatientResult<()> {
        self.store.insert_patient(patient)
    }

    fn update_patient(&self, patient: PatientEntity) -> PatientResult<PatientEntity> {
        self.store.modify_patient(patient.id(), |stored| {
            stored.first_name = patient.first_name;
            stored.last_name = patient.last_name;
            stored.email = patient.email;
            stored.date_of_birth = patient.date_of_birth;
        })
    }

    fn delete_patient(&self, patient_id: Uuid) -> PatientResult<()> {
        self.store.remove_patient(patient_id).map(|_| ())
    }

    fn get_hospitals(&self) -> PatientResult<Vec<HospitalEntity>> {
        Ok(self.store.hospitals())
    }
}
