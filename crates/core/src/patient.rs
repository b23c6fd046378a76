//! Patient service.
//!
//! Sits between the HTTP surface and the repository: calls the repository, assigns
//! server-owned fields on create, and converts results to wire DTOs. It holds no
//! state of its own beyond the repository handle.

use crate::entities::EntityMeta;
use crate::error::{PatientError, PatientResult};
use crate::mapping::project_visits;
use crate::repositories::PatientsRepository;
use crate::validation::NewPatient;
use api_shared::{HospitalDto, PatientDto, PatientVisitDto};
use std::sync::Arc;
use uuid::Uuid;

/// Pure patient data operations - no API concerns
#[derive(Clone)]
pub struct PatientsService {
    repo: Arc<dyn PatientsRepository>,
}

impl PatientsService {
    /// Creates a new instance of PatientsService over the given repository.
    pub fn new(repo: Arc<dyn PatientsRepository>) -> Self {
        Self { repo }
    }

    /// Retrieves all patients as DTOs.
    ///
    /// Returns an empty list when no patients exist.
    pub fn get_all_patients(&self) -> PatientResult<Vec<PatientDto>> {
        let records = self.repo.get_patients()?;
        Ok(records
            .iter()
            .map(|record| PatientDto::from(&record.patient))
            .collect())
    }

    /// Retrieves one patient, or `None` if the id is unknown.
    pub fn get_patient_by_id(&self, id: Uuid) -> PatientResult<Option<PatientDto>> {
        let record = self.repo.get_patient_by_id(id)?;
        Ok(record.map(|r| PatientDto::from(&r.patient)))
    }

    /// Retrieves the visit history of a patient.
    ///
    /// Visits are distinct by visit id at the repository level; each visit then yields
    /// one row per join row it has, so a visit recorded against two
    /// hospitals appears twice with different hospital details. An unknown patient
    /// yields an empty list.
    pub fn get_patient_visits(&self, patient_id: Uuid) -> PatientResult<Vec<PatientVisitDto>> {
        let visits = self.repo.get_visits_by_patient_id(patient_id)?;
        Ok(project_visits(&visits))
    }

    /// Creates a patient with a fresh id and creation timestamp.
    ///
    /// # Returns
    ///
    /// The stored patient as a DTO, including its assigned id.
    pub fn create_patient(&self, patient: NewPatient) -> PatientResult<PatientDto> {
        let entity = patient.into_entity(EntityMeta::new_now());
        let dto = PatientDto::from(&entity);
        self.repo.add_patient(entity)?;

        tracing::info!("patient created: {}", dto.id);
        Ok(dto)
    }

    /// Replaces every client-controlled field of an existing patient.
    ///
    /// # Errors
    ///
    /// Returns `PatientError::PatientNotFound` if no patient has the given id.
    pub fn update_patient(&self, id: Uuid, patient: NewPatient) -> PatientResult<()> {
        let mut existing = self
            .repo
            .get_patient_by_id(id)?
            .ok_or(PatientError::PatientNotFound(id))?
            .patient;

        patient.apply_to(&mut existing);
        self.repo.update_patient(existing)?;

        tracing::info!("patient updated: {}", id);
        Ok(())
    }

    /// Deletes a patient and its join rows.
    ///
    /// # Errors
    ///
    /// Returns `PatientError::PatientNotFound` if no patient has the given id.
    pub fn delete_patient(&self, id: Uuid) -> PatientResult<()> {
        self.repo.delete_patient(id)?;

        tracing::info!("patient deleted: {}", id);
        Ok(())
    }

    pub fn get_all_hospitals(&self) -> PatientResult<Vec<HospitalDto>> {
        let hospitals = self.repo.get_hospitals()?;
        Ok(hospitals.iter().map(HospitalDto::from).collect())
    }
}
