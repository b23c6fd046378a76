//! Input validation utilities.
//!
//! Inbound patient payloads are checked here, before anything touches the store.
//! A successful check yields a [`NewPatient`], which is the only input type the
//! patient service accepts for writes.

use crate::{PatientError, PatientResult};
use api_shared::PatientDto;
use chrono::{NaiveDate, Utc};
use pas_types::{EmailAddress, NonEmptyText, TextError};

/// The client-controlled fields of a patient, already validated.
///
/// Server-assigned fields (id, timestamps) are not part of it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewPatient {
    pub first_name: NonEmptyText,
    pub last_name: NonEmptyText,
    pub email: EmailAddress,
    pub date_of_birth: NaiveDate,
}

/// Validates a patient payload received from a client.
///
/// # Errors
///
/// Returns `PatientError::InvalidInput` if:
/// - the first or last name is empty or whitespace,
/// - the email address is malformed,
/// - the date of birth lies in the future.
pub fn validate_patient(dto: &PatientDto) -> PatientResult<NewPatient> {
    let first_name = NonEmptyText::new(&dto.first_name)
        .map_err(|_| PatientError::InvalidInput("firstName is required".into()))?;
    let last_name = NonEmptyText::new(&dto.last_name)
        .map_err(|_| PatientError::InvalidInput("lastName is required".into()))?;
    let email = EmailAddress::parse(&dto.email).map_err(|e| match e {
        TextError::Empty => PatientError::InvalidInput("email is required".into()),
        other => other.into(),
    })?;

    if dto.date_of_birth > Utc::now().date_naive() {
        return Err(PatientError::InvalidInput(
            "dateOfBirth cannot be in the future".into(),
        ));
    }

    Ok(NewPatient {
        first_name,
        last_name,
        email,
        date_of_birth: dto.date_of_birth,
    })
}
