//! JSON transfer objects.
//!
//! These are the shapes that cross the HTTP boundary. Field names are camelCase on the
//! wire. Entities never leave the server directly; `pas-core` converts to and from these
//! types with explicit field-by-field functions.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A patient as seen by API clients.
///
/// `id` and `createdDate` are server-assigned. Inbound payloads may omit both; when
/// present on an inbound payload `createdDate` is ignored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PatientDto {
    #[serde(default)]
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub date_of_birth: NaiveDate,
    #[serde(default)]
    pub created_date: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HospitalDto {
    #[serde(default)]
    pub id: Uuid,
    pub name: String,
    pub address: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VisitDto {
    #[serde(default)]
    pub id: Uuid,
    pub date: DateTime<Utc>,
}

/// One row of a patient's visit history.
///
/// This is a read-only projection of a visit joined with the hospital it took place at.
/// It carries no patient or join linkage and cannot be turned back into a join row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PatientVisitDto {
    pub visit_id: Uuid,
    pub date: DateTime<Utc>,
    pub hospital_name: String,
    pub hospital_address: String,
}

/// Reference-preserving list envelope: `{"$values": [...]}`.
///
/// The server emits flat arrays. Clients still accept this shape because older
/// deployments wrapped every list in it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValuesEnvelope<T> {
    #[serde(rename = "$values")]
    pub values: Vec<T>,
}

/// A list response in either of the accepted shapes.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ListPayload<T> {
    Flat(Vec<T>),
    Envelope(ValuesEnvelope<T>),
}

impl<T> ListPayload<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            ListPayload::Flat(values) => values,
            ListPayload::Envelope(envelope) => envelope.values,
        }
    }
}
