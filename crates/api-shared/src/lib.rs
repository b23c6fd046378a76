//! # API Shared
//!
//! Shared wire definitions for the patient administration APIs.
//!
//! Contains:
//! - JSON transfer objects (`dto` module) exchanged between server and client
//! - Shared services like `HealthService`
//!
//! Used by `api-rest`, `pas-core` and the `pas` client for common functionality.

pub mod dto;
pub mod health;

pub use dto::{
    HospitalDto, ListPayload, PatientDto, PatientVisitDto, ValuesEnvelope, VisitDto,
};
pub use health::{HealthRes, HealthService};
