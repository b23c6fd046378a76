//! # PAS Core
//!
//! Core business logic for the patient administration system.
//!
//! This crate contains pure data operations over an in-memory store:
//! - Patient create, read, update and delete
//! - Visit history resolved through patient/hospital/visit join rows
//! - Input validation and entity <-> DTO mapping
//! - Startup seeding from a JSON fixture
//!
//! **No API concerns**: HTTP routing, status codes and OpenAPI docs belong in `api-rest`;
//! wire types live in `api-shared`.

pub mod config;
pub mod constants;
pub mod entities;
pub mod error;
pub mod mapping;
pub mod patient;
pub mod repositories;
pub mod seed;
pub mod store;
pub mod validation;

pub use config::CoreConfig;
pub use error::{PatientError, PatientResult};
pub use patient::PatientsService;
pub use repositories::{InMemoryPatientsRepository, PatientsRepository};
pub use store::InMemoryStore;
pub use validation::{validate_patient, NewPatient};
