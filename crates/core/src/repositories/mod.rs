//! Repository layer.
//!
//! Repositories are the read/write seam between services and the store. They return
//! entities and resolved records, never wire types.

pub mod patients;

pub use patients::{InMemoryPatientsRepository, PatientsRepository};
