//! Constants used throughout the patient administration core crate.

/// Seed file looked up in the working directory when no explicit path is configured.
pub const DEFAULT_SEED_FILE: &str = "sample-data.json";

/// Default listen address for the REST server.
pub const DEFAULT_REST_ADDR: &str = "0.0.0.0:3000";

/// Path prefix under which every REST route is mounted.
pub const API_PREFIX: &str = "/api";
