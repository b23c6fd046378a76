//! Core runtime configuration.
//!
//! This module defines configuration that should be resolved once at process startup and then
//! passed into core services. Request handling never reads environment variables.

use crate::constants::DEFAULT_SEED_FILE;
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug, Default)]
pub struct CoreConfig {
    seed_file: Option<PathBuf>,
}

impl CoreConfig {
    /// Create a new `CoreConfig`. `None` disables startup seeding.
    pub fn new(seed_file: Option<PathBuf>) -> Self {
        Self { seed_file }
    }

    pub fn seed_file(&self) -> Option<&Path> {
        self.seed_file.as_deref()
    }
}

/// Resolve the seed file path from an optional environment value.
///
/// - unset: [`DEFAULT_SEED_FILE`] relative to the working directory
/// - empty or whitespace: seeding disabled
/// - anything else: that path
pub fn seed_file_from_env_value(value: Option<String>) -> Option<PathBuf> {
    match value {
        None => Some(PathBuf::from(DEFAULT_SEED_FILE)),
        Some(v) if v.trim().is_empty() => None,
        Some(v) => Some(PathBuf::from(v.trim())),
    }
}
