//! Command implementations.

pub mod analyze;
pub mod config;
pub mod score;

pub use self::analyze::execute_analyze;
pub use self::config::execute_config;
pub use self::score::execute_score;

use crate::error::{CliError, Result};
use lexlink_domain::{CaseRepository, RawRecord};
use lexlink_engine::InMemoryRepository;
use std::fs;
use std::path::Path;

/// Load a record file into an in-memory repository.
pub(crate) fn load_repository(path: &Path) -> Result<InMemoryRepository> {
    let json = fs::read_to_string(path)?;
    let repository = InMemoryRepository::from_json(&json)?;
    tracing::debug!("Loaded {} records from {}", repository.len(), path.display());
    Ok(repository)
}

/// Look up a record that must exist.
pub(crate) fn require_record(repository: &InMemoryRepository, id: &str) -> Result<RawRecord> {
    repository
        .get(id)
        .ok()
        .flatten()
        .ok_or_else(|| CliError::InvalidInput(format!("No record with id '{}'", id)))
}
