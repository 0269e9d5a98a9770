//! Trait definitions for external interactions
//!
//! The engine never reaches into ambient storage. Callers hand it a
//! repository explicitly; implementations live in other crates.

use crate::RawRecord;

/// Source of case and precedent records
///
/// Implemented by the infrastructure layer (see `lexlink-engine`'s
/// in-memory repository).
pub trait CaseRepository {
    /// Error type for repository operations
    type Error;

    /// Get a record by identifier
    fn get(&self, id: &str) -> Result<Option<RawRecord>, Self::Error>;

    /// List every record the repository holds, in a stable order
    fn list(&self) -> Result<Vec<RawRecord>, Self::Error>;
}
