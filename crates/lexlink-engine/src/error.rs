//! Error types for the connection engine

use std::fmt;
use thiserror::Error;

/// Which input list a malformed record came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordList {
    /// The case under analysis
    Target,
    /// The candidate pool
    Candidates,
    /// The precedent corpus
    PrecedentCorpus,
    /// A repository listing
    Repository,
}

impl fmt::Display for RecordList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordList::Target => f.write_str("target"),
            RecordList::Candidates => f.write_str("candidates"),
            RecordList::PrecedentCorpus => f.write_str("precedent_corpus"),
            RecordList::Repository => f.write_str("repository"),
        }
    }
}

/// Errors that can occur during an analysis
///
/// Scoring itself never fails. The only input the engine rejects is a
/// record it cannot identify; the caller decides whether to drop that record
/// or abandon the request.
#[derive(Error, Debug)]
pub enum EngineError {
    /// A record is missing its identifier
    #[error("Invalid record at {list}[{position}] ({excerpt}): {reason}")]
    InvalidRecord {
        /// Input list holding the record
        list: RecordList,
        /// Zero-based position within that list
        position: usize,
        /// Short excerpt of the record content
        excerpt: String,
        /// What is wrong with it
        reason: String,
    },

    /// The requested target is not in the repository
    #[error("Target not found: {0}")]
    TargetNotFound(String),

    /// Repository access failed
    #[error("Repository error: {0}")]
    Repository(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParse(String),
}

impl From<serde_json::Error> for EngineError {
    fn from(e: serde_json::Error) -> Self {
        EngineError::JsonParse(e.to_string())
    }
}
