//! In-memory case repository
//!
//! Holds records in insertion order. Loads from a JSON document that is
//! either a bare array of records or an object with a `records` array.

use crate::error::EngineError;
use lexlink_domain::{CaseRepository, RawRecord};
use serde::Deserialize;
use std::convert::Infallible;

#[derive(Deserialize)]
#[serde(untagged)]
enum RecordDocument {
    List(Vec<RawRecord>),
    Wrapped { records: Vec<RawRecord> },
}

/// Repository backed by a vector of records
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    records: Vec<RawRecord>,
}

impl InMemoryRepository {
    /// Create a repository holding the given records
    pub fn from_records(records: Vec<RawRecord>) -> Self {
        Self { records }
    }

    /// Parse a JSON document of records
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let records = match serde_json::from_str::<RecordDocument>(json)? {
            RecordDocument::List(records) => records,
            RecordDocument::Wrapped { records } => records,
        };
        Ok(Self::from_records(records))
    }

    /// Number of records held
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the repository is empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl CaseRepository for InMemoryRepository {
    type Error = Infallible;

    fn get(&self, id: &str) -> Result<Option<RawRecord>, Self::Error> {
        let id = id.trim();
        Ok(self
            .records
            .iter()
            .find(|r| r.id.as_deref().map(str::trim) == Some(id))
            .cloned())
    }

    fn list(&self) -> Result<Vec<RawRecord>, Self::Error> {
        Ok(self.records.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_array() {
        let repo = InMemoryRepository::from_json(
            r#"[{"id": "c-1"}, {"kind": "precedent", "id": "p-1"}]"#,
        )
        .unwrap();
        assert_eq!(repo.len(), 2);
        assert!(repo.get("p-1").unwrap().is_some());
    }

    #[test]
    fn test_from_json_wrapped() {
        let repo = InMemoryRepository::from_json(r#"{"records": [{"id": "c-1"}]}"#).unwrap();
        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        let result = InMemoryRepository::from_json(r#"{"cases": 3}"#);
        assert!(matches!(result, Err(EngineError::JsonParse(_))));
    }

    #[test]
    fn test_get_missing() {
        let repo = InMemoryRepository::from_records(vec![RawRecord::case("c-1")]);
        assert!(repo.get("c-2").unwrap().is_none());
        assert!(repo.get(" c-1 ").unwrap().is_some());
    }
}
