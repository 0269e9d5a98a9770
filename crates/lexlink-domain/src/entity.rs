//! Entity module - validated cases and precedents
//!
//! The engine treats cases and precedents uniformly as entities. Fields that
//! only make sense for a precedent live on [`EntityKind::Precedent`], so the
//! scorer and link builder branch on the kind instead of probing optional
//! fields.

use crate::record::{
    BindingAuthority, ClientRole, Jurisdiction, Outcome, PracticeArea, RawParty, RawRecord,
    RecordKind, Treatment,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of a case or precedent
///
/// Ordering is lexicographic on the underlying string, which is what the link
/// builder uses as its final tie-break.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// Create an identifier, rejecting blank strings
    ///
    /// # Examples
    ///
    /// ```
    /// use lexlink_domain::EntityId;
    ///
    /// assert!(EntityId::new("case-17").is_ok());
    /// assert!(EntityId::new("   ").is_err());
    /// ```
    pub fn new(value: impl Into<String>) -> Result<Self, String> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err("identifier is blank".to_string());
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Borrow the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A party to a case or precedent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    /// Display name
    pub name: String,

    /// Other names the party is known by
    pub aliases: Vec<String>,
}

impl From<&RawParty> for Party {
    fn from(raw: &RawParty) -> Self {
        Self {
            name: raw.name.clone(),
            aliases: raw.aliases.clone(),
        }
    }
}

/// Kind-specific attributes of an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EntityKind {
    /// A matter under management
    Case {
        /// Side the firm acts for
        client_role: ClientRole,
    },

    /// A decided authority
    Precedent {
        /// How it was decided, when known
        outcome: Option<Outcome>,
        /// Formal weight
        binding_authority: BindingAuthority,
        /// Subsequent treatment, when known
        treatment: Option<Treatment>,
    },
}

/// A validated case or precedent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Unique identifier
    pub id: EntityId,

    /// Display name (falls back to the identifier)
    pub title: String,

    /// Fact-pattern strings
    pub facts: Vec<String>,

    /// Legal-principle strings
    pub legal_principles: Vec<String>,

    /// Parties
    pub parties: Vec<Party>,

    /// Forum level, when known
    pub jurisdiction: Option<Jurisdiction>,

    /// Practice area, when known
    pub practice_area: Option<PracticeArea>,

    /// Decision or opened date, when known
    pub date: Option<NaiveDate>,

    /// Case or precedent attributes
    pub kind: EntityKind,
}

impl Entity {
    /// Validate a raw record into an entity
    ///
    /// Only the identifier is required. Everything else defaults: collections
    /// to empty, scalars to unknown, binding authority to persuasive and the
    /// client role to claimant.
    pub fn try_from_raw(raw: &RawRecord) -> Result<Self, String> {
        let id = match raw.id.as_deref() {
            Some(id) => EntityId::new(id)?,
            None => return Err("identifier is missing".to_string()),
        };

        let kind = match raw.kind {
            RecordKind::Case => EntityKind::Case {
                client_role: raw.client_role.unwrap_or_default(),
            },
            RecordKind::Precedent => EntityKind::Precedent {
                outcome: raw.outcome,
                binding_authority: raw.binding_authority.unwrap_or_default(),
                treatment: raw.treatment,
            },
        };

        let title = raw
            .title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| id.to_string());

        Ok(Self {
            id,
            title,
            facts: raw.facts.clone(),
            legal_principles: raw.legal_principles.clone(),
            parties: raw.parties.iter().map(Party::from).collect(),
            jurisdiction: raw.jurisdiction,
            practice_area: raw.practice_area,
            date: raw.date,
            kind,
        })
    }

    /// Whether this entity is a precedent
    pub fn is_precedent(&self) -> bool {
        matches!(self.kind, EntityKind::Precedent { .. })
    }

    /// Binding authority, for precedents only
    pub fn binding_authority(&self) -> Option<BindingAuthority> {
        match self.kind {
            EntityKind::Precedent {
                binding_authority, ..
            } => Some(binding_authority),
            EntityKind::Case { .. } => None,
        }
    }
}
