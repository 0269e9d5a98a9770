//! Record module - the input shape supplied by the case repository
//!
//! Records arrive from the repository as loosely-filled documents. Every
//! collection defaults to empty and every scalar is optional, so a record with
//! only an identifier is still well-formed. Unknown fields are ignored.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Whether a record describes a live case or a decided precedent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    /// A matter under management
    #[default]
    Case,

    /// A decided authority that can be cited
    Precedent,
}

/// Court level of the deciding or hearing forum
///
/// Codes the repository does not recognise deserialize as [`Jurisdiction::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Jurisdiction {
    /// Apex court
    Supreme,

    /// National appellate or first-instance court
    National,

    /// Regional or devolved court
    Regional,

    /// International court or tribunal
    International,

    /// Anything else (tribunals, foreign courts, unknown codes)
    #[serde(other)]
    Other,
}

impl Jurisdiction {
    /// Get the jurisdiction code as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Jurisdiction::Supreme => "supreme",
            Jurisdiction::National => "national",
            Jurisdiction::Regional => "regional",
            Jurisdiction::International => "international",
            Jurisdiction::Other => "other",
        }
    }
}

/// Practice area a matter belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PracticeArea {
    /// Contract disputes
    Contract,
    /// Negligence and other torts
    Tort,
    /// Employment law
    Employment,
    /// Real property
    Property,
    /// Family law
    Family,
    /// Criminal law
    Criminal,
    /// Commercial and company law
    Commercial,
    /// Regulatory and public law
    Regulatory,
    /// Any other or unrecognised area
    #[serde(other)]
    Other,
}

impl PracticeArea {
    /// Get the practice area code as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            PracticeArea::Contract => "contract",
            PracticeArea::Tort => "tort",
            PracticeArea::Employment => "employment",
            PracticeArea::Property => "property",
            PracticeArea::Family => "family",
            PracticeArea::Criminal => "criminal",
            PracticeArea::Commercial => "commercial",
            PracticeArea::Regulatory => "regulatory",
            PracticeArea::Other => "other",
        }
    }
}

/// How a precedent was decided
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Claimant succeeded
    ClaimantSuccess,
    /// Defendant succeeded
    DefendantSuccess,
    /// Split decision
    Mixed,
    /// Disposed of on procedural grounds
    Procedural,
}

/// Formal obligation weight of a precedent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BindingAuthority {
    /// Must be followed by the forum
    Binding,
    /// May be followed
    #[default]
    Persuasive,
    /// Carries no formal weight
    NonBinding,
}

impl BindingAuthority {
    /// Get the authority code as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            BindingAuthority::Binding => "binding",
            BindingAuthority::Persuasive => "persuasive",
            BindingAuthority::NonBinding => "non_binding",
        }
    }
}

/// Subsequent judicial treatment of a precedent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Treatment {
    /// Later courts applied it
    Followed,
    /// Later courts discussed it without applying it
    Considered,
    /// A higher court has overruled it
    Overruled,
}

/// The side of a case the firm acts for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientRole {
    /// Acting for the claimant
    #[default]
    Claimant,
    /// Acting for the defendant
    Defendant,
}

/// A party as supplied by the repository
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawParty {
    /// Display name
    #[serde(default)]
    pub name: String,

    /// Other names the party is known by
    #[serde(default)]
    pub aliases: Vec<String>,
}

impl RawParty {
    /// Create a party with no aliases
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::new(),
        }
    }
}

/// A case or precedent record as supplied by the repository
///
/// The identifier is the only field the engine insists on; see
/// [`crate::Entity::try_from_raw`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRecord {
    /// Case or precedent
    #[serde(default)]
    pub kind: RecordKind,

    /// Opaque unique identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Case name or citation for display
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Short fact-pattern strings
    #[serde(default)]
    pub facts: Vec<String>,

    /// Short legal-principle strings
    #[serde(default)]
    pub legal_principles: Vec<String>,

    /// Parties with aliases
    #[serde(default)]
    pub parties: Vec<RawParty>,

    /// Forum level
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jurisdiction: Option<Jurisdiction>,

    /// Practice area
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub practice_area: Option<PracticeArea>,

    /// Decision date (precedents) or opened date (cases)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,

    /// Precedent outcome
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<Outcome>,

    /// Precedent binding weight
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binding_authority: Option<BindingAuthority>,

    /// Precedent subsequent treatment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub treatment: Option<Treatment>,

    /// Side the firm acts for (cases only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_role: Option<ClientRole>,
}

impl RawRecord {
    /// Create an empty case record with the given identifier
    pub fn case(id: impl Into<String>) -> Self {
        Self {
            kind: RecordKind::Case,
            id: Some(id.into()),
            ..Self::default()
        }
    }

    /// Create an empty precedent record with the given identifier
    pub fn precedent(id: impl Into<String>) -> Self {
        Self {
            kind: RecordKind::Precedent,
            id: Some(id.into()),
            ..Self::default()
        }
    }

    /// Short excerpt used when reporting a malformed record
    pub fn excerpt(&self) -> String {
        let label = self
            .title
            .as_deref()
            .or_else(|| self.facts.first().map(String::as_str))
            .unwrap_or("<no title or facts>");
        let mut excerpt: String = label.chars().take(48).collect();
        if label.chars().count() > 48 {
            excerpt.push('…');
        }
        format!("{} '{}'", self.kind_str(), excerpt)
    }

    fn kind_str(&self) -> &'static str {
        match self.kind {
            RecordKind::Case => "case",
            RecordKind::Precedent => "precedent",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_record_deserializes_with_defaults() {
        let record: RawRecord = serde_json::from_str(r#"{"id": "c-1"}"#).unwrap();
        assert_eq!(record.kind, RecordKind::Case);
        assert_eq!(record.id.as_deref(), Some("c-1"));
        assert!(record.facts.is_empty());
        assert!(record.legal_principles.is_empty());
        assert!(record.parties.is_empty());
        assert!(record.date.is_none());
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let record: RawRecord = serde_json::from_str(
            r#"{"id": "p-1", "kind": "precedent", "uploadedBy": "alice", "pages": 12}"#,
        )
        .unwrap();
        assert_eq!(record.kind, RecordKind::Precedent);
    }

    #[test]
    fn test_camel_case_fields() {
        let record: RawRecord = serde_json::from_str(
            r#"{
                "id": "p-2",
                "kind": "precedent",
                "legalPrinciples": ["duty of care"],
                "practiceArea": "tort",
                "bindingAuthority": "non_binding",
                "date": "2019-03-14"
            }"#,
        )
        .unwrap();
        assert_eq!(record.legal_principles, vec!["duty of care".to_string()]);
        assert_eq!(record.practice_area, Some(PracticeArea::Tort));
        assert_eq!(record.binding_authority, Some(BindingAuthority::NonBinding));
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2019, 3, 14));
    }

    #[test]
    fn test_unknown_codes_fall_back_to_other() {
        let record: RawRecord = serde_json::from_str(
            r#"{"id": "c-3", "jurisdiction": "county_court", "practiceArea": "maritime"}"#,
        )
        .unwrap();
        assert_eq!(record.jurisdiction, Some(Jurisdiction::Other));
        assert_eq!(record.practice_area, Some(PracticeArea::Other));
    }

    #[test]
    fn test_missing_id_is_none() {
        let record: RawRecord = serde_json::from_str(r#"{"facts": ["delay"]}"#).unwrap();
        assert!(record.id.is_none());
        assert_eq!(record.excerpt(), "case 'delay'");
    }

    #[test]
    fn test_excerpt_truncates() {
        let mut record = RawRecord::precedent("p-9");
        record.title = Some("x".repeat(60));
        let excerpt = record.excerpt();
        assert!(excerpt.starts_with("precedent '"));
        assert!(excerpt.contains('…'));
    }
}
