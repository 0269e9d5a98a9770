//! Feature extraction
//!
//! Turns a validated entity into the canonical, comparable feature set the
//! scorer works on. Extraction is total: it never fails and never produces
//! absent collections.

use chrono::NaiveDate;
use lexlink_domain::{Entity, EntityId, Jurisdiction, Party, PracticeArea};
use std::collections::BTreeSet;

/// Trailing corporate-form words dropped from party names before matching
const CORPORATE_SUFFIXES: &[&str] = &[
    "ltd", "limited", "plc", "inc", "incorporated", "llp", "llc", "corp", "corporation", "co",
];

/// Normalized names a single party is known by
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct PartyKey {
    /// Normalized name and aliases, sorted and deduplicated
    pub names: Vec<String>,
}

impl PartyKey {
    /// Whether the two parties share any normalized name
    pub fn matches(&self, other: &PartyKey) -> bool {
        self.names
            .iter()
            .any(|name| other.names.binary_search(name).is_ok())
    }
}

/// Comparable features of one entity
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureSet {
    /// Identifier of the source entity
    pub id: EntityId,

    /// Normalized fact strings
    pub facts: Vec<String>,

    /// Normalized principle strings
    pub legal_principles: Vec<String>,

    /// Normalized parties
    pub parties: Vec<PartyKey>,

    /// Forum level, when known
    pub jurisdiction: Option<Jurisdiction>,

    /// Practice area, when known
    pub practice_area: Option<PracticeArea>,

    /// Date, when known
    pub date: Option<NaiveDate>,
}

impl FeatureSet {
    /// True when there is no textual content to compare at all
    pub fn is_degenerate(&self) -> bool {
        self.facts.is_empty() && self.legal_principles.is_empty() && self.parties.is_empty()
    }
}

/// Extract the feature set of an entity
pub fn extract(entity: &Entity) -> FeatureSet {
    FeatureSet {
        id: entity.id.clone(),
        facts: normalize_set(&entity.facts),
        legal_principles: normalize_set(&entity.legal_principles),
        parties: normalize_parties(&entity.parties),
        jurisdiction: entity.jurisdiction,
        practice_area: entity.practice_area,
        date: entity.date,
    }
}

/// Lower-case, trim and collapse internal whitespace
pub fn normalize_text(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn normalize_set(items: &[String]) -> Vec<String> {
    items
        .iter()
        .map(|item| normalize_text(item))
        .filter(|item| !item.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Normalize a party name: punctuation to spaces, lower-case, corporate
/// suffixes stripped from the end
pub fn normalize_party_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    let mut words: Vec<String> = cleaned.split_whitespace().map(str::to_lowercase).collect();
    while words.len() > 1 {
        match words.last() {
            Some(last) if CORPORATE_SUFFIXES.contains(&last.as_str()) => {
                words.pop();
            }
            _ => break,
        }
    }
    words.join(" ")
}

fn normalize_parties(parties: &[Party]) -> Vec<PartyKey> {
    parties
        .iter()
        .filter_map(|party| {
            let names: BTreeSet<String> = std::iter::once(&party.name)
                .chain(party.aliases.iter())
                .map(|name| normalize_party_name(name))
                .filter(|name| !name.is_empty())
                .collect();
            if names.is_empty() {
                None
            } else {
                Some(PartyKey {
                    names: names.into_iter().collect(),
                })
            }
        })
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
