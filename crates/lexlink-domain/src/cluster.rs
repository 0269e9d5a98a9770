//! Cluster module - groups of entities sharing a unifying legal theme

use crate::entity::EntityId;
use serde::{Deserialize, Serialize};

/// Which strategy produced a cluster
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClusterKind {
    /// Members share a legal principle
    Principle,
    /// Members share a practice area and strong mutual links
    Category,
}

impl ClusterKind {
    /// Get the kind as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ClusterKind::Principle => "principle",
            ClusterKind::Category => "category",
        }
    }
}

/// Maturity of a cluster's line of authority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClusterStatus {
    /// Strong and broad
    Established,
    /// Moderately strong
    Developing,
    /// Weak
    Uncertain,
    /// Members pull in opposite directions
    Disputed,
}

impl ClusterStatus {
    /// Derive a status from aggregate strength and size
    ///
    /// A contradiction among members overrides everything else.
    ///
    /// # Examples
    ///
    /// ```
    /// use lexlink_domain::ClusterStatus;
    ///
    /// assert_eq!(ClusterStatus::derive(0.75, 3, false), ClusterStatus::Established);
    /// assert_eq!(ClusterStatus::derive(0.75, 2, false), ClusterStatus::Developing);
    /// assert_eq!(ClusterStatus::derive(0.3, 5, false), ClusterStatus::Uncertain);
    /// assert_eq!(ClusterStatus::derive(0.9, 5, true), ClusterStatus::Disputed);
    /// ```
    pub fn derive(strength: f64, members: usize, contradicted: bool) -> Self {
        if contradicted {
            ClusterStatus::Disputed
        } else if strength > 0.7 && members >= 3 {
            ClusterStatus::Established
        } else if strength > 0.4 {
            ClusterStatus::Developing
        } else {
            ClusterStatus::Uncertain
        }
    }

    /// Get the status as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ClusterStatus::Established => "established",
            ClusterStatus::Developing => "developing",
            ClusterStatus::Uncertain => "uncertain",
            ClusterStatus::Disputed => "disputed",
        }
    }
}

/// A group of two or more entities sharing a theme
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cluster {
    /// Deterministic identifier
    pub id: String,

    /// Strategy that produced the cluster
    pub kind: ClusterKind,

    /// Principle or derived label
    pub theme: String,

    /// Members, sorted by identifier (at least two)
    pub member_ids: Vec<EntityId>,

    /// Principle the members have in common
    pub unifying_principle: String,

    /// Members sorted by date, undated last
    pub development_timeline: Vec<EntityId>,

    /// Mean strength of contributing links
    pub strength: f64,

    /// Derived maturity
    pub status: ClusterStatus,
}

impl Cluster {
    /// Whether the given entity is a member
    pub fn contains(&self, id: &EntityId) -> bool {
        self.member_ids.binary_search(id).is_ok()
    }
}
