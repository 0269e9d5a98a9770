//! Connection edge module - directional links from the case under analysis

use crate::entity::EntityId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lowest confidence any edge can carry
pub const MIN_CONFIDENCE: f64 = 0.6;

/// How much confidence rises across the full strength range
pub const CONFIDENCE_SPAN: f64 = 0.3;

/// Type of connection between the case under analysis and another entity
///
/// Declaration order is the final tie-break when sorting edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkType {
    /// Overlapping fact patterns (case to case)
    SimilarFacts,
    /// Shared parties (case to case)
    SameParties,
    /// Overlapping legal issues (case to case)
    RelatedLegalIssues,
    /// Close in time (case to case)
    TemporalSequence,
    /// Precedent applies directly
    DirectlyApplicable,
    /// Precedent applies by analogy
    Analogous,
    /// Precedent is distinguishable
    Distinguishable,
    /// Precedent has been overruled and cuts against reliance
    Overruling,
    /// Precedent belongs to a consistently followed line of authority
    Following,
    /// Precedent is worth considering
    Considering,
}

impl LinkType {
    /// Get the link type as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkType::SimilarFacts => "similar_facts",
            LinkType::SameParties => "same_parties",
            LinkType::RelatedLegalIssues => "related_legal_issues",
            LinkType::TemporalSequence => "temporal_sequence",
            LinkType::DirectlyApplicable => "directly_applicable",
            LinkType::Analogous => "analogous",
            LinkType::Distinguishable => "distinguishable",
            LinkType::Overruling => "overruling",
            LinkType::Following => "following",
            LinkType::Considering => "considering",
        }
    }

    /// Whether this type links a case to a precedent
    pub fn is_precedent_link(&self) -> bool {
        !matches!(
            self,
            LinkType::SimilarFacts
                | LinkType::SameParties
                | LinkType::RelatedLegalIssues
                | LinkType::TemporalSequence
        )
    }
}

impl fmt::Display for LinkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-dimension similarity scores, each in [0.0, 1.0]
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionScores {
    /// Fact-pattern overlap
    pub facts: f64,
    /// Legal-principle overlap
    pub legal_principles: f64,
    /// Party overlap
    pub parties: f64,
    /// Jurisdictional relevance
    pub jurisdiction: f64,
    /// Temporal relevance (floored decay)
    pub temporal: f64,
    /// Practice-area match
    pub procedural: f64,
}

impl DimensionScores {
    /// All dimensions zero
    pub fn zero() -> Self {
        Self::default()
    }
}

/// Five-point scale of how a precedent bears on the client's position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Supportiveness {
    /// Closely aligned and decided the client's way
    StronglySupportive,
    /// Aligned and decided the client's way
    Supportive,
    /// No clear bearing
    Neutral,
    /// Aligned and decided against the client
    Unfavorable,
    /// Closely aligned and decided against the client
    StronglyUnfavorable,
}

impl Supportiveness {
    /// Supportive or strongly supportive
    pub fn is_favorable(&self) -> bool {
        matches!(
            self,
            Supportiveness::StronglySupportive | Supportiveness::Supportive
        )
    }

    /// Unfavorable or strongly unfavorable
    pub fn is_unfavorable(&self) -> bool {
        matches!(
            self,
            Supportiveness::StronglyUnfavorable | Supportiveness::Unfavorable
        )
    }

    /// Get the supportiveness as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Supportiveness::StronglySupportive => "strongly_supportive",
            Supportiveness::Supportive => "supportive",
            Supportiveness::Neutral => "neutral",
            Supportiveness::Unfavorable => "unfavorable",
            Supportiveness::StronglyUnfavorable => "strongly_unfavorable",
        }
    }
}

/// How directly a precedent's reasoning transfers to the case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Applicability {
    /// Facts and principles both align closely
    Direct,
    /// Transfers by analogy
    Analogous,
    /// Transfers in part
    Limited,
    /// Can be distinguished
    Distinguishable,
}

impl Applicability {
    /// Get the applicability as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Applicability::Direct => "direct",
            Applicability::Analogous => "analogous",
            Applicability::Limited => "limited",
            Applicability::Distinguishable => "distinguishable",
        }
    }
}

/// Strategic classification of a precedent edge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategicValue {
    /// Bearing on the client's position
    pub supportiveness: Supportiveness,
    /// Transferability of the reasoning
    pub applicability: Applicability,
    /// Ordered recommendations for how to use the precedent
    pub tactical_use: Vec<String>,
}

/// A directional, typed link from the case under analysis to another entity
///
/// Edges are immutable once built. Recomputing an analysis replaces the whole
/// edge set rather than editing individual edges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionEdge {
    /// Deterministic identifier: `{source}->{target}:{link_type}`
    pub id: String,

    /// The case under analysis
    pub source_id: EntityId,

    /// The linked case or precedent
    pub target_id: EntityId,

    /// Connection type
    pub link_type: LinkType,

    /// Overall similarity [0.0, 1.0]
    pub strength: f64,

    /// Reliability of the strength estimate [0.6, 0.9]
    pub confidence: f64,

    /// Per-dimension breakdown
    pub analysis: DimensionScores,

    /// Strategic classification (precedent edges only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategic_value: Option<StrategicValue>,

    /// Templated summary
    pub description: String,
}

impl ConnectionEdge {
    /// Create an edge, deriving its identifier and confidence from the inputs
    ///
    /// Strength is clamped to [0.0, 1.0].
    pub fn new(
        source_id: EntityId,
        target_id: EntityId,
        link_type: LinkType,
        strength: f64,
        analysis: DimensionScores,
    ) -> Self {
        let strength = strength.clamp(0.0, 1.0);
        Self {
            id: Self::edge_id(&source_id, &target_id, link_type),
            source_id,
            target_id,
            link_type,
            strength,
            confidence: Self::confidence_for(strength),
            analysis,
            strategic_value: None,
            description: String::new(),
        }
    }

    /// Attach a strategic classification
    pub fn with_strategic_value(mut self, value: StrategicValue) -> Self {
        self.strategic_value = Some(value);
        self
    }

    /// Attach a description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Heuristic reliability of a strength value
    ///
    /// `0.6 + 0.3 * strength`, so confidence never drops below 0.6, never
    /// exceeds 0.9 and never decreases as strength grows.
    ///
    /// # Examples
    ///
    /// ```
    /// use lexlink_domain::ConnectionEdge;
    ///
    /// assert_eq!(ConnectionEdge::confidence_for(0.0), 0.6);
    /// assert!((ConnectionEdge::confidence_for(1.0) - 0.9).abs() < 1e-12);
    /// ```
    pub fn confidence_for(strength: f64) -> f64 {
        MIN_CONFIDENCE + CONFIDENCE_SPAN * strength.clamp(0.0, 1.0)
    }

    /// Build the deterministic edge identifier
    pub fn edge_id(source: &EntityId, target: &EntityId, link_type: LinkType) -> String {
        format!("{}->{}:{}", source, target, link_type)
    }

    /// Supportiveness, for precedent edges only
    pub fn supportiveness(&self) -> Option<Supportiveness> {
        self.strategic_value.as_ref().map(|v| v.supportiveness)
    }
}
