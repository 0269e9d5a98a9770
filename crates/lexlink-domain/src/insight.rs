//! Insight module - ranked observations derived from edges and clusters

use serde::{Deserialize, Serialize};

/// Category of an insight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightType {
    /// General strategic observation
    Strategic,
    /// Pattern in the evidence
    Evidential,
    /// Procedural observation
    Procedural,
    /// Recency pattern
    TrendAnalysis,
    /// Weak support
    GapIdentification,
    /// Strong supportive authority available
    StrategicOpportunity,
    /// Adverse authority present
    RiskWarning,
}

impl InsightType {
    /// Get the insight type as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightType::Strategic => "strategic",
            InsightType::Evidential => "evidential",
            InsightType::Procedural => "procedural",
            InsightType::TrendAnalysis => "trend_analysis",
            InsightType::GapIdentification => "gap_identification",
            InsightType::StrategicOpportunity => "strategic_opportunity",
            InsightType::RiskWarning => "risk_warning",
        }
    }
}

/// Priority of an insight, ordered low to critical
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Background information
    Low,
    /// Worth reviewing
    Medium,
    /// Act on soon
    High,
    /// Act on now
    Critical,
}

impl Priority {
    /// Get the priority as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Critical => "critical",
        }
    }
}

/// A templated observation tied to the edges and clusters that justify it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insight {
    /// Deterministic identifier
    pub id: String,

    /// Category
    #[serde(rename = "type")]
    pub insight_type: InsightType,

    /// Short title
    pub title: String,

    /// Templated description
    pub description: String,

    /// Edges that justify the insight
    pub related_edge_ids: Vec<String>,

    /// Clusters that justify the insight
    pub related_cluster_ids: Vec<String>,

    /// Heuristic reliability [0.0, 1.0]
    pub confidence: f64,

    /// Ranking priority
    pub priority: Priority,

    /// Whether the recommendations call for action
    pub actionable: bool,

    /// Ordered recommendations
    pub recommendations: Vec<String>,
}
