//! Insight generation
//!
//! Independent rules over the finished edge and cluster sets. Each rule
//! emits at most one insight. The output is ranked by priority and
//! confidence, then capped at the configured maximum.

use crate::config::EngineConfig;
use chrono::{Months, NaiveDate};
use lexlink_domain::{
    BindingAuthority, Cluster, ClusterStatus, ConnectionEdge, Entity, Insight, InsightType,
    LinkType, Priority,
};
use std::collections::HashMap;
use tracing::debug;

/// Edge strength above which a favorable edge is an opportunity
pub const OPPORTUNITY_ABOVE: f64 = 0.7;

/// Fact overlap above which an edge carries evidential weight
pub const EVIDENTIAL_FACTS_ABOVE: f64 = 0.6;

/// When every edge is below this, coverage has a gap
pub const GAP_BELOW: f64 = 0.4;

/// Precedent edge strength above which an adverse edge is a risk
pub const RISK_ABOVE: f64 = 0.5;

/// Everything the insight rules look at
#[derive(Debug, Clone, Copy)]
pub struct InsightContext<'a> {
    /// The case under analysis
    pub target: &'a Entity,
    /// Candidates and corpus precedents with comparable content
    pub pool: &'a [Entity],
    /// The target's edges, sorted
    pub edges: &'a [ConnectionEdge],
    /// Clusters, sorted
    pub clusters: &'a [Cluster],
    /// Reference date for recency
    pub as_of: NaiveDate,
}

/// Run every rule, then rank and cap
pub fn generate(ctx: &InsightContext<'_>, config: &EngineConfig) -> Vec<Insight> {
    let rules: [fn(&InsightContext<'_>, &EngineConfig) -> Option<Insight>; 6] = [
        strategic_opportunity,
        evidential,
        gap_identification,
        trend_analysis,
        risk_warning,
        established_authority,
    ];

    let mut insights: Vec<Insight> = rules.iter().filter_map(|rule| rule(ctx, config)).collect();
    let fired = insights.len();

    // Stable sort keeps rule order for equal keys
    insights.sort_by(|a, b| {
        b.priority
            .cmp(&a.priority)
            .then_with(|| b.confidence.total_cmp(&a.confidence))
    });
    insights.truncate(config.max_insights);

    debug!(
        "Generated {} insights ({} rules fired)",
        insights.len(),
        fired
    );
    insights
}

fn insight_id(insight_type: InsightType, ctx: &InsightContext<'_>) -> String {
    format!("{}:{}", insight_type.as_str(), ctx.target.id)
}

fn edge_ids<'a>(edges: impl IntoIterator<Item = &'a ConnectionEdge>) -> Vec<String> {
    edges.into_iter().map(|e| e.id.clone()).collect()
}

fn strategic_opportunity(ctx: &InsightContext<'_>, _: &EngineConfig) -> Option<Insight> {
    let strong: Vec<&ConnectionEdge> = ctx
        .edges
        .iter()
        .filter(|e| e.strength > OPPORTUNITY_ABOVE)
        .filter(|e| e.supportiveness().is_some_and(|s| s.is_favorable()))
        .collect();
    let top = strong.first()?;

    let recommendations = top
        .strategic_value
        .as_ref()
        .map(|v| v.tactical_use.clone())
        .unwrap_or_default();

    Some(Insight {
        id: insight_id(InsightType::StrategicOpportunity, ctx),
        insight_type: InsightType::StrategicOpportunity,
        title: "Strong supporting authority".to_string(),
        description: format!(
            "{} closely aligned precedent(s) support the client's position; strongest is {} ({:.2})",
            strong.len(),
            top.target_id,
            top.strength
        ),
        related_edge_ids: edge_ids(strong.iter().copied()),
        related_cluster_ids: Vec::new(),
        confidence: 0.9,
        priority: Priority::High,
        actionable: true,
        recommendations,
    })
}

fn evidential(ctx: &InsightContext<'_>, _: &EngineConfig) -> Option<Insight> {
    let factual: Vec<&ConnectionEdge> = ctx
        .edges
        .iter()
        .filter(|e| e.analysis.facts > EVIDENTIAL_FACTS_ABOVE)
        .collect();
    if factual.is_empty() {
        return None;
    }

    let mut targets: Vec<&str> = factual.iter().map(|e| e.target_id.as_str()).collect();
    targets.sort_unstable();
    targets.dedup();
    let confidence = factual.iter().map(|e| e.confidence).sum::<f64>() / factual.len() as f64;

    Some(Insight {
        id: insight_id(InsightType::Evidential, ctx),
        insight_type: InsightType::Evidential,
        title: "Closely matching fact patterns".to_string(),
        description: format!(
            "Facts closely match {} record(s): {}",
            targets.len(),
            targets.join(", ")
        ),
        related_edge_ids: edge_ids(factual),
        related_cluster_ids: Vec::new(),
        confidence,
        priority: Priority::Medium,
        actionable: true,
        recommendations: vec![
            "compare evidence presented in the matching records".to_string(),
            "reuse expert and witness approaches that succeeded".to_string(),
        ],
    })
}

fn gap_identification(ctx: &InsightContext<'_>, _: &EngineConfig) -> Option<Insight> {
    if ctx.pool.is_empty() || ctx.edges.iter().any(|e| e.strength >= GAP_BELOW) {
        return None;
    }

    Some(Insight {
        id: insight_id(InsightType::GapIdentification, ctx),
        insight_type: InsightType::GapIdentification,
        title: "No strong authority found".to_string(),
        description: format!(
            "None of the {} record(s) considered connects strongly to {}",
            ctx.pool.len(),
            ctx.target.title
        ),
        related_edge_ids: edge_ids(ctx.edges),
        related_cluster_ids: Vec::new(),
        confidence: 0.8,
        priority: Priority::High,
        actionable: true,
        recommendations: vec![
            "widen research to other jurisdictions".to_string(),
            "consider first-principles arguments".to_string(),
        ],
    })
}

fn trend_analysis(ctx: &InsightContext<'_>, config: &EngineConfig) -> Option<Insight> {
    let window_start = ctx
        .as_of
        .checked_sub_months(Months::new(config.recent_window_years.saturating_mul(12)))
        .unwrap_or(NaiveDate::MIN);

    let dated: Vec<(&Entity, NaiveDate)> = ctx
        .pool
        .iter()
        .filter_map(|e| e.date.map(|d| (e, d)))
        .collect();
    let recent: Vec<&Entity> = dated
        .iter()
        .filter(|(_, d)| *d >= window_start && *d <= ctx.as_of)
        .map(|(e, _)| *e)
        .collect();
    if recent.is_empty() {
        return None;
    }

    let priority = if recent.len() * 2 >= dated.len() {
        Priority::Medium
    } else {
        Priority::Low
    };
    let related_edge_ids = edge_ids(
        ctx.edges
            .iter()
            .filter(|e| recent.iter().any(|r| r.id == e.target_id)),
    );

    Some(Insight {
        id: insight_id(InsightType::TrendAnalysis, ctx),
        insight_type: InsightType::TrendAnalysis,
        title: "Recent activity in this area".to_string(),
        description: format!(
            "{} of {} dated record(s) fall within {} year(s) before {}",
            recent.len(),
            dated.len(),
            config.recent_window_years,
            ctx.as_of
        ),
        related_edge_ids,
        related_cluster_ids: Vec::new(),
        confidence: 0.7,
        priority,
        actionable: false,
        recommendations: vec!["review recent decisions for shifts in approach".to_string()],
    })
}

fn risk_warning(ctx: &InsightContext<'_>, _: &EngineConfig) -> Option<Insight> {
    let adverse: Vec<&ConnectionEdge> = ctx
        .edges
        .iter()
        .filter(|e| e.link_type.is_precedent_link() && e.strength > RISK_ABOVE)
        .filter(|e| {
            e.link_type == LinkType::Overruling
                || e.supportiveness().is_some_and(|s| s.is_unfavorable())
        })
        .collect();
    if adverse.is_empty() {
        return None;
    }

    let authority: HashMap<&str, Option<BindingAuthority>> = ctx
        .pool
        .iter()
        .map(|e| (e.id.as_str(), e.binding_authority()))
        .collect();
    let binding = adverse.iter().any(|e| {
        authority
            .get(e.target_id.as_str())
            .copied()
            .flatten()
            == Some(BindingAuthority::Binding)
    });
    let confidence = adverse
        .iter()
        .map(|e| e.confidence)
        .fold(0.0_f64, f64::max);

    let mut recommendations = vec![
        "prepare grounds to distinguish adverse authority".to_string(),
        "assess litigation risk with the client".to_string(),
    ];
    if binding {
        recommendations.insert(0, "address binding adverse authority directly".to_string());
    }

    Some(Insight {
        id: insight_id(InsightType::RiskWarning, ctx),
        insight_type: InsightType::RiskWarning,
        title: "Adverse authority".to_string(),
        description: format!(
            "{} precedent(s) cut against the client's position{}",
            adverse.len(),
            if binding { ", including binding authority" } else { "" }
        ),
        related_edge_ids: edge_ids(adverse),
        related_cluster_ids: Vec::new(),
        confidence,
        priority: if binding {
            Priority::Critical
        } else {
            Priority::High
        },
        actionable: true,
        recommendations,
    })
}

fn established_authority(ctx: &InsightContext<'_>, _: &EngineConfig) -> Option<Insight> {
    let established: Vec<&Cluster> = ctx
        .clusters
        .iter()
        .filter(|c| c.status == ClusterStatus::Established)
        .collect();
    if established.is_empty() {
        return None;
    }

    let mean = established.iter().map(|c| c.strength).sum::<f64>() / established.len() as f64;
    let themes: Vec<&str> = established.iter().map(|c| c.theme.as_str()).collect();
    let into_clusters = ctx
        .edges
        .iter()
        .filter(|e| established.iter().any(|c| c.contains(&e.target_id)));

    Some(Insight {
        id: insight_id(InsightType::Strategic, ctx),
        insight_type: InsightType::Strategic,
        title: "Established line of authority".to_string(),
        description: format!("Settled authority exists on: {}", themes.join("; ")),
        related_edge_ids: edge_ids(into_clusters),
        related_cluster_ids: established.iter().map(|c| c.id.clone()).collect(),
        confidence: ConnectionEdge::confidence_for(mean),
        priority: Priority::Medium,
        actionable: true,
        recommendations: vec!["anchor the argument in the established line".to_string()],
    })
}
