//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use lexlink_domain::{Cluster, ConnectionEdge, Insight, Priority};
use lexlink_engine::{AnalysisResult, PairScore};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a full analysis result.
    pub fn format_analysis(&self, result: &AnalysisResult) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
            OutputFormat::Table => Ok(self.format_analysis_table(result)),
            OutputFormat::Quiet => Ok(result
                .edges
                .iter()
                .map(|e| e.id.as_str())
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    fn format_analysis_table(&self, result: &AnalysisResult) -> String {
        let sections = [
            self.heading("Connections"),
            self.format_edges_table(&result.edges),
            self.heading("Clusters"),
            self.format_clusters_table(&result.clusters),
            self.heading("Insights"),
            self.format_insights_table(&result.insights),
            self.info(&result.summary.line()),
        ];
        sections.join("\n")
    }

    fn format_edges_table(&self, edges: &[ConnectionEdge]) -> String {
        if edges.is_empty() {
            return self.colorize("No connections found.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["Target", "Type", "Strength", "Confidence", "Bearing", "Description"]);
        for edge in edges {
            let bearing = edge
                .supportiveness()
                .map(|s| s.as_str().replace('_', " "))
                .unwrap_or_else(|| "-".to_string());
            builder.push_record([
                edge.target_id.to_string(),
                edge.link_type.as_str().replace('_', " "),
                format!("{:.2}", edge.strength),
                format!("{:.2}", edge.confidence),
                bearing,
                edge.description.clone(),
            ]);
        }
        self.render(builder)
    }

    fn format_clusters_table(&self, clusters: &[Cluster]) -> String {
        if clusters.is_empty() {
            return self.colorize("No clusters found.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["Theme", "Kind", "Members", "Strength", "Status"]);
        for cluster in clusters {
            let members: Vec<&str> = cluster.member_ids.iter().map(|m| m.as_str()).collect();
            builder.push_record([
                cluster.theme.clone(),
                cluster.kind.as_str().to_string(),
                members.join(", "),
                format!("{:.2}", cluster.strength),
                cluster.status.as_str().to_string(),
            ]);
        }
        self.render(builder)
    }

    fn format_insights_table(&self, insights: &[Insight]) -> String {
        if insights.is_empty() {
            return self.colorize("No insights.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["Priority", "Type", "Insight", "Confidence", "Recommendations"]);
        for insight in insights {
            builder.push_record([
                self.priority(insight.priority),
                insight.insight_type.as_str().replace('_', " "),
                format!("{}\n{}", insight.title, insight.description),
                format!("{:.2}", insight.confidence),
                insight.recommendations.join("\n"),
            ]);
        }
        self.render(builder)
    }

    /// Format the scores of a single pair.
    pub fn format_pair(&self, first: &str, second: &str, score: &PairScore) -> Result<String> {
        let d = &score.dimensions;
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
                "first": first,
                "second": second,
                "analysis": d,
                "proximity": score.proximity,
                "overall": score.overall,
                "confidence": ConnectionEdge::confidence_for(score.overall),
            }))?),
            OutputFormat::Quiet => Ok(format!("{:.4}", score.overall)),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Dimension", "Score"]);
                for (name, value) in [
                    ("facts", d.facts),
                    ("legal principles", d.legal_principles),
                    ("parties", d.parties),
                    ("jurisdiction", d.jurisdiction),
                    ("temporal", d.temporal),
                    ("procedural", d.procedural),
                    ("proximity", score.proximity),
                    ("overall", score.overall),
                ] {
                    builder.push_record([name.to_string(), format!("{:.4}", value)]);
                }
                Ok(format!(
                    "{}\n{}",
                    self.heading(&format!("{} vs {}", first, second)),
                    self.render(builder)
                ))
            }
        }
    }

    fn render(&self, builder: Builder) -> String {
        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    fn heading(&self, text: &str) -> String {
        if self.color_enabled {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn priority(&self, priority: Priority) -> String {
        let label = priority.as_str();
        match priority {
            Priority::Critical => self.colorize(label, "red"),
            Priority::High => self.colorize(label, "magenta"),
            Priority::Medium => self.colorize(label, "yellow"),
            Priority::Low => label.to_string(),
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "magenta" => text.magenta().to_string(),
            _ => text.to_string(),
        }
    }
}
