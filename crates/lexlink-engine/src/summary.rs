//! Counters describing one analysis run

use serde::{Deserialize, Serialize};

/// Counts gathered while running an analysis
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSummary {
    /// Case records considered as candidates
    pub candidates: usize,

    /// Precedents considered from the corpus
    pub precedents: usize,

    /// Records dropped as duplicates or as copies of the target
    pub skipped_duplicates: usize,

    /// Records with no facts, principles or parties
    pub degenerate: usize,

    /// Edges built
    pub edges: usize,

    /// Clusters built
    pub clusters: usize,

    /// Insights returned after ranking
    pub insights: usize,
}

impl AnalysisSummary {
    /// Total records in the pool
    pub fn considered(&self) -> usize {
        self.candidates + self.precedents
    }

    /// One-line report for logs
    pub fn line(&self) -> String {
        format!(
            "{} considered ({} cases, {} precedents), {} edges, {} clusters, {} insights",
            self.considered(),
            self.candidates,
            self.precedents,
            self.edges,
            self.clusters,
            self.insights
        )
    }

    /// Multi-line report
    pub fn summary(&self) -> String {
        let mut lines = vec![
            "Analysis Summary".to_string(),
            "================".to_string(),
            format!("Candidates: {}", self.candidates),
            format!("Precedents: {}", self.precedents),
        ];
        if self.skipped_duplicates > 0 {
            lines.push(format!("Skipped duplicates: {}", self.skipped_duplicates));
        }
        if self.degenerate > 0 {
            lines.push(format!("Excluded (no content): {}", self.degenerate));
        }
        lines.push(format!("Edges: {}", self.edges));
        lines.push(format!("Clusters: {}", self.clusters));
        lines.push(format!("Insights: {}", self.insights));
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_summary() {
        let summary = AnalysisSummary::default();
        assert_eq!(summary.considered(), 0);
        assert!(!summary.summary().contains("Skipped"));
    }

    #[test]
    fn test_summary_mentions_exclusions() {
        let summary = AnalysisSummary {
            candidates: 3,
            precedents: 2,
            degenerate: 1,
            ..AnalysisSummary::default()
        };
        assert_eq!(summary.considered(), 5);
        assert!(summary.summary().contains("Excluded (no content): 1"));
        assert!(summary.line().starts_with("5 considered"));
    }
}
