//! The connection engine: one synchronous call from records to results

use crate::cluster::{build_clusters, Member, PairGraph};
use crate::error::{EngineError, RecordList};
use crate::features::{extract, FeatureSet};
use crate::insight::{generate, InsightContext};
use crate::linker::{build_edges, ScoredCandidate};
use crate::scorer::{score_pair, PairScore, CASE_WEIGHTS, PRECEDENT_WEIGHTS};
use crate::summary::AnalysisSummary;
use crate::EngineConfig;
use chrono::NaiveDate;
use lexlink_domain::traits::CaseRepository;
use lexlink_domain::{
    Cluster, ConnectionEdge, Entity, EntityId, Insight, RawRecord, RecordKind,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Input to a single analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    /// The case under analysis
    pub target: RawRecord,

    /// Other case records
    #[serde(default)]
    pub candidates: Vec<RawRecord>,

    /// Precedent records; every entry is treated as a precedent
    #[serde(default)]
    pub precedent_corpus: Vec<RawRecord>,

    /// Reference date for recency rules
    pub as_of: NaiveDate,
}

impl AnalysisRequest {
    /// Request with no candidates or precedents
    pub fn new(target: RawRecord, as_of: NaiveDate) -> Self {
        Self {
            target,
            candidates: Vec::new(),
            precedent_corpus: Vec::new(),
            as_of,
        }
    }

    /// Set the candidate cases
    pub fn with_candidates(mut self, candidates: Vec<RawRecord>) -> Self {
        self.candidates = candidates;
        self
    }

    /// Set the precedent corpus
    pub fn with_precedents(mut self, precedents: Vec<RawRecord>) -> Self {
        self.precedent_corpus = precedents;
        self
    }
}

/// Output of a single analysis
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Edges from the target, strongest first
    pub edges: Vec<ConnectionEdge>,

    /// Clusters over the whole entity set
    pub clusters: Vec<Cluster>,

    /// Ranked insights
    pub insights: Vec<Insight>,

    /// Run counters
    pub summary: AnalysisSummary,
}

/// Relevance and connection engine
///
/// Holds only immutable configuration, so one engine can serve concurrent
/// analyses from several threads.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use lexlink_domain::RawRecord;
/// use lexlink_engine::{AnalysisRequest, ConnectionEngine};
///
/// let mut target = RawRecord::case("case-1");
/// target.facts = vec!["late delivery".to_string()];
/// let mut other = RawRecord::case("case-2");
/// other.facts = vec!["late delivery of goods".to_string()];
///
/// let engine = ConnectionEngine::default_config();
/// let as_of = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let request = AnalysisRequest::new(target, as_of).with_candidates(vec![other]);
/// let result = engine.analyze(&request).unwrap();
/// assert!(!result.edges.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConnectionEngine {
    config: EngineConfig,
}

impl ConnectionEngine {
    /// Create an engine, rejecting an invalid configuration
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate().map_err(EngineError::Config)?;
        Ok(Self { config })
    }

    /// Create an engine with default configuration
    pub fn default_config() -> Self {
        Self::default()
    }

    /// The active configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run the full pipeline for one target
    ///
    /// Fails only when a record has no usable identifier. Records that
    /// repeat an earlier id, including the target's, are skipped.
    pub fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, EngineError> {
        let target = validate(&request.target, RecordList::Target, 0)?;

        let mut summary = AnalysisSummary::default();
        let mut seen: HashSet<EntityId> = HashSet::new();
        seen.insert(target.id.clone());
        let mut pool: Vec<Entity> = Vec::new();

        for (position, raw) in request.candidates.iter().enumerate() {
            let entity = validate(raw, RecordList::Candidates, position)?;
            if admit(entity, &mut seen, &mut pool) {
                summary.candidates += 1;
            } else {
                summary.skipped_duplicates += 1;
            }
        }

        for (position, raw) in request.precedent_corpus.iter().enumerate() {
            let entity = validate_precedent(raw, position)?;
            if admit(entity, &mut seen, &mut pool) {
                summary.precedents += 1;
            } else {
                summary.skipped_duplicates += 1;
            }
        }

        if pool.is_empty() {
            info!("Nothing to compare against target {}", target.id);
            return Ok(AnalysisResult {
                summary,
                ..AnalysisResult::default()
            });
        }

        let target_features = extract(&target);
        let pool_features: Vec<FeatureSet> = pool.iter().map(extract).collect();
        summary.degenerate = pool_features.iter().filter(|f| f.is_degenerate()).count();
        if target_features.is_degenerate() {
            debug!("Target {} has no content to compare", target.id);
        }
        if summary.degenerate > 0 {
            debug!("Excluding {} records with no content", summary.degenerate);
        }

        let scored: Vec<ScoredCandidate<'_>> = pool
            .iter()
            .zip(&pool_features)
            .map(|(entity, features)| {
                let weights = if entity.is_precedent() {
                    &PRECEDENT_WEIGHTS
                } else {
                    &CASE_WEIGHTS
                };
                ScoredCandidate {
                    entity,
                    score: score_pair(&target_features, features, weights),
                }
            })
            .collect();
        debug!("Scored {} candidates against {}", scored.len(), target.id);

        let edges = build_edges(&target, &scored);
        debug!("Built {} edges", edges.len());

        let members: Vec<Member<'_>> = std::iter::once(Member {
            entity: &target,
            features: &target_features,
        })
        .chain(
            pool.iter()
                .zip(&pool_features)
                .map(|(entity, features)| Member { entity, features }),
        )
        .collect();
        let pairs = PairGraph::build(&target.id, &members, &edges);
        let clusters = build_clusters(&members, &pairs, &edges, &self.config);

        let comparable: Vec<Entity> = pool
            .iter()
            .zip(&pool_features)
            .filter(|(_, features)| !features.is_degenerate())
            .map(|(entity, _)| entity.clone())
            .collect();
        let context = InsightContext {
            target: &target,
            pool: &comparable,
            edges: &edges,
            clusters: &clusters,
            as_of: request.as_of,
        };
        let insights = generate(&context, &self.config);

        summary.edges = edges.len();
        summary.clusters = clusters.len();
        summary.insights = insights.len();
        info!("Analysis of {}: {}", target.id, summary.line());

        Ok(AnalysisResult {
            edges,
            clusters,
            insights,
            summary,
        })
    }

    /// Analyze a target held in a repository against everything else in it
    ///
    /// Case records become candidates and precedent records form the corpus.
    pub fn analyze_from_repository<R>(
        &self,
        repository: &R,
        target_id: &str,
        as_of: NaiveDate,
    ) -> Result<AnalysisResult, EngineError>
    where
        R: CaseRepository,
        R::Error: std::fmt::Display,
    {
        let target = repository
            .get(target_id)
            .map_err(|e| EngineError::Repository(e.to_string()))?
            .ok_or_else(|| EngineError::TargetNotFound(target_id.to_string()))?;
        let records = repository
            .list()
            .map_err(|e| EngineError::Repository(e.to_string()))?;

        // Positions refer to the repository listing, not the split lists
        for (position, raw) in records.iter().enumerate() {
            validate(raw, RecordList::Repository, position)?;
        }

        let (precedents, candidates): (Vec<RawRecord>, Vec<RawRecord>) = records
            .into_iter()
            .filter(|r| r.id.as_deref().map(str::trim) != Some(target_id.trim()))
            .partition(|r| r.kind == RecordKind::Precedent);

        debug!(
            "Repository split: {} candidates, {} precedents",
            candidates.len(),
            precedents.len()
        );

        let request = AnalysisRequest {
            target,
            candidates,
            precedent_corpus: precedents,
            as_of,
        };
        self.analyze(&request)
    }

    /// Score one pair of records without building edges
    ///
    /// Uses the precedent weight table when either record is a precedent.
    pub fn score_pair(&self, a: &RawRecord, b: &RawRecord) -> Result<PairScore, EngineError> {
        let a = validate(a, RecordList::Target, 0)?;
        let b = validate(b, RecordList::Candidates, 0)?;
        let weights = if a.is_precedent() || b.is_precedent() {
            &PRECEDENT_WEIGHTS
        } else {
            &CASE_WEIGHTS
        };
        Ok(score_pair(&extract(&a), &extract(&b), weights))
    }
}

fn validate(raw: &RawRecord, list: RecordList, position: usize) -> Result<Entity, EngineError> {
    Entity::try_from_raw(raw).map_err(|reason| EngineError::InvalidRecord {
        list,
        position,
        excerpt: raw.excerpt(),
        reason,
    })
}

fn validate_precedent(raw: &RawRecord, position: usize) -> Result<Entity, EngineError> {
    if raw.kind == RecordKind::Precedent {
        return validate(raw, RecordList::PrecedentCorpus, position);
    }
    let mut raw = raw.clone();
    raw.kind = RecordKind::Precedent;
    validate(&raw, RecordList::PrecedentCorpus, position)
}

/// Add an entity to the pool unless its id has been seen
fn admit(entity: Entity, seen: &mut HashSet<EntityId>, pool: &mut Vec<Entity>) -> bool {
    if seen.insert(entity.id.clone()) {
        pool.push(entity);
        true
    } else {
        warn!("Skipping duplicate record {}", entity.id);
        false
    }
}
