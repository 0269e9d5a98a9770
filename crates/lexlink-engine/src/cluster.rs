//! Cluster engine
//!
//! Two deterministic strategies, both run on every analysis:
//!
//! - **Principle-based**: every distinct legal principle shared by two or
//!   more entities forms a cluster.
//! - **Category-based**: within a practice area, entities joined by pair
//!   strengths above 0.6 form connected components; each component with two
//!   or more members is a cluster.
//!
//! Pairs involving the target take the strength of the target's edge to the
//! other entity, so clusters agree with the edges reported alongside them.
//! Every other unordered pair is scored in both directions and keeps the
//! larger overall, which lets clusters group entities the target never linked
//! to.

use crate::config::EngineConfig;
use crate::features::FeatureSet;
use crate::scorer::{score_pair, CASE_WEIGHTS, PRECEDENT_WEIGHTS};
use lexlink_domain::{
    Cluster, ClusterKind, ClusterStatus, ConnectionEdge, Entity, EntityId, LinkType, PracticeArea,
};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::debug;

/// Pair strength a category cluster edge must exceed
pub const CATEGORY_EDGE_ABOVE: f64 = 0.6;

/// An entity taking part in clustering, with its features
#[derive(Debug, Clone, Copy)]
pub struct Member<'a> {
    /// The entity
    pub entity: &'a Entity,
    /// Its extracted features
    pub features: &'a FeatureSet,
}

/// Strength of every unordered entity pair with a non-zero connection
#[derive(Debug, Clone, Default)]
pub struct PairGraph {
    strengths: BTreeMap<(EntityId, EntityId), f64>,
}

impl PairGraph {
    /// Connect all pairs of members
    ///
    /// A pair containing `target` is connected only through the target's
    /// `edges`, at the edge strength. Other pairs use the precedent weight
    /// table when either side is a precedent and take the stronger of the
    /// two scoring directions.
    pub fn build(target: &EntityId, members: &[Member<'_>], edges: &[ConnectionEdge]) -> Self {
        let mut strengths = BTreeMap::new();

        for edge in edges.iter().filter(|e| &e.source_id == target) {
            if edge.target_id == *target || edge.strength <= 0.0 {
                continue;
            }
            let slot = strengths
                .entry(Self::key(target, &edge.target_id))
                .or_insert(0.0_f64);
            *slot = slot.max(edge.strength);
        }

        for (i, first) in members.iter().enumerate() {
            for second in &members[i + 1..] {
                let (a, b) = (&first.entity.id, &second.entity.id);
                if a == b || a == target || b == target {
                    continue;
                }
                let weights = if first.entity.is_precedent() || second.entity.is_precedent() {
                    &PRECEDENT_WEIGHTS
                } else {
                    &CASE_WEIGHTS
                };
                let forward = score_pair(first.features, second.features, weights).overall;
                let backward = score_pair(second.features, first.features, weights).overall;
                let strength = forward.max(backward);
                if strength > 0.0 {
                    strengths.insert(Self::key(a, b), strength);
                }
            }
        }
        Self { strengths }
    }

    /// Strength between two entities (0.0 when unscored)
    pub fn strength(&self, a: &EntityId, b: &EntityId) -> f64 {
        self.strengths
            .get(&Self::key(a, b))
            .copied()
            .unwrap_or(0.0)
    }

    /// Whether no pair scored above zero
    pub fn is_empty(&self) -> bool {
        self.strengths.is_empty()
    }

    fn key(a: &EntityId, b: &EntityId) -> (EntityId, EntityId) {
        if a <= b {
            (a.clone(), b.clone())
        } else {
            (b.clone(), a.clone())
        }
    }
}

/// Run the enabled clustering strategies
///
/// `edges` are the target's edges; they only decide whether a cluster is
/// disputed. Output is sorted by kind, strength descending, then id.
pub fn build_clusters(
    members: &[Member<'_>],
    pairs: &PairGraph,
    edges: &[ConnectionEdge],
    config: &EngineConfig,
) -> Vec<Cluster> {
    let members: Vec<Member<'_>> = members
        .iter()
        .copied()
        .filter(|m| !m.features.is_degenerate())
        .collect();

    let mut clusters = Vec::new();
    if config.principle_clusters {
        clusters.extend(principle_clusters(&members, pairs, edges));
    }
    if config.category_clusters {
        clusters.extend(category_clusters(&members, pairs, edges));
    }

    clusters.sort_by(|a, b| {
        a.kind
            .cmp(&b.kind)
            .then_with(|| b.strength.total_cmp(&a.strength))
            .then_with(|| a.id.cmp(&b.id))
    });

    debug!("Built {} clusters from {} members", clusters.len(), members.len());
    clusters
}

fn principle_clusters(
    members: &[Member<'_>],
    pairs: &PairGraph,
    edges: &[ConnectionEdge],
) -> Vec<Cluster> {
    let mut groups: BTreeMap<&str, BTreeSet<&EntityId>> = BTreeMap::new();
    for member in members {
        for principle in &member.features.legal_principles {
            groups
                .entry(principle.as_str())
                .or_default()
                .insert(&member.entity.id);
        }
    }

    groups
        .into_iter()
        .filter(|(_, ids)| ids.len() >= 2)
        .map(|(principle, ids)| {
            let member_ids: Vec<EntityId> = ids.into_iter().cloned().collect();
            let mut strengths = Vec::new();
            for (i, a) in member_ids.iter().enumerate() {
                for b in &member_ids[i + 1..] {
                    let s = pairs.strength(a, b);
                    if s > 0.0 {
                        strengths.push(s);
                    }
                }
            }
            assemble(
                format!("principle:{}", principle),
                ClusterKind::Principle,
                principle.to_string(),
                principle.to_string(),
                member_ids,
                mean(&strengths),
                members,
                edges,
            )
        })
        .collect()
}

fn category_clusters(
    members: &[Member<'_>],
    pairs: &PairGraph,
    edges: &[ConnectionEdge],
) -> Vec<Cluster> {
    let mut by_area: BTreeMap<PracticeArea, Vec<&EntityId>> = BTreeMap::new();
    for member in members {
        if let Some(area) = member.entity.practice_area {
            by_area.entry(area).or_default().push(&member.entity.id);
        }
    }

    let mut clusters = Vec::new();
    for (area, mut ids) in by_area {
        ids.sort();
        ids.dedup();

        let mut sets = DisjointSets::new(ids.len());
        let mut qualifying = Vec::new();
        for i in 0..ids.len() {
            for j in i + 1..ids.len() {
                let s = pairs.strength(ids[i], ids[j]);
                if s > CATEGORY_EDGE_ABOVE {
                    sets.union(i, j);
                    qualifying.push((i, s));
                }
            }
        }

        let mut components: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
        for i in 0..ids.len() {
            components.entry(sets.find(i)).or_default().push(i);
        }

        let mut component_strengths: HashMap<usize, Vec<f64>> = HashMap::new();
        for (i, s) in qualifying {
            component_strengths.entry(sets.find(i)).or_default().push(s);
        }

        for (root, indices) in components {
            if indices.len() < 2 {
                continue;
            }
            let member_ids: Vec<EntityId> = indices.iter().map(|&i| ids[i].clone()).collect();
            let strength = component_strengths
                .get(&root)
                .map(|s| mean(s))
                .unwrap_or(0.0);
            let unifying = dominant_principle(&member_ids, members)
                .unwrap_or_else(|| area.as_str().to_string());
            clusters.push(assemble(
                format!("category:{}:{}", area.as_str(), member_ids[0]),
                ClusterKind::Category,
                format!("{} authorities", area.as_str()),
                unifying,
                member_ids,
                strength,
                members,
                edges,
            ));
        }
    }
    clusters
}

#[allow(clippy::too_many_arguments)]
fn assemble(
    id: String,
    kind: ClusterKind,
    theme: String,
    unifying_principle: String,
    member_ids: Vec<EntityId>,
    strength: f64,
    members: &[Member<'_>],
    edges: &[ConnectionEdge],
) -> Cluster {
    let contradicted = is_contradicted(&member_ids, edges);
    let status = ClusterStatus::derive(strength, member_ids.len(), contradicted);
    Cluster {
        id,
        kind,
        theme,
        development_timeline: timeline(&member_ids, members),
        member_ids,
        unifying_principle,
        strength,
        status,
    }
}

/// Members sorted by date, undated last, ties by id
fn timeline(member_ids: &[EntityId], members: &[Member<'_>]) -> Vec<EntityId> {
    let dates: HashMap<&EntityId, _> = members
        .iter()
        .map(|m| (&m.entity.id, m.entity.date))
        .collect();
    let mut ordered: Vec<EntityId> = member_ids.to_vec();
    ordered.sort_by(|a, b| {
        let da = dates.get(a).copied().flatten();
        let db = dates.get(b).copied().flatten();
        match (da, db) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        }
        .then_with(|| a.cmp(b))
    });
    ordered
}

/// The target's edges into the cluster pull in opposite directions
fn is_contradicted(member_ids: &[EntityId], edges: &[ConnectionEdge]) -> bool {
    let mut favorable = false;
    let mut unfavorable = false;
    for edge in edges {
        if member_ids.binary_search(&edge.target_id).is_err() {
            continue;
        }
        if edge.link_type == LinkType::Overruling {
            return true;
        }
        if let Some(s) = edge.supportiveness() {
            favorable |= s.is_favorable();
            unfavorable |= s.is_unfavorable();
        }
    }
    favorable && unfavorable
}

/// Most common principle among the members, ties broken alphabetically
fn dominant_principle(member_ids: &[EntityId], members: &[Member<'_>]) -> Option<String> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for member in members {
        if member_ids.binary_search(&member.entity.id).is_ok() {
            for principle in &member.features.legal_principles {
                *counts.entry(principle.as_str()).or_insert(0) += 1;
            }
        }
    }
    let best = counts.values().copied().max()?;
    counts
        .into_iter()
        .find(|(_, count)| *count == best)
        .map(|(principle, _)| principle.to_string())
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Union-find over member indices
struct DisjointSets {
    parent: Vec<usize>,
}

impl DisjointSets {
    fn new(len: usize) -> Self {
        Self {
            parent: (0..len).collect(),
        }
    }

    fn find(&mut self, i: usize) -> usize {
        let mut root = i;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut node = i;
        while self.parent[node] != root {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }
        root
    }

    fn union(&mut self, a: usize, b: usize) {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra != rb {
            // Lower index wins so roots are stable across runs
            let (keep, merge) = if ra < rb { (ra, rb) } else { (rb, ra) };
            self.parent[merge] = keep;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::extract;
    use chrono::NaiveDate;
    use lexlink_domain::{
        Applicability, DimensionScores, Jurisdiction, RawRecord, StrategicValue, Supportiveness,
    };

    fn build(raws: Vec<RawRecord>) -> (Vec<Entity>, Vec<FeatureSet>) {
        let entities: Vec<Entity> = raws
            .iter()
            .map(|r| Entity::try_from_raw(r).unwrap())
            .collect();
        let features = entities.iter().map(extract).collect();
        (entities, features)
    }

    fn members<'a>(entities: &'a [Entity], features: &'a [FeatureSet]) -> Vec<Member<'a>> {
        entities
            .iter()
            .zip(features)
            .map(|(entity, features)| Member { entity, features })
            .collect()
    }

    /// Pair graph for members that exclude the target
    fn unanchored(members: &[Member<'_>]) -> PairGraph {
        PairGraph::build(&EntityId::new("t").unwrap(), members, &[])
    }

    fn record(id: &str, principles: &[&str], facts: &[&str]) -> RawRecord {
        let mut raw = RawRecord::case(id);
        raw.legal_principles = principles.iter().map(|s| s.to_string()).collect();
        raw.facts = facts.iter().map(|s| s.to_string()).collect();
        raw.jurisdiction = Some(Jurisdiction::National);
        raw.practice_area = Some(PracticeArea::Tort);
        raw.date = NaiveDate::from_ymd_opt(2022, 1, 1);
        raw
    }

    #[test]
    fn test_principle_cluster_requires_two_members() {
        let (entities, features) = build(vec![
            record("a", &["Duty of Care"], &["slip"]),
            record("b", &["duty of care", "causation"], &["fall"]),
            record("c", &["remoteness"], &["spill"]),
        ]);
        let members = members(&entities, &features);
        let pairs = unanchored(&members);
        let config = EngineConfig {
            category_clusters: false,
            ..EngineConfig::default()
        };
        let clusters = build_clusters(&members, &pairs, &[], &config);
        assert_eq!(clusters.len(), 1);
        let cluster = &clusters[0];
        assert_eq!(cluster.id, "principle:duty of care");
        assert_eq!(cluster.member_ids.len(), 2);
        assert!(cluster.strength > 0.0);
    }

    #[test]
    fn test_category_cluster_connects_strong_pairs() {
        let (entities, features) = build(vec![
            record("a", &["duty of care"], &["slip on wet floor"]),
            record("b", &["duty of care"], &["slip on wet floor"]),
            record("c", &["duty of care"], &["slip on wet floor"]),
            record("d", &["nuisance"], &["noise"]),
        ]);
        let members = members(&entities, &features);
        let pairs = unanchored(&members);
        let config = EngineConfig {
            principle_clusters: false,
            ..EngineConfig::default()
        };
        let clusters = build_clusters(&members, &pairs, &[], &config);
        assert_eq!(clusters.len(), 1);
        let cluster = &clusters[0];
        assert_eq!(cluster.kind, ClusterKind::Category);
        assert_eq!(cluster.id, "category:tort:a");
        assert_eq!(cluster.member_ids.len(), 3);
        assert_eq!(cluster.unifying_principle, "duty of care");
        assert!(cluster.strength > CATEGORY_EDGE_ABOVE);
        assert_eq!(cluster.status, ClusterStatus::Established);
    }

    #[test]
    fn test_degenerate_members_ignored() {
        let mut empty = RawRecord::case("e");
        empty.practice_area = Some(PracticeArea::Tort);
        let (entities, features) = build(vec![record("a", &["duty"], &["x"]), empty]);
        let members = members(&entities, &features);
        let pairs = unanchored(&members);
        assert!(pairs.is_empty());
        let clusters = build_clusters(&members, &pairs, &[], &EngineConfig::default());
        assert!(clusters.is_empty());
    }

    #[test]
    fn test_timeline_sorted_by_date_undated_last() {
        let mut a = record("a", &["duty"], &["x"]);
        a.date = NaiveDate::from_ymd_opt(2021, 1, 1);
        let mut b = record("b", &["duty"], &["y"]);
        b.date = None;
        let mut c = record("c", &["duty"], &["z"]);
        c.date = NaiveDate::from_ymd_opt(2015, 1, 1);
        let (entities, features) = build(vec![a, b, c]);
        let members = members(&entities, &features);
        let pairs = unanchored(&members);
        let clusters = build_clusters(&members, &pairs, &[], &EngineConfig::default());
        let principle = clusters
            .iter()
            .find(|c| c.kind == ClusterKind::Principle)
            .unwrap();
        let order: Vec<&str> = principle
            .development_timeline
            .iter()
            .map(|id| id.as_str())
            .collect();
        assert_eq!(order, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_contradicting_edges_mark_disputed() {
        let (entities, features) = build(vec![
            record("a", &["duty"], &["x"]),
            record("b", &["duty"], &["y"]),
        ]);
        let members = members(&entities, &features);
        let pairs = unanchored(&members);

        let edge = |target: &str, s: Supportiveness| {
            ConnectionEdge::new(
                EntityId::new("t").unwrap(),
                EntityId::new(target).unwrap(),
                LinkType::Analogous,
                0.7,
                DimensionScores::zero(),
            )
            .with_strategic_value(StrategicValue {
                supportiveness: s,
                applicability: Applicability::Analogous,
                tactical_use: Vec::new(),
            })
        };
        let edges = vec![
            edge("a", Supportiveness::Supportive),
            edge("b", Supportiveness::StronglyUnfavorable),
        ];
        let clusters = build_clusters(&members, &pairs, &edges, &EngineConfig::default());
        assert!(clusters
            .iter()
            .filter(|c| c.kind == ClusterKind::Principle)
            .all(|c| c.status == ClusterStatus::Disputed));
    }

    #[test]
    fn test_reclustering_is_idempotent() {
        let (entities, features) = build(vec![
            record("a", &["duty", "breach"], &["slip"]),
            record("b", &["duty"], &["slip"]),
            record("c", &["breach"], &["slip"]),
        ]);
        let members = members(&entities, &features);
        let pairs = unanchored(&members);
        let first = build_clusters(&members, &pairs, &[], &EngineConfig::default());
        let second = build_clusters(&members, &pairs, &[], &EngineConfig::default());
        assert_eq!(first, second);
    }

    #[test]
    fn test_target_pairs_use_edge_strength() {
        // The target sorts after the candidate and overlaps it far more in
        // its own direction than in the reverse one
        let (entities, features) = build(vec![
            record(
                "z",
                &["damages", "damages for delay", "delay"],
                &["late", "late delivery", "delivery"],
            ),
            record("a", &["damages for delay"], &["late delivery"]),
        ]);
        let members = members(&entities, &features);
        let target = &entities[0].id;

        let forward = score_pair(&features[0], &features[1], &CASE_WEIGHTS);
        let backward = score_pair(&features[1], &features[0], &CASE_WEIGHTS);
        assert!(forward.overall > CATEGORY_EDGE_ABOVE);
        assert!(backward.overall < CATEGORY_EDGE_ABOVE);

        let edges = crate::linker::build_edges(
            &entities[0],
            &[crate::linker::ScoredCandidate {
                entity: &entities[1],
                score: forward,
            }],
        );
        let edge_strength = edges[0].strength;

        let pairs = PairGraph::build(target, &members, &edges);
        assert_eq!(pairs.strength(&entities[1].id, target), edge_strength);

        let clusters = build_clusters(&members, &pairs, &edges, &EngineConfig::default());
        let category = clusters
            .iter()
            .find(|c| c.kind == ClusterKind::Category)
            .unwrap();
        assert_eq!(category.id, "category:tort:a");
        assert_eq!(category.strength, edge_strength);
        let principle = clusters
            .iter()
            .find(|c| c.id == "principle:damages for delay")
            .unwrap();
        assert_eq!(principle.strength, edge_strength);
    }

    #[test]
    fn test_target_pair_without_edge_is_unconnected() {
        let (entities, features) = build(vec![
            record("t", &["duty"], &["slip"]),
            record("a", &["duty"], &["slip"]),
        ]);
        let members = members(&entities, &features);
        let pairs = PairGraph::build(&entities[0].id, &members, &[]);
        assert!(pairs.is_empty());
    }

    #[test]
    fn test_other_pairs_take_stronger_direction() {
        let (entities, features) = build(vec![
            record("a", &["damages for delay"], &["late delivery"]),
            record(
                "b",
                &["damages", "damages for delay", "delay"],
                &["late", "late delivery", "delivery"],
            ),
        ]);
        let members = members(&entities, &features);
        let pairs = unanchored(&members);
        let stronger = score_pair(&features[1], &features[0], &CASE_WEIGHTS).overall;
        assert_eq!(pairs.strength(&entities[0].id, &entities[1].id), stronger);
        assert_eq!(pairs.strength(&entities[1].id, &entities[0].id), stronger);
    }

    #[test]
    fn test_disjoint_sets() {
        let mut sets = DisjointSets::new(5);
        sets.union(3, 4);
        sets.union(4, 1);
        assert_eq!(sets.find(3), sets.find(1));
        assert_eq!(sets.find(1), 1);
        assert_ne!(sets.find(0), sets.find(3));
    }
}
