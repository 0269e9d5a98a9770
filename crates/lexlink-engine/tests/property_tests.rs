//! Property tests for whole-pipeline invariants

use chrono::NaiveDate;
use lexlink_domain::{
    BindingAuthority, Jurisdiction, Outcome, PracticeArea, RawParty, RawRecord, RecordKind,
    Treatment,
};
use lexlink_engine::{AnalysisRequest, ConnectionEngine};
use proptest::prelude::*;
use std::collections::HashSet;

const FACTS: &[&str] = &[
    "late delivery",
    "late delivery of goods",
    "defective goods",
    "unpaid invoice",
    "wet floor",
    "slip and fall",
];

const PRINCIPLES: &[&str] = &[
    "breach of contract",
    "consequential damages",
    "duty of care",
    "causation",
    "mitigation",
];

const PARTIES: &[&str] = &["Acme Ltd", "ACME", "Globex Inc", "Initech", "Northwind plc"];

fn pick(pool: &'static [&'static str]) -> impl Strategy<Value = Vec<String>> {
    prop::sample::subsequence(pool, 0..=pool.len())
        .prop_map(|items| items.into_iter().map(str::to_string).collect())
}

fn jurisdiction() -> impl Strategy<Value = Option<Jurisdiction>> {
    prop::option::of(prop::sample::select(vec![
        Jurisdiction::Supreme,
        Jurisdiction::National,
        Jurisdiction::Regional,
        Jurisdiction::International,
        Jurisdiction::Other,
    ]))
}

fn practice_area() -> impl Strategy<Value = Option<PracticeArea>> {
    prop::option::of(prop::sample::select(vec![
        PracticeArea::Contract,
        PracticeArea::Tort,
        PracticeArea::Employment,
    ]))
}

fn date() -> impl Strategy<Value = Option<NaiveDate>> {
    prop::option::of((1990i32..2024, 1u32..=12, 1u32..=28))
        .prop_map(|d| d.and_then(|(y, m, day)| NaiveDate::from_ymd_opt(y, m, day)))
}

fn record(kind: RecordKind) -> impl Strategy<Value = RawRecord> {
    (
        pick(FACTS),
        pick(PRINCIPLES),
        pick(PARTIES),
        jurisdiction(),
        practice_area(),
        date(),
        prop::option::of(prop::sample::select(vec![
            Outcome::ClaimantSuccess,
            Outcome::DefendantSuccess,
            Outcome::Mixed,
        ])),
        prop::option::of(prop::sample::select(vec![
            BindingAuthority::Binding,
            BindingAuthority::Persuasive,
        ])),
        prop::option::of(prop::sample::select(vec![
            Treatment::Followed,
            Treatment::Overruled,
        ])),
    )
        .prop_map(
            move |(facts, legal_principles, parties, jurisdiction, practice_area, date, outcome, binding, treatment)| {
                RawRecord {
                    kind,
                    id: None,
                    title: None,
                    facts,
                    legal_principles,
                    parties: parties.into_iter().map(RawParty::named).collect(),
                    jurisdiction,
                    practice_area,
                    date,
                    outcome,
                    binding_authority: binding,
                    treatment,
                    client_role: None,
                }
            },
        )
}

fn request() -> impl Strategy<Value = AnalysisRequest> {
    (
        record(RecordKind::Case),
        prop::collection::vec(record(RecordKind::Case), 0..6),
        prop::collection::vec(record(RecordKind::Precedent), 0..6),
    )
        .prop_map(|(mut target, candidates, precedents)| {
            target.id = Some("target".to_string());
            let candidates = candidates
                .into_iter()
                .enumerate()
                .map(|(i, mut r)| {
                    r.id = Some(format!("case-{i}"));
                    r
                })
                .collect();
            let precedents = precedents
                .into_iter()
                .enumerate()
                .map(|(i, mut r)| {
                    r.id = Some(format!("prec-{i}"));
                    r
                })
                .collect();
            AnalysisRequest::new(target, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
                .with_candidates(candidates)
                .with_precedents(precedents)
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: strengths, dimensions and confidences stay in range
    #[test]
    fn test_scores_in_range(request in request()) {
        let result = ConnectionEngine::default_config().analyze(&request).unwrap();
        for edge in &result.edges {
            prop_assert!((0.0..=1.0).contains(&edge.strength));
            prop_assert!(edge.confidence >= 0.6 && edge.confidence <= 0.9 + 1e-12);
            prop_assert!((0.0..=1.0).contains(&edge.analysis.facts));
            prop_assert!((0.0..=1.0).contains(&edge.analysis.parties));
            prop_assert!((0.0..=1.0).contains(&edge.analysis.temporal));
        }
        for cluster in &result.clusters {
            prop_assert!((0.0..=1.0).contains(&cluster.strength));
        }
    }

    /// Property: no self-edges, and every referenced id was an input
    #[test]
    fn test_references_are_closed(request in request()) {
        let result = ConnectionEngine::default_config().analyze(&request).unwrap();
        let mut ids: HashSet<String> = HashSet::new();
        ids.insert("target".to_string());
        for r in request.candidates.iter().chain(&request.precedent_corpus) {
            if let Some(id) = &r.id {
                ids.insert(id.clone());
            }
        }

        for edge in &result.edges {
            prop_assert_ne!(&edge.source_id, &edge.target_id);
            prop_assert!(ids.contains(edge.target_id.as_str()));
        }
        for cluster in &result.clusters {
            prop_assert!(cluster.member_ids.len() >= 2);
            for member in &cluster.member_ids {
                prop_assert!(ids.contains(member.as_str()));
            }
        }
    }

    /// Property: higher strength never means lower confidence
    #[test]
    fn test_confidence_follows_strength(request in request()) {
        let result = ConnectionEngine::default_config().analyze(&request).unwrap();
        for pair in result.edges.windows(2) {
            prop_assert!(pair[0].strength >= pair[1].strength);
            prop_assert!(pair[0].confidence >= pair[1].confidence);
        }
    }

    /// Property: identical input gives identical output
    #[test]
    fn test_deterministic(request in request()) {
        let engine = ConnectionEngine::default_config();
        let first = engine.analyze(&request).unwrap();
        let second = engine.analyze(&request).unwrap();
        prop_assert_eq!(first, second);
    }

    /// Property: precedent links only appear above the minimum overall score
    #[test]
    fn test_precedent_threshold(request in request()) {
        let result = ConnectionEngine::default_config().analyze(&request).unwrap();
        for edge in result.edges.iter().filter(|e| e.link_type.is_precedent_link()) {
            prop_assert!(edge.strength > 0.3);
            prop_assert!(edge.strategic_value.is_some());
        }
    }

    /// Property: insight count never exceeds the cap
    #[test]
    fn test_insights_capped(request in request()) {
        let result = ConnectionEngine::default_config().analyze(&request).unwrap();
        prop_assert!(result.insights.len() <= 5);
    }
}
