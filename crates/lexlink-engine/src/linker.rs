//! Link building
//!
//! Converts scored candidates into typed, directional edges from the case
//! under analysis. Case candidates may yield several edges (one per satisfied
//! rule); precedent candidates yield at most one.

use crate::scorer::PairScore;
use lexlink_domain::{
    Applicability, BindingAuthority, ClientRole, ConnectionEdge, DimensionScores, Entity,
    EntityKind, LinkType, Outcome, StrategicValue, Supportiveness, Treatment,
};
use std::cmp::Ordering;

/// Minimum fact overlap for `similar_facts`
pub const SIMILAR_FACTS_MIN: f64 = 0.3;

/// Minimum party overlap for `same_parties`
pub const SAME_PARTIES_MIN: f64 = 0.5;

/// Minimum principle overlap for `related_legal_issues`
pub const RELATED_ISSUES_MIN: f64 = 0.4;

/// Minimum temporal proximity for `temporal_sequence`
pub const TEMPORAL_SEQUENCE_MIN: f64 = 0.2;

/// A precedent edge needs an overall score strictly above this
pub const PRECEDENT_MIN_OVERALL: f64 = 0.3;

/// Overall score above which a precedent is directly applicable
pub const DIRECTLY_APPLICABLE_ABOVE: f64 = 0.8;

/// Overall score above which a precedent is analogous
pub const ANALOGOUS_ABOVE: f64 = 0.6;

/// Overall score above which a precedent is worth considering
pub const CONSIDERING_ABOVE: f64 = 0.4;

/// Overall score above which supportiveness is strong
pub const STRONG_SUPPORT_ABOVE: f64 = 0.7;

/// Overall score above which supportiveness leaves neutral
pub const SUPPORT_ABOVE: f64 = 0.5;

/// Facts and principles both above this make a precedent directly applicable
pub const DIRECT_APPLICABILITY_ABOVE: f64 = 0.8;

/// A candidate entity paired with its score against the target
#[derive(Debug, Clone, Copy)]
pub struct ScoredCandidate<'a> {
    /// The candidate
    pub entity: &'a Entity,
    /// Its score against the target
    pub score: PairScore,
}

/// Build the full, sorted edge set for a target
pub fn build_edges(target: &Entity, candidates: &[ScoredCandidate<'_>]) -> Vec<ConnectionEdge> {
    let mut edges = Vec::new();

    for candidate in candidates {
        if candidate.entity.id == target.id {
            continue;
        }
        // Degenerate pairs score exactly zero and never link
        if candidate.score.overall <= 0.0 {
            continue;
        }

        if candidate.entity.is_precedent() {
            if let Some(edge) = precedent_link(target, candidate) {
                edges.push(edge);
            }
        } else {
            edges.extend(case_links(target, candidate));
        }
    }

    sort_edges(&mut edges);
    edges
}

/// Sort by strength desc, confidence desc, target id asc, link type asc
pub fn sort_edges(edges: &mut [ConnectionEdge]) {
    edges.sort_by(compare_edges);
}

fn compare_edges(a: &ConnectionEdge, b: &ConnectionEdge) -> Ordering {
    b.strength
        .total_cmp(&a.strength)
        .then_with(|| b.confidence.total_cmp(&a.confidence))
        .then_with(|| a.target_id.cmp(&b.target_id))
        .then_with(|| a.link_type.cmp(&b.link_type))
}

/// Case-to-case link types satisfied by a pair score, in declaration order
pub fn case_link_types(score: &PairScore) -> Vec<LinkType> {
    let d = &score.dimensions;
    let mut types = Vec::new();
    if d.facts >= SIMILAR_FACTS_MIN {
        types.push(LinkType::SimilarFacts);
    }
    if d.parties >= SAME_PARTIES_MIN {
        types.push(LinkType::SameParties);
    }
    if d.legal_principles >= RELATED_ISSUES_MIN {
        types.push(LinkType::RelatedLegalIssues);
    }
    if score.proximity >= TEMPORAL_SEQUENCE_MIN {
        types.push(LinkType::TemporalSequence);
    }
    types
}

fn case_links(target: &Entity, candidate: &ScoredCandidate<'_>) -> Vec<ConnectionEdge> {
    case_link_types(&candidate.score)
        .into_iter()
        .map(|link_type| {
            let description = describe_case_link(target, candidate.entity, link_type, &candidate.score);
            ConnectionEdge::new(
                target.id.clone(),
                candidate.entity.id.clone(),
                link_type,
                candidate.score.overall,
                candidate.score.dimensions,
            )
            .with_description(description)
        })
        .collect()
}

fn precedent_link(target: &Entity, candidate: &ScoredCandidate<'_>) -> Option<ConnectionEdge> {
    let overall = candidate.score.overall;
    if overall <= PRECEDENT_MIN_OVERALL {
        return None;
    }

    let EntityKind::Precedent {
        outcome,
        binding_authority,
        treatment,
    } = candidate.entity.kind
    else {
        return None;
    };

    let client_role = match target.kind {
        EntityKind::Case { client_role } => client_role,
        EntityKind::Precedent { .. } => ClientRole::default(),
    };

    let link_type = precedent_link_type(overall, treatment);
    let supportiveness = supportiveness(overall, outcome, client_role);
    let value = StrategicValue {
        supportiveness,
        applicability: applicability(&candidate.score.dimensions, overall),
        tactical_use: tactical_use(supportiveness, binding_authority, treatment),
    };
    let description = describe_precedent_link(
        target,
        candidate.entity,
        link_type,
        &value,
        binding_authority,
        overall,
    );

    Some(
        ConnectionEdge::new(
            target.id.clone(),
            candidate.entity.id.clone(),
            link_type,
            overall,
            candidate.score.dimensions,
        )
        .with_strategic_value(value)
        .with_description(description),
    )
}

/// Precedent link type from the overall band and subsequent treatment
///
/// An overruled precedent is always `overruling`. A followed precedent in the
/// analogous band becomes `following`.
pub fn precedent_link_type(overall: f64, treatment: Option<Treatment>) -> LinkType {
    let band = if overall > DIRECTLY_APPLICABLE_ABOVE {
        LinkType::DirectlyApplicable
    } else if overall > ANALOGOUS_ABOVE {
        LinkType::Analogous
    } else if overall > CONSIDERING_ABOVE {
        LinkType::Considering
    } else {
        LinkType::Distinguishable
    };

    match (treatment, band) {
        (Some(Treatment::Overruled), _) => LinkType::Overruling,
        (Some(Treatment::Followed), LinkType::Analogous) => LinkType::Following,
        (_, band) => band,
    }
}

/// Supportiveness from overall strength and whether the outcome favored the
/// client's side
///
/// Mixed and procedural outcomes, unknown outcomes and weak matches are
/// neutral regardless of who won.
pub fn supportiveness(
    overall: f64,
    outcome: Option<Outcome>,
    client_role: ClientRole,
) -> Supportiveness {
    let favorable = match (outcome, client_role) {
        (Some(Outcome::ClaimantSuccess), ClientRole::Claimant)
        | (Some(Outcome::DefendantSuccess), ClientRole::Defendant) => true,
        (Some(Outcome::ClaimantSuccess), ClientRole::Defendant)
        | (Some(Outcome::DefendantSuccess), ClientRole::Claimant) => false,
        _ => return Supportiveness::Neutral,
    };

    match (overall > STRONG_SUPPORT_ABOVE, overall > SUPPORT_ABOVE, favorable) {
        (true, _, true) => Supportiveness::StronglySupportive,
        (true, _, false) => Supportiveness::StronglyUnfavorable,
        (false, true, true) => Supportiveness::Supportive,
        (false, true, false) => Supportiveness::Unfavorable,
        (false, false, _) => Supportiveness::Neutral,
    }
}

/// Applicability from the facts/principles pair and the overall score
pub fn applicability(dimensions: &DimensionScores, overall: f64) -> Applicability {
    if dimensions.facts > DIRECT_APPLICABILITY_ABOVE
        && dimensions.legal_principles > DIRECT_APPLICABILITY_ABOVE
    {
        Applicability::Direct
    } else if overall > ANALOGOUS_ABOVE {
        Applicability::Analogous
    } else if overall > PRECEDENT_MIN_OVERALL {
        Applicability::Limited
    } else {
        Applicability::Distinguishable
    }
}

/// Fixed recommendation table keyed on supportiveness and binding authority
pub fn tactical_use(
    supportiveness: Supportiveness,
    authority: BindingAuthority,
    treatment: Option<Treatment>,
) -> Vec<String> {
    use BindingAuthority::*;

    let rows: &[&str] = if treatment == Some(Treatment::Overruled) {
        &[
            "do not rely on as authority",
            "cite the overruling decision instead",
            "prepare to rebut if raised by the other side",
        ]
    } else if supportiveness.is_favorable() {
        match authority {
            Binding => &["cite as primary authority", "emphasize binding nature"],
            Persuasive => &["cite as supporting authority", "highlight persuasive reasoning"],
            NonBinding => &["use to illustrate the argument", "pair with binding authority"],
        }
    } else if supportiveness.is_unfavorable() {
        match authority {
            Binding => &[
                "distinguish on the facts",
                "prepare counter-arguments",
                "assess settlement exposure",
            ],
            Persuasive => &["distinguish on the facts", "argue it should not be followed"],
            NonBinding => &["note for completeness", "distinguish if raised"],
        }
    } else {
        match authority {
            Binding => &[
                "review reasoning for applicable principles",
                "cite for general propositions",
            ],
            Persuasive | NonBinding => &["monitor for relevance", "use as background research"],
        }
    };

    rows.iter().map(|s| s.to_string()).collect()
}

fn describe_case_link(
    target: &Entity,
    candidate: &Entity,
    link_type: LinkType,
    score: &PairScore,
) -> String {
    let d = &score.dimensions;
    match link_type {
        LinkType::SimilarFacts => format!(
            "{} shares fact patterns with {} (facts {:.2}, overall {:.2})",
            target.title, candidate.title, d.facts, score.overall
        ),
        LinkType::SameParties => format!(
            "{} involves the same parties as {} (parties {:.2})",
            target.title, candidate.title, d.parties
        ),
        LinkType::RelatedLegalIssues => format!(
            "{} raises legal issues related to {} (principles {:.2}, overall {:.2})",
            target.title, candidate.title, d.legal_principles, score.overall
        ),
        _ => format!(
            "{} is close in time to {} (proximity {:.2})",
            target.title, candidate.title, score.proximity
        ),
    }
}

fn describe_precedent_link(
    target: &Entity,
    precedent: &Entity,
    link_type: LinkType,
    value: &StrategicValue,
    authority: BindingAuthority,
    overall: f64,
) -> String {
    let relation = match link_type {
        LinkType::DirectlyApplicable => "is directly applicable to",
        LinkType::Analogous => "is analogous to",
        LinkType::Following => "is a followed authority analogous to",
        LinkType::Considering => "merits consideration for",
        LinkType::Overruling => "has been overruled but resembles",
        _ => "can be distinguished from",
    };
    format!(
        "{} {} {}: {}, {} applicability, {} authority (strength {:.2})",
        precedent.title,
        relation,
        target.title,
        value.supportiveness.as_str().replace('_', " "),
        value.applicability.as_str(),
        authority.as_str().replace('_', "-"),
        overall
    )
}
