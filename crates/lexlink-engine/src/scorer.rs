//! Similarity scoring
//!
//! Computes per-dimension scores between two feature sets and folds them into
//! one overall score with a fixed weight table.
//!
//! | Dimension | Method |
//! |-----------|--------|
//! | facts | substring-containment overlap / max(|A|, |B|) |
//! | legal principles | same as facts |
//! | parties | target parties matched by name or alias / max(|A|, |B|) |
//! | jurisdiction | 1.0 if identical, else candidate authority level |
//! | temporal | max(0.3, 1 - years / 10) |
//! | procedural | 0.8 if practice areas match, else 0.4 |
//!
//! Every path has a defined floor and ceiling, so no score is ever NaN.

use crate::features::{FeatureSet, PartyKey};
use chrono::NaiveDate;
use lexlink_domain::{DimensionScores, Jurisdiction, PracticeArea};

/// Years over which temporal relevance decays linearly
pub const TEMPORAL_HORIZON_YEARS: f64 = 10.0;

/// Residual temporal relevance of very old (or undated) connections
pub const TEMPORAL_FLOOR: f64 = 0.3;

/// Procedural score when practice areas match
pub const PRACTICE_AREA_MATCH: f64 = 0.8;

/// Procedural score otherwise
pub const PRACTICE_AREA_MISMATCH: f64 = 0.4;

/// Jurisdiction score when the candidate's forum is unknown
pub const UNKNOWN_JURISDICTION: f64 = 0.3;

const DAYS_PER_YEAR: f64 = 365.25;

/// Fixed weights folding dimension scores into an overall score
///
/// Party overlap has no weight: it drives the `same_parties` link type but
/// does not move the overall strength.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weights {
    /// Facts weight
    pub facts: f64,
    /// Legal principles weight
    pub legal_principles: f64,
    /// Jurisdiction weight
    pub jurisdiction: f64,
    /// Temporal weight
    pub temporal: f64,
    /// Procedural weight
    pub procedural: f64,
}

impl Weights {
    /// Sum of all weights (1.0 for every shipped table)
    pub fn sum(&self) -> f64 {
        self.facts + self.legal_principles + self.jurisdiction + self.temporal + self.procedural
    }

    /// Weighted overall score, clamped to [0.0, 1.0]
    pub fn overall(&self, scores: &DimensionScores) -> f64 {
        let total = self.facts * scores.facts
            + self.legal_principles * scores.legal_principles
            + self.jurisdiction * scores.jurisdiction
            + self.temporal * scores.temporal
            + self.procedural * scores.procedural;
        total.clamp(0.0, 1.0)
    }
}

/// Weights for case-to-case comparisons
pub const CASE_WEIGHTS: Weights = Weights {
    facts: 0.3,
    legal_principles: 0.35,
    jurisdiction: 0.2,
    temporal: 0.1,
    procedural: 0.05,
};

/// Weights for case-to-precedent comparisons
///
/// Kept as a separate table so precedent matching can be retuned without
/// disturbing case matching. Currently identical to [`CASE_WEIGHTS`].
pub const PRECEDENT_WEIGHTS: Weights = Weights {
    facts: 0.3,
    legal_principles: 0.35,
    jurisdiction: 0.2,
    temporal: 0.1,
    procedural: 0.05,
};

/// Full scoring result for one pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairScore {
    /// Per-dimension scores
    pub dimensions: DimensionScores,

    /// Un-floored temporal decay, used to detect temporal sequences
    pub proximity: f64,

    /// Weighted overall score
    pub overall: f64,
}

impl PairScore {
    /// The score of a pair with nothing to compare
    pub fn zero() -> Self {
        Self {
            dimensions: DimensionScores::zero(),
            proximity: 0.0,
            overall: 0.0,
        }
    }
}

/// Compute dimension scores between a target and a candidate
///
/// A degenerate feature set on either side scores zero on every dimension.
pub fn score(target: &FeatureSet, candidate: &FeatureSet) -> DimensionScores {
    if target.is_degenerate() || candidate.is_degenerate() {
        return DimensionScores::zero();
    }

    DimensionScores {
        facts: overlap(&target.facts, &candidate.facts),
        legal_principles: overlap(&target.legal_principles, &candidate.legal_principles),
        parties: party_overlap(&target.parties, &candidate.parties),
        jurisdiction: jurisdiction_relevance(target.jurisdiction, candidate.jurisdiction),
        temporal: temporal_relevance(target.date, candidate.date),
        procedural: procedural_relevance(target.practice_area, candidate.practice_area),
    }
}

/// Score a pair and fold it with the given weights
pub fn score_pair(target: &FeatureSet, candidate: &FeatureSet, weights: &Weights) -> PairScore {
    if target.is_degenerate() || candidate.is_degenerate() {
        return PairScore::zero();
    }

    let dimensions = score(target, candidate);
    PairScore {
        dimensions,
        proximity: temporal_proximity(target.date, candidate.date),
        overall: weights.overall(&dimensions),
    }
}

/// Bag overlap by case-insensitive substring containment in either direction
///
/// Inputs are already normalized. Two empty sets score 0.
pub fn overlap(a: &[String], b: &[String]) -> f64 {
    let denominator = a.len().max(b.len());
    if denominator == 0 {
        return 0.0;
    }
    let matches = a
        .iter()
        .filter(|x| b.iter().any(|y| x.contains(y.as_str()) || y.contains(x.as_str())))
        .count();
    (matches as f64 / denominator as f64).clamp(0.0, 1.0)
}

fn party_overlap(target: &[PartyKey], candidate: &[PartyKey]) -> f64 {
    let denominator = target.len().max(candidate.len());
    if denominator == 0 {
        return 0.0;
    }
    let matches = target
        .iter()
        .filter(|party| candidate.iter().any(|other| party.matches(other)))
        .count();
    (matches as f64 / denominator as f64).clamp(0.0, 1.0)
}

/// Authority weight of a forum level
pub fn authority_weight(jurisdiction: Jurisdiction) -> f64 {
    match jurisdiction {
        Jurisdiction::Supreme => 1.0,
        Jurisdiction::National => 0.9,
        Jurisdiction::Regional => 0.7,
        Jurisdiction::International => 0.6,
        Jurisdiction::Other => 0.3,
    }
}

/// 1.0 for the same forum, otherwise the candidate's authority weight
pub fn jurisdiction_relevance(
    target: Option<Jurisdiction>,
    candidate: Option<Jurisdiction>,
) -> f64 {
    match (target, candidate) {
        (Some(t), Some(c)) if t == c => 1.0,
        (_, Some(c)) => authority_weight(c),
        (_, None) => UNKNOWN_JURISDICTION,
    }
}

/// Absolute distance between two dates in years
pub fn years_between(a: NaiveDate, b: NaiveDate) -> f64 {
    (b - a).num_days().abs() as f64 / DAYS_PER_YEAR
}

/// Linear decay over the horizon, floored at [`TEMPORAL_FLOOR`]
///
/// Undated pairs get the floor: age is unknown, not infinite.
pub fn temporal_relevance(a: Option<NaiveDate>, b: Option<NaiveDate>) -> f64 {
    match (a, b) {
        (Some(a), Some(b)) => {
            (1.0 - years_between(a, b) / TEMPORAL_HORIZON_YEARS).clamp(TEMPORAL_FLOOR, 1.0)
        }
        _ => TEMPORAL_FLOOR,
    }
}

/// Linear decay over the horizon without the floor; 0 when undated
pub fn temporal_proximity(a: Option<NaiveDate>, b: Option<NaiveDate>) -> f64 {
    match (a, b) {
        (Some(a), Some(b)) => (1.0 - years_between(a, b) / TEMPORAL_HORIZON_YEARS).clamp(0.0, 1.0),
        _ => 0.0,
    }
}

/// Practice-area match score; an unknown area never matches
pub fn procedural_relevance(a: Option<PracticeArea>, b: Option<PracticeArea>) -> f64 {
    match (a, b) {
        (Some(a), Some(b)) if a == b => PRACTICE_AREA_MATCH,
        _ => PRACTICE_AREA_MISMATCH,
    }
}
