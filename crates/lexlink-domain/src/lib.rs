//! LexLink Domain Layer
//!
//! Core value types for the case/precedent connection engine. This crate does
//! no I/O and holds no state; it defines the shapes that flow through the
//! engine pipeline and the trait boundary to the case repository.
//!
//! ## Key Concepts
//!
//! - **RawRecord**: The input shape supplied by the case repository
//! - **Entity**: A validated case or precedent (tagged by kind)
//! - **ConnectionEdge**: A directional, typed link from the case under analysis
//! - **Cluster**: A group of entities sharing a unifying legal theme
//! - **Insight**: A ranked, templated observation with recommendations
//!
//! ## Architecture
//!
//! - Pure data and small derivations only
//! - Scoring, linking and clustering live in `lexlink-engine`
//! - Repository implementations live outside this crate

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cluster;
pub mod edge;
pub mod entity;
pub mod insight;
pub mod record;
pub mod traits;

// Re-exports for convenience
pub use cluster::{Cluster, ClusterKind, ClusterStatus};
pub use edge::{
    Applicability, ConnectionEdge, DimensionScores, LinkType, StrategicValue, Supportiveness,
};
pub use entity::{Entity, EntityId, EntityKind, Party};
pub use insight::{Insight, InsightType, Priority};
pub use record::{
    BindingAuthority, ClientRole, Jurisdiction, Outcome, PracticeArea, RawParty, RawRecord,
    RecordKind, Treatment,
};
pub use traits::CaseRepository;
