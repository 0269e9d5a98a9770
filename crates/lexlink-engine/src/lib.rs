//! LexLink Engine
//!
//! Relevance and connection engine for legal case management. Given a case
//! under analysis, a pool of other cases and a precedent corpus, it scores
//! every candidate, builds typed connection edges, groups entities into
//! thematic clusters and derives ranked insights.
//!
//! # Architecture
//!
//! ```text
//! RawRecord → Entity → FeatureSet → DimensionScores → ConnectionEdge
//!                                                    ↘ Cluster → Insight
//! ```
//!
//! Every stage is a pure function of its inputs. The engine keeps no state
//! between calls; recomputation replaces the whole result.
//!
//! # Example Usage
//!
//! ```
//! use chrono::NaiveDate;
//! use lexlink_domain::{Jurisdiction, RawRecord};
//! use lexlink_engine::{AnalysisRequest, ConnectionEngine, EngineConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut target = RawRecord::case("case-7");
//! target.legal_principles = vec!["duty of care".to_string()];
//! target.jurisdiction = Some(Jurisdiction::National);
//!
//! let mut precedent = RawRecord::precedent("donoghue");
//! precedent.legal_principles = vec!["duty of care".to_string()];
//! precedent.jurisdiction = Some(Jurisdiction::Supreme);
//!
//! let engine = ConnectionEngine::new(EngineConfig::focused())?;
//! let request = AnalysisRequest::new(target, NaiveDate::from_ymd_opt(2024, 5, 1).unwrap())
//!     .with_precedents(vec![precedent]);
//! let result = engine.analyze(&request)?;
//!
//! println!("{}", result.summary.summary());
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration
//!
//! Presentation knobs are configurable via TOML; scoring weights and link
//! thresholds are fixed:
//!
//! ```toml
//! max_insights = 5
//! recent_window_years = 2
//! principle_clusters = true
//! category_clusters = true
//! ```

#![warn(missing_docs)]

mod config;
mod engine;
mod error;
mod repository;
mod summary;

pub mod cluster;
pub mod features;
pub mod insight;
pub mod linker;
pub mod scorer;

pub use config::{EngineConfig, MAX_INSIGHTS};
pub use engine::{AnalysisRequest, AnalysisResult, ConnectionEngine};
pub use error::{EngineError, RecordList};
pub use repository::InMemoryRepository;
pub use scorer::PairScore;
pub use summary::AnalysisSummary;
