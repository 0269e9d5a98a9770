//! Configuration for the connection engine
//!
//! Only presentation-side knobs live here. Scoring weights and link
//! thresholds are compile-time constants in [`crate::scorer`] and
//! [`crate::linker`] and cannot be changed at runtime.

use serde::{Deserialize, Serialize};

/// Upper bound for [`EngineConfig::max_insights`]
pub const MAX_INSIGHTS: usize = 5;

/// Configuration for the connection engine
///
/// # Examples
///
/// ```
/// use lexlink_engine::EngineConfig;
///
/// let config = EngineConfig::default();
/// assert_eq!(config.max_insights, 5);
///
/// let config = EngineConfig::focused();
/// assert_eq!(config.max_insights, 3);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Maximum number of insights returned, after ranking
    /// Default: 5
    #[serde(default = "default_max_insights")]
    pub max_insights: usize,

    /// How far back (in years from the as-of date) a record counts as recent
    /// Default: 2
    #[serde(default = "default_recent_window_years")]
    pub recent_window_years: u32,

    /// Run the principle-based clustering strategy
    /// Default: true
    #[serde(default = "default_true")]
    pub principle_clusters: bool,

    /// Run the category-based clustering strategy
    /// Default: true
    #[serde(default = "default_true")]
    pub category_clusters: bool,
}

fn default_max_insights() -> usize {
    5
}

fn default_recent_window_years() -> u32 {
    2
}

fn default_true() -> bool {
    true
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_insights: default_max_insights(),
            recent_window_years: default_recent_window_years(),
            principle_clusters: true,
            category_clusters: true,
        }
    }
}

impl EngineConfig {
    /// Focused preset: fewer insights, a tighter recency window
    pub fn focused() -> Self {
        Self {
            max_insights: 3,
            recent_window_years: 1,
            principle_clusters: true,
            category_clusters: false,
        }
    }

    /// Exploratory preset: the longest insight list, a wider recency window
    pub fn exploratory() -> Self {
        Self {
            max_insights: MAX_INSIGHTS,
            recent_window_years: 5,
            principle_clusters: true,
            category_clusters: true,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_insights == 0 {
            return Err("max_insights must be greater than 0".to_string());
        }
        if self.max_insights > MAX_INSIGHTS {
            return Err(format!("max_insights cannot exceed {}", MAX_INSIGHTS));
        }
        if self.recent_window_years == 0 {
            return Err("recent_window_years must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}
