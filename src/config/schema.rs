use serde::{Deserialize, Serialize};

use crate::engine::Weights;

/// Top-level configuration.
///
/// Every field is optional; missing values fall back to the defaults the
/// accessors on this type provide, so a config file is not required for the
/// demo dataset.
///
/// Example YAML:
/// ```yaml
/// source: "file:suppliers.csv"
/// total_demand: 1000
/// disruption_level: 10
/// weights:
///   cost: 0.25
///   quality: 0.25
///   delivery: 0.25
///   risk: 0.25
/// advisor:
///   kind: rules
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Dataset source spec: "demo", "file:<path>" or "url:<https://...>"
    #[serde(default)]
    pub source: Option<String>,

    /// Criteria weights, each in [0, 1] (default: 0.25 each)
    #[serde(default)]
    pub weights: Option<Weights>,

    /// Total demand quantity to allocate, in [100, 10000] (default: 1000)
    #[serde(default)]
    pub total_demand: Option<i64>,

    /// Disruption scenario level in percent, in [0, 50] (default: 10)
    #[serde(default)]
    pub disruption_level: Option<f64>,

    #[serde(default)]
    pub advisor: Option<AdvisorConfig>,
}

/// Negotiation advisor selection.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AdvisorConfig {
    /// "rules" (offline, deterministic) or "remote" (chat-completions API)
    #[serde(default)]
    pub kind: Option<String>,

    /// Base URL for the remote advisor, e.g. "https://api.openai.com/v1"
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Model name passed to the remote advisor
    #[serde(default)]
    pub model: Option<String>,
}

pub const DEFAULT_TOTAL_DEMAND: i64 = 1000;
pub const DEFAULT_DISRUPTION_LEVEL: f64 = 10.0;
pub const DEFAULT_REMOTE_ENDPOINT: &str = "https://api.openai.com/v1";
pub const DEFAULT_REMOTE_MODEL: &str = "gpt-4o-mini";

impl Config {
    pub fn weights(&self) -> Weights {
        self.weights.unwrap_or_default()
    }

    pub fn total_demand(&self) -> i64 {
        self.total_demand.unwrap_or(DEFAULT_TOTAL_DEMAND)
    }

    pub fn disruption_level(&self) -> f64 {
        self.disruption_level.unwrap_or(DEFAULT_DISRUPTION_LEVEL)
    }

    pub fn source_spec(&self) -> &str {
        self.source.as_deref().unwrap_or("demo")
    }

    pub fn advisor_kind(&self) -> &str {
        self.advisor
            .as_ref()
            .and_then(|a| a.kind.as_deref())
            .unwrap_or("rules")
    }

    pub fn advisor_endpoint(&self) -> &str {
        self.advisor
            .as_ref()
            .and_then(|a| a.endpoint.as_deref())
            .unwrap_or(DEFAULT_REMOTE_ENDPOINT)
    }

    pub fn advisor_model(&self) -> &str {
        self.advisor
            .as_ref()
            .and_then(|a| a.model.as_deref())
            .unwrap_or(DEFAULT_REMOTE_MODEL)
    }
}
