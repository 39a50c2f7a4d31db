use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Name of the provider used when none is configured.
pub const DEFAULT_PROVIDER: &str = "yahoo";

/// Runtime configuration for price retrieval.
///
/// Period and interval values are opaque provider tokens (e.g. "1d", "5d",
/// "max") and are passed through unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Registry name of the price provider (e.g., "yahoo", "alphavantage").
    pub provider: String,

    /// Optional API keys for providers that require them.
    /// Keys: provider name (e.g., "alphavantage").
    /// Values: the API key string.
    pub api_keys: HashMap<String, String>,

    /// Window requested when only the latest close is needed.
    pub latest_period: String,
    pub latest_interval: String,

    /// Window requested for date lookups and historical slices.
    pub history_period: String,
    pub history_interval: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            provider: DEFAULT_PROVIDER.to_string(),
            api_keys: HashMap::new(),
            latest_period: "1d".to_string(),
            latest_interval: "1d".to_string(),
            history_period: "max".to_string(),
            history_interval: "1d".to_string(),
        }
    }
}
