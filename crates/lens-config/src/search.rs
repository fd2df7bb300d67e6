//! Search provider configuration (Google Custom Search).

use serde::{Deserialize, Serialize};

fn default_endpoint() -> String {
    String::from("https://www.googleapis.com/customsearch/v1")
}

const fn default_results_per_query() -> u32 {
    2
}

const fn default_timeout_secs() -> u64 {
    15
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    /// Custom Search API key.
    #[serde(default)]
    pub api_key: String,

    /// Programmable search engine id (`cx`).
    #[serde(default)]
    pub engine_id: String,

    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Results requested per query (the API caps this at 10).
    #[serde(default = "default_results_per_query")]
    pub results_per_query: u32,

    /// Per-call timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            engine_id: String::new(),
            endpoint: default_endpoint(),
            results_per_query: default_results_per_query(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl SearchConfig {
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty() && !self.engine_id.is_empty()
    }
}
