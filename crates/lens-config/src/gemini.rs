//! Generation backend configuration (Gemini).

use serde::{Deserialize, Serialize};

fn default_model() -> String {
    String::from("gemini-2.5-pro")
}

fn default_endpoint() -> String {
    String::from("https://generativelanguage.googleapis.com/v1beta")
}

const fn default_timeout_secs() -> u64 {
    120
}

const fn default_extract_entities() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeminiConfig {
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_model")]
    pub model: String,

    /// API base URL; `/models/{model}:generateContent` is appended.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Ask the model to extract company/role/location before planning queries.
    #[serde(default = "default_extract_entities")]
    pub extract_entities: bool,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_model(),
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
            extract_entities: default_extract_entities(),
        }
    }
}

impl GeminiConfig {
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty() && !self.model.is_empty()
    }
}
