//! Page scraping configuration.

use serde::{Deserialize, Serialize};

const fn default_enabled() -> bool {
    true
}

const fn default_timeout_secs() -> u64 {
    10
}

const fn default_max_chars() -> usize {
    5000
}

fn default_user_agent() -> String {
    String::from(
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36",
    )
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScrapeConfig {
    /// Fetch page text for search hits. Snippets alone are used when disabled.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Extracted text is truncated to this many characters.
    #[serde(default = "default_max_chars")]
    pub max_chars: usize,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            max_chars: default_max_chars(),
        }
    }
}
