//! General pipeline configuration.

use serde::{Deserialize, Serialize};

fn default_language() -> String {
    String::from("zh-CN")
}

const fn default_context_char_budget() -> usize {
    5000
}

const fn default_bind_links() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Output language used when a request omits one or sends an unknown code.
    #[serde(default = "default_language")]
    pub default_language: String,

    /// Per-source character cap for generator context blocks.
    #[serde(default = "default_context_char_budget")]
    pub context_char_budget: usize,

    /// Rewrite grounded citation marks into links to their source URL.
    #[serde(default = "default_bind_links")]
    pub bind_links: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_language: default_language(),
            context_char_budget: default_context_char_budget(),
            bind_links: default_bind_links(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = GeneralConfig::default();
        assert_eq!(config.default_language, "zh-CN");
        assert_eq!(config.context_char_budget, 5000);
        assert!(config.bind_links);
    }
}
