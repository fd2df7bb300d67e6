use lens_config::LensConfig;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::output::output;

#[derive(Debug, Serialize)]
struct StatusReport {
    ready: bool,
    search_configured: bool,
    gemini_configured: bool,
    gemini_model: String,
    scrape_enabled: bool,
    default_language: String,
    bind_links: bool,
    /// Present when `ready` is false.
    #[serde(skip_serializing_if = "Option::is_none")]
    problem: Option<String>,
}

/// Handle `lens status`.
pub fn handle(flags: &GlobalFlags, config: &LensConfig) -> anyhow::Result<()> {
    output(&report(config), flags.format)
}

fn report(config: &LensConfig) -> StatusReport {
    let problem = config.require_ready().err().map(|e| e.to_string());
    StatusReport {
        ready: problem.is_none(),
        search_configured: config.search.is_configured(),
        gemini_configured: config.gemini.is_configured(),
        gemini_model: config.gemini.model.clone(),
        scrape_enabled: config.scrape.enabled,
        default_language: config.general.default_language.clone(),
        bind_links: config.general.bind_links,
        problem,
    }
}

#[cfg(test)]
mod tests {
    use lens_config::{GeminiConfig, SearchConfig};

    use super::*;

    #[test]
    fn default_config_is_not_ready() {
        let status = report(&LensConfig::default());
        assert!(!status.ready);
        assert!(!status.search_configured);
        assert!(status.problem.is_some());
    }

    #[test]
    fn configured_sections_are_ready() {
        let config = LensConfig {
            search: SearchConfig {
                api_key: "key".into(),
                engine_id: "cx".into(),
                ..Default::default()
            },
            gemini: GeminiConfig {
                api_key: "key".into(),
                ..Default::default()
            },
            ..Default::default()
        };
        let status = report(&config);
        assert!(status.ready);
        assert!(status.problem.is_none());
        let json = serde_json::to_value(&status).unwrap();
        assert!(json.get("problem").is_none());
        assert_eq!(json["gemini_model"], "gemini-2.5-pro");
    }
}
