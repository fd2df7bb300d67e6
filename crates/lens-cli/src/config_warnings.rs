use lens_config::LensConfig;

/// Warn when `LENS_*` variables exist for a section that still looks unset.
pub fn warn_unconfigured(config: &LensConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &LensConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();

    let mut warnings = Vec::new();

    if !config.search.is_configured() && has_env_prefix(&env_keys, "LENS_SEARCH") {
        warnings.push(
            "Search config appears unset while LENS_SEARCH* env vars exist. Use double underscores (example: LENS_SEARCH__API_KEY)."
                .to_string(),
        );
    }

    if !config.gemini.is_configured() && has_env_prefix(&env_keys, "LENS_GEMINI") {
        warnings.push(
            "Gemini config appears unset while LENS_GEMINI* env vars exist. Use double underscores (example: LENS_GEMINI__API_KEY)."
                .to_string(),
        );
    }

    warnings
}

fn has_env_prefix(keys: &[String], prefix: &str) -> bool {
    keys.iter().any(|key| key.starts_with(prefix))
}

#[cfg(test)]
mod tests {
    use lens_config::{GeminiConfig, LensConfig, SearchConfig};

    use super::collect_unconfigured_warnings;

    #[test]
    fn warns_for_single_underscore_variables() {
        let warnings = collect_unconfigured_warnings(
            &LensConfig::default(),
            vec![
                ("LENS_SEARCH_API_KEY".to_string(), "key".to_string()),
                ("LENS_GEMINI_API_KEY".to_string(), "key".to_string()),
            ],
        );
        assert_eq!(warnings.len(), 2);
    }

    #[test]
    fn silent_without_env_or_when_configured() {
        assert!(collect_unconfigured_warnings(&LensConfig::default(), Vec::new()).is_empty());

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
        let warnings = collect_unconfigured_warnings(
            &config,
            vec![
                ("LENS_SEARCH__API_KEY".to_string(), "key".to_string()),
                ("LENS_GEMINI__API_KEY".to_string(), "key".to_string()),
            ],
        );
        assert!(warnings.is_empty());
    }
}
