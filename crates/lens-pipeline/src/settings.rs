use lens_config::LensConfig;
use lens_core::OutputLanguage;
use lens_retrieval::FanoutSettings;

/// Pipeline knobs, resolved once from [`LensConfig`].
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub fanout: FanoutSettings,
    /// Per-block character cap for generator context.
    pub context_char_budget: usize,
    /// Used when a request names no language, or an unknown one.
    pub default_language: OutputLanguage,
    /// Rewrite grounded marks as `[N](url)`.
    pub bind_links: bool,
    pub extract_entities: bool,
}

impl PipelineSettings {
    #[must_use]
    pub fn from_config(config: &LensConfig) -> Self {
        let default_language =
            OutputLanguage::resolve(Some(&config.general.default_language), OutputLanguage::default());
        if OutputLanguage::from_code(&config.general.default_language).is_none() {
            tracing::warn!(
                code = %config.general.default_language,
                fallback = %default_language,
                "unknown default language"
            );
        }
        Self {
            fanout: FanoutSettings::from_config(config),
            context_char_budget: config.general.context_char_budget,
            default_language,
            bind_links: config.general.bind_links,
            extract_entities: config.gemini.extract_entities,
        }
    }
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self::from_config(&LensConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_config() {
        let settings = PipelineSettings::default();
        assert_eq!(settings.default_language, OutputLanguage::SimplifiedChinese);
        assert_eq!(settings.context_char_budget, 5000);
        assert!(settings.bind_links);
        assert!(settings.extract_entities);
        assert_eq!(settings.fanout.max_in_flight, 8);
    }

    #[test]
    fn unknown_default_language_falls_back() {
        let mut config = LensConfig::default();
        config.general.default_language = "klingon".into();
        assert_eq!(
            PipelineSettings::from_config(&config).default_language,
            OutputLanguage::SimplifiedChinese
        );
    }

    #[test]
    fn english_default() {
        let mut config = LensConfig::default();
        config.general.default_language = "en".into();
        assert_eq!(
            PipelineSettings::from_config(&config).default_language,
            OutputLanguage::English
        );
    }
}
