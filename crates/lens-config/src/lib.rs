//! # lens-config
//!
//! Layered configuration loading for Lens using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`LENS_*` prefix, `__` as separator)
//! 2. Project-level `.lens/config.toml`
//! 3. User-level `~/.config/lens/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `LENS_SEARCH__API_KEY` -> `search.api_key`,
//! `LENS_FANOUT__MAX_IN_FLIGHT` -> `fanout.max_in_flight`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! The loaded [`LensConfig`] is built once at process start and handed to the
//! provider clients and the pipeline; nothing reads the environment later.
//!
//! # Usage
//!
//! ```no_run
//! use lens_config::LensConfig;
//!
//! let config = LensConfig::load_with_dotenv().expect("config");
//! config.require_ready().expect("search and gemini configured");
//! ```

mod error;
mod fanout;
mod gemini;
mod general;
mod scrape;
mod search;

pub use error::ConfigError;
pub use fanout::FanoutConfig;
pub use gemini::GeminiConfig;
pub use general::GeneralConfig;
pub use scrape::ScrapeConfig;
pub use search::SearchConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Largest `num` the Custom Search API accepts.
const MAX_RESULTS_PER_QUERY: u32 = 10;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LensConfig {
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub scrape: ScrapeConfig,
    #[serde(default)]
    pub gemini: GeminiConfig,
    #[serde(default)]
    pub fanout: FanoutConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl LensConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] when a source cannot be parsed or a
    /// value has the wrong type.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// See [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// Extract and validate a config from an arbitrary figment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] on extraction failure and
    /// [`ConfigError::InvalidValue`] for out-of-range limits.
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".lens/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("LENS_").split("__"))
    }

    /// Check numeric limits that would otherwise stall or misconfigure the fan-out.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fanout.max_in_flight == 0 {
            return Err(ConfigError::InvalidValue {
                field: "fanout.max_in_flight".into(),
                reason: "must be at least 1".into(),
            });
        }
        if self.fanout.deadline_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "fanout.deadline_secs".into(),
                reason: "must be at least 1".into(),
            });
        }
        if !(1..=MAX_RESULTS_PER_QUERY).contains(&self.search.results_per_query) {
            return Err(ConfigError::InvalidValue {
                field: "search.results_per_query".into(),
                reason: format!("must be between 1 and {MAX_RESULTS_PER_QUERY}"),
            });
        }
        if self.general.context_char_budget == 0 {
            return Err(ConfigError::InvalidValue {
                field: "general.context_char_budget".into(),
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }

    /// Ensure the sections an analysis run needs are present.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotConfigured`] for the first missing section.
    pub fn require_ready(&self) -> Result<(), ConfigError> {
        if !self.search.is_configured() {
            return Err(ConfigError::NotConfigured {
                section: "search".into(),
            });
        }
        if !self.gemini.is_configured() {
            return Err(ConfigError::NotConfigured {
                section: "gemini".into(),
            });
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("lens").join("config.toml"))
    }

    /// Load `.env` from the workspace root.
    ///
    /// Walks up from `CARGO_MANIFEST_DIR` (if available) or current dir looking
    /// for a `.env` file. Silently does nothing if no `.env` is found.
    fn load_dotenv_from_workspace() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            // crate -> crates/ -> workspace root
            for _ in 0..3 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        let _ = dotenvy::dotenv();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid_but_not_ready() {
        let config = LensConfig::default();
        assert!(config.validate().is_ok());
        assert!(matches!(
            config.require_ready(),
            Err(ConfigError::NotConfigured { section }) if section == "search"
        ));
    }

    #[test]
    fn gemini_checked_after_search() {
        let mut config = LensConfig::default();
        config.search.api_key = "key".into();
        config.search.engine_id = "cx".into();
        assert!(matches!(
            config.require_ready(),
            Err(ConfigError::NotConfigured { section }) if section == "gemini"
        ));
        config.gemini.api_key = "AIza".into();
        assert!(config.require_ready().is_ok());
    }

    #[test]
    fn zero_concurrency_rejected() {
        let mut config = LensConfig::default();
        config.fanout.max_in_flight = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field, .. }) if field == "fanout.max_in_flight"
        ));
    }

    #[test]
    fn results_per_query_capped() {
        let mut config = LensConfig::default();
        config.search.results_per_query = 11;
        assert!(config.validate().is_err());
    }
}
