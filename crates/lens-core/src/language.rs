//! Report output languages.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub enum OutputLanguage {
    #[serde(rename = "en")]
    English,
    #[default]
    #[serde(rename = "zh-CN")]
    SimplifiedChinese,
    #[serde(rename = "zh-TW")]
    TraditionalChinese,
}

impl OutputLanguage {
    /// Parse a language code. Matching is case-insensitive and accepts `_`.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().replace('_', "-").to_ascii_lowercase().as_str() {
            "en" | "en-us" | "en-gb" => Some(Self::English),
            "zh-cn" | "zh-hans" | "zh" => Some(Self::SimplifiedChinese),
            "zh-tw" | "zh-hant" | "zh-hk" => Some(Self::TraditionalChinese),
            _ => None,
        }
    }

    /// Resolve an optional request code, falling back to `default` when the
    /// code is missing or unknown.
    #[must_use]
    pub fn resolve(code: Option<&str>, default: Self) -> Self {
        code.and_then(Self::from_code).unwrap_or(default)
    }

    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::English => "en",
            Self::SimplifiedChinese => "zh-CN",
            Self::TraditionalChinese => "zh-TW",
        }
    }

    /// Language name as written into generation instructions.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::English => "English",
            Self::SimplifiedChinese => "Simplified Chinese (简体中文)",
            Self::TraditionalChinese => "Traditional Chinese (繁體中文)",
        }
    }
}

impl std::fmt::Display for OutputLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_codes() {
        assert_eq!(OutputLanguage::from_code("en"), Some(OutputLanguage::English));
        assert_eq!(
            OutputLanguage::from_code("zh_TW"),
            Some(OutputLanguage::TraditionalChinese)
        );
        assert_eq!(
            OutputLanguage::from_code("ZH-cn"),
            Some(OutputLanguage::SimplifiedChinese)
        );
        assert_eq!(OutputLanguage::from_code("fr"), None);
    }

    #[test]
    fn unknown_codes_resolve_to_default() {
        assert_eq!(
            OutputLanguage::resolve(Some("fr"), OutputLanguage::English),
            OutputLanguage::English
        );
        assert_eq!(
            OutputLanguage::resolve(None, OutputLanguage::default()),
            OutputLanguage::SimplifiedChinese
        );
    }

    #[test]
    fn serializes_as_code() {
        let json = serde_json::to_string(&OutputLanguage::TraditionalChinese).unwrap();
        assert_eq!(json, "\"zh-TW\"");
    }
}
