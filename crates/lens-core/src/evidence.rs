//! Evidence items and their request-scoped identities.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Request-scoped evidence identifier.
///
/// Assigned by the source registry starting at 1. An id from one request has
/// no meaning in any other.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(transparent)]
pub struct SourceId(u32);

impl SourceId {
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for SourceId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for SourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Presentation hint derived from an evidence URL. Never affects grounding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceCategory {
    ProfessionalNetwork,
    ReviewSite,
    #[default]
    Web,
}

const PROFESSIONAL_NETWORK_DOMAINS: &[&str] = &["linkedin.com"];
const REVIEW_SITE_DOMAINS: &[&str] = &["glassdoor.com", "indeed.com"];

impl EvidenceCategory {
    /// Classify a URL by its host. Unparseable URLs fall back to [`Self::Web`].
    #[must_use]
    pub fn from_url(raw: &str) -> Self {
        let Some(host) = url::Url::parse(raw)
            .ok()
            .and_then(|u| u.host_str().map(str::to_ascii_lowercase))
        else {
            return Self::Web;
        };

        if PROFESSIONAL_NETWORK_DOMAINS
            .iter()
            .any(|d| host_matches(&host, d))
        {
            Self::ProfessionalNetwork
        } else if REVIEW_SITE_DOMAINS.iter().any(|d| host_matches(&host, d)) {
            Self::ReviewSite
        } else {
            Self::Web
        }
    }
}

fn host_matches(host: &str, domain: &str) -> bool {
    host == domain
        || host
            .strip_suffix(domain)
            .is_some_and(|prefix| prefix.ends_with('.'))
}

/// A search hit (optionally with scraped page text) offered for registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceCandidate {
    pub title: String,
    pub url: String,
    pub snippet: String,
    pub body: Option<String>,
}

/// One registered piece of evidence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceItem {
    pub id: SourceId,
    pub title: String,
    /// Deduplication key and citation link target.
    pub url: String,
    pub snippet: String,
    pub body: Option<String>,
    pub category: EvidenceCategory,
}

impl EvidenceItem {
    #[must_use]
    pub fn from_candidate(id: SourceId, candidate: EvidenceCandidate) -> Self {
        let category = EvidenceCategory::from_url(&candidate.url);
        Self {
            id,
            title: candidate.title,
            url: candidate.url,
            snippet: candidate.snippet,
            body: candidate.body.filter(|b| !b.trim().is_empty()),
            category,
        }
    }

    /// The evidentiary text handed to the generator: body preferred over snippet.
    /// `None` when neither carries any text.
    #[must_use]
    pub fn usable_text(&self) -> Option<&str> {
        self.body
            .as_deref()
            .filter(|b| !b.trim().is_empty())
            .or_else(|| Some(self.snippet.as_str()).filter(|s| !s.trim().is_empty()))
    }

    #[must_use]
    pub fn has_body(&self) -> bool {
        self.body.as_deref().is_some_and(|b| !b.trim().is_empty())
    }
}

/// An id-tagged, length-capped piece of generator context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextBlock {
    pub source_id: SourceId,
    pub text: String,
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("https://www.linkedin.com/company/acme", EvidenceCategory::ProfessionalNetwork)]
    #[case("https://linkedin.com/in/someone", EvidenceCategory::ProfessionalNetwork)]
    #[case("https://www.glassdoor.com/Reviews/acme.htm", EvidenceCategory::ReviewSite)]
    #[case("https://uk.indeed.com/cmp/Acme/reviews", EvidenceCategory::ReviewSite)]
    #[case("https://notlinkedin.com/acme", EvidenceCategory::Web)]
    #[case("https://acme.example/about", EvidenceCategory::Web)]
    #[case("not a url", EvidenceCategory::Web)]
    fn categorizes_by_host(#[case] url: &str, #[case] expected: EvidenceCategory) {
        assert_eq!(EvidenceCategory::from_url(url), expected);
    }

    fn item(snippet: &str, body: Option<&str>) -> EvidenceItem {
        EvidenceItem::from_candidate(
            SourceId::new(1),
            EvidenceCandidate {
                title: "t".into(),
                url: "https://a.test".into(),
                snippet: snippet.into(),
                body: body.map(String::from),
            },
        )
    }

    #[test]
    fn usable_text_prefers_body() {
        assert_eq!(item("snip", Some("page")).usable_text(), Some("page"));
        assert_eq!(item("snip", None).usable_text(), Some("snip"));
        assert_eq!(item("snip", Some("   ")).usable_text(), Some("snip"));
        assert_eq!(item("", None).usable_text(), None);
    }

    #[test]
    fn blank_body_is_not_stored() {
        let item = item("snip", Some("\n\t"));
        assert!(item.body.is_none());
        assert!(!item.has_body());
    }
}
