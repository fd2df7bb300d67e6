//! # lens-providers
//!
//! External collaborators for the Lens pipeline and their HTTP clients:
//! - [`SearchProvider`]: query → ranked `{title, url, snippet}` hits
//!   ([`GoogleSearchClient`], Google Custom Search JSON API)
//! - [`PageFetcher`]: url → visible page text ([`HttpPageFetcher`])
//! - [`GenerationGateway`]: context payload + instructions → generated report
//!   or a declared [`GenerationFailure`] ([`GeminiGateway`])
//!
//! The pipeline is generic over these traits so tests can substitute
//! in-memory fakes for every network call.

pub mod gemini;
pub mod google;
pub mod prompt;
pub mod scrape;

mod error;
mod http;

pub use error::ProviderError;
pub use gemini::GeminiGateway;
pub use google::GoogleSearchClient;
pub use scrape::HttpPageFetcher;

use std::future::Future;

use chrono::NaiveDate;
use lens_core::{GeneratedReport, GenerationFailure, OutputLanguage, SubjectEntities};
use serde::{Deserialize, Serialize};

// ── Types ──────────────────────────────────────────────────────────

/// One search result as returned by a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub title: String,
    pub url: String,
    pub snippet: String,
}

/// Everything the generator receives for one report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// `[Source ID: N]`-tagged evidence blocks.
    pub context_payload: String,
    pub entities: SubjectEntities,
    pub applicant_text: Option<String>,
    pub language: OutputLanguage,
    pub current_date: NaiveDate,
}

// ── Traits ─────────────────────────────────────────────────────────

/// Web search.
pub trait SearchProvider: Send + Sync + 'static {
    /// Run one query and return at most `max_results` hits.
    fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> impl Future<Output = Result<Vec<SearchHit>, ProviderError>> + Send;
}

/// Page text extraction.
pub trait PageFetcher: Send + Sync + 'static {
    /// Fetch a page and return its visible text, or `Ok(None)` when the page
    /// has no usable text.
    fn fetch_text(
        &self,
        url: &str,
    ) -> impl Future<Output = Result<Option<String>, ProviderError>> + Send;
}

/// The text-generation backend.
pub trait GenerationGateway: Send + Sync + 'static {
    /// Extract company, role, and location from free subject text.
    fn extract_entities(
        &self,
        subject_text: &str,
    ) -> impl Future<Output = Result<SubjectEntities, GenerationFailure>> + Send;

    /// Produce a report grounded in `request.context_payload`.
    fn generate(
        &self,
        request: &GenerationRequest,
    ) -> impl Future<Output = Result<GeneratedReport, GenerationFailure>> + Send;
}
