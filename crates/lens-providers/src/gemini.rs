//! Gemini `generateContent` gateway.
//!
//! Every failure is classified into exactly one [`GenerationFailure`] kind:
//! safety blocks, unparseable output, and transport problems stay distinct so
//! callers can decide whether a retry makes sense.

use std::time::Duration;

use lens_config::GeminiConfig;
use lens_core::{GeneratedReport, GenerationFailure, SubjectEntities};
use serde::{Deserialize, Serialize};

use crate::{
    GenerationGateway, GenerationRequest, ProviderError, http::build_client, http::check_response,
    prompt,
};

const USER_AGENT: &str = concat!("lens/", env!("CARGO_PKG_VERSION"));

const HARM_CATEGORIES: [&str; 4] = [
    "HARM_CATEGORY_HARASSMENT",
    "HARM_CATEGORY_HATE_SPEECH",
    "HARM_CATEGORY_SEXUALLY_EXPLICIT",
    "HARM_CATEGORY_DANGEROUS_CONTENT",
];

/// Finish reasons that mean the candidate was withheld for safety.
const BLOCKING_FINISH_REASONS: [&str; 4] = ["SAFETY", "PROHIBITED_CONTENT", "BLOCKLIST", "SPII"];

// ── Wire types ─────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: [Content<'a>; 1],
    generation_config: GenerationConfig,
    safety_settings: Vec<SafetySetting>,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: [Part<'a>; 1],
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
}

#[derive(Serialize)]
struct SafetySetting {
    category: &'static str,
    threshold: &'static str,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

// ── Gateway ────────────────────────────────────────────────────────

pub struct GeminiGateway {
    http: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl GeminiGateway {
    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] if the HTTP client cannot be built.
    pub fn new(config: &GeminiConfig) -> Result<Self, ProviderError> {
        Ok(Self {
            http: build_client(USER_AGENT, Duration::from_secs(config.timeout_secs))?,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
        })
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.endpoint,
            urlencoding::encode(&self.model)
        )
    }

    /// Send one JSON-mode prompt and return the candidate text.
    async fn generate_json_text(&self, prompt: &str) -> Result<String, GenerationFailure> {
        let body = GenerateContentRequest {
            contents: [Content {
                role: "user",
                parts: [Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
            },
            safety_settings: HARM_CATEGORIES
                .iter()
                .map(|&category| SafetySetting {
                    category,
                    threshold: "BLOCK_NONE",
                })
                .collect(),
        };

        let resp = self
            .http
            .post(self.generate_url())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(transport)?;
        let resp = check_response(resp).await.map_err(transport)?;

        let data: GenerateContentResponse = resp
            .json()
            .await
            .map_err(|e| GenerationFailure::Malformed(format!("unreadable response envelope: {e}")))?;

        candidate_text(data)
    }
}

impl GenerationGateway for GeminiGateway {
    async fn extract_entities(&self, subject_text: &str) -> Result<SubjectEntities, GenerationFailure> {
        let text = self
            .generate_json_text(&prompt::entity_extraction_prompt(subject_text))
            .await?;
        serde_json::from_str::<SubjectEntities>(&text)
            .map_err(|e| GenerationFailure::Malformed(format!("invalid entity JSON: {e}")))
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<GeneratedReport, GenerationFailure> {
        let text = self.generate_json_text(&prompt::analysis_prompt(request)).await?;
        GeneratedReport::from_json(&text)
    }
}

fn transport(error: impl Into<ProviderError>) -> GenerationFailure {
    GenerationFailure::Transport(error.into().to_string())
}

/// Classify a `generateContent` response into text or a declared failure.
fn candidate_text(data: GenerateContentResponse) -> Result<String, GenerationFailure> {
    if let Some(reason) = data.prompt_feedback.and_then(|f| f.block_reason) {
        return Err(GenerationFailure::Blocked(format!("prompt blocked: {reason}")));
    }

    let Some(candidate) = data.candidates.into_iter().next() else {
        return Err(GenerationFailure::Blocked("no candidates returned".into()));
    };

    if let Some(reason) = candidate
        .finish_reason
        .as_deref()
        .filter(|r| BLOCKING_FINISH_REASONS.contains(r))
    {
        return Err(GenerationFailure::Blocked(format!("candidate withheld: {reason}")));
    }

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(GenerationFailure::Blocked("candidate has no text parts".into()));
    }
    Ok(text)
}
