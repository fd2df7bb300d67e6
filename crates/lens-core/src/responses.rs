//! Pipeline request and response shapes.
//!
//! These structs define the JSON a caller sends to and receives from an
//! analysis run (see `lens analyze`).

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::ErrorKind;
use crate::evidence::{EvidenceCategory, EvidenceItem, SourceId};
use crate::report::ReportNode;

/// An analysis request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AnalysisRequest {
    /// Free text naming the company (optionally role and location).
    pub subject_text: String,
    /// Applicant resume or bio used for value matching.
    #[serde(default)]
    pub applicant_text: Option<String>,
    /// Requested output language code (`en`, `zh-CN`, `zh-TW`).
    #[serde(default)]
    pub output_language: Option<String>,
}

/// A cited source as returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SourceRef {
    pub id: SourceId,
    pub title: String,
    pub url: String,
    pub snippet: String,
    pub category: EvidenceCategory,
}

impl From<&EvidenceItem> for SourceRef {
    fn from(item: &EvidenceItem) -> Self {
        Self {
            id: item.id,
            title: item.title.clone(),
            url: item.url.clone(),
            snippet: item.snippet.clone(),
            category: item.category,
        }
    }
}

/// Successful analysis output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AnalysisResponse {
    pub company_name: String,
    /// Scrubbed (and optionally link-bound) report.
    #[schemars(with = "serde_json::Value")]
    pub report: ReportNode,
    /// Exactly the sources cited by `report`, ascending by id.
    pub sources: Vec<SourceRef>,
}

/// Terminal failure output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ErrorResponse {
    pub error: ErrorKind,
    pub message: String,
}
