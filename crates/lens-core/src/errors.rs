//! Terminal error taxonomy for a pipeline run.
//!
//! Soft failures (a single search or scrape going wrong) never appear here;
//! they are absorbed by the retrieval fan-out. Everything in this module ends
//! the request and is reported to the caller under a stable [`ErrorKind`].

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::responses::ErrorResponse;

/// Stable, machine-readable name for a terminal pipeline outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NoEvidenceFound,
    GenerationBlocked,
    GenerationMalformed,
    GenerationTransportError,
    InvalidRequest,
    InternalError,
}

impl ErrorKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoEvidenceFound => "no_evidence_found",
            Self::GenerationBlocked => "generation_blocked",
            Self::GenerationMalformed => "generation_malformed",
            Self::GenerationTransportError => "generation_transport_error",
            Self::InvalidRequest => "invalid_request",
            Self::InternalError => "internal_error",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A declared failure from the generation backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationFailure {
    /// Content-safety rejection.
    #[error("generation blocked: {0}")]
    Blocked(String),

    /// Output did not parse into the expected report structure.
    #[error("generation output malformed: {0}")]
    Malformed(String),

    /// Backend unreachable, timed out, or returned an error status.
    #[error("generation transport error: {0}")]
    Transport(String),
}

/// Errors that end a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Retrieval registered zero evidence items.
    #[error("no evidence found for this subject")]
    NoEvidenceFound,

    #[error("generation blocked by content safety: {0}")]
    GenerationBlocked(String),

    #[error("generation returned malformed output: {0}")]
    GenerationMalformed(String),

    #[error("generation backend unavailable: {0}")]
    GenerationTransport(String),

    /// The request itself cannot be processed (e.g. empty subject).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Catch-all for unexpected faults.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl PipelineError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NoEvidenceFound => ErrorKind::NoEvidenceFound,
            Self::GenerationBlocked(_) => ErrorKind::GenerationBlocked,
            Self::GenerationMalformed(_) => ErrorKind::GenerationMalformed,
            Self::GenerationTransport(_) => ErrorKind::GenerationTransportError,
            Self::InvalidRequest(_) => ErrorKind::InvalidRequest,
            Self::Internal(_) => ErrorKind::InternalError,
        }
    }

    /// Render the error as the caller-facing response body.
    ///
    /// Internal faults get a fixed message; their detail belongs in the logs.
    #[must_use]
    pub fn to_response(&self) -> ErrorResponse {
        let message = match self {
            Self::Internal(_) => String::from("an unexpected internal error occurred"),
            other => other.to_string(),
        };
        ErrorResponse {
            error: self.kind(),
            message,
        }
    }
}

impl From<GenerationFailure> for PipelineError {
    fn from(failure: GenerationFailure) -> Self {
        match failure {
            GenerationFailure::Blocked(reason) => Self::GenerationBlocked(reason),
            GenerationFailure::Malformed(detail) => Self::GenerationMalformed(detail),
            GenerationFailure::Transport(detail) => Self::GenerationTransport(detail),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_failures_keep_their_kind() {
        let blocked: PipelineError = GenerationFailure::Blocked("SAFETY".into()).into();
        let malformed: PipelineError = GenerationFailure::Malformed("eof".into()).into();
        let transport: PipelineError = GenerationFailure::Transport("503".into()).into();

        assert_eq!(blocked.kind(), ErrorKind::GenerationBlocked);
        assert_eq!(malformed.kind(), ErrorKind::GenerationMalformed);
        assert_eq!(transport.kind(), ErrorKind::GenerationTransportError);
    }

    #[test]
    fn kinds_serialize_as_snake_case() {
        let json = serde_json::to_string(&ErrorKind::GenerationTransportError).unwrap();
        assert_eq!(json, "\"generation_transport_error\"");
        assert_eq!(ErrorKind::NoEvidenceFound.to_string(), "no_evidence_found");
    }

    #[test]
    fn internal_errors_hide_detail_from_callers() {
        let err = PipelineError::Internal(anyhow::anyhow!("registry lost item 4"));
        let response = err.to_response();
        assert_eq!(response.error, ErrorKind::InternalError);
        assert!(!response.message.contains("item 4"));
    }
}
