//! # lens-core
//!
//! Core types and error taxonomy for Lens.
//!
//! This crate provides the foundational types shared across all Lens crates:
//! - Evidence items, their request-scoped ids, and URL-derived categories
//! - Query planning types (subject entities, topics, query tasks)
//! - The typed generated-report tree scanned for citation marks
//! - Output language codes
//! - Pipeline request/response shapes
//! - The terminal error taxonomy returned to callers
//! - Character-safe truncation shared by scraping and context assembly

pub mod errors;
pub mod evidence;
pub mod language;
pub mod query;
pub mod report;
pub mod responses;
pub mod text;

pub use errors::{ErrorKind, GenerationFailure, PipelineError};
pub use evidence::{ContextBlock, EvidenceCandidate, EvidenceCategory, EvidenceItem, SourceId};
pub use language::OutputLanguage;
pub use query::{QueryTask, QueryTopic, SubjectEntities};
pub use report::{GeneratedReport, ReportNode};
pub use responses::{AnalysisRequest, AnalysisResponse, ErrorResponse, SourceRef};
