use lens_core::PipelineError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RetrievalError {
    /// Every task finished (or the deadline passed) without registering
    /// a single evidence item.
    #[error("no evidence registered by {tasks} retrieval tasks")]
    NoEvidence { tasks: usize },
}

impl From<RetrievalError> for PipelineError {
    fn from(err: RetrievalError) -> Self {
        match err {
            RetrievalError::NoEvidence { .. } => Self::NoEvidenceFound,
        }
    }
}
