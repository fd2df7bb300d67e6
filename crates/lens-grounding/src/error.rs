use lens_core::SourceId;

#[derive(Debug, thiserror::Error)]
pub enum GroundingError {
    #[error("grounded source {0} is not registered")]
    MissingSource(SourceId),

    /// The rewritten report cites a different id set than was grounded.
    #[error("citations after rewrite do not match grounded sources: {detail}")]
    CitationMismatch { detail: String },
}
