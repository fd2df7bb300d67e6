//! # lens-grounding
//!
//! Ties generated text back to retrieved evidence.
//!
//! - [`SourceRegistry`] assigns request-scoped ids to evidence.
//! - [`ContextAssembler`] renders evidence as `[Source ID: N]` blocks.
//! - [`citation`] finds `[N]` marks and checks them against the registry.
//! - [`scrub`] removes ungrounded marks and optionally binds links.
//! - [`reconcile`] lists exactly the sources the final report cites.

pub mod citation;
pub mod context;
pub mod error;
pub mod reconcile;
pub mod registry;
pub mod scrub;

use std::collections::BTreeSet;

use lens_core::{ReportNode, SourceId, SourceRef};

pub use citation::{CitationMark, ValidationOutcome, validate};
pub use context::ContextAssembler;
pub use error::GroundingError;
pub use reconcile::reconcile;
pub use registry::{Registration, SourceRegistry};

/// A report whose citations all name evidence in [`GroundedReport::sources`].
#[derive(Debug, Clone, PartialEq)]
pub struct GroundedReport {
    pub report: ReportNode,
    pub sources: Vec<SourceRef>,
    pub validation: ValidationOutcome,
}

/// Validate, scrub (or bind), and reconcile a generated report.
///
/// `given` holds the ids whose evidence was in the generator's context (see
/// [`ContextAssembler::source_ids`]). A citation of any other id is removed,
/// even when the registry knows it.
///
/// # Errors
///
/// Returns [`GroundingError`] if the rewritten report and the source list
/// would disagree. Either case is a fault in this crate, never in the input.
pub fn ground_report(
    report: ReportNode,
    registry: &SourceRegistry,
    given: &BTreeSet<SourceId>,
    bind_links: bool,
) -> Result<GroundedReport, GroundingError> {
    let registered = registry.ids();
    let given: BTreeSet<SourceId> = given.intersection(&registered).copied().collect();
    let validation = validate(&report, &given);
    let grounded = &validation.grounded_ids;

    let ungrounded: Vec<u32> = validation.ungrounded_ids().map(|id| id.get()).collect();
    if !ungrounded.is_empty() {
        tracing::info!(?ungrounded, "removing citations with no evidence");
    }

    let report = if bind_links {
        scrub::bind_report(report, grounded, registry)
    } else {
        scrub::scrub_report(report, grounded)
    };

    let remaining = citation::mentioned_ids(&report);
    if &remaining != grounded {
        return Err(GroundingError::CitationMismatch {
            detail: format!("grounded {grounded:?}, remaining {remaining:?}"),
        });
    }

    let sources = reconcile(grounded, registry)?;
    tracing::debug!(
        mentioned = validation.mentioned_ids.len(),
        grounded = sources.len(),
        "report grounded"
    );
    Ok(GroundedReport {
        report,
        sources,
        validation,
    })
}
