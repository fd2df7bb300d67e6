use std::path::Path;

use anyhow::Context;
use lens_config::LensConfig;
use lens_core::{AnalysisRequest, PipelineError};
use lens_pipeline::LivePipeline;

use crate::cli::GlobalFlags;
use crate::cli::commands::AnalyzeArgs;
use crate::output::output;

/// Handle `lens analyze`.
///
/// A pipeline failure is printed as an `ErrorResponse` document and then
/// returned, so the process exits non-zero.
pub async fn handle(args: &AnalyzeArgs, flags: &GlobalFlags, config: &LensConfig) -> anyhow::Result<()> {
    let request = build_request(args)?;

    let mut config = config.clone();
    if args.no_links {
        config.general.bind_links = false;
    }
    let pipeline = LivePipeline::from_config(&config)?;

    match pipeline.analyze(&request).await {
        Ok(response) => output(&response, flags.format),
        Err(error) => {
            if let PipelineError::Internal(cause) = &error {
                tracing::error!(error = %format!("{cause:#}"), "analysis failed unexpectedly");
            }
            output(&error.to_response(), flags.format)?;
            Err(anyhow::Error::new(error))
        }
    }
}

fn build_request(args: &AnalyzeArgs) -> anyhow::Result<AnalysisRequest> {
    let applicant_text = args.resume.as_deref().map(read_resume).transpose()?;
    Ok(AnalysisRequest {
        subject_text: args.subject.clone(),
        applicant_text,
        output_language: args.lang.clone(),
    })
}

fn read_resume(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("failed to read resume file '{}'", path.display()))
}
