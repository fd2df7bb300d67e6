//! # lens-pipeline
//!
//! One grounded analysis, start to finish:
//!
//! ```text
//! subject → entities → query plan → fan-out → registry
//!         → context → generation → validation → scrub/bind → sources
//! ```
//!
//! Every stage after the fan-out is in-memory and sequential. The pipeline is
//! generic over its providers so tests can run it without a network.

mod settings;

pub use settings::PipelineSettings;

use std::collections::BTreeSet;
use std::sync::Arc;

use lens_config::LensConfig;
use lens_core::{
    AnalysisRequest, AnalysisResponse, GenerationFailure, OutputLanguage, PipelineError,
    SubjectEntities,
};
use lens_grounding::{ContextAssembler, SourceRegistry, ground_report};
use lens_providers::{
    GeminiGateway, GenerationGateway, GenerationRequest, GoogleSearchClient, HttpPageFetcher,
    PageFetcher, SearchProvider,
};
use lens_retrieval::{RetrievalFanout, plan_queries};

/// The pipeline wired to the production HTTP providers.
pub type LivePipeline = AnalysisPipeline<GoogleSearchClient, HttpPageFetcher, GeminiGateway>;

pub struct AnalysisPipeline<S, F, G> {
    fanout: RetrievalFanout<S, F>,
    gateway: Arc<G>,
    settings: PipelineSettings,
}

impl LivePipeline {
    /// Build the production pipeline from a loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a required section is unconfigured or an HTTP
    /// client cannot be built.
    pub fn from_config(config: &LensConfig) -> anyhow::Result<Self> {
        config.require_ready()?;
        let search = Arc::new(GoogleSearchClient::new(&config.search)?);
        let fetcher = Arc::new(HttpPageFetcher::new(&config.scrape)?);
        let gateway = Arc::new(GeminiGateway::new(&config.gemini)?);
        Ok(Self::new(
            search,
            Some(fetcher),
            gateway,
            PipelineSettings::from_config(config),
        ))
    }
}

impl<S, F, G> AnalysisPipeline<S, F, G>
where
    S: SearchProvider,
    F: PageFetcher,
    G: GenerationGateway,
{
    pub fn new(
        search: Arc<S>,
        fetcher: Option<Arc<F>>,
        gateway: Arc<G>,
        settings: PipelineSettings,
    ) -> Self {
        Self {
            fanout: RetrievalFanout::new(search, fetcher, settings.fanout.clone()),
            gateway,
            settings,
        }
    }

    /// Run one analysis.
    ///
    /// # Errors
    ///
    /// Returns the [`PipelineError`] for the first terminal failure: an empty
    /// subject, no evidence, or a blocked, malformed, or unreachable
    /// generator. Grounding faults surface as [`PipelineError::Internal`].
    pub async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResponse, PipelineError> {
        let subject = request.subject_text.trim();
        if subject.is_empty() {
            return Err(PipelineError::InvalidRequest(
                "subject_text must not be empty".into(),
            ));
        }
        let language = OutputLanguage::resolve(
            request.output_language.as_deref(),
            self.settings.default_language,
        );

        let entities = self.resolve_entities(subject).await?;
        tracing::info!(
            company = %entities.company,
            role = %entities.role,
            location = %entities.location,
            %language,
            "analysis started"
        );

        // Retrieval
        let tasks = plan_queries(&entities);
        let registry = Arc::new(SourceRegistry::new());
        self.fanout.run(tasks, &registry).await?;

        let blocks = ContextAssembler::new(self.settings.context_char_budget).assemble(&registry.all());
        if blocks.is_empty() {
            tracing::warn!(evidence = registry.len(), "no evidence item carries usable text");
            return Err(PipelineError::NoEvidenceFound);
        }
        let given = ContextAssembler::source_ids(&blocks);
        tracing::info!(evidence = registry.len(), blocks = blocks.len(), "context assembled");

        // Generation
        let generated = self
            .gateway
            .generate(&GenerationRequest {
                context_payload: ContextAssembler::render(&blocks),
                entities: entities.clone(),
                applicant_text: request.applicant_text.clone(),
                language,
                current_date: chrono::Local::now().date_naive(),
            })
            .await?;

        // Grounding
        let claimed_ids = generated.claimed_ids;
        let grounded = ground_report(generated.report, &registry, &given, self.settings.bind_links)
            .map_err(|e| PipelineError::Internal(e.into()))?;
        log_claim_disagreement(&claimed_ids, &grounded.validation.grounded_ids);

        tracing::info!(
            mentioned = grounded.validation.mentioned_ids.len(),
            grounded = grounded.validation.grounded_ids.len(),
            scrubbed = grounded.validation.ungrounded_ids().count(),
            "analysis complete"
        );

        Ok(AnalysisResponse {
            company_name: entities.company,
            report: grounded.report,
            sources: grounded.sources,
        })
    }

    /// Ask the generator for entities, falling back to the raw subject.
    ///
    /// Only a transport failure is terminal: if the generator cannot be
    /// reached here, the report call would fail the same way.
    async fn resolve_entities(&self, subject: &str) -> Result<SubjectEntities, PipelineError> {
        if !self.settings.extract_entities {
            return Ok(SubjectEntities::from_raw(subject));
        }
        match self.gateway.extract_entities(subject).await {
            Ok(entities) => Ok(entities.or_subject(subject)),
            Err(GenerationFailure::Transport(message)) => {
                Err(PipelineError::GenerationTransport(message))
            }
            Err(failure) => {
                tracing::warn!(%failure, "entity extraction unavailable, using the subject as company");
                Ok(SubjectEntities::from_raw(subject))
            }
        }
    }
}

fn log_claim_disagreement(claimed: &[u64], grounded: &BTreeSet<lens_core::SourceId>) {
    let claimed: BTreeSet<u64> = claimed.iter().copied().collect();
    let computed: BTreeSet<u64> = grounded.iter().map(|id| u64::from(id.get())).collect();
    if claimed != computed {
        tracing::debug!(
            ?claimed,
            ?computed,
            "generator's cited_ids differ from grounded citations"
        );
    }
}
