//! Bounded, deadline-limited retrieval fan-out.
//!
//! Each [`QueryTask`] runs as its own tokio task behind a semaphore permit.
//! A task searches, optionally fetches page text for hits that have none yet,
//! and registers the results. Individual failures are logged and absorbed;
//! only an empty registry at the end is an error.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use lens_config::LensConfig;
use lens_core::{EvidenceCandidate, QueryTask};
use lens_grounding::{Registration, SourceRegistry};
use lens_providers::{PageFetcher, ProviderError, SearchHit, SearchProvider};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio::time::Instant;

use crate::RetrievalError;

/// Limits applied to one fan-out run.
#[derive(Debug, Clone)]
pub struct FanoutSettings {
    /// Concurrent tasks. Each task issues its provider calls one at a time.
    pub max_in_flight: usize,
    /// Deadline for the whole batch.
    pub deadline: Duration,
    /// Courtesy pause before a task's first call.
    pub inter_task_delay: Duration,
    /// Hits requested per query.
    pub results_per_query: usize,
    pub search_timeout: Duration,
    pub fetch_timeout: Duration,
    /// Fetch page text for hits that have no body yet.
    pub fetch_pages: bool,
}

impl FanoutSettings {
    #[must_use]
    pub fn from_config(config: &LensConfig) -> Self {
        Self {
            max_in_flight: config.fanout.max_in_flight,
            deadline: Duration::from_secs(config.fanout.deadline_secs),
            inter_task_delay: Duration::from_millis(config.fanout.inter_task_delay_ms),
            results_per_query: config.search.results_per_query as usize,
            search_timeout: Duration::from_secs(config.search.timeout_secs),
            fetch_timeout: Duration::from_secs(config.scrape.timeout_secs),
            fetch_pages: config.scrape.enabled,
        }
    }
}

impl Default for FanoutSettings {
    fn default() -> Self {
        Self::from_config(&LensConfig::default())
    }
}

/// What a fan-out run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FanoutSummary {
    pub tasks: usize,
    /// Tasks whose search call failed or timed out.
    pub failed_tasks: usize,
    /// Tasks still running when the deadline passed.
    pub cancelled_tasks: usize,
    pub hits: usize,
    /// Evidence items created by this run.
    pub new_items: usize,
    pub pages_fetched: usize,
    pub deadline_hit: bool,
}

#[derive(Debug, Default)]
struct TaskOutcome {
    failed: bool,
    hits: usize,
    new_items: usize,
    pages_fetched: usize,
}

impl TaskOutcome {
    fn failed() -> Self {
        Self {
            failed: true,
            ..Self::default()
        }
    }
}

/// Runs query tasks against a search provider and an optional page fetcher.
pub struct RetrievalFanout<S, F> {
    search: Arc<S>,
    fetcher: Option<Arc<F>>,
    settings: FanoutSettings,
}

impl<S: SearchProvider, F: PageFetcher> RetrievalFanout<S, F> {
    pub const fn new(search: Arc<S>, fetcher: Option<Arc<F>>, settings: FanoutSettings) -> Self {
        Self {
            search,
            fetcher,
            settings,
        }
    }

    #[must_use]
    pub const fn settings(&self) -> &FanoutSettings {
        &self.settings
    }

    /// Run every task, registering evidence into `registry`.
    ///
    /// Failed tasks never cancel their siblings. When the deadline passes,
    /// running tasks are aborted and awaited, so the registry no longer
    /// changes once this returns. Whatever was registered is kept.
    ///
    /// # Errors
    ///
    /// Returns [`RetrievalError::NoEvidence`] if the registry is still empty
    /// once the batch settles.
    pub async fn run(
        &self,
        tasks: Vec<QueryTask>,
        registry: &Arc<SourceRegistry>,
    ) -> Result<FanoutSummary, RetrievalError> {
        let deadline = Instant::now() + self.settings.deadline;
        let semaphore = Arc::new(Semaphore::new(self.settings.max_in_flight.max(1)));
        let mut summary = FanoutSummary {
            tasks: tasks.len(),
            ..FanoutSummary::default()
        };
        let mut set = JoinSet::new();
        let mut settled = 0usize;

        for task in tasks {
            let search = Arc::clone(&self.search);
            let fetcher = self.fetcher.clone();
            let registry = Arc::clone(registry);
            let sem = Arc::clone(&semaphore);
            let settings = self.settings.clone();
            set.spawn(async move {
                let Ok(_permit) = sem.acquire_owned().await else {
                    return TaskOutcome::failed();
                };
                if !settings.inter_task_delay.is_zero() {
                    tokio::time::sleep(settings.inter_task_delay).await;
                }
                run_task(&task, &*search, fetcher.as_deref(), &registry, &settings).await
            });
        }

        let collect = async {
            while let Some(joined) = set.join_next().await {
                settled += 1;
                match joined {
                    Ok(outcome) => summary.record(&outcome),
                    Err(e) => {
                        tracing::warn!(%e, "retrieval task aborted");
                        summary.failed_tasks += 1;
                    }
                }
            }
        };
        let finished = tokio::time::timeout_at(deadline, collect).await.is_ok();

        if !finished {
            set.shutdown().await;
            summary.deadline_hit = true;
            summary.cancelled_tasks = summary.tasks - settled;
            tracing::warn!(
                cancelled = summary.cancelled_tasks,
                deadline_secs = self.settings.deadline.as_secs(),
                "retrieval deadline reached, continuing with partial evidence"
            );
        }

        tracing::info!(
            tasks = summary.tasks,
            failed = summary.failed_tasks,
            hits = summary.hits,
            new_items = summary.new_items,
            pages = summary.pages_fetched,
            evidence = registry.len(),
            "retrieval complete"
        );

        if registry.is_empty() {
            return Err(RetrievalError::NoEvidence {
                tasks: summary.tasks,
            });
        }
        Ok(summary)
    }
}

impl FanoutSummary {
    const fn record(&mut self, outcome: &TaskOutcome) {
        if outcome.failed {
            self.failed_tasks += 1;
        }
        self.hits += outcome.hits;
        self.new_items += outcome.new_items;
        self.pages_fetched += outcome.pages_fetched;
    }
}

async fn run_task<S: SearchProvider, F: PageFetcher>(
    task: &QueryTask,
    search: &S,
    fetcher: Option<&F>,
    registry: &SourceRegistry,
    settings: &FanoutSettings,
) -> TaskOutcome {
    let query = task.query_text.as_str();
    let hits = match with_timeout(
        settings.search_timeout,
        search.search(query, settings.results_per_query),
    )
    .await
    {
        Ok(hits) => hits,
        Err(e) => {
            tracing::warn!(query, topic = ?task.topic, %e, "search task failed");
            return TaskOutcome::failed();
        }
    };
    tracing::debug!(query, hits = hits.len(), "search task returned");

    let mut outcome = TaskOutcome {
        hits: hits.len(),
        ..TaskOutcome::default()
    };
    for hit in hits {
        let body = match fetcher {
            Some(fetcher) if settings.fetch_pages && registry.claim_scrape(&hit.url) => {
                fetch_body(fetcher, &hit.url, settings.fetch_timeout).await
            }
            _ => None,
        };
        if body.is_some() {
            outcome.pages_fetched += 1;
        }
        if let Registration::Created(id) = registry.register_detailed(candidate(hit, body)) {
            tracing::debug!(%id, query, "registered evidence");
            outcome.new_items += 1;
        }
    }
    outcome
}

async fn fetch_body<F: PageFetcher>(fetcher: &F, url: &str, limit: Duration) -> Option<String> {
    match with_timeout(limit, fetcher.fetch_text(url)).await {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(url, %e, "page fetch failed");
            None
        }
    }
}

fn candidate(hit: SearchHit, body: Option<String>) -> EvidenceCandidate {
    EvidenceCandidate {
        title: hit.title,
        url: hit.url,
        snippet: hit.snippet,
        body,
    }
}

async fn with_timeout<T>(
    limit: Duration,
    call: impl Future<Output = Result<T, ProviderError>>,
) -> Result<T, ProviderError> {
    tokio::time::timeout(limit, call)
        .await
        .unwrap_or_else(|_| {
            Err(ProviderError::Timeout {
                secs: limit.as_secs(),
            })
        })
}
