//! Request-scoped evidence registry.
//!
//! The registry is the only state shared between retrieval tasks. Every
//! mutation happens under one lock, so the id counter, the item map, and the
//! URL index can never disagree.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use lens_core::{EvidenceCandidate, EvidenceItem, SourceId};
use parking_lot::Mutex;

/// Outcome of [`SourceRegistry::register`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    /// A new item was stored under this id.
    Created(SourceId),
    /// The URL was already registered under this id.
    Existing(SourceId),
}

impl Registration {
    #[must_use]
    pub const fn id(self) -> SourceId {
        match self {
            Self::Created(id) | Self::Existing(id) => id,
        }
    }
}

#[derive(Debug, Default)]
struct RegistryState {
    last_id: u32,
    items: BTreeMap<SourceId, EvidenceItem>,
    by_url: HashMap<String, SourceId>,
    scrape_claims: HashSet<String>,
}

/// Assigns stable ids to evidence and stores it for one request.
#[derive(Debug, Default)]
pub struct SourceRegistry {
    state: Mutex<RegistryState>,
}

impl SourceRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a candidate, returning its id.
    ///
    /// A URL seen before keeps its original id and fields; only a missing
    /// `body` is filled from the new candidate.
    pub fn register(&self, candidate: EvidenceCandidate) -> SourceId {
        self.register_detailed(candidate).id()
    }

    /// Like [`Self::register`] but reports whether the item is new.
    pub fn register_detailed(&self, candidate: EvidenceCandidate) -> Registration {
        let key = dedup_key(&candidate.url);
        let mut state = self.state.lock();

        if let Some(&id) = state.by_url.get(&key) {
            if let Some(item) = state.items.get_mut(&id) {
                if !item.has_body() {
                    if let Some(body) = candidate.body.filter(|b| !b.trim().is_empty()) {
                        item.body = Some(body);
                    }
                }
            }
            return Registration::Existing(id);
        }

        state.last_id += 1;
        let id = SourceId::new(state.last_id);
        state.by_url.insert(key, id);
        state
            .items
            .insert(id, EvidenceItem::from_candidate(id, candidate));
        Registration::Created(id)
    }

    /// Claim the right to scrape `url`.
    ///
    /// Returns `false` when the URL already has body text or a scrape of it
    /// was already claimed in this request (successful or not), so each page
    /// is fetched at most once.
    pub fn claim_scrape(&self, url: &str) -> bool {
        let key = dedup_key(url);
        let mut state = self.state.lock();

        let has_body = state
            .by_url
            .get(&key)
            .and_then(|id| state.items.get(id))
            .is_some_and(EvidenceItem::has_body);
        if has_body {
            return false;
        }
        state.scrape_claims.insert(key)
    }

    #[must_use]
    pub fn lookup(&self, id: SourceId) -> Option<EvidenceItem> {
        self.state.lock().items.get(&id).cloned()
    }

    /// URL of a registered item.
    #[must_use]
    pub fn url_of(&self, id: SourceId) -> Option<String> {
        self.state.lock().items.get(&id).map(|item| item.url.clone())
    }

    /// Id registered for `url`, if any.
    #[must_use]
    pub fn id_for_url(&self, url: &str) -> Option<SourceId> {
        self.state.lock().by_url.get(&dedup_key(url)).copied()
    }

    /// All items in ascending id order.
    #[must_use]
    pub fn all(&self) -> Vec<EvidenceItem> {
        self.state.lock().items.values().cloned().collect()
    }

    #[must_use]
    pub fn ids(&self) -> BTreeSet<SourceId> {
        self.state.lock().items.keys().copied().collect()
    }

    #[must_use]
    pub fn contains(&self, id: SourceId) -> bool {
        self.state.lock().items.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.state.lock().items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.lock().items.is_empty()
    }
}

/// Deduplication key: surrounding whitespace and the fragment are ignored.
fn dedup_key(url: &str) -> String {
    let trimmed = url.trim();
    trimmed
        .split_once('#')
        .map_or(trimmed, |(base, _)| base)
        .to_string()
}
