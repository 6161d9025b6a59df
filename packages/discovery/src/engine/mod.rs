//! The discovery engine: query routing, retry loop, pool selection, and
//! enrichment.

pub mod quality;
pub mod query;
pub mod recency;
pub mod sampling;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::{DiscoveryError, Result};
use crate::traits::searcher::{CatalogSearcher, PageRequest};
use crate::types::config::EngineConfig;
use crate::types::filters::FilterCriteria;
use crate::types::item::{CandidateItem, EnrichedItem};

use self::quality::QualityFilter;
use self::recency::RecencyTracker;

/// Where the engine currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscoveryPhase {
    /// No discovery has run, or the last one was cancelled.
    Idle,
    /// Working through the retry budget.
    Sampling { attempt: u32 },
    /// The last discovery produced an item.
    Found,
    /// The last discovery ran out of attempts.
    Exhausted,
}

/// Which fallback tier a batch's pool came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PoolTier {
    Fresh,
    Quality,
    Raw,
}

/// Mutable engine state, locked together so a draw and the recency checks
/// it depends on stay consistent. Never held across an await.
struct EngineState {
    recency: RecencyTracker,
    rng: StdRng,
    phase: DiscoveryPhase,
}

/// Discovers one quality item per call from a noisy, paginated search
/// index.
///
/// Each engine owns its own recency state and random source, so separate
/// sessions (and tests) are fully isolated.
///
/// # Example
///
/// ```rust,ignore
/// use discovery::{ArchiveSearcher, DiscoveryEngine, FilterCriteria};
///
/// let engine = DiscoveryEngine::new(ArchiveSearcher::new());
/// if let Some(candidate) = engine.discover(&FilterCriteria::new()).await? {
///     let item = engine.enrich(candidate).await;
///     engine.mark_seen(item.identifier.clone());
/// }
/// ```
pub struct DiscoveryEngine<S: CatalogSearcher> {
    searcher: S,
    config: EngineConfig,
    quality: QualityFilter,
    state: Mutex<EngineState>,
    in_flight: AtomicBool,
}

impl<S: CatalogSearcher> DiscoveryEngine<S> {
    /// Create an engine with default configuration and an entropy-seeded
    /// random source.
    pub fn new(searcher: S) -> Self {
        Self::with_config(searcher, EngineConfig::default())
    }

    /// Create with custom configuration.
    pub fn with_config(searcher: S, config: EngineConfig) -> Self {
        let state = EngineState {
            recency: RecencyTracker::new(config.recency_capacity, config.recency_evict_batch),
            rng: StdRng::from_entropy(),
            phase: DiscoveryPhase::Idle,
        };
        Self {
            searcher,
            config,
            quality: QualityFilter::new(),
            state: Mutex::new(state),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Seed the random source, making every draw replayable.
    pub fn with_seed(self, seed: u64) -> Self {
        self.state.lock().unwrap().rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Replace the quality filter.
    pub fn with_quality_filter(mut self, filter: QualityFilter) -> Self {
        self.quality = filter;
        self
    }

    /// The engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The current phase.
    pub fn phase(&self) -> DiscoveryPhase {
        self.state.lock().unwrap().phase
    }

    /// Register an identifier as shown. Callers do this only after the
    /// full pipeline (enrichment included) succeeds, so an item is never
    /// considered seen when it was never actually shown.
    pub fn mark_seen(&self, identifier: impl Into<String>) {
        self.state.lock().unwrap().recency.mark_seen(identifier);
    }

    /// Whether an identifier was surfaced recently.
    pub fn recently_seen(&self, identifier: &str) -> bool {
        self.state.lock().unwrap().recency.contains(identifier)
    }

    /// Forget the recency set. Called on filter changes, since "recently
    /// seen" is scoped to the current criteria.
    pub fn reset_recency(&self) {
        self.state.lock().unwrap().recency.clear();
    }

    /// Discover one candidate, or `None` when every attempt produced an
    /// empty batch.
    pub async fn discover(&self, criteria: &FilterCriteria) -> Result<Option<CandidateItem>> {
        self.discover_with_cancel(criteria, &CancellationToken::new())
            .await
    }

    /// Discover with cancellation support. The token is checked between
    /// attempts, not mid-request.
    pub async fn discover_with_cancel(
        &self,
        criteria: &FilterCriteria,
        cancel: &CancellationToken,
    ) -> Result<Option<CandidateItem>> {
        // The retry loop is not reentrant-safe against overlapping recency
        // mutation; a second call while one is in flight is rejected.
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(DiscoveryError::Busy);
        }

        let result = self.run_attempts(criteria, cancel).await;
        self.in_flight.store(false, Ordering::Release);
        result
    }

    async fn run_attempts(
        &self,
        criteria: &FilterCriteria,
        cancel: &CancellationToken,
    ) -> Result<Option<CandidateItem>> {
        for attempt in 1..=self.config.max_retries {
            if cancel.is_cancelled() {
                self.state.lock().unwrap().phase = DiscoveryPhase::Idle;
                return Err(DiscoveryError::Cancelled);
            }

            // Curated routing re-picks its collection every attempt, so a
            // retry is a new draw, not a replay.
            let query = {
                let mut state = self.state.lock().unwrap();
                state.phase = DiscoveryPhase::Sampling { attempt };
                query::build_query(criteria, &mut state.rng)
            };
            debug!(attempt, query = %query, "Sampling attempt");

            let batch = self.fetch_batch(&query).await;
            if batch.is_empty() {
                continue;
            }

            let mut state = self.state.lock().unwrap();

            let quality_idx: Vec<usize> = batch
                .iter()
                .enumerate()
                .filter(|(_, item)| self.quality.passes(item))
                .map(|(i, _)| i)
                .collect();
            let fresh_idx: Vec<usize> = quality_idx
                .iter()
                .copied()
                .filter(|&i| !state.recency.contains(&batch[i].identifier))
                .collect();
            let raw_idx: Vec<usize> = (0..batch.len()).collect();

            // Tiered fallback: never return empty-handed just because the
            // whole batch was seen before or superficially low-quality.
            let (pool, tier) = if !fresh_idx.is_empty() {
                (&fresh_idx, PoolTier::Fresh)
            } else if !quality_idx.is_empty() {
                (&quality_idx, PoolTier::Quality)
            } else {
                (&raw_idx, PoolTier::Raw)
            };
            debug!(
                attempt,
                batch = batch.len(),
                quality = quality_idx.len(),
                fresh = fresh_idx.len(),
                tier = ?tier,
                "Selected candidate pool"
            );

            let pick = pool[state.rng.gen_range(0..pool.len())];
            state.phase = DiscoveryPhase::Found;
            drop(state);

            let item = batch[pick].clone();
            info!(identifier = %item.identifier, attempt, "Discovered candidate");
            return Ok(Some(item));
        }

        warn!(
            retries = self.config.max_retries,
            "Every attempt produced an empty batch"
        );
        self.state.lock().unwrap().phase = DiscoveryPhase::Exhausted;
        Ok(None)
    }

    /// One two-phase search round trip, degraded to an empty batch on any
    /// failure.
    async fn fetch_batch(&self, query: &str) -> Vec<CandidateItem> {
        let total = match self.searcher.count_matches(query).await {
            Ok(n) => n,
            Err(error) => {
                warn!(%error, "Count query failed, treating as empty batch");
                return Vec::new();
            }
        };
        if total == 0 {
            debug!(query = %query, "No matches");
            return Vec::new();
        }

        let (offset, sort) = {
            let mut state = self.state.lock().unwrap();
            let window = total.min(self.config.pagination_window);
            (
                sampling::sample_offset(&mut state.rng, window),
                sampling::random_sort(&mut state.rng),
            )
        };

        let request = PageRequest {
            query: query.to_string(),
            offset,
            rows: self.config.page_rows,
            sort,
        };
        match self.searcher.fetch_page(&request).await {
            Ok(docs) => {
                debug!(
                    total,
                    offset,
                    sort = sort.as_param(),
                    docs = docs.len(),
                    "Fetched page"
                );
                docs
            }
            Err(error) => {
                warn!(%error, "Page fetch failed, treating as empty batch");
                Vec::new()
            }
        }
    }

    /// Fetch and merge the full detail record onto a candidate. Never
    /// fails: on any fetch or parse problem the bare candidate comes back
    /// unchanged.
    pub async fn enrich(&self, candidate: CandidateItem) -> EnrichedItem {
        let identifier = candidate.identifier.clone();
        let mut item = match self.searcher.fetch_detail(&identifier).await {
            Ok(mut detail) => {
                detail.files.truncate(self.config.detail_file_limit);
                EnrichedItem::merge(candidate, detail)
            }
            Err(error) => {
                warn!(identifier = %identifier, %error, "Enrichment failed, keeping bare candidate");
                EnrichedItem::from(candidate)
            }
        };
        if item.thumbnail.is_none() {
            item.thumbnail = self.searcher.thumbnail_url(&identifier);
        }
        item
    }

    /// Load one item directly by identifier, e.g. from a history entry.
    /// Unlike [`enrich`](Self::enrich) this has no candidate to fall back
    /// on, so a missing or unreachable record is an error.
    pub async fn lookup(&self, identifier: &str) -> Result<EnrichedItem> {
        match self.searcher.fetch_detail(identifier).await {
            Ok(mut detail) => {
                detail.files.truncate(self.config.detail_file_limit);
                let mut item = EnrichedItem::merge(CandidateItem::new(identifier), detail);
                if item.thumbnail.is_none() {
                    item.thumbnail = self.searcher.thumbnail_url(identifier);
                }
                Ok(item)
            }
            Err(error) => {
                warn!(identifier = %identifier, %error, "Item lookup failed");
                Err(DiscoveryError::ItemUnavailable {
                    identifier: identifier.to_string(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockCatalog;

    #[tokio::test]
    async fn test_phase_starts_idle_and_ends_exhausted() {
        let engine = DiscoveryEngine::new(MockCatalog::new()).with_seed(1);
        assert_eq!(engine.phase(), DiscoveryPhase::Idle);

        let found = engine.discover(&FilterCriteria::new()).await.unwrap();
        assert!(found.is_none());
        assert_eq!(engine.phase(), DiscoveryPhase::Exhausted);
    }

    #[tokio::test]
    async fn test_phase_found_after_success() {
        let mock = MockCatalog::new()
            .with_batch(vec![CandidateItem::new("ok").with_title("A Real Title")]);
        let engine = DiscoveryEngine::new(mock).with_seed(2);

        let found = engine.discover(&FilterCriteria::new()).await.unwrap();
        assert_eq!(found.unwrap().identifier, "ok");
        assert_eq!(engine.phase(), DiscoveryPhase::Found);
    }

    #[tokio::test]
    async fn test_recency_helpers() {
        let engine = DiscoveryEngine::new(MockCatalog::new());
        assert!(!engine.recently_seen("a"));
        engine.mark_seen("a");
        assert!(engine.recently_seen("a"));
        engine.reset_recency();
        assert!(!engine.recently_seen("a"));
    }
}
