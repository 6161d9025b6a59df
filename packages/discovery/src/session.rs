//! High-level discovery session: engine + persistence, wired the way a
//! presentation layer consumes them.

use std::sync::Mutex;

use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::engine::DiscoveryEngine;
use crate::error::{DiscoveryError, Result};
use crate::traits::searcher::CatalogSearcher;
use crate::traits::store::ProfileStore;
use crate::types::filters::FilterCriteria;
use crate::types::item::EnrichedItem;

/// One user-facing discovery session.
///
/// Owns the engine and the persistence collaborator, and carries the
/// current filter criteria between calls. A successful `next_item` runs
/// the whole pipeline: discover, enrich, mark the identifier as seen,
/// record history.
///
/// # Example
///
/// ```rust,ignore
/// use discovery::{ArchiveSearcher, DiscoveryEngine, DiscoverySession, MemoryProfileStore};
///
/// let engine = DiscoveryEngine::new(ArchiveSearcher::new());
/// let session = DiscoverySession::new(engine, MemoryProfileStore::new()).await?;
/// let item = session.next_item().await?;
/// println!("{}", item.title.as_deref().unwrap_or("Untitled"));
/// ```
pub struct DiscoverySession<S: CatalogSearcher, P: ProfileStore> {
    engine: DiscoveryEngine<S>,
    store: P,
    filters: Mutex<FilterCriteria>,
}

impl<S: CatalogSearcher, P: ProfileStore> DiscoverySession<S, P> {
    /// Create a session, restoring saved filter criteria from the store.
    pub async fn new(engine: DiscoveryEngine<S>, store: P) -> Result<Self> {
        let filters = store.get_filters().await?;
        Ok(Self {
            engine,
            store,
            filters: Mutex::new(filters),
        })
    }

    /// The current filter criteria.
    pub fn filters(&self) -> FilterCriteria {
        self.filters.lock().unwrap().clone()
    }

    /// Replace the filter criteria. Persists them and resets the recency
    /// set, since "recently seen" is scoped to the current filter context.
    pub async fn set_filters(&self, filters: FilterCriteria) -> Result<()> {
        self.store.save_filters(&filters).await?;
        *self.filters.lock().unwrap() = filters;
        self.engine.reset_recency();
        Ok(())
    }

    /// Reset the criteria to defaults.
    pub async fn clear_filters(&self) -> Result<()> {
        self.set_filters(FilterCriteria::default()).await
    }

    /// Discover, enrich, and record one item.
    pub async fn next_item(&self) -> Result<EnrichedItem> {
        self.next_item_with_cancel(&CancellationToken::new()).await
    }

    /// Like [`next_item`](Self::next_item), with cancellation support.
    pub async fn next_item_with_cancel(
        &self,
        cancel: &CancellationToken,
    ) -> Result<EnrichedItem> {
        let criteria = self.filters();
        let candidate = self
            .engine
            .discover_with_cancel(&criteria, cancel)
            .await?
            .ok_or(DiscoveryError::NoCandidates)?;

        let item = self.engine.enrich(candidate).await;

        // Only now is the item actually shown, so only now does it count
        // as seen.
        self.engine.mark_seen(item.identifier.clone());

        if let Err(error) = self.store.record_history(&item).await {
            warn!(%error, "Failed to record history");
        }

        Ok(item)
    }

    /// Load a specific item, e.g. from a history or favorites entry.
    pub async fn lookup(&self, identifier: &str) -> Result<EnrichedItem> {
        self.engine.lookup(identifier).await
    }

    /// The underlying engine.
    pub fn engine(&self) -> &DiscoveryEngine<S> {
        &self.engine
    }

    /// The underlying store.
    pub fn store(&self) -> &P {
        &self.store
    }
}
