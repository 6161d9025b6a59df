//! Quality-Biased Random Item Discovery
//!
//! Discovers one "interesting" item per call from the Internet Archive's
//! large, noisy, paginated search index: it routes between curated and
//! user-filtered queries, samples a read offset inside the backend's
//! pagination window with a mix of strategies, rejects auto-generated and
//! placeholder titles, avoids recently shown items, and degrades through
//! tiered fallback pools instead of starving the caller.
//!
//! # Design Philosophy
//!
//! - Transport failures are empty batches, never errors; the only terminal
//!   failure is running out of retries.
//! - Randomness is injected and seedable, so whole discovery sequences
//!   replay deterministically in tests.
//! - The search backend and the persistence layer sit behind traits;
//!   everything in between is plain, isolated state owned by one engine.
//!
//! # Usage
//!
//! ```rust,ignore
//! use discovery::{
//!     ArchiveSearcher, DiscoveryEngine, DiscoverySession, FilterCriteria,
//!     MediaType, MemoryProfileStore,
//! };
//!
//! let engine = DiscoveryEngine::new(ArchiveSearcher::new());
//! let session = DiscoverySession::new(engine, MemoryProfileStore::new()).await?;
//!
//! session
//!     .set_filters(FilterCriteria::new().with_media_type(MediaType::Movies))
//!     .await?;
//!
//! let item = session.next_item().await?;
//! println!("{}", item.title.as_deref().unwrap_or("Untitled"));
//! ```
//!
//! # Modules
//!
//! - [`engine`] - the discovery engine and its sampling/quality/recency parts
//! - [`traits`] - backend abstractions (CatalogSearcher, ProfileStore)
//! - [`types`] - filter criteria, items, configuration
//! - [`searchers`] - the Internet Archive backend
//! - [`stores`] - profile store implementations
//! - [`testing`] - mock backend for tests

pub mod engine;
pub mod error;
pub mod searchers;
pub mod session;
pub mod stores;
pub mod testing;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use error::{DiscoveryError, Result, SearchError, SearchResult, StoreError, StoreResult};
pub use traits::{
    searcher::{CatalogSearcher, PageRequest, SortOrder},
    store::{FavoriteOutcome, ProfileStore, SavedItem, MAX_FAVORITES, MAX_HISTORY},
};
pub use types::{
    config::EngineConfig,
    filters::{language_label, FilterCriteria, MediaType, LANGUAGES},
    item::{CandidateItem, EnrichedItem, FileEntry, ItemDetail},
};

// Re-export the engine and its parts
pub use engine::{
    quality::{QualityFilter, RuleCategory, TitleRule},
    query::{build_curated_query, build_filtered_query, route, QueryRoute, CURATED_COLLECTIONS},
    recency::RecencyTracker,
    sampling::{random_sort, sample_offset, OffsetStrategy},
    DiscoveryEngine, DiscoveryPhase,
};

// Re-export the session facade
pub use session::DiscoverySession;

// Re-export backends
pub use searchers::ArchiveSearcher;
pub use stores::MemoryProfileStore;

// Re-export testing utilities
pub use testing::{MockCall, MockCatalog};
