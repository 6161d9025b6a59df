//! Typed errors for the discovery library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling.

use thiserror::Error;

/// Errors surfaced by discovery operations.
///
/// Transport failures never appear here: a failed count or page fetch is
/// recovered locally as an empty batch and only shows up as `NoCandidates`
/// once the whole retry budget is spent.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// Every retry attempt produced an empty batch
    #[error("could not find a suitable item; adjust filters and try again")]
    NoCandidates,

    /// A discover call was issued while another was already in flight
    #[error("a discovery is already in progress")]
    Busy,

    /// Operation was cancelled
    #[error("operation cancelled")]
    Cancelled,

    /// A directly requested item has no metadata record
    #[error("item not available: {identifier}")]
    ItemUnavailable { identifier: String },

    /// Persistence collaborator failed
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Errors raised by catalog search backends.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Network-level failure, timeout, or non-2xx response
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Response arrived but did not have the expected shape
    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Errors raised by persistence backends.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Storage backend failed
    #[error("storage error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Result type alias for discovery operations.
pub type Result<T> = std::result::Result<T, DiscoveryError>;

/// Result type alias for search backend operations.
pub type SearchResult<T> = std::result::Result<T, SearchError>;

/// Result type alias for persistence operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;
