//! Error types for the Archive client.

use thiserror::Error;

/// Result type for Archive client operations.
pub type Result<T> = std::result::Result<T, ArchiveError>;

/// Archive client errors.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// Transport failure (connection, timeout, or body decode)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response from the Archive
    #[error("Archive API error: HTTP {status}: {message}")]
    Api { status: u16, message: String },
}
