//! Engine configuration.

use serde::{Deserialize, Serialize};

/// Tunables for the discovery engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Attempts before discovery gives up. Default: 5.
    pub max_retries: u32,

    /// Rows requested per search page. Default: 100.
    pub page_rows: u32,

    /// The search backend rejects pagination past this offset, so sampled
    /// offsets are capped here regardless of the match count.
    /// Default: 10 000.
    pub pagination_window: u64,

    /// Recently-seen identifiers kept before eviction kicks in.
    /// Default: 500.
    pub recency_capacity: usize,

    /// Oldest entries evicted in one batch when the recency set is full.
    /// Default: 100.
    pub recency_evict_batch: usize,

    /// Files kept per enriched item. Default: 20.
    pub detail_file_limit: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_retries: 5,
            page_rows: 100,
            pagination_window: 10_000,
            recency_capacity: 500,
            recency_evict_batch: 100,
            detail_file_limit: 20,
        }
    }
}

impl EngineConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the retry budget.
    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Set the rows per page.
    pub fn with_page_rows(mut self, rows: u32) -> Self {
        self.page_rows = rows;
        self
    }

    /// Set the deep-pagination cap.
    pub fn with_pagination_window(mut self, window: u64) -> Self {
        self.pagination_window = window;
        self
    }

    /// Set the recency capacity and eviction batch size.
    pub fn with_recency(mut self, capacity: usize, evict_batch: usize) -> Self {
        self.recency_capacity = capacity;
        self.recency_evict_batch = evict_batch;
        self
    }

    /// Set the per-item file cap.
    pub fn with_detail_file_limit(mut self, limit: usize) -> Self {
        self.detail_file_limit = limit;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_backend_limits() {
        let config = EngineConfig::default();
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.page_rows, 100);
        assert_eq!(config.pagination_window, 10_000);
        assert_eq!(config.recency_capacity, 500);
        assert_eq!(config.recency_evict_batch, 100);
        assert_eq!(config.detail_file_limit, 20);
    }

    #[test]
    fn test_builder_overrides() {
        let config = EngineConfig::new()
            .with_max_retries(2)
            .with_recency(10, 3);
        assert_eq!(config.max_retries, 2);
        assert_eq!(config.recency_capacity, 10);
        assert_eq!(config.recency_evict_batch, 3);
    }
}
