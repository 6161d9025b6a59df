//! Persistence collaborator trait.
//!
//! The engine does not depend on how filters, history, or favorites are
//! stored; it only needs this contract. The core calls `record_history`
//! after every successful discovery and reads/writes filters on criteria
//! changes. `MemoryProfileStore` is the reference implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StoreResult;
use crate::types::filters::FilterCriteria;
use crate::types::item::EnrichedItem;

/// History entries kept, newest first.
pub const MAX_HISTORY: usize = 50;

/// Favorites a profile may hold.
pub const MAX_FAVORITES: usize = 200;

/// The compact projection stored for history and favorites.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedItem {
    pub identifier: String,
    pub title: String,
    pub mediatype: String,
    pub date: String,
    pub thumbnail: String,
    pub saved_at: DateTime<Utc>,
}

impl SavedItem {
    /// Project an enriched item down to the stored shape.
    pub fn from_item(item: &EnrichedItem) -> Self {
        Self {
            identifier: item.identifier.clone(),
            title: item.title.clone().unwrap_or_else(|| "Untitled".to_string()),
            mediatype: item
                .mediatype
                .clone()
                .unwrap_or_else(|| "unknown".to_string()),
            date: item
                .date
                .clone()
                .or_else(|| item.year.clone())
                .unwrap_or_default(),
            thumbnail: item.thumbnail.clone().unwrap_or_default(),
            saved_at: Utc::now(),
        }
    }
}

/// Result of an add-to-favorites request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteOutcome {
    Added,
    AlreadyExists,
    LimitReached,
}

/// Storage abstraction for filters, history, and favorites.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Load the saved filter criteria, or defaults if none were saved.
    async fn get_filters(&self) -> StoreResult<FilterCriteria>;

    /// Persist filter criteria.
    async fn save_filters(&self, filters: &FilterCriteria) -> StoreResult<()>;

    /// Record a successfully discovered item. Deduplicates by identifier
    /// and keeps at most [`MAX_HISTORY`] entries, newest first.
    async fn record_history(&self, item: &EnrichedItem) -> StoreResult<()>;

    /// The recorded history, newest first.
    async fn history(&self) -> StoreResult<Vec<SavedItem>>;

    /// Drop all history entries.
    async fn clear_history(&self) -> StoreResult<()>;

    /// Add an item to favorites, up to [`MAX_FAVORITES`].
    async fn add_to_favorites(&self, item: &EnrichedItem) -> StoreResult<FavoriteOutcome>;

    /// Remove an item from favorites.
    async fn remove_from_favorites(&self, identifier: &str) -> StoreResult<()>;

    /// Whether an item is currently favorited.
    async fn is_favorited(&self, identifier: &str) -> StoreResult<bool>;

    /// All favorites, newest first.
    async fn favorites(&self) -> StoreResult<Vec<SavedItem>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_saved_item_fallbacks() {
        let bare = EnrichedItem {
            identifier: "x".to_string(),
            ..Default::default()
        };
        let saved = SavedItem::from_item(&bare);
        assert_eq!(saved.title, "Untitled");
        assert_eq!(saved.mediatype, "unknown");
        assert_eq!(saved.date, "");

        let mut dated = bare;
        dated.year = Some("1955".to_string());
        let saved = SavedItem::from_item(&dated);
        assert_eq!(saved.date, "1955");
    }
}
