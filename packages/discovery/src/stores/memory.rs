//! In-memory profile store for testing and development.

use async_trait::async_trait;
use std::sync::RwLock;

use crate::error::StoreResult;
use crate::traits::store::{
    FavoriteOutcome, ProfileStore, SavedItem, MAX_FAVORITES, MAX_HISTORY,
};
use crate::types::filters::FilterCriteria;
use crate::types::item::EnrichedItem;

/// In-memory storage for filters, history, and favorites.
///
/// Useful for testing and development. Not suitable for production as
/// data is lost on restart.
#[derive(Default)]
pub struct MemoryProfileStore {
    filters: RwLock<Option<FilterCriteria>>,
    history: RwLock<Vec<SavedItem>>,
    favorites: RwLock<Vec<SavedItem>>,
}

impl MemoryProfileStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of history entries.
    pub fn history_count(&self) -> usize {
        self.history.read().unwrap().len()
    }

    /// Number of favorites.
    pub fn favorite_count(&self) -> usize {
        self.favorites.read().unwrap().len()
    }
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn get_filters(&self) -> StoreResult<FilterCriteria> {
        Ok(self.filters.read().unwrap().clone().unwrap_or_default())
    }

    async fn save_filters(&self, filters: &FilterCriteria) -> StoreResult<()> {
        *self.filters.write().unwrap() = Some(filters.clone());
        Ok(())
    }

    async fn record_history(&self, item: &EnrichedItem) -> StoreResult<()> {
        let entry = SavedItem::from_item(item);
        let mut history = self.history.write().unwrap();
        history.retain(|e| e.identifier != entry.identifier);
        history.insert(0, entry);
        history.truncate(MAX_HISTORY);
        Ok(())
    }

    async fn history(&self) -> StoreResult<Vec<SavedItem>> {
        Ok(self.history.read().unwrap().clone())
    }

    async fn clear_history(&self) -> StoreResult<()> {
        self.history.write().unwrap().clear();
        Ok(())
    }

    async fn add_to_favorites(&self, item: &EnrichedItem) -> StoreResult<FavoriteOutcome> {
        let mut favorites = self.favorites.write().unwrap();
        if favorites.iter().any(|f| f.identifier == item.identifier) {
            return Ok(FavoriteOutcome::AlreadyExists);
        }
        if favorites.len() >= MAX_FAVORITES {
            return Ok(FavoriteOutcome::LimitReached);
        }
        favorites.insert(0, SavedItem::from_item(item));
        Ok(FavoriteOutcome::Added)
    }

    async fn remove_from_favorites(&self, identifier: &str) -> StoreResult<()> {
        self.favorites
            .write()
            .unwrap()
            .retain(|f| f.identifier != identifier);
        Ok(())
    }

    async fn is_favorited(&self, identifier: &str) -> StoreResult<bool> {
        Ok(self
            .favorites
            .read()
            .unwrap()
            .iter()
            .any(|f| f.identifier == identifier))
    }

    async fn favorites(&self) -> StoreResult<Vec<SavedItem>> {
        Ok(self.favorites.read().unwrap().clone())
    }
}
