//! In-process store holding everything in hash maps.
use super::{Catalog, ProgressStore, ReviewStore};
use crate::error::StoreResult;
use crate::models::{CatalogItem, ItemFilters, LearningStatusRecord, ReviewRecord};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use tokio::sync::RwLock;

type PerUser<T> = HashMap<String, HashMap<String, T>>;

/// Implements every store trait in memory. Writes are last-write-wins.
#[derive(Default)]
pub struct MemoryStore {
    reviews: RwLock<PerUser<ReviewRecord>>,
    statuses: RwLock<PerUser<LearningStatusRecord>>,
    favorites: RwLock<HashMap<String, HashSet<String>>>,
    items: RwLock<Vec<CatalogItem>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store whose catalog contains `items`.
    pub fn with_items(items: Vec<CatalogItem>) -> Self {
        Self {
            items: RwLock::new(items),
            ..Self::default()
        }
    }

    /// Adds or replaces a catalog item.
    pub async fn add_item(&self, item: CatalogItem) {
        let mut items = self.items.write().await;
        match items.iter_mut().find(|existing| existing.item_id == item.item_id) {
            Some(existing) => *existing = item,
            None => items.push(item),
        }
    }
}

#[async_trait]
impl ReviewStore for MemoryStore {
    async fn get(&self, user: &str, item_id: &str) -> StoreResult<Option<ReviewRecord>> {
        let reviews = self.reviews.read().await;
        Ok(reviews.get(user).and_then(|records| records.get(item_id)).cloned())
    }

    async fn put(&self, user: &str, item_id: &str, record: &ReviewRecord) -> StoreResult<()> {
        let mut reviews = self.reviews.write().await;
        reviews
            .entry(user.to_string())
            .or_default()
            .insert(item_id.to_string(), record.clone());
        Ok(())
    }

    async fn get_all(&self, user: &str) -> StoreResult<HashMap<String, ReviewRecord>> {
        let reviews = self.reviews.read().await;
        Ok(reviews.get(user).cloned().unwrap_or_default())
    }
}

#[async_trait]
impl ProgressStore for MemoryStore {
    async fn get_learning_status_all(
        &self,
        user: &str,
    ) -> StoreResult<HashMap<String, LearningStatusRecord>> {
        let statuses = self.statuses.read().await;
        Ok(statuses.get(user).cloned().unwrap_or_default())
    }

    async fn get_learning_status(
        &self,
        user: &str,
        item_id: &str,
    ) -> StoreResult<Option<LearningStatusRecord>> {
        let statuses = self.statuses.read().await;
        Ok(statuses.get(user).and_then(|records| records.get(item_id)).cloned())
    }

    async fn put_learning_status(
        &self,
        user: &str,
        item_id: &str,
        record: &LearningStatusRecord,
    ) -> StoreResult<()> {
        let mut statuses = self.statuses.write().await;
        statuses
            .entry(user.to_string())
            .or_default()
            .insert(item_id.to_string(), record.clone());
        Ok(())
    }

    async fn get_favorites(&self, user: &str) -> StoreResult<HashSet<String>> {
        let favorites = self.favorites.read().await;
        Ok(favorites.get(user).cloned().unwrap_or_default())
    }

    async fn set_favorite(&self, user: &str, item_id: &str, favorite: bool) -> StoreResult<()> {
        let mut favorites = self.favorites.write().await;
        let set = favorites.entry(user.to_string()).or_default();
        if favorite {
            set.insert(item_id.to_string());
        } else {
            set.remove(item_id);
        }
        Ok(())
    }
}

#[async_trait]
impl Catalog for MemoryStore {
    async fn query_items(&self, filters: &ItemFilters) -> StoreResult<Vec<CatalogItem>> {
        let items = self.items.read().await;
        Ok(items.iter().filter(|item| filters.matches(item)).cloned().collect())
    }
}
