//! Persistence contracts consumed by the scheduler and the aggregator.
//!
//! The core never assumes a storage engine. [`MemoryStore`] backs tests and
//! short-lived sessions; [`crate::database::SqliteStore`] persists to disk.

pub mod memory;

pub use memory::MemoryStore;

use crate::error::StoreResult;
use crate::models::{CatalogItem, ItemFilters, LearningStatusRecord, ReviewRecord};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};

/// Spaced repetition records keyed by `(user, item_id)`.
#[async_trait]
pub trait ReviewStore: Send + Sync {
    /// Returns `None` for an item the user has never reviewed.
    async fn get(&self, user: &str, item_id: &str) -> StoreResult<Option<ReviewRecord>>;

    /// Overwrites the whole record.
    async fn put(&self, user: &str, item_id: &str, record: &ReviewRecord) -> StoreResult<()>;

    async fn get_all(&self, user: &str) -> StoreResult<HashMap<String, ReviewRecord>>;
}

/// Learning status and favourites, maintained alongside review records.
#[async_trait]
pub trait ProgressStore: Send + Sync {
    async fn get_learning_status_all(
        &self,
        user: &str,
    ) -> StoreResult<HashMap<String, LearningStatusRecord>>;

    async fn get_learning_status(
        &self,
        user: &str,
        item_id: &str,
    ) -> StoreResult<Option<LearningStatusRecord>>;

    async fn put_learning_status(
        &self,
        user: &str,
        item_id: &str,
        record: &LearningStatusRecord,
    ) -> StoreResult<()>;

    async fn get_favorites(&self, user: &str) -> StoreResult<HashSet<String>>;

    async fn set_favorite(&self, user: &str, item_id: &str, favorite: bool) -> StoreResult<()>;
}

/// Source of vocabulary items.
#[async_trait]
pub trait Catalog: Send + Sync {
    async fn query_items(&self, filters: &ItemFilters) -> StoreResult<Vec<CatalogItem>>;
}
