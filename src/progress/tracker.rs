//! Per-item learning status updates and favourites.
use crate::error::ReviewError;
use crate::models::{CatalogItem, LearningStats, LearningStatus, LearningStatusRecord};
use crate::store::ProgressStore;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, warn};

pub struct ProgressTracker {
    store: Arc<dyn ProgressStore>,
}

impl ProgressTracker {
    pub fn new(store: Arc<dyn ProgressStore>) -> Self {
        Self { store }
    }

    /// Current status of an item. Unknown items, and items that cannot be
    /// read, report `not_started`.
    pub async fn get_status(&self, user: &str, item_id: &str) -> LearningStatusRecord {
        match self.store.get_learning_status(user, item_id).await {
            Ok(record) => record.unwrap_or_default(),
            Err(e) => {
                warn!(user, item_id, error = %e, "failed to load learning status");
                LearningStatusRecord::default()
            }
        }
    }

    /// Sets the status of an item as of `now` and persists it.
    pub async fn update_status(
        &self,
        user: &str,
        item_id: &str,
        status: LearningStatus,
        now: DateTime<Utc>,
    ) -> Result<LearningStatusRecord, ReviewError> {
        let mut record = self
            .store
            .get_learning_status(user, item_id)
            .await?
            .unwrap_or_default();
        let previous = record.status;
        record.transition(status, now);
        self.store.put_learning_status(user, item_id, &record).await?;

        debug!(user, item_id, from = %previous, to = %status, "learning status updated");
        Ok(record)
    }

    /// Advances the item one step along the status cycle.
    pub async fn cycle_status(
        &self,
        user: &str,
        item_id: &str,
        now: DateTime<Utc>,
    ) -> Result<LearningStatusRecord, ReviewError> {
        let current = self
            .store
            .get_learning_status(user, item_id)
            .await?
            .unwrap_or_default();
        self.update_status(user, item_id, current.status.next(), now)
            .await
    }

    /// Keeps the items whose status is `status`. Items without a stored
    /// status count as `not_started`. When the store cannot be read the list
    /// comes back unfiltered.
    pub async fn filter_items_by_status(
        &self,
        user: &str,
        items: Vec<CatalogItem>,
        status: LearningStatus,
    ) -> Vec<CatalogItem> {
        let statuses = match self.store.get_learning_status_all(user).await {
            Ok(statuses) => statuses,
            Err(e) => {
                warn!(user, error = %e, "failed to load learning statuses, skipping status filter");
                return items;
            }
        };

        items
            .into_iter()
            .filter(|item| {
                statuses
                    .get(&item.item_id)
                    .map_or(LearningStatus::NotStarted, |record| record.status)
                    == status
            })
            .collect()
    }

    /// Counts the learner's tracked items by status.
    pub async fn learning_stats(&self, user: &str) -> LearningStats {
        let statuses = match self.store.get_learning_status_all(user).await {
            Ok(statuses) => statuses,
            Err(e) => {
                warn!(user, error = %e, "failed to load learning statuses, returning empty stats");
                return LearningStats::default();
            }
        };

        let mut stats = LearningStats {
            total: statuses.len() as u32,
            ..LearningStats::default()
        };
        for record in statuses.values() {
            match record.status {
                LearningStatus::NotStarted => stats.not_started += 1,
                LearningStatus::Learning => stats.learning += 1,
                LearningStatus::Reviewing => stats.reviewing += 1,
                LearningStatus::Mastered => stats.mastered += 1,
            }
        }
        stats
    }

    pub async fn set_favorite(
        &self,
        user: &str,
        item_id: &str,
        favorite: bool,
    ) -> Result<(), ReviewError> {
        self.store.set_favorite(user, item_id, favorite).await?;
        debug!(user, item_id, favorite, "favorite updated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{StoreError, StoreResult};
    use crate::store::MemoryStore;
    use async_trait::async_trait;
    use chrono::{Duration, TimeZone};
    use std::collections::{HashMap, HashSet};

    struct BrokenStore;

    #[async_trait]
    impl ProgressStore for BrokenStore {
        async fn get_learning_status_all(
            &self,
            _user: &str,
        ) -> StoreResult<HashMap<String, LearningStatusRecord>> {
            Err(StoreError::Unavailable("offline".to_string()))
        }

        async fn get_learning_status(
            &self,
            _user: &str,
            _item_id: &str,
        ) -> StoreResult<Option<LearningStatusRecord>> {
            Err(StoreError::Unavailable("offline".to_string()))
        }

        async fn put_learning_status(
            &self,
            _user: &str,
            _item_id: &str,
            _record: &LearningStatusRecord,
        ) -> StoreResult<()> {
            Err(StoreError::Unavailable("offline".to_string()))
        }

        async fn get_favorites(&self, _user: &str) -> StoreResult<HashSet<String>> {
            Err(StoreError::Unavailable("offline".to_string()))
        }

        async fn set_favorite(&self, _user: &str, _item_id: &str, _favorite: bool) -> StoreResult<()> {
            Err(StoreError::Unavailable("offline".to_string()))
        }
    }

    fn items(ids: &[&str]) -> Vec<CatalogItem> {
        ids.iter().map(|id| CatalogItem::new(*id, *id)).collect()
    }

    fn ids(items: &[CatalogItem]) -> Vec<&str> {
        items.iter().map(|item| item.item_id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_unknown_item_is_not_started() {
        let tracker = ProgressTracker::new(Arc::new(MemoryStore::new()));
        let record = tracker.get_status("alice", "w1").await;
        assert_eq!(record.status, LearningStatus::NotStarted);
        assert_eq!(record.review_count, 0);
    }

    #[tokio::test]
    async fn test_update_status_persists() {
        let store = Arc::new(MemoryStore::new());
        let tracker = ProgressTracker::new(store.clone());
        let now = Utc.with_ymd_and_hms(2024, 4, 10, 9, 0, 0).unwrap();

        tracker
            .update_status("alice", "w1", LearningStatus::Learning, now)
            .await
            .unwrap();
        let later = now + Duration::days(2);
        let record = tracker
            .update_status("alice", "w1", LearningStatus::Mastered, later)
            .await
            .unwrap();

        assert_eq!(record.review_count, 1);
        assert_eq!(record.first_studied_at, Some(now));
        assert_eq!(record.last_studied_at, Some(later));
        assert_eq!(tracker.get_status("alice", "w1").await, record);
    }

    #[tokio::test]
    async fn test_cycle_status_walks_all_states() {
        let tracker = ProgressTracker::new(Arc::new(MemoryStore::new()));
        let now = Utc.with_ymd_and_hms(2024, 4, 10, 9, 0, 0).unwrap();

        let mut statuses = Vec::new();
        for _ in 0..5 {
            let record = tracker.cycle_status("alice", "w1", now).await.unwrap();
            statuses.push(record.status);
        }

        assert_eq!(
            statuses,
            vec![
                LearningStatus::Learning,
                LearningStatus::Reviewing,
                LearningStatus::Mastered,
                LearningStatus::NotStarted,
                LearningStatus::Learning,
            ]
        );
        assert_eq!(tracker.get_status("alice", "w1").await.review_count, 2);
    }

    #[tokio::test]
    async fn test_set_favorite() {
        let store = Arc::new(MemoryStore::new());
        let tracker = ProgressTracker::new(store.clone());

        tracker.set_favorite("alice", "w1", true).await.unwrap();
        assert!(store.get_favorites("alice").await.unwrap().contains("w1"));

        tracker.set_favorite("alice", "w1", false).await.unwrap();
        assert!(store.get_favorites("alice").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_filter_by_status() {
        let tracker = ProgressTracker::new(Arc::new(MemoryStore::new()));
        let now = Utc.with_ymd_and_hms(2024, 4, 10, 9, 0, 0).unwrap();
        tracker
            .update_status("alice", "w1", LearningStatus::Learning, now)
            .await
            .unwrap();
        tracker
            .update_status("alice", "w2", LearningStatus::Mastered, now)
            .await
            .unwrap();
        tracker
            .update_status("alice", "w3", LearningStatus::NotStarted, now)
            .await
            .unwrap();

        let catalog = items(&["w1", "w2", "w3", "w4"]);
        let learning = tracker
            .filter_items_by_status("alice", catalog.clone(), LearningStatus::Learning)
            .await;
        assert_eq!(ids(&learning), vec!["w1"]);

        let not_started = tracker
            .filter_items_by_status("alice", catalog.clone(), LearningStatus::NotStarted)
            .await;
        assert_eq!(ids(&not_started), vec!["w3", "w4"]);

        let reviewing = tracker
            .filter_items_by_status("alice", catalog, LearningStatus::Reviewing)
            .await;
        assert!(reviewing.is_empty());
    }

    #[tokio::test]
    async fn test_filter_returns_all_items_when_store_fails() {
        let tracker = ProgressTracker::new(Arc::new(BrokenStore));
        let filtered = tracker
            .filter_items_by_status("alice", items(&["w1", "w2"]), LearningStatus::Mastered)
            .await;
        assert_eq!(ids(&filtered), vec!["w1", "w2"]);
    }

    #[tokio::test]
    async fn test_learning_stats_counts_tracked_items() {
        let tracker = ProgressTracker::new(Arc::new(MemoryStore::new()));
        let now = Utc.with_ymd_and_hms(2024, 4, 10, 9, 0, 0).unwrap();
        for (item_id, status) in [
            ("w1", LearningStatus::Learning),
            ("w2", LearningStatus::Learning),
            ("w3", LearningStatus::Reviewing),
            ("w4", LearningStatus::Mastered),
            ("w5", LearningStatus::NotStarted),
        ] {
            tracker
                .update_status("alice", item_id, status, now)
                .await
                .unwrap();
        }

        let stats = tracker.learning_stats("alice").await;
        assert_eq!(
            stats,
            LearningStats {
                not_started: 1,
                learning: 2,
                reviewing: 1,
                mastered: 1,
                total: 5,
            }
        );
        assert_eq!(tracker.learning_stats("bob").await, LearningStats::default());
    }

    #[tokio::test]
    async fn test_learning_stats_zeroed_when_store_fails() {
        let tracker = ProgressTracker::new(Arc::new(BrokenStore));
        assert_eq!(tracker.learning_stats("alice").await, LearningStats::default());
    }
}
