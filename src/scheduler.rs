//! Review scheduling service: records answers and builds the daily queue.
//!
//! Writes go through [`Scheduler::record_review`] and fail loudly. The queue
//! and statistics are display helpers and fall back to empty values when the
//! store cannot be read, so a flaky store never blocks a review session.

use crate::clock::{end_of_day, is_same_local_day};
use crate::config::SchedulerConfig;
use crate::error::ReviewError;
use crate::models::sm2::compute_next_interval;
use crate::models::{Quality, ReviewRecord, ReviewStats};
use crate::store::ReviewStore;
use chrono::{DateTime, Local, Utc};
use std::sync::Arc;
use tracing::{debug, warn};

pub struct Scheduler {
    store: Arc<dyn ReviewStore>,
    config: SchedulerConfig,
}

impl Scheduler {
    pub fn new(store: Arc<dyn ReviewStore>) -> Self {
        Self::with_config(store, SchedulerConfig::default())
    }

    pub fn with_config(store: Arc<dyn ReviewStore>, config: SchedulerConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Records a review of `item_id` at the current time.
    pub async fn record_review(
        &self,
        user: &str,
        item_id: &str,
        quality: Quality,
    ) -> Result<ReviewRecord, ReviewError> {
        self.record_review_at(user, item_id, quality, Utc::now()).await
    }

    /// Records a review that happened at `now`.
    ///
    /// Reads the current record (or starts a fresh one), applies SM-2 and
    /// overwrites the stored record. Concurrent reviews of the same item are
    /// last-write-wins.
    pub async fn record_review_at(
        &self,
        user: &str,
        item_id: &str,
        quality: Quality,
        now: DateTime<Utc>,
    ) -> Result<ReviewRecord, ReviewError> {
        let mut record = match self.store.get(user, item_id).await? {
            Some(record) => record,
            None => ReviewRecord::new(item_id, &self.config, now),
        };

        let update = compute_next_interval(
            &self.config,
            record.interval,
            record.easiness_factor,
            quality,
        );
        record.apply(update, quality, now);

        self.store.put(user, item_id, &record).await?;

        debug!(
            user,
            item_id,
            quality = quality.value(),
            interval = record.interval,
            easiness_factor = record.easiness_factor,
            next_review_at = %record.next_review_at,
            "review recorded"
        );
        Ok(record)
    }

    /// Items due by the end of today (local time), earliest first.
    pub async fn get_due_items_today(&self, user: &str) -> Vec<ReviewRecord> {
        self.get_due_items(user, Local::now()).await
    }

    /// Items whose next review falls on or before the end of `as_of`'s local
    /// day, sorted by due time and then item id.
    pub async fn get_due_items(&self, user: &str, as_of: DateTime<Local>) -> Vec<ReviewRecord> {
        let records = match self.store.get_all(user).await {
            Ok(records) => records,
            Err(e) => {
                warn!(user, error = %e, "failed to load review records, returning empty queue");
                return Vec::new();
            }
        };

        let cutoff = end_of_day(as_of);
        let mut due: Vec<ReviewRecord> = records
            .into_values()
            .filter(|record| record.is_due(cutoff))
            .collect();
        due.sort_by(|a, b| {
            a.next_review_at
                .cmp(&b.next_review_at)
                .then_with(|| a.item_id.cmp(&b.item_id))
        });

        debug!(user, due = due.len(), "due queue computed");
        due
    }

    /// Summary of the learner's review records as of `now`.
    pub async fn review_stats(&self, user: &str, now: DateTime<Local>) -> ReviewStats {
        let records = match self.store.get_all(user).await {
            Ok(records) => records,
            Err(e) => {
                warn!(user, error = %e, "failed to load review records, returning empty stats");
                return ReviewStats::default();
            }
        };

        let mut stats = ReviewStats {
            total_words: records.len() as u32,
            ..ReviewStats::default()
        };
        if records.is_empty() {
            return stats;
        }

        let mut total_interval: u64 = 0;
        for record in records.values() {
            if record
                .last_reviewed_at
                .is_some_and(|reviewed| is_same_local_day(reviewed, now))
            {
                stats.today_reviewed += 1;
            }
            total_interval += u64::from(record.interval);
            if record.interval > self.config.mastered_interval_days {
                stats.mastered_words += 1;
            }
            if record
                .last_quality
                .is_some_and(|quality| !quality.is_pass(self.config.pass_threshold))
            {
                stats.struggling_words += 1;
            }
        }
        stats.average_interval =
            (total_interval as f64 / records.len() as f64).round() as u32;

        stats
    }
}
