//! Per learner, per item spaced repetition state.
use super::Quality;
use super::sm2::IntervalUpdate;
use crate::config::SchedulerConfig;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReviewRecord {
    pub item_id: String,
    /// Days until the next review, always at least 1.
    pub interval: u32,
    /// Never below the configured floor (1.3 by default).
    pub easiness_factor: f64,
    /// `last_reviewed_at + interval` days, recomputed on every review.
    pub next_review_at: DateTime<Utc>,
    pub review_count: u32,
    pub last_reviewed_at: Option<DateTime<Utc>>,
    pub last_quality: Option<Quality>,
}

impl ReviewRecord {
    /// State of an item that has never been reviewed. It is due immediately.
    pub fn new(item_id: impl Into<String>, config: &SchedulerConfig, now: DateTime<Utc>) -> Self {
        Self {
            item_id: item_id.into(),
            interval: config.initial_interval,
            easiness_factor: config.default_easiness_factor,
            next_review_at: now,
            review_count: 0,
            last_reviewed_at: None,
            last_quality: None,
        }
    }

    /// Due when the next review falls on or before `cutoff`.
    pub fn is_due(&self, cutoff: DateTime<Utc>) -> bool {
        self.next_review_at <= cutoff
    }

    /// Pulls a record coming from outside the scheduler (e.g. an imported
    /// snapshot) back within the configured bounds: interval between the
    /// initial and maximum interval, easiness factor at or above the floor.
    /// Returns true when anything was changed.
    pub fn normalize(&mut self, config: &SchedulerConfig) -> bool {
        let interval = self
            .interval
            .clamp(config.initial_interval, config.max_interval);
        let easiness_factor = if self.easiness_factor.is_finite() {
            self.easiness_factor.max(config.min_easiness_factor)
        } else {
            config.default_easiness_factor
        };

        let changed = interval != self.interval || easiness_factor != self.easiness_factor;
        if changed {
            warn!(
                item_id = %self.item_id,
                interval = self.interval,
                easiness_factor = self.easiness_factor,
                "review record out of bounds, clamping"
            );
            self.interval = interval;
            self.easiness_factor = easiness_factor;
        }
        changed
    }

    /// Applies a computed interval update as a review that happened at `now`.
    pub(crate) fn apply(&mut self, update: IntervalUpdate, quality: Quality, now: DateTime<Utc>) {
        self.interval = update.interval;
        self.easiness_factor = update.easiness_factor;
        self.next_review_at = now
            .checked_add_signed(Duration::days(i64::from(update.interval)))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        self.review_count = self.review_count.saturating_add(1);
        self.last_reviewed_at = Some(now);
        self.last_quality = Some(quality);
    }
}
