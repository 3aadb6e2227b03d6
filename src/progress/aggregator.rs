//! Vocabulary-wide progress statistics.
//!
//! Every method here is a display helper: when the catalog or the progress
//! store fails, the failure is logged and a zeroed result is returned.

use crate::clock::{is_same_local_day, local_date};
use crate::config::RecommendationLimits;
use crate::models::{
    CatalogItem, DailyTrend, ItemFilters, LearningStatus, LearningStatusRecord, Level,
    StatsSummary, TodayRecommendation,
};
use crate::store::{Catalog, ProgressStore};
use chrono::{DateTime, Duration, Local};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, warn};

/// Number of days covered by [`Aggregator::learning_trend`].
pub const TREND_DAYS: i64 = 7;

pub struct Aggregator {
    progress: Arc<dyn ProgressStore>,
    catalog: Arc<dyn Catalog>,
    limits: RecommendationLimits,
}

impl Aggregator {
    pub fn new(progress: Arc<dyn ProgressStore>, catalog: Arc<dyn Catalog>) -> Self {
        Self::with_limits(progress, catalog, RecommendationLimits::default())
    }

    pub fn with_limits(
        progress: Arc<dyn ProgressStore>,
        catalog: Arc<dyn Catalog>,
        limits: RecommendationLimits,
    ) -> Self {
        Self {
            progress,
            catalog,
            limits,
        }
    }

    /// Statistics over the catalog items matching `filters`.
    pub async fn compute_stats(
        &self,
        user: &str,
        filters: &ItemFilters,
        now: DateTime<Local>,
    ) -> StatsSummary {
        let items = match self.catalog.query_items(filters).await {
            Ok(items) => items,
            Err(e) => {
                warn!(user, error = %e, "failed to query catalog, returning empty stats");
                return StatsSummary::default();
            }
        };
        self.compute_stats_for(user, &items, now).await
    }

    /// Statistics over a caller-supplied item list.
    pub async fn compute_stats_for(
        &self,
        user: &str,
        items: &[CatalogItem],
        now: DateTime<Local>,
    ) -> StatsSummary {
        let fetched = tokio::try_join!(
            self.progress.get_learning_status_all(user),
            self.progress.get_favorites(user),
        );
        let (statuses, favorites) = match fetched {
            Ok(fetched) => fetched,
            Err(e) => {
                warn!(user, error = %e, "failed to load progress, returning empty stats");
                return StatsSummary::default();
            }
        };

        let stats = tally(items, &statuses, &favorites, &self.limits, now);
        debug!(
            user,
            total = stats.total_words,
            progress_rate = stats.progress_rate,
            "stats computed"
        );
        stats
    }

    /// Activity for the last seven local days, oldest first, ending today.
    pub async fn learning_trend(&self, user: &str, now: DateTime<Local>) -> Vec<DailyTrend> {
        let statuses = match self.progress.get_learning_status_all(user).await {
            Ok(statuses) => statuses,
            Err(e) => {
                warn!(user, error = %e, "failed to load progress, returning empty trend");
                return Vec::new();
            }
        };

        let today = now.date_naive();
        (0..TREND_DAYS)
            .rev()
            .map(|offset| {
                let date = today - Duration::days(offset);
                let mut day = DailyTrend::empty(date);
                for record in statuses.values() {
                    if record.first_studied_at.map(local_date) == Some(date) {
                        day.new_learned += 1;
                    }
                    if record.last_studied_at.map(local_date) == Some(date) {
                        if record.status == LearningStatus::Mastered {
                            day.mastered += 1;
                        } else {
                            day.reviewed += 1;
                        }
                    }
                }
                day
            })
            .collect()
    }

    /// Catalog items in the `reviewing` state, least recently studied first.
    pub async fn words_needing_review(&self, user: &str, limit: usize) -> Vec<CatalogItem> {
        let all = ItemFilters::default();
        let fetched = tokio::try_join!(
            self.catalog.query_items(&all),
            self.progress.get_learning_status_all(user),
        );
        let (items, statuses) = match fetched {
            Ok(fetched) => fetched,
            Err(e) => {
                warn!(user, error = %e, "failed to load review candidates");
                return Vec::new();
            }
        };

        let mut reviewing: Vec<(CatalogItem, &LearningStatusRecord)> = items
            .into_iter()
            .filter_map(|item| {
                let record = statuses.get(&item.item_id)?;
                (record.status == LearningStatus::Reviewing).then_some((item, record))
            })
            .collect();
        // Never-studied entries sort first since `None < Some(_)`.
        reviewing.sort_by_key(|(_, record)| record.last_studied_at);
        reviewing.truncate(limit);
        reviewing.into_iter().map(|(item, _)| item).collect()
    }
}

fn tally(
    items: &[CatalogItem],
    statuses: &HashMap<String, LearningStatusRecord>,
    favorites: &HashSet<String>,
    limits: &RecommendationLimits,
    now: DateTime<Local>,
) -> StatsSummary {
    let mut stats = StatsSummary {
        total_words: items.len() as u32,
        ..StatsSummary::default()
    };

    for item in items {
        if favorites.contains(&item.item_id) {
            stats.favorite_words += 1;
        }

        let status = statuses
            .get(&item.item_id)
            .map(|record| record.status)
            .unwrap_or_default();
        match status {
            LearningStatus::NotStarted => stats.not_started += 1,
            LearningStatus::Learning => stats.learning += 1,
            LearningStatus::Reviewing => stats.reviewing += 1,
            LearningStatus::Mastered => stats.mastered += 1,
        }

        match item.level.as_deref().and_then(Level::from_label) {
            Some(Level::Beginner) => stats.beginner += 1,
            Some(Level::Intermediate) => stats.intermediate += 1,
            Some(Level::Advanced) => stats.advanced += 1,
            None => {}
        }

        if let Some(category) = item.category.as_deref().filter(|c| !c.is_empty()) {
            *stats.categories.entry(category.to_string()).or_insert(0) += 1;
        }
    }

    let started = stats.learning + stats.reviewing + stats.mastered;
    stats.progress_rate = if stats.total_words > 0 {
        (started as f64 / stats.total_words as f64 * 100.0).round() as u32
    } else {
        0
    };

    // Counted over every status record, not just the filtered items.
    let mastered_today = statuses
        .values()
        .filter(|record| {
            record.status == LearningStatus::Mastered
                && record
                    .last_studied_at
                    .is_some_and(|studied| is_same_local_day(studied, now))
        })
        .count() as u32;

    stats.today_recommendation = TodayRecommendation {
        new_words: stats.not_started.min(limits.new_words),
        review_words: stats.reviewing.min(limits.review_words),
        mastered_today,
    };
    stats
}
