//! Summaries shown on the progress screens.
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodayRecommendation {
    pub new_words: u32,
    pub review_words: u32,
    pub mastered_today: u32,
}

/// Vocabulary-wide progress summary. The zero value is what the screens show
/// when the catalog or the progress store cannot be reached.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSummary {
    pub total_words: u32,
    pub favorite_words: u32,
    pub not_started: u32,
    pub learning: u32,
    pub reviewing: u32,
    pub mastered: u32,
    pub beginner: u32,
    pub intermediate: u32,
    pub advanced: u32,
    /// Word count per category label. Items without a category are left out.
    pub categories: BTreeMap<String, u32>,
    /// Percentage of words that have left `not_started`, rounded.
    pub progress_rate: u32,
    pub today_recommendation: TodayRecommendation,
}

/// Count of tracked items per learning status. Items that were never given a
/// status are not tracked and do not appear here.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningStats {
    pub not_started: u32,
    pub learning: u32,
    pub reviewing: u32,
    pub mastered: u32,
    pub total: u32,
}

/// Statistics over a learner's spaced repetition records.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewStats {
    pub total_words: u32,
    pub today_reviewed: u32,
    pub average_interval: u32,
    pub mastered_words: u32,
    pub struggling_words: u32,
}

/// Learning activity for one calendar day.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyTrend {
    pub date: NaiveDate,
    pub new_learned: u32,
    pub reviewed: u32,
    pub mastered: u32,
}

impl DailyTrend {
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            new_learned: 0,
            reviewed: 0,
            mastered: 0,
        }
    }
}
