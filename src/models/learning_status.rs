//! Coarse four-state learning status kept next to the review records.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LearningStatus {
    #[default]
    NotStarted,
    Learning,
    Reviewing,
    Mastered,
}

impl LearningStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::Learning => "learning",
            Self::Reviewing => "reviewing",
            Self::Mastered => "mastered",
        }
    }

    /// Next status in the toggle cycle used by the word list:
    /// not started -> learning -> reviewing -> mastered -> not started.
    pub fn next(&self) -> Self {
        match self {
            Self::NotStarted => Self::Learning,
            Self::Learning => Self::Reviewing,
            Self::Reviewing => Self::Mastered,
            Self::Mastered => Self::NotStarted,
        }
    }

    /// Whether entering this status counts as a review.
    fn counts_as_review(&self) -> bool {
        matches!(self, Self::Reviewing | Self::Mastered)
    }
}

impl fmt::Display for LearningStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LearningStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "not_started" => Ok(Self::NotStarted),
            "learning" => Ok(Self::Learning),
            "reviewing" => Ok(Self::Reviewing),
            "mastered" => Ok(Self::Mastered),
            other => Err(format!("unknown learning status '{}'", other)),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LearningStatusRecord {
    pub status: LearningStatus,
    pub first_studied_at: Option<DateTime<Utc>>,
    pub last_studied_at: Option<DateTime<Utc>>,
    /// Bumped only when the status changes into reviewing or mastered.
    pub review_count: u32,
}

impl LearningStatusRecord {
    /// Moves the record to `status` as of `now`.
    pub fn transition(&mut self, status: LearningStatus, now: DateTime<Utc>) {
        if status.counts_as_review() && self.status != status {
            self.review_count = self.review_count.saturating_add(1);
        }
        if self.first_studied_at.is_none() {
            self.first_studied_at = Some(now);
        }
        self.last_studied_at = Some(now);
        self.status = status;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_cycle_wraps_around() {
        let mut status = LearningStatus::NotStarted;
        let mut seen = Vec::new();
        for _ in 0..4 {
            status = status.next();
            seen.push(status);
        }
        assert_eq!(
            seen,
            vec![
                LearningStatus::Learning,
                LearningStatus::Reviewing,
                LearningStatus::Mastered,
                LearningStatus::NotStarted,
            ]
        );
    }

    #[test]
    fn test_parse_round_trips_labels() {
        for status in [
            LearningStatus::NotStarted,
            LearningStatus::Learning,
            LearningStatus::Reviewing,
            LearningStatus::Mastered,
        ] {
            assert_eq!(status.as_str().parse::<LearningStatus>(), Ok(status));
        }
        assert!("finished".parse::<LearningStatus>().is_err());
    }

    #[test]
    fn test_transition_counts_only_new_review_states() {
        let day1 = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
        let day2 = Utc.with_ymd_and_hms(2024, 5, 2, 8, 0, 0).unwrap();
        let mut record = LearningStatusRecord::default();

        record.transition(LearningStatus::Learning, day1);
        assert_eq!(record.review_count, 0);
        assert_eq!(record.first_studied_at, Some(day1));

        record.transition(LearningStatus::Reviewing, day2);
        assert_eq!(record.review_count, 1);

        // Same status again is not a transition.
        record.transition(LearningStatus::Reviewing, day2);
        assert_eq!(record.review_count, 1);

        record.transition(LearningStatus::Mastered, day2);
        assert_eq!(record.review_count, 2);
        assert_eq!(record.first_studied_at, Some(day1));
        assert_eq!(record.last_studied_at, Some(day2));
    }

    #[test]
    fn test_serializes_snake_case() {
        let json = serde_json::to_string(&LearningStatus::NotStarted).unwrap();
        assert_eq!(json, "\"not_started\"");
    }
}
