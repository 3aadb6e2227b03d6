//! Tuning parameters for the scheduler and the daily recommendation.
//!
//! Everything has a default matching the classic SM-2 constants, and the
//! whole thing can be overridden from a TOML file:
//!
//! ```toml
//! [scheduler]
//! default_easiness_factor = 2.5
//! min_easiness_factor = 1.3
//!
//! [recommendations]
//! new_words = 10
//! review_words = 15
//! ```

use crate::error::ConfigError;
use crate::models::Quality;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// SM-2 constants used by [`crate::models::sm2::compute_next_interval`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Easiness factor given to an item on its first review.
    pub default_easiness_factor: f64,
    /// Hard floor for the easiness factor.
    pub min_easiness_factor: f64,
    /// Interval (days) for new items and after a failed recall.
    pub initial_interval: u32,
    /// Interval (days) after the first successful recall.
    pub graduating_interval: u32,
    /// Lowest quality that counts as a successful recall.
    pub pass_threshold: u8,
    /// Upper bound on any computed interval (days).
    pub max_interval: u32,
    /// Items with a longer interval count as mastered in review stats.
    pub mastered_interval_days: u32,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            default_easiness_factor: 2.5,
            min_easiness_factor: 1.3,
            initial_interval: 1,
            graduating_interval: 6,
            pass_threshold: 3,
            max_interval: 36_500,
            mastered_interval_days: 30,
        }
    }
}

impl SchedulerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_easiness_factor <= 0.0 {
            return Err(ConfigError::Invalid(
                "min_easiness_factor must be positive".to_string(),
            ));
        }
        if self.default_easiness_factor < self.min_easiness_factor {
            return Err(ConfigError::Invalid(format!(
                "default_easiness_factor {} is below min_easiness_factor {}",
                self.default_easiness_factor, self.min_easiness_factor
            )));
        }
        if self.initial_interval == 0 {
            return Err(ConfigError::Invalid(
                "initial_interval must be at least one day".to_string(),
            ));
        }
        if self.graduating_interval < self.initial_interval {
            return Err(ConfigError::Invalid(
                "graduating_interval must not be shorter than initial_interval".to_string(),
            ));
        }
        if self.max_interval < self.graduating_interval {
            return Err(ConfigError::Invalid(
                "max_interval must not be shorter than graduating_interval".to_string(),
            ));
        }
        if self.pass_threshold > Quality::MAX {
            return Err(ConfigError::Invalid(format!(
                "pass_threshold must be within 0..={}",
                Quality::MAX
            )));
        }
        Ok(())
    }
}

/// Caps for the "today" recommendation shown on the progress screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendationLimits {
    pub new_words: u32,
    pub review_words: u32,
}

impl Default for RecommendationLimits {
    fn default() -> Self {
        Self {
            new_words: 10,
            review_words: 15,
        }
    }
}

/// Top-level configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub scheduler: SchedulerConfig,
    pub recommendations: RecommendationLimits,
}

impl AppConfig {
    /// Parses and validates a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(contents)?;
        config.scheduler.validate()?;
        Ok(config)
    }

    /// Loads a TOML config file from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.scheduler.validate().is_ok());
        assert_eq!(config.recommendations.new_words, 10);
        assert_eq!(config.recommendations.review_words, 15);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
[scheduler]
min_easiness_factor = 1.5

[recommendations]
review_words = 20
"#,
        )
        .unwrap();

        assert_eq!(config.scheduler.min_easiness_factor, 1.5);
        assert_eq!(config.scheduler.default_easiness_factor, 2.5);
        assert_eq!(config.scheduler.graduating_interval, 6);
        assert_eq!(config.recommendations.review_words, 20);
        assert_eq!(config.recommendations.new_words, 10);
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_rejects_floor_above_default() {
        let result = AppConfig::from_toml_str(
            r#"
[scheduler]
default_easiness_factor = 1.2
min_easiness_factor = 1.3
"#,
        );
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_zero_initial_interval() {
        let config = SchedulerConfig {
            initial_interval: 0,
            ..SchedulerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_max_interval_below_graduating() {
        let config = SchedulerConfig {
            max_interval: 3,
            ..SchedulerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_malformed_toml() {
        let result = AppConfig::from_toml_str("[scheduler\nmin = ");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sign_srs.toml");
        std::fs::write(&path, "[recommendations]\nnew_words = 5\n").unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.recommendations.new_words, 5);
    }
}
