//! SM-2 (SuperMemo 2) interval calculation.
//!
//! - Failed recall (quality below the pass threshold) sends the item back to
//!   a one day interval but keeps its easiness factor, so repeated failures
//!   keep wearing it down.
//! - The first success after a reset jumps to a fixed six day interval.
//! - Later successes multiply the interval by the easiness factor.
//! - Intervals are capped at the configured maximum.
//! - The easiness factor is adjusted after every review and never falls
//!   below the configured floor. There is no upper bound.

use super::Quality;
use crate::config::SchedulerConfig;

/// New interval and easiness factor produced by one review.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntervalUpdate {
    pub interval: u32,
    pub easiness_factor: f64,
}

/// Calculates the next interval according to the SM-2 algorithm.
///
/// `current_interval` of 0 is treated as the initial interval.
pub fn compute_next_interval(
    config: &SchedulerConfig,
    current_interval: u32,
    current_easiness_factor: f64,
    quality: Quality,
) -> IntervalUpdate {
    let current_interval = current_interval.max(config.initial_interval);

    let interval = if !quality.is_pass(config.pass_threshold) {
        config.initial_interval
    } else if current_interval == config.initial_interval {
        config.graduating_interval
    } else {
        let grown = (current_interval as f64 * current_easiness_factor).round();
        grown.clamp(config.initial_interval as f64, config.max_interval as f64) as u32
    };
    let interval = interval.min(config.max_interval);

    let q = quality.value() as f64;
    let distance = Quality::MAX as f64 - q;
    let easiness_factor = (current_easiness_factor + (0.1 - distance * (0.08 + distance * 0.02)))
        .max(config.min_easiness_factor);

    IntervalUpdate {
        interval,
        easiness_factor,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn next(interval: u32, ef: f64, quality: i64) -> IntervalUpdate {
        compute_next_interval(&SchedulerConfig::default(), interval, ef, Quality::new(quality))
    }

    #[test]
    fn test_success_multiplies_interval() {
        let update = next(10, 2.5, 4);
        assert_eq!(update.interval, 25);
        assert!((update.easiness_factor - 2.5).abs() < 1e-9);
    }

    #[test]
    fn test_failure_resets_interval_and_lowers_ef() {
        let update = next(25, 2.0, 1);
        assert_eq!(update.interval, 1);
        assert!((update.easiness_factor - 1.46).abs() < 1e-9);
    }

    #[test]
    fn test_first_success_jumps_to_six() {
        assert_eq!(next(1, 2.5, 5).interval, 6);
        assert_eq!(next(1, 1.3, 3).interval, 6);
    }

    #[test]
    fn test_perfect_recall_raises_ef() {
        let update = next(6, 2.5, 5);
        assert_eq!(update.interval, 15);
        assert!((update.easiness_factor - 2.6).abs() < 1e-9);
    }

    #[test]
    fn test_ef_floor() {
        let update = next(1, 1.3, 0);
        assert_eq!(update.easiness_factor, 1.3);
        assert_eq!(update.interval, 1);
    }

    #[test]
    fn test_zero_interval_treated_as_new() {
        assert_eq!(next(0, 2.5, 4).interval, 6);
        assert_eq!(next(0, 2.5, 2).interval, 1);
    }

    #[test]
    fn test_custom_config() {
        let config = SchedulerConfig {
            graduating_interval: 3,
            min_easiness_factor: 2.0,
            ..SchedulerConfig::default()
        };

        let update = compute_next_interval(&config, 1, 2.1, Quality::new(0));
        assert_eq!(update.interval, 1);
        assert_eq!(update.easiness_factor, 2.0);

        let update = compute_next_interval(&config, 1, 2.1, Quality::new(4));
        assert_eq!(update.interval, 3);
    }

    #[test]
    fn test_interval_capped_at_max() {
        let update = next(30_000, 2.5, 5);
        assert_eq!(update.interval, 36_500);

        let config = SchedulerConfig {
            max_interval: 100,
            ..SchedulerConfig::default()
        };
        let update = compute_next_interval(&config, 60, 2.5, Quality::new(4));
        assert_eq!(update.interval, 100);
    }

    proptest! {
        #[test]
        fn prop_ef_never_below_floor(
            start in 1.3f64..4.0,
            qualities in proptest::collection::vec(0i64..=5, 1..40),
        ) {
            let mut interval = 1;
            let mut ef = start;
            for q in qualities {
                let update = next(interval, ef, q);
                prop_assert!(update.easiness_factor >= 1.3);
                prop_assert!(update.interval >= 1);
                interval = update.interval;
                ef = update.easiness_factor;
            }
        }

        #[test]
        fn prop_success_never_shrinks_interval(
            interval in 2u32..10_000,
            ef in 1.3f64..4.0,
            quality in 3i64..=5,
        ) {
            prop_assert!(next(interval, ef, quality).interval >= interval);
        }
    }
}
