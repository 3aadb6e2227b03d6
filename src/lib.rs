//! Learning core for the sign-language vocabulary app.
//!
//! - [`scheduler::Scheduler`]: SM-2 review scheduling and the daily due queue
//! - [`progress::ProgressTracker`]: four-state learning status per item
//! - [`progress::Aggregator`]: progress statistics for the dashboard
//! - [`session::ReviewSession`]: round-based review of the due queue
//! - [`store`]: async persistence contracts, with [`store::MemoryStore`] and
//!   [`database::SqliteStore`] implementations

pub mod clock;
pub mod config;
pub mod database;
pub mod error;
pub mod export;
pub mod models;
pub mod progress;
pub mod scheduler;
pub mod session;
pub mod store;

pub use config::{AppConfig, RecommendationLimits, SchedulerConfig};
pub use error::{ConfigError, ExportError, ReviewError, StoreError};
pub use models::{
    CatalogItem, ItemFilters, LearningStats, LearningStatus, LearningStatusRecord, Quality,
    ReviewRecord, ReviewStats, StatsSummary,
};
pub use progress::{Aggregator, ProgressTracker};
pub use scheduler::Scheduler;
pub use session::ReviewSession;
