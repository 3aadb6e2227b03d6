pub mod catalog_item;
pub mod learning_status;
pub mod quality;
pub mod review_record;
pub mod sm2;
pub mod stats;

pub use catalog_item::{CatalogItem, ItemFilters, Level};
pub use learning_status::{LearningStatus, LearningStatusRecord};
pub use quality::Quality;
pub use review_record::ReviewRecord;
pub use stats::{DailyTrend, LearningStats, ReviewStats, StatsSummary, TodayRecommendation};
