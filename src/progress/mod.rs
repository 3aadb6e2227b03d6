//! Learning status tracking and the statistics built on top of it.
pub mod aggregator;
pub mod tracker;

pub use aggregator::Aggregator;
pub use tracker::ProgressTracker;
