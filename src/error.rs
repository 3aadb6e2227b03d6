//! Error types.
//!
//! Reads that only feed the screens (due queue, statistics) never fail: they
//! log and fall back to empty values. Anything that writes learner progress
//! returns one of the errors below so a lost write is never silent.

use thiserror::Error;

/// Failure inside a persistence adapter.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("store lock poisoned: {0}")]
    LockPoisoned(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Error returned by operations that mutate review or learning state.
#[derive(Error, Debug)]
pub enum ReviewError {
    #[error("failed to persist learner progress: {0}")]
    Persistence(#[from] StoreError),
}

/// Error returned by snapshot export and import.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid snapshot: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Store(#[from] StoreError),

    /// A write failed midway through an import. The first `written` records
    /// of the snapshot are already in the store.
    #[error("import stopped after {written} of {total} records: {source}")]
    PartialImport {
        written: usize,
        total: usize,
        #[source]
        source: StoreError,
    },
}

/// Error returned when loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}
