//! JSON import/export of a learner's review records.
//! Used for backups and for moving progress between devices.

use crate::config::SchedulerConfig;
use crate::error::ExportError;
use crate::models::ReviewRecord;
use crate::store::ReviewStore;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tracing::{info, warn};

/// Everything needed to restore one learner's review schedule.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReviewSnapshot {
    pub user: String,
    pub exported_at: DateTime<Utc>,
    pub records: Vec<ReviewRecord>,
}

/// Collects all of `user`'s records, sorted by item id.
pub async fn snapshot(store: &dyn ReviewStore, user: &str) -> Result<ReviewSnapshot, ExportError> {
    let mut records: Vec<ReviewRecord> = store.get_all(user).await?.into_values().collect();
    records.sort_by(|a, b| a.item_id.cmp(&b.item_id));
    Ok(ReviewSnapshot {
        user: user.to_string(),
        exported_at: Utc::now(),
        records,
    })
}

/// Writes `user`'s records to a JSON file at `path`.
/// Returns the number of records written.
pub async fn export_records(
    store: &dyn ReviewStore,
    user: &str,
    path: impl AsRef<Path>,
) -> Result<usize, ExportError> {
    let snapshot = snapshot(store, user).await?;
    let json_string = serde_json::to_string_pretty(&snapshot)?;
    let mut file = File::create(path.as_ref())?;
    file.write_all(json_string.as_bytes())?;

    info!(user, records = snapshot.records.len(), path = %path.as_ref().display(), "review records exported");
    Ok(snapshot.records.len())
}

/// Reads a snapshot file without touching any store.
pub fn read_snapshot(path: impl AsRef<Path>) -> Result<ReviewSnapshot, ExportError> {
    let mut file = File::open(path.as_ref())?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;
    Ok(serde_json::from_str(&contents)?)
}

/// Restores a snapshot into `store` under the snapshot's user, overwriting
/// records with the same item id. Returns the number of records written.
///
/// Records are clamped to `config`'s bounds before they are written, so a
/// hand-edited or foreign snapshot cannot put an interval of 0 or an easiness
/// factor below the floor into the store. The whole file is parsed before
/// anything is written; a failed write stops the import and reports how many
/// records already landed as [`ExportError::PartialImport`].
pub async fn import_records(
    store: &dyn ReviewStore,
    config: &SchedulerConfig,
    path: impl AsRef<Path>,
) -> Result<usize, ExportError> {
    let snapshot = read_snapshot(path.as_ref())?;
    let total = snapshot.records.len();

    for (written, mut record) in snapshot.records.into_iter().enumerate() {
        record.normalize(config);
        if let Err(source) = store.put(&snapshot.user, &record.item_id, &record).await {
            warn!(user = %snapshot.user, written, total, error = %source, "import interrupted");
            return Err(ExportError::PartialImport {
                written,
                total,
                source,
            });
        }
    }

    info!(user = %snapshot.user, records = total, "review records imported");
    Ok(total)
}
