//! SQLite persistence for review records, learning status, favourites and
//! the word catalog.
//!
//! All tables are keyed by `(user_id, item_id)` except the catalog, which is
//! shared between learners. Timestamps are stored as text by rusqlite's
//! chrono support.

use crate::error::{StoreError, StoreResult};
use crate::models::{
    CatalogItem, ItemFilters, LearningStatus, LearningStatusRecord, Quality, ReviewRecord,
};
use crate::store::{Catalog, ProgressStore, ReviewStore};
use async_trait::async_trait;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rusqlite::{Connection, OptionalExtension, Row, params};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

impl ToSql for LearningStatus {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for LearningStatus {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|e: String| FromSqlError::Other(e.into()))
    }
}

/// Creates the tables if they do not exist yet.
pub fn init_database(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS review_records (
            user_id TEXT NOT NULL,
            item_id TEXT NOT NULL,
            interval_days INTEGER NOT NULL DEFAULT 1,
            easiness_factor REAL NOT NULL DEFAULT 2.5,
            next_review_at TEXT NOT NULL,
            review_count INTEGER NOT NULL DEFAULT 0,
            last_reviewed_at TEXT,
            last_quality INTEGER,
            PRIMARY KEY (user_id, item_id)
        );

        CREATE INDEX IF NOT EXISTS idx_review_records_due
            ON review_records(user_id, next_review_at);

        CREATE TABLE IF NOT EXISTS learning_status (
            user_id TEXT NOT NULL,
            item_id TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT 'not_started',
            first_studied_at TEXT,
            last_studied_at TEXT,
            review_count INTEGER NOT NULL DEFAULT 0,
            PRIMARY KEY (user_id, item_id)
        );

        CREATE TABLE IF NOT EXISTS favorites (
            user_id TEXT NOT NULL,
            item_id TEXT NOT NULL,
            PRIMARY KEY (user_id, item_id)
        );

        CREATE TABLE IF NOT EXISTS catalog_items (
            item_id TEXT PRIMARY KEY,
            word TEXT NOT NULL,
            category TEXT,
            level TEXT
        );
        ",
    )
}

fn review_record_from_row(row: &Row<'_>) -> rusqlite::Result<ReviewRecord> {
    Ok(ReviewRecord {
        item_id: row.get(0)?,
        interval: row.get(1)?,
        easiness_factor: row.get(2)?,
        next_review_at: row.get(3)?,
        review_count: row.get(4)?,
        last_reviewed_at: row.get(5)?,
        last_quality: row.get::<_, Option<u8>>(6)?.map(Quality::from),
    })
}

fn status_record_from_row(row: &Row<'_>) -> rusqlite::Result<(String, LearningStatusRecord)> {
    Ok((
        row.get(0)?,
        LearningStatusRecord {
            status: row.get(1)?,
            first_studied_at: row.get(2)?,
            last_studied_at: row.get(3)?,
            review_count: row.get(4)?,
        },
    ))
}

/// SQLite-backed implementation of every store trait.
///
/// rusqlite is synchronous, so each trait method runs its query on the
/// calling task while holding the connection mutex. Queries touch one
/// learner's rows on a local file and finish in well under a millisecond,
/// so the store does not hand work off to `spawn_blocking`. A store shared
/// by many learners over a slow disk should wrap these calls in it.
#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Opens (or creates) the database file at `path`.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let conn = Connection::open(path)?;
        Self::from_connection(conn)
    }

    /// Opens a private in-memory database.
    pub fn in_memory() -> StoreResult<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> StoreResult<Self> {
        init_database(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))
    }

    /// Inserts or replaces a catalog item.
    pub fn add_item(&self, item: &CatalogItem) -> StoreResult<()> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT OR REPLACE INTO catalog_items (item_id, word, category, level)
             VALUES (?1, ?2, ?3, ?4)",
            params![item.item_id, item.word, item.category, item.level],
        )?;
        Ok(())
    }

    pub fn item_count(&self) -> StoreResult<u64> {
        let conn = self.lock()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM catalog_items", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}

#[async_trait]
impl ReviewStore for SqliteStore {
    async fn get(&self, user: &str, item_id: &str) -> StoreResult<Option<ReviewRecord>> {
        let conn = self.lock()?;
        let record = conn
            .query_row(
                "SELECT item_id, interval_days, easiness_factor, next_review_at,
                        review_count, last_reviewed_at, last_quality
                 FROM review_records WHERE user_id = ?1 AND item_id = ?2",
                params![user, item_id],
                review_record_from_row,
            )
            .optional()?;
        Ok(record)
    }

    async fn put(&self, user: &str, item_id: &str, record: &ReviewRecord) -> StoreResult<()> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT OR REPLACE INTO review_records
                (user_id, item_id, interval_days, easiness_factor, next_review_at,
                 review_count, last_reviewed_at, last_quality)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                user,
                item_id,
                record.interval,
                record.easiness_factor,
                record.next_review_at,
                record.review_count,
                record.last_reviewed_at,
                record.last_quality.map(u8::from),
            ],
        )?;
        debug!(user, item_id, "review record written");
        Ok(())
    }

    async fn get_all(&self, user: &str) -> StoreResult<HashMap<String, ReviewRecord>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT item_id, interval_days, easiness_factor, next_review_at,
                    review_count, last_reviewed_at, last_quality
             FROM review_records WHERE user_id = ?1",
        )?;
        let records = stmt
            .query_map(params![user], review_record_from_row)?
            .map(|record| record.map(|r| (r.item_id.clone(), r)))
            .collect::<rusqlite::Result<HashMap<_, _>>>()?;
        Ok(records)
    }
}

#[async_trait]
impl ProgressStore for SqliteStore {
    async fn get_learning_status_all(
        &self,
        user: &str,
    ) -> StoreResult<HashMap<String, LearningStatusRecord>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT item_id, status, first_studied_at, last_studied_at, review_count
             FROM learning_status WHERE user_id = ?1",
        )?;
        let records = stmt
            .query_map(params![user], status_record_from_row)?
            .collect::<rusqlite::Result<HashMap<_, _>>>()?;
        Ok(records)
    }

    async fn get_learning_status(
        &self,
        user: &str,
        item_id: &str,
    ) -> StoreResult<Option<LearningStatusRecord>> {
        let conn = self.lock()?;
        let record = conn
            .query_row(
                "SELECT item_id, status, first_studied_at, last_studied_at, review_count
                 FROM learning_status WHERE user_id = ?1 AND item_id = ?2",
                params![user, item_id],
                status_record_from_row,
            )
            .optional()?;
        Ok(record.map(|(_, record)| record))
    }

    async fn put_learning_status(
        &self,
        user: &str,
        item_id: &str,
        record: &LearningStatusRecord,
    ) -> StoreResult<()> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT OR REPLACE INTO learning_status
                (user_id, item_id, status, first_studied_at, last_studied_at, review_count)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                user,
                item_id,
                record.status,
                record.first_studied_at,
                record.last_studied_at,
                record.review_count,
            ],
        )?;
        Ok(())
    }

    async fn get_favorites(&self, user: &str) -> StoreResult<HashSet<String>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare("SELECT item_id FROM favorites WHERE user_id = ?1")?;
        let favorites = stmt
            .query_map(params![user], |row| row.get(0))?
            .collect::<rusqlite::Result<HashSet<String>>>()?;
        Ok(favorites)
    }

    async fn set_favorite(&self, user: &str, item_id: &str, favorite: bool) -> StoreResult<()> {
        let conn = self.lock()?;
        if favorite {
            conn.execute(
                "INSERT OR IGNORE INTO favorites (user_id, item_id) VALUES (?1, ?2)",
                params![user, item_id],
            )?;
        } else {
            conn.execute(
                "DELETE FROM favorites WHERE user_id = ?1 AND item_id = ?2",
                params![user, item_id],
            )?;
        }
        Ok(())
    }
}

#[async_trait]
impl Catalog for SqliteStore {
    /// Category and level are matched in SQL. The word search is applied
    /// afterwards with [`ItemFilters::matches`] because SQLite's `lower()`
    /// only folds ASCII, and both stores must agree on non-ASCII words.
    async fn query_items(&self, filters: &ItemFilters) -> StoreResult<Vec<CatalogItem>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT item_id, word, category, level FROM catalog_items
             WHERE (?1 IS NULL OR category = ?1)
               AND (?2 IS NULL OR level = ?2)
             ORDER BY item_id",
        )?;
        let items = stmt
            .query_map(params![filters.category, filters.level], |row| {
                Ok(CatalogItem {
                    item_id: row.get(0)?,
                    word: row.get(1)?,
                    category: row.get(2)?,
                    level: row.get(3)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(items
            .into_iter()
            .filter(|item| filters.matches(item))
            .collect())
    }
}
