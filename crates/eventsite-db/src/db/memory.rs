//! In-memory repositories for tests.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use eventsite_core::{AppError, Record};
use tokio::sync::Mutex;

use super::RecordRepository;

struct Table<R> {
    rows: BTreeMap<i32, R>,
    next_id: i32,
}

/// A [`RecordRepository`] over a map, with the same id and timestamp behaviour as the
/// PostgreSQL repositories.
pub struct MemoryRepository<R> {
    table: Mutex<Table<R>>,
    fail_writes: AtomicBool,
}

impl<R> Default for MemoryRepository<R> {
    fn default() -> Self {
        Self {
            table: Mutex::new(Table {
                rows: BTreeMap::new(),
                next_id: 1,
            }),
            fail_writes: AtomicBool::new(false),
        }
    }
}

impl<R: Record> MemoryRepository<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent insert/save fail with a database error.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub async fn len(&self) -> usize {
        self.table.lock().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn check_writable(&self) -> Result<(), AppError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AppError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

#[async_trait]
impl<R: Record> RecordRepository<R> for MemoryRepository<R> {
    async fn find(&self, id: i32) -> Result<Option<R>, AppError> {
        Ok(self.table.lock().await.rows.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<R>, AppError> {
        Ok(self.table.lock().await.rows.values().cloned().collect())
    }

    async fn insert(&self, record: &R, id: Option<i32>) -> Result<R, AppError> {
        self.check_writable()?;
        let now = Utc::now();
        let mut table = self.table.lock().await;

        let id = match id {
            Some(id) => id,
            None => table.next_id,
        };
        table.next_id = table.next_id.max(id + 1);

        let mut row = record.clone();
        row.set_id(id);
        let created_at = table.rows.get(&id).map(|r| r.created_at()).unwrap_or(now);
        row.set_timestamps(created_at, now);
        table.rows.insert(id, row.clone());

        Ok(row)
    }

    async fn save(&self, record: &R) -> Result<R, AppError> {
        self.check_writable()?;
        let mut table = self.table.lock().await;

        let created_at = table
            .rows
            .get(&record.id())
            .map(|r| r.created_at())
            .ok_or_else(|| AppError::NotFound(format!("Record {} not found", record.id())))?;

        let mut row = record.clone();
        row.set_timestamps(created_at, Utc::now());
        table.rows.insert(row.id(), row.clone());

        Ok(row)
    }

    async fn delete(&self, id: i32) -> Result<bool, AppError> {
        self.check_writable()?;
        Ok(self.table.lock().await.rows.remove(&id).is_some())
    }
}
