//! SQLite-backed durable mirror for closure memory.

use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use rusqlite::Connection;

use triage_core::errors::{ClosureError, TriageError, TriageResult};
use triage_core::models::ClosureRecord;
use triage_core::traits::IClosureStore;

fn storage_err(e: impl std::fmt::Display) -> TriageError {
    ClosureError::StorageFailed {
        reason: e.to_string(),
    }
    .into()
}

/// Single-connection SQLite store. Closures are tiny and written once
/// per investigation close, so one writer behind a mutex is plenty.
pub struct SqliteClosureStore {
    conn: Mutex<Connection>,
}

impl SqliteClosureStore {
    /// Open a store backed by a file on disk.
    pub fn open(path: &Path) -> TriageResult<Self> {
        let conn = Connection::open(path).map_err(storage_err)?;
        Self::initialize(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory store (for testing).
    pub fn open_in_memory() -> TriageResult<Self> {
        let conn = Connection::open_in_memory().map_err(storage_err)?;
        Self::initialize(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn initialize(conn: &Connection) -> TriageResult<()> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS closures (
                run_id             TEXT NOT NULL,
                root_cause         TEXT NOT NULL,
                signals_used       TEXT NOT NULL,
                false_leads        TEXT NOT NULL,
                resolution_seconds REAL NOT NULL,
                service            TEXT,
                env                TEXT,
                question_keywords  TEXT NOT NULL,
                recorded_at        TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_closures_recorded_at
                ON closures (recorded_at DESC);",
        )
        .map_err(storage_err)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl IClosureStore for SqliteClosureStore {
    fn persist(&self, record: &ClosureRecord) -> TriageResult<()> {
        let signals = serde_json::to_string(&record.signals_used).map_err(storage_err)?;
        let leads = serde_json::to_string(&record.false_leads).map_err(storage_err)?;
        let keywords = serde_json::to_string(&record.question_keywords).map_err(storage_err)?;
        self.lock()
            .execute(
                "INSERT INTO closures (run_id, root_cause, signals_used, false_leads,
                     resolution_seconds, service, env, question_keywords, recorded_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                rusqlite::params![
                    record.run_id,
                    record.root_cause,
                    signals,
                    leads,
                    record.resolution_seconds,
                    record.service,
                    record.env,
                    keywords,
                    record.recorded_at.to_rfc3339(),
                ],
            )
            .map_err(storage_err)?;
        Ok(())
    }

    fn load_recent(&self, limit: usize) -> TriageResult<Vec<ClosureRecord>> {
        let conn = self.lock();
        let mut stmt = conn
            .prepare(
                "SELECT run_id, root_cause, signals_used, false_leads, resolution_seconds,
                        service, env, question_keywords, recorded_at
                 FROM closures ORDER BY recorded_at DESC LIMIT ?1",
            )
            .map_err(storage_err)?;

        let rows = stmt
            .query_map([limit as i64], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, f64>(4)?,
                    row.get::<_, Option<String>>(5)?,
                    row.get::<_, Option<String>>(6)?,
                    row.get::<_, String>(7)?,
                    row.get::<_, String>(8)?,
                ))
            })
            .map_err(storage_err)?;

        let mut records = Vec::new();
        for row in rows {
            let (run_id, root_cause, signals, leads, seconds, service, env, keywords, ts) =
                row.map_err(storage_err)?;
            records.push(ClosureRecord {
                run_id,
                root_cause,
                signals_used: serde_json::from_str(&signals).map_err(storage_err)?,
                false_leads: serde_json::from_str(&leads).map_err(storage_err)?,
                resolution_seconds: seconds,
                service,
                env,
                question_keywords: serde_json::from_str(&keywords).map_err(storage_err)?,
                recorded_at: DateTime::parse_from_rfc3339(&ts)
                    .map_err(storage_err)?
                    .with_timezone(&Utc),
            });
        }
        Ok(records)
    }
}
