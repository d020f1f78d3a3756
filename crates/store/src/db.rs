//! SQLite connection pool, schema migrations, and row helpers.

use std::path::Path;
use std::time::Duration;

use chrono::{DateTime, Utc};
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use sentinel_core::{Error, Result};
use tracing::info;

const BUSY_TIMEOUT: Duration = Duration::from_millis(2_000);

/// Schema migrations, applied in order by `user_version`.
const MIGRATIONS: &[&str] = &[
    // v1: session history, key/value config, audit log
    r#"
    CREATE TABLE sessions (
        id          TEXT PRIMARY KEY,
        start_time  TEXT NOT NULL,
        end_time    TEXT NOT NULL,
        duration_secs INTEGER NOT NULL,
        signals     TEXT NOT NULL,
        created_at  TEXT NOT NULL
    );
    CREATE INDEX idx_sessions_start_time ON sessions (start_time);

    CREATE TABLE config (
        key         TEXT PRIMARY KEY,
        value       TEXT NOT NULL,
        updated_at  TEXT NOT NULL
    );

    CREATE TABLE audit_events (
        id          TEXT PRIMARY KEY,
        kind        TEXT NOT NULL,
        created_at  TEXT NOT NULL
    );
    "#,
];

/// Disk-backed store shared by the tracker loop and the API.
#[derive(Clone)]
pub struct Store {
    pool: Pool<SqliteConnectionManager>,
}

impl Store {
    /// Opens (or creates) the database at `path` and applies migrations.
    pub fn open(path: &Path) -> Result<Self> {
        let manager = SqliteConnectionManager::file(path).with_init(|conn| {
            conn.busy_timeout(BUSY_TIMEOUT)?;
            conn.execute_batch("PRAGMA journal_mode = WAL; PRAGMA foreign_keys = ON;")
        });

        let pool = Pool::new(manager)
            .map_err(|e| Error::persistence(format!("creating connection pool: {e}")))?;

        let conn = pool
            .get()
            .map_err(|e| Error::persistence(format!("opening startup connection: {e}")))?;
        apply_migrations(&conn)?;

        info!(path = %path.display(), "History store opened");

        Ok(Self { pool })
    }

    pub(crate) fn conn(&self) -> Result<PooledConnection<SqliteConnectionManager>> {
        self.pool
            .get()
            .map_err(|e| Error::persistence(format!("getting connection from pool: {e}")))
    }
}

fn apply_migrations(conn: &Connection) -> Result<()> {
    let version: i64 = conn
        .query_row("PRAGMA user_version", [], |row| row.get(0))
        .map_err(db_err)?;

    for (idx, migration) in MIGRATIONS.iter().enumerate() {
        let target = idx as i64 + 1;
        if version >= target {
            continue;
        }
        conn.execute_batch(migration).map_err(db_err)?;
        conn.pragma_update(None, "user_version", target)
            .map_err(db_err)?;
        info!(version = target, "Applied store migration");
    }

    Ok(())
}

pub(crate) fn db_err(e: rusqlite::Error) -> Error {
    Error::persistence(e.to_string())
}

pub(crate) fn now_rfc3339() -> String {
    Utc::now().to_rfc3339()
}

pub(crate) fn parse_rfc3339(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| Error::persistence(format!("corrupt timestamp {raw:?}: {e}")))
}
