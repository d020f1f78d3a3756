//! Append-only session history.

use rusqlite::{params, Row};
use sentinel_core::limits::MAX_PAGE_SIZE;
use sentinel_core::{Error, HistoryRecord, Result};
use tracing::debug;
use uuid::Uuid;

use crate::db::{db_err, parse_rfc3339, Store};

impl Store {
    /// Appends a closed session. Durable before returning; the record's
    /// unique id makes a replayed append a conflict, not a duplicate row.
    pub fn append(&self, record: &HistoryRecord) -> Result<()> {
        let signals = serde_json::to_string(&record.signals)?;

        self.conn()?
            .execute(
                "INSERT INTO sessions (id, start_time, end_time, duration_secs, signals, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    record.id.to_string(),
                    record.start_time.to_rfc3339(),
                    record.end_time.to_rfc3339(),
                    record.duration_secs,
                    signals,
                    record.created_at.to_rfc3339(),
                ],
            )
            .map_err(db_err)?;

        debug!(session_id = %record.id, duration_secs = record.duration_secs, "Session appended to history");
        Ok(())
    }

    /// Paginated history, most recent first.
    ///
    /// `page` starts at 1. `page_size` below 1 is rejected; above
    /// [`MAX_PAGE_SIZE`] it is clamped. Returns the page plus the total
    /// record count.
    pub fn query(&self, page: i64, page_size: i64) -> Result<(Vec<HistoryRecord>, i64)> {
        if page < 1 {
            return Err(Error::invalid_argument(format!(
                "page must be >= 1, got {page}"
            )));
        }
        if page_size < 1 {
            return Err(Error::invalid_argument(format!(
                "pageSize must be >= 1, got {page_size}"
            )));
        }
        let page_size = page_size.min(MAX_PAGE_SIZE);
        let offset = (page - 1) * page_size;

        let conn = self.conn()?;

        let total: i64 = conn
            .query_row("SELECT COUNT(*) FROM sessions", [], |row| row.get(0))
            .map_err(db_err)?;

        let mut stmt = conn
            .prepare(
                "SELECT id, start_time, end_time, duration_secs, signals, created_at
                 FROM sessions ORDER BY start_time DESC LIMIT ?1 OFFSET ?2",
            )
            .map_err(db_err)?;

        let records = stmt
            .query_map(params![page_size, offset], record_from_row)
            .map_err(db_err)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(db_err)?
            .into_iter()
            .map(finish_record)
            .collect::<Result<Vec<_>>>()?;

        Ok((records, total))
    }

    /// Full history, most recent first. Legacy shape for clients that never
    /// send pagination parameters.
    pub fn query_all(&self) -> Result<Vec<HistoryRecord>> {
        let conn = self.conn()?;

        let mut stmt = conn
            .prepare(
                "SELECT id, start_time, end_time, duration_secs, signals, created_at
                 FROM sessions ORDER BY start_time DESC",
            )
            .map_err(db_err)?;

        let records = stmt
            .query_map([], record_from_row)
            .map_err(db_err)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(db_err)?
            .into_iter()
            .map(finish_record)
            .collect::<Result<Vec<_>>>()?;

        Ok(records)
    }
}

/// Raw row before timestamp/JSON decoding.
struct RawRecord {
    id: String,
    start_time: String,
    end_time: String,
    duration_secs: i64,
    signals: String,
    created_at: String,
}

fn record_from_row(row: &Row<'_>) -> rusqlite::Result<RawRecord> {
    Ok(RawRecord {
        id: row.get(0)?,
        start_time: row.get(1)?,
        end_time: row.get(2)?,
        duration_secs: row.get(3)?,
        signals: row.get(4)?,
        created_at: row.get(5)?,
    })
}

fn finish_record(raw: RawRecord) -> Result<HistoryRecord> {
    Ok(HistoryRecord {
        id: Uuid::parse_str(&raw.id)
            .map_err(|e| Error::persistence(format!("corrupt session id {:?}: {e}", raw.id)))?,
        start_time: parse_rfc3339(&raw.start_time)?,
        end_time: parse_rfc3339(&raw.end_time)?,
        duration_secs: raw.duration_secs,
        signals: serde_json::from_str(&raw.signals)?,
        created_at: parse_rfc3339(&raw.created_at)?,
    })
}
