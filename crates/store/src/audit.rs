//! Audit log for client-originated events (`POST /api/notify`).
//!
//! These never alter session state; they exist so "the shell exited at 17:02"
//! is answerable later.

use chrono::{DateTime, Utc};
use rusqlite::params;
use serde::{Deserialize, Serialize};
use sentinel_core::{Error, Result};
use uuid::Uuid;

use crate::db::{db_err, parse_rfc3339, Store};

/// One recorded client event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEvent {
    pub id: Uuid,
    pub kind: String,
    pub created_at: DateTime<Utc>,
}

impl Store {
    /// Appends a client event to the audit log.
    pub fn record_audit_event(&self, kind: &str) -> Result<()> {
        self.conn()?
            .execute(
                "INSERT INTO audit_events (id, kind, created_at) VALUES (?1, ?2, ?3)",
                params![Uuid::new_v4().to_string(), kind, Utc::now().to_rfc3339()],
            )
            .map_err(db_err)?;
        Ok(())
    }

    /// Most recent audit events, newest first.
    pub fn recent_audit_events(&self, limit: i64) -> Result<Vec<AuditEvent>> {
        let conn = self.conn()?;
        let mut stmt = conn
            .prepare(
                "SELECT id, kind, created_at FROM audit_events
                 ORDER BY created_at DESC LIMIT ?1",
            )
            .map_err(db_err)?;

        let rows = stmt
            .query_map(params![limit], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                ))
            })
            .map_err(db_err)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(db_err)?;

        rows.into_iter()
            .map(|(id, kind, created_at)| {
                Ok(AuditEvent {
                    id: Uuid::parse_str(&id)
                        .map_err(|e| Error::persistence(format!("corrupt audit id {id:?}: {e}")))?,
                    kind,
                    created_at: parse_rfc3339(&created_at)?,
                })
            })
            .collect()
    }
}
