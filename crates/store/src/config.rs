//! Durable notification config.
//!
//! One JSON value in the `config` table. Saves run inside a transaction so a
//! failed write can never leave a half-updated config behind.

use rusqlite::{params, OptionalExtension};
use sentinel_core::{NotificationConfig, Result};

use crate::db::{db_err, now_rfc3339, Store};

const NOTIFICATION_KEY: &str = "notification";

impl Store {
    /// Current notification config, or the default when none was ever saved.
    pub fn load_notification_config(&self) -> Result<NotificationConfig> {
        let raw: Option<String> = self
            .conn()?
            .query_row(
                "SELECT value FROM config WHERE key = ?1",
                params![NOTIFICATION_KEY],
                |row| row.get(0),
            )
            .optional()
            .map_err(db_err)?;

        match raw {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(NotificationConfig::default()),
        }
    }

    /// Atomically persists a validated config. Last write wins.
    pub fn save_notification_config(&self, config: &NotificationConfig) -> Result<()> {
        let json = serde_json::to_string(config)?;

        let mut conn = self.conn()?;
        let tx = conn.transaction().map_err(db_err)?;
        tx.execute(
            "INSERT INTO config (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![NOTIFICATION_KEY, json, now_rfc3339()],
        )
        .map_err(db_err)?;
        tx.commit().map_err(db_err)
    }
}
