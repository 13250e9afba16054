// src/sessions/sqlite.rs
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use sqlx::SqlitePool;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, error};

use super::store::{SessionError, SessionRecord, SessionStore};

/// Session store backed by the `sessions` table.
///
/// Values are stored as a JSON object, expiry as a unix timestamp.
#[derive(Debug, Clone)]
pub struct SqliteSessionStore {
    db: SqlitePool,
}

impl SqliteSessionStore {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Removes every record whose expiry has passed
    pub async fn delete_expired(&self) -> Result<u64, SessionError> {
        let result = sqlx::query("DELETE FROM sessions WHERE expiry <= ?")
            .bind(Utc::now().timestamp())
            .execute(&self.db)
            .await?;
        Ok(result.rows_affected())
    }

    /// Spawns a background task pruning expired sessions every `interval`
    pub fn start_cleanup_task(&self, interval: Duration) {
        let store = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                match store.delete_expired().await {
                    Ok(removed) if removed > 0 => debug!(removed, "Pruned expired sessions"),
                    Ok(_) => {}
                    Err(e) => error!(error = %e, "Failed to prune expired sessions"),
                }
            }
        });
    }
}

#[async_trait]
impl SessionStore for SqliteSessionStore {
    async fn find(&self, token: &str) -> Result<Option<SessionRecord>, SessionError> {
        let row: Option<(String, i64)> =
            sqlx::query_as("SELECT data, expiry FROM sessions WHERE token = ? AND expiry > ?")
                .bind(token)
                .bind(Utc::now().timestamp())
                .fetch_optional(&self.db)
                .await?;

        let Some((data, expiry)) = row else {
            return Ok(None);
        };

        let values: HashMap<String, serde_json::Value> = serde_json::from_str(&data)
            .map_err(|e| SessionError::Serialization(e.to_string()))?;
        let expires_at = Utc
            .timestamp_opt(expiry, 0)
            .single()
            .ok_or_else(|| SessionError::Serialization(format!("invalid expiry {}", expiry)))?;

        Ok(Some(SessionRecord { values, expires_at }))
    }

    async fn commit(&self, token: &str, record: &SessionRecord) -> Result<(), SessionError> {
        let data = serde_json::to_string(&record.values)
            .map_err(|e| SessionError::Serialization(e.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO sessions (token, data, expiry)
            VALUES (?, ?, ?)
            ON CONFLICT(token) DO UPDATE SET data = excluded.data, expiry = excluded.expiry
            "#,
        )
        .bind(token)
        .bind(&data)
        .bind(record.expires_at.timestamp())
        .execute(&self.db)
        .await?;

        Ok(())
    }

    async fn delete(&self, token: &str) -> Result<(), SessionError> {
        sqlx::query("DELETE FROM sessions WHERE token = ?")
            .bind(token)
            .execute(&self.db)
            .await?;
        Ok(())
    }
}
