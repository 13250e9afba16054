use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::debug;

use super::models::Snippet;
use crate::common::ModelError;

/// Persistence operations on snippets
#[async_trait]
pub trait SnippetRepository: Send + Sync {
    /// Stores a snippet expiring `expires` days from now and returns its id
    async fn insert(&self, title: &str, content: &str, expires: i64) -> Result<i64, ModelError>;

    /// Fetches an unexpired snippet by id
    async fn get(&self, id: i64) -> Result<Snippet, ModelError>;

    /// The ten most recently created unexpired snippets
    async fn latest(&self) -> Result<Vec<Snippet>, ModelError>;
}

pub struct SnippetsService {
    db: SqlitePool,
}

impl SnippetsService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SnippetRepository for SnippetsService {
    async fn insert(&self, title: &str, content: &str, expires: i64) -> Result<i64, ModelError> {
        let result = sqlx::query(
            r#"
            INSERT INTO snippets (title, content, created, expires)
            VALUES (?, ?, datetime('now'), datetime('now', ?))
            "#,
        )
        .bind(title)
        .bind(content)
        .bind(format!("+{} days", expires))
        .execute(&self.db)
        .await?;

        let id = result.last_insert_rowid();
        debug!(snippet_id = id, expires_days = expires, "Inserted snippet");
        Ok(id)
    }

    async fn get(&self, id: i64) -> Result<Snippet, ModelError> {
        sqlx::query_as::<_, Snippet>(
            r#"
            SELECT id, title, content, created, expires
            FROM snippets
            WHERE expires > datetime('now') AND id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or(ModelError::NoRecord)
    }

    async fn latest(&self) -> Result<Vec<Snippet>, ModelError> {
        let snippets = sqlx::query_as::<_, Snippet>(
            r#"
            SELECT id, title, content, created, expires
            FROM snippets
            WHERE expires > datetime('now')
            ORDER BY id DESC
            LIMIT 10
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(snippets)
    }
}
