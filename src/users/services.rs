use async_trait::async_trait;
use password_auth::{generate_hash, verify_password};
use sqlx::SqlitePool;
use tracing::debug;

use crate::common::{safe_email_log, ModelError};

/// Persistence and credential checks for user accounts
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Creates an account; `DuplicateEmail` when the address is taken
    async fn insert(&self, name: &str, email: &str, password: &str) -> Result<(), ModelError>;

    /// Returns the user id for matching credentials, else `InvalidCredentials`
    async fn authenticate(&self, email: &str, password: &str) -> Result<i64, ModelError>;

    async fn exists(&self, id: i64) -> Result<bool, ModelError>;
}

pub struct UsersService {
    db: SqlitePool,
}

impl UsersService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UsersService {
    async fn insert(&self, name: &str, email: &str, password: &str) -> Result<(), ModelError> {
        // Argon2 is CPU-bound; keep it off the async workers
        let password = password.to_string();
        let hashed_password = tokio::task::spawn_blocking(move || generate_hash(password)).await?;

        sqlx::query(
            r#"
            INSERT INTO users (name, email, hashed_password, created)
            VALUES (?, ?, ?, datetime('now'))
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(&hashed_password)
        .execute(&self.db)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                ModelError::DuplicateEmail
            }
            other => ModelError::Database(other),
        })?;

        debug!(email = %safe_email_log(email), "Created user");
        Ok(())
    }

    async fn authenticate(&self, email: &str, password: &str) -> Result<i64, ModelError> {
        let row: Option<(i64, String)> =
            sqlx::query_as("SELECT id, hashed_password FROM users WHERE email = ?")
                .bind(email)
                .fetch_optional(&self.db)
                .await?;

        let Some((id, hashed_password)) = row else {
            return Err(ModelError::InvalidCredentials);
        };

        let password = password.to_string();
        tokio::task::spawn_blocking(move || verify_password(password, &hashed_password))
            .await?
            .map_err(|_| ModelError::InvalidCredentials)?;

        Ok(id)
    }

    async fn exists(&self, id: i64) -> Result<bool, ModelError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE id = ?)")
            .bind(id)
            .fetch_one(&self.db)
            .await?;
        Ok(exists)
    }
}
