use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::error::{AppError, Result};

#[derive(Debug, Clone, FromRow)]
pub struct AuthToken {
    pub token_hash: String,
    pub user_id: i64,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Persists opaque bearer-token hashes. The raw token itself is never
/// stored; only its SHA-256 hex digest, so a database dump does not leak
/// valid credentials.
#[derive(Clone)]
pub struct AuthTokenRepository {
    pool: PgPool,
}

impl AuthTokenRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        token_hash: &str,
        user_id: i64,
        expires_at: DateTime<Utc>,
    ) -> Result<AuthToken> {
        sqlx::query_as::<_, AuthToken>(
            r#"
            INSERT INTO auth_tokens (token_hash, user_id, issued_at, expires_at)
            VALUES ($1, $2, NOW(), $3)
            RETURNING token_hash, user_id, issued_at, expires_at
            "#,
        )
        .bind(token_hash)
        .bind(user_id)
        .bind(expires_at)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    pub async fn get(&self, token_hash: &str) -> Result<Option<AuthToken>> {
        sqlx::query_as::<_, AuthToken>(
            r#"
            SELECT token_hash, user_id, issued_at, expires_at
            FROM auth_tokens
            WHERE token_hash = $1
            "#,
        )
        .bind(token_hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)
    }
}
