use sqlx::PgPool;

use crate::error::{AppError, Result};
use crate::models::Currency;

/// Repository for the currency catalogue lookup.
#[derive(Clone)]
pub struct CurrencyRepository {
    pool: PgPool,
}

impl CurrencyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, code: &str, fraction: i16) -> Result<Currency> {
        let code = code.to_uppercase();
        sqlx::query_as::<_, Currency>(
            r#"
            INSERT INTO currencies (code, fraction, created_at, updated_at)
            VALUES ($1, $2, NOW(), NOW())
            RETURNING code, fraction, created_at, updated_at
            "#,
        )
        .bind(&code)
        .bind(fraction)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    pub async fn get(&self, code: &str) -> Result<Option<Currency>> {
        sqlx::query_as::<_, Currency>(
            r#"
            SELECT code, fraction, created_at, updated_at
            FROM currencies
            WHERE code = $1
            "#,
        )
        .bind(code.to_uppercase())
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)
    }
}
