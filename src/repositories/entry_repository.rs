use sqlx::{PgPool, Postgres, Transaction};

use crate::error::{AppError, Result};
use crate::models::Entry;

#[derive(Clone)]
pub struct EntryRepository {
    pool: PgPool,
}

impl EntryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        wallet_id: i64,
        transfer_id: i64,
        amount: i64,
    ) -> Result<Entry> {
        sqlx::query_as::<_, Entry>(
            r#"
            INSERT INTO entries (wallet_id, transfer_id, amount, created_at)
            VALUES ($1, $2, $3, NOW())
            RETURNING id, wallet_id, transfer_id, amount, created_at
            "#,
        )
        .bind(wallet_id)
        .bind(transfer_id)
        .bind(amount)
        .fetch_one(&mut **tx)
        .await
        .map_err(AppError::Database)
    }

    pub async fn list(&self, wallet_id: i64, limit: i64, offset: i64) -> Result<Vec<Entry>> {
        sqlx::query_as::<_, Entry>(
            r#"
            SELECT id, wallet_id, transfer_id, amount, created_at
            FROM entries
            WHERE wallet_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(wallet_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    pub async fn list_for_transfer(&self, transfer_id: i64) -> Result<Vec<Entry>> {
        sqlx::query_as::<_, Entry>(
            r#"
            SELECT id, wallet_id, transfer_id, amount, created_at
            FROM entries
            WHERE transfer_id = $1
            ORDER BY id
            "#,
        )
        .bind(transfer_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }
}
