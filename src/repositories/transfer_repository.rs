use sqlx::{PgPool, Postgres, Transaction};

use crate::error::{AppError, Result};
use crate::models::{Transfer, TransferType};

#[derive(Clone)]
pub struct TransferRepository {
    pool: PgPool,
}

impl TransferRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        transfer_type: TransferType,
        from_wallet_id: i64,
        to_wallet_id: i64,
        amount: i64,
    ) -> Result<Transfer> {
        sqlx::query_as::<_, Transfer>(
            r#"
            INSERT INTO transfers (transfer_type, from_wallet_id, to_wallet_id, amount, created_at)
            VALUES ($1, $2, $3, $4, NOW())
            RETURNING id, transfer_type, from_wallet_id, to_wallet_id, amount, created_at
            "#,
        )
        .bind(transfer_type)
        .bind(from_wallet_id)
        .bind(to_wallet_id)
        .bind(amount)
        .fetch_one(&mut **tx)
        .await
        .map_err(AppError::Database)
    }

    pub async fn get(&self, id: i64) -> Result<Option<Transfer>> {
        sqlx::query_as::<_, Transfer>(
            r#"
            SELECT id, transfer_type, from_wallet_id, to_wallet_id, amount, created_at
            FROM transfers
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    pub async fn list(&self, wallet_id: i64, limit: i64, offset: i64) -> Result<Vec<Transfer>> {
        sqlx::query_as::<_, Transfer>(
            r#"
            SELECT id, transfer_type, from_wallet_id, to_wallet_id, amount, created_at
            FROM transfers
            WHERE from_wallet_id = $1 OR to_wallet_id = $1
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
}
