use sqlx::{PgPool, Postgres, Transaction};

use crate::error::{AppError, Result};
use crate::models::{PaymentRequest, PaymentRequestStatus};

#[derive(Clone)]
pub struct PaymentRequestRepository {
    pool: PgPool,
}

impl PaymentRequestRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        from_wallet_id: i64,
        to_wallet_id: i64,
        amount: i64,
    ) -> Result<PaymentRequest> {
        sqlx::query_as::<_, PaymentRequest>(
            r#"
            INSERT INTO payment_requests (from_wallet_id, to_wallet_id, amount, status, created_at, updated_at)
            VALUES ($1, $2, $3, 'WAITING_APPROVAL', NOW(), NOW())
            RETURNING id, from_wallet_id, to_wallet_id, amount, status, created_at, updated_at
            "#,
        )
        .bind(from_wallet_id)
        .bind(to_wallet_id)
        .bind(amount)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    pub async fn get(&self, id: i64) -> Result<Option<PaymentRequest>> {
        sqlx::query_as::<_, PaymentRequest>(
            r#"
            SELECT id, from_wallet_id, to_wallet_id, amount, status, created_at, updated_at
            FROM payment_requests
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    /// Locking read used by approve/refuse so the status-transition guard
    /// and the write happen against the same locked row.
    pub async fn get_for_update(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: i64,
    ) -> Result<Option<PaymentRequest>> {
        sqlx::query_as::<_, PaymentRequest>(
            r#"
            SELECT id, from_wallet_id, to_wallet_id, amount, status, created_at, updated_at
            FROM payment_requests
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(id)
        .fetch_optional(&mut **tx)
        .await
        .map_err(AppError::Database)
    }

    pub async fn update_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: i64,
        status: PaymentRequestStatus,
    ) -> Result<PaymentRequest> {
        sqlx::query_as::<_, PaymentRequest>(
            r#"
            UPDATE payment_requests
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, from_wallet_id, to_wallet_id, amount, status, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_one(&mut **tx)
        .await
        .map_err(AppError::Database)
    }

    pub async fn list(&self, wallet_id: i64, limit: i64, offset: i64) -> Result<Vec<PaymentRequest>> {
        sqlx::query_as::<_, PaymentRequest>(
            r#"
            SELECT id, from_wallet_id, to_wallet_id, amount, status, created_at, updated_at
            FROM payment_requests
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
