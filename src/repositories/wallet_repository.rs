use sqlx::{PgPool, Postgres, Transaction};

use crate::error::{AppError, Result};
use crate::models::{Wallet, WalletStatus};

/// Wallet persistence. Every `_for_update` method acquires a row-level
/// write lock that lives until the enclosing transaction ends; the plain
/// getters take no lock.
#[derive(Clone)]
pub struct WalletRepository {
    pool: PgPool,
}

impl WalletRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        address: &str,
        user_id: i64,
        bank_account_id: i64,
        currency: &str,
    ) -> Result<Wallet> {
        sqlx::query_as::<_, Wallet>(
            r#"
            INSERT INTO wallets (address, status, user_id, bank_account_id, balance, currency, created_at, updated_at)
            VALUES ($1, 'INACTIVE', $2, $3, 0, $4, NOW(), NOW())
            RETURNING id, address, status, user_id, bank_account_id, balance, currency, created_at, updated_at
            "#,
        )
        .bind(address)
        .bind(user_id)
        .bind(bank_account_id)
        .bind(currency)
        .fetch_one(&mut **tx)
        .await
        .map_err(AppError::Database)
    }

    pub async fn get(&self, id: i64) -> Result<Option<Wallet>> {
        sqlx::query_as::<_, Wallet>(
            r#"
            SELECT id, address, status, user_id, bank_account_id, balance, currency, created_at, updated_at
            FROM wallets
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    pub async fn get_by_address(&self, address: &str) -> Result<Option<Wallet>> {
        sqlx::query_as::<_, Wallet>(
            r#"
            SELECT id, address, status, user_id, bank_account_id, balance, currency, created_at, updated_at
            FROM wallets
            WHERE address = $1
            "#,
        )
        .bind(address)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    pub async fn get_by_bank_account(&self, bank_account_id: i64) -> Result<Option<Wallet>> {
        sqlx::query_as::<_, Wallet>(
            r#"
            SELECT id, address, status, user_id, bank_account_id, balance, currency, created_at, updated_at
            FROM wallets
            WHERE bank_account_id = $1
            "#,
        )
        .bind(bank_account_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    pub async fn get_for_update(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: i64,
    ) -> Result<Option<Wallet>> {
        sqlx::query_as::<_, Wallet>(
            r#"
            SELECT id, address, status, user_id, bank_account_id, balance, currency, created_at, updated_at
            FROM wallets
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(id)
        .fetch_optional(&mut **tx)
        .await
        .map_err(AppError::Database)
    }

    pub async fn get_by_address_for_update(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        address: &str,
    ) -> Result<Option<Wallet>> {
        sqlx::query_as::<_, Wallet>(
            r#"
            SELECT id, address, status, user_id, bank_account_id, balance, currency, created_at, updated_at
            FROM wallets
            WHERE address = $1
            FOR UPDATE
            "#,
        )
        .bind(address)
        .fetch_optional(&mut **tx)
        .await
        .map_err(AppError::Database)
    }

    pub async fn get_by_bank_account_for_update(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        bank_account_id: i64,
    ) -> Result<Option<Wallet>> {
        sqlx::query_as::<_, Wallet>(
            r#"
            SELECT id, address, status, user_id, bank_account_id, balance, currency, created_at, updated_at
            FROM wallets
            WHERE bank_account_id = $1
            FOR UPDATE
            "#,
        )
        .bind(bank_account_id)
        .fetch_optional(&mut **tx)
        .await
        .map_err(AppError::Database)
    }

    /// Updates balance by a signed delta. Caller guarantees the row is
    /// already locked via one of the `_for_update` getters in this same
    /// transaction.
    pub async fn add_balance(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: i64,
        delta: i64,
    ) -> Result<Wallet> {
        sqlx::query_as::<_, Wallet>(
            r#"
            UPDATE wallets
            SET balance = balance + $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, address, status, user_id, bank_account_id, balance, currency, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(delta)
        .fetch_one(&mut **tx)
        .await
        .map_err(AppError::Database)
    }

    pub async fn update_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: i64,
        status: WalletStatus,
    ) -> Result<Wallet> {
        sqlx::query_as::<_, Wallet>(
            r#"
            UPDATE wallets
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, address, status, user_id, bank_account_id, balance, currency, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_one(&mut **tx)
        .await
        .map_err(AppError::Database)
    }
}
