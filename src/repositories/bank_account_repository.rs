use sqlx::{PgPool, Postgres, Transaction};

use crate::error::{AppError, Result};
use crate::models::{BankAccount, BankAccountStatus};

#[derive(Clone)]
pub struct BankAccountRepository {
    pool: PgPool,
}

impl BankAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        account_no: &str,
        ifsc: &str,
        bank_name: &str,
        currency: &str,
        user_id: i64,
    ) -> Result<BankAccount> {
        sqlx::query_as::<_, BankAccount>(
            r#"
            INSERT INTO bank_accounts (account_no, ifsc, bank_name, currency, user_id, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, 'IN_VERIFICATION', NOW(), NOW())
            RETURNING id, account_no, ifsc, bank_name, currency, user_id, status, created_at, updated_at
            "#,
        )
        .bind(account_no)
        .bind(ifsc)
        .bind(bank_name)
        .bind(currency)
        .bind(user_id)
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| {
            if AppError::is_unique_violation(&e) {
                AppError::BankAccountAlreadyExist(format!("{account_no}/{ifsc}"))
            } else {
                AppError::Database(e)
            }
        })
    }

    pub async fn get(&self, id: i64) -> Result<Option<BankAccount>> {
        sqlx::query_as::<_, BankAccount>(
            r#"
            SELECT id, account_no, ifsc, bank_name, currency, user_id, status, created_at, updated_at
            FROM bank_accounts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    pub async fn list(&self, user_id: i64) -> Result<Vec<BankAccount>> {
        sqlx::query_as::<_, BankAccount>(
            r#"
            SELECT id, account_no, ifsc, bank_name, currency, user_id, status, created_at, updated_at
            FROM bank_accounts
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    /// Used outside a wider transaction: both verification paths update
    /// exactly one bank-account row (spec §4.5.3 notes verification-failed
    /// has no second row to coordinate with).
    pub async fn update_status(
        &self,
        id: i64,
        status: BankAccountStatus,
    ) -> Result<Option<BankAccount>> {
        sqlx::query_as::<_, BankAccount>(
            r#"
            UPDATE bank_accounts
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, account_no, ifsc, bank_name, currency, user_id, status, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    /// Locking variant of `update_status`, used by `verification_success`
    /// which must coordinate the bank-account row with the wallet row it
    /// activates in the same transaction.
    pub async fn update_status_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: i64,
        status: BankAccountStatus,
    ) -> Result<Option<BankAccount>> {
        sqlx::query_as::<_, BankAccount>(
            r#"
            UPDATE bank_accounts
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, account_no, ifsc, bank_name, currency, user_id, status, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&mut **tx)
        .await
        .map_err(AppError::Database)
    }
}
