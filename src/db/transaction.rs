use std::future::Future;

use sqlx::{PgPool, Postgres, Transaction};

use crate::error::{AppError, Result};

/// Scoped unit-of-work over a `PgPool`.
///
/// `run` begins a transaction, hands the caller a mutable reference to it,
/// and commits on `Ok` or rolls back on `Err`. A transaction that is never
/// explicitly committed rolls back on drop (`sqlx::Transaction`'s own RAII
/// guarantee), so a panic inside the closure unwinds through an open
/// transaction that still rolls back without any `catch_unwind` here.
///
/// Nested calls are not supported: callers compose repository operations
/// within the single `tx` handle passed to the closure rather than calling
/// `run` again from inside it.
#[derive(Clone)]
pub struct TransactionRunner {
    pool: PgPool,
}

impl TransactionRunner {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn run<T, F, Fut>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Transaction<'_, Postgres>) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        match f(&mut tx).await {
            Ok(value) => {
                tx.commit().await.map_err(AppError::Database)?;
                Ok(value)
            }
            Err(err) => {
                // best-effort; the transaction also rolls back on drop if this fails
                let _ = tx.rollback().await;
                Err(err)
            }
        }
    }
}
