use sqlx::PgPool;

use crate::db::TransactionRunner;
use crate::error::{AppError, Result};
use crate::models::{PaymentRequest, PaymentRequestStatus};
use crate::repositories::{PaymentRequestRepository, WalletRepository};
use crate::services::wallet_engine::WalletEngine;

/// `from_wallet_id` is the payer (debited on approval), `to_wallet_id` the
/// requester. `create`/`refuse` are simple repository calls; `approve`
/// drives the wallet engine and records the outcome.
#[derive(Clone)]
pub struct PaymentRequestService {
    requests: PaymentRequestRepository,
    wallets: WalletRepository,
    engine: WalletEngine,
    runner: TransactionRunner,
}

impl PaymentRequestService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            requests: PaymentRequestRepository::new(pool.clone()),
            wallets: WalletRepository::new(pool.clone()),
            engine: WalletEngine::new(pool.clone()),
            runner: TransactionRunner::new(pool),
        }
    }

    pub async fn create(
        &self,
        from_address: &str,
        to_address: &str,
        amount: i64,
    ) -> Result<PaymentRequest> {
        if amount <= 0 {
            return Err(AppError::Validation("amount must be positive".to_string()));
        }

        let from = self
            .wallets
            .get_by_address(from_address)
            .await?
            .ok_or_else(|| AppError::WalletNotFound(from_address.to_string()))?;
        let to = self
            .wallets
            .get_by_address(to_address)
            .await?
            .ok_or_else(|| AppError::WalletNotFound(to_address.to_string()))?;

        self.requests.create(from.id, to.id, amount).await
    }

    pub async fn get(&self, id: i64) -> Result<PaymentRequest> {
        self.requests
            .get(id)
            .await?
            .ok_or_else(|| AppError::PaymentRequestNotFound(id.to_string()))
    }

    pub async fn list(&self, wallet_id: i64, limit: i64, offset: i64) -> Result<Vec<PaymentRequest>> {
        self.requests.list(wallet_id, limit, offset).await
    }

    /// Moves WAITING_APPROVAL -> APPROVED in its own small transaction,
    /// invokes the engine, then records PAYMENT_SUCCESS or PAYMENT_FAILED
    /// in a second transaction. The three commits are independent; each
    /// terminal write is idempotent under retry of the final status
    /// update, so this does not need to share one ledger transaction with
    /// the money movement.
    pub async fn approve(&self, id: i64) -> Result<PaymentRequest> {
        let request = self
            .runner
            .run(|tx| {
                Box::pin(async move {
                    let request = self
                        .requests
                        .get_for_update(tx, id)
                        .await?
                        .ok_or_else(|| AppError::PaymentRequestNotFound(id.to_string()))?;

                    if !request.is_waiting_approval() {
                        return Err(AppError::IllegalTransition(format!(
                            "payment request {id} is not waiting for approval"
                        )));
                    }

                    self.requests
                        .update_status(tx, id, PaymentRequestStatus::Approved)
                        .await
                })
            })
            .await?;

        match self
            .engine
            .pay_by_wallet_id(request.from_wallet_id, request.to_wallet_id, request.amount)
            .await
        {
            Ok(_) => {
                self.runner
                    .run(|tx| {
                        Box::pin(async move {
                            self.requests
                                .update_status(tx, id, PaymentRequestStatus::PaymentSuccess)
                                .await
                        })
                    })
                    .await
            }
            Err(engine_err) => {
                self.runner
                    .run(|tx| {
                        Box::pin(async move {
                            self.requests
                                .update_status(tx, id, PaymentRequestStatus::PaymentFailed)
                                .await
                        })
                    })
                    .await?;
                Err(engine_err)
            }
        }
    }

    pub async fn refuse(&self, id: i64) -> Result<PaymentRequest> {
        self.runner
            .run(|tx| {
                Box::pin(async move {
                    let request = self
                        .requests
                        .get_for_update(tx, id)
                        .await?
                        .ok_or_else(|| AppError::PaymentRequestNotFound(id.to_string()))?;

                    if !request.is_waiting_approval() {
                        return Err(AppError::IllegalTransition(format!(
                            "payment request {id} is not waiting for approval"
                        )));
                    }

                    self.requests
                        .update_status(tx, id, PaymentRequestStatus::Refused)
                        .await
                })
            })
            .await
    }
}
