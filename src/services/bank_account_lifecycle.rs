use sqlx::{Acquire, PgPool};

use crate::db::TransactionRunner;
use crate::error::{AppError, Result};
use crate::models::{BankAccount, BankAccountStatus, Wallet, WalletStatus};
use crate::repositories::{BankAccountRepository, CurrencyRepository, UserRepository, WalletRepository};

const MAX_ADDRESS_SUFFIX_ATTEMPTS: u32 = 20;

/// `(bank_account, wallet)` as returned by `create_with_wallet`.
#[derive(Debug, Clone)]
pub struct BankAccountWithWallet {
    pub bank_account: BankAccount,
    pub wallet: Wallet,
}

/// Creates the `(bank_account, wallet)` pair atomically and drives the
/// verification transitions that activate or freeze the wallet.
#[derive(Clone)]
pub struct BankAccountLifecycle {
    bank_accounts: BankAccountRepository,
    wallets: WalletRepository,
    users: UserRepository,
    currencies: CurrencyRepository,
    runner: TransactionRunner,
}

impl BankAccountLifecycle {
    pub fn new(pool: PgPool) -> Self {
        Self {
            bank_accounts: BankAccountRepository::new(pool.clone()),
            wallets: WalletRepository::new(pool.clone()),
            users: UserRepository::new(pool.clone()),
            currencies: CurrencyRepository::new(pool.clone()),
            runner: TransactionRunner::new(pool),
        }
    }

    pub async fn get(&self, bank_account_id: i64) -> Result<BankAccount> {
        self.bank_accounts
            .get(bank_account_id)
            .await?
            .ok_or_else(|| AppError::BankAccountNotFound(bank_account_id.to_string()))
    }

    pub async fn get_wallet(&self, wallet_id: i64) -> Result<Wallet> {
        self.wallets
            .get(wallet_id)
            .await?
            .ok_or_else(|| AppError::WalletNotFound(wallet_id.to_string()))
    }

    pub async fn create_with_wallet(
        &self,
        user_id: i64,
        account_no: &str,
        ifsc: &str,
        bank_name: &str,
        currency: &str,
    ) -> Result<BankAccountWithWallet> {
        let user = self
            .users
            .get(user_id)
            .await?
            .ok_or_else(|| AppError::UserNotFound(user_id.to_string()))?;

        self.currencies
            .get(currency)
            .await?
            .ok_or_else(|| AppError::CurrencyNotFound(currency.to_string()))?;

        let account_no = account_no.to_string();
        let ifsc = ifsc.to_string();
        let bank_name = bank_name.to_string();
        let currency = currency.to_string();
        let local_part = user.email_local_part().to_string();

        self.runner
            .run(|tx| {
                let account_no = account_no.clone();
                let ifsc = ifsc.clone();
                let bank_name = bank_name.clone();
                let currency = currency.clone();
                let local_part = local_part.clone();
                Box::pin(async move {
                    let bank_account = self
                        .bank_accounts
                        .create(tx, &account_no, &ifsc, &bank_name, &currency, user_id)
                        .await?;

                    // Each attempt runs inside its own savepoint: a unique-violation
                    // aborts only the nested savepoint, not the whole transaction
                    // (a plain `INSERT` failure on `tx` directly would abort the
                    // enclosing transaction and make every subsequent attempt fail
                    // with "current transaction is aborted" instead of retrying).
                    let mut suffix = None;
                    let wallet = loop {
                        let address = Wallet::derive_address(&local_part, suffix);
                        let mut savepoint = tx.begin().await.map_err(AppError::Database)?;
                        match self
                            .wallets
                            .create(&mut savepoint, &address, user_id, bank_account.id, &currency)
                            .await
                        {
                            Ok(wallet) => {
                                savepoint.commit().await.map_err(AppError::Database)?;
                                break wallet;
                            }
                            Err(AppError::Database(e)) if AppError::is_unique_violation(&e) => {
                                savepoint.rollback().await.map_err(AppError::Database)?;
                                let next = suffix.unwrap_or(1) + 1;
                                if next > MAX_ADDRESS_SUFFIX_ATTEMPTS {
                                    return Err(AppError::Internal(anyhow::anyhow!(
                                        "exhausted wallet address suffix attempts for '{local_part}'"
                                    )));
                                }
                                suffix = Some(next);
                            }
                            Err(e) => {
                                let _ = savepoint.rollback().await;
                                return Err(e);
                            }
                        }
                    };

                    Ok(BankAccountWithWallet {
                        bank_account,
                        wallet,
                    })
                })
            })
            .await
    }

    pub async fn verification_success(&self, bank_account_id: i64) -> Result<BankAccountWithWallet> {
        self.runner
            .run(|tx| {
                Box::pin(async move {
                    let bank_account = self
                        .bank_accounts
                        .get(bank_account_id)
                        .await?
                        .ok_or_else(|| AppError::BankAccountNotFound(bank_account_id.to_string()))?;

                    if !bank_account.is_in_verification() {
                        return Err(AppError::IllegalTransition(format!(
                            "bank account {bank_account_id} is not in verification"
                        )));
                    }

                    let bank_account = self
                        .bank_accounts
                        .update_status_tx(tx, bank_account_id, BankAccountStatus::Verified)
                        .await?
                        .ok_or_else(|| AppError::BankAccountNotFound(bank_account_id.to_string()))?;

                    let wallet = self
                        .wallets
                        .get_by_bank_account_for_update(tx, bank_account_id)
                        .await?
                        .ok_or_else(|| {
                            AppError::WalletNotFound(format!("bank_account_id={bank_account_id}"))
                        })?;

                    let wallet = self
                        .wallets
                        .update_status(tx, wallet.id, WalletStatus::Active)
                        .await?;

                    Ok(BankAccountWithWallet {
                        bank_account,
                        wallet,
                    })
                })
            })
            .await
    }

    /// Single-row update: no second table is mutated, so this runs
    /// outside the transaction runner (spec: "not transactional across
    /// two tables because no second row is modified").
    pub async fn verification_failed(&self, bank_account_id: i64) -> Result<BankAccount> {
        let bank_account = self
            .bank_accounts
            .get(bank_account_id)
            .await?
            .ok_or_else(|| AppError::BankAccountNotFound(bank_account_id.to_string()))?;

        if !bank_account.is_in_verification() {
            return Err(AppError::IllegalTransition(format!(
                "bank account {bank_account_id} is not in verification"
            )));
        }

        self.bank_accounts
            .update_status(bank_account_id, BankAccountStatus::VerificationFailed)
            .await?
            .ok_or_else(|| AppError::BankAccountNotFound(bank_account_id.to_string()))
    }
}
