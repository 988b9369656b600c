use sqlx::{PgPool, Postgres, Transaction};

use crate::db::TransactionRunner;
use crate::error::{AppError, Result};
use crate::models::{Entry, Transfer, TransferType, Wallet};
use crate::repositories::{EntryRepository, TransferRepository, WalletRepository};

/// Outcome of a value-moving operation. For deposit/withdraw, `from_entry`
/// and `to_entry` are the same entry (spec models deposits/withdrawals as
/// a degenerate self-transfer rather than a nullable counterpart).
#[derive(Debug, Clone)]
pub struct WalletTransferResult {
    pub wallet: Wallet,
    pub from_entry: Entry,
    pub to_entry: Entry,
    pub transfer: Transfer,
}

/// The four value-moving operations over wallets. Every operation runs
/// inside one `TransactionRunner` scope and acquires row locks before any
/// dependent read or write.
#[derive(Clone)]
pub struct WalletEngine {
    wallets: WalletRepository,
    transfers: TransferRepository,
    entries: EntryRepository,
    runner: TransactionRunner,
}

impl WalletEngine {
    pub fn new(pool: PgPool) -> Self {
        Self {
            wallets: WalletRepository::new(pool.clone()),
            transfers: TransferRepository::new(pool.clone()),
            entries: EntryRepository::new(pool.clone()),
            runner: TransactionRunner::new(pool),
        }
    }

    pub async fn deposit(&self, wallet_id: i64, amount: i64) -> Result<WalletTransferResult> {
        if amount <= 0 {
            return Err(AppError::Validation("amount must be positive".to_string()));
        }

        self.runner
            .run(|tx| {
                let wallet_id = wallet_id;
                Box::pin(async move {
                    let wallet = self
                        .wallets
                        .get_for_update(tx, wallet_id)
                        .await?
                        .ok_or_else(|| AppError::WalletNotFound(wallet_id.to_string()))?;

                    if !wallet.is_active() {
                        return Err(AppError::WalletInactive(wallet_id.to_string()));
                    }

                    let transfer = self
                        .transfers
                        .create(tx, TransferType::DepositToWallet, wallet.id, wallet.id, amount)
                        .await?;

                    let entry = self.entries.create(tx, wallet.id, transfer.id, amount).await?;

                    let wallet = self.wallets.add_balance(tx, wallet.id, amount).await?;

                    Ok(WalletTransferResult {
                        wallet,
                        from_entry: entry.clone(),
                        to_entry: entry,
                        transfer,
                    })
                })
            })
            .await
    }

    pub async fn withdraw(&self, wallet_id: i64, amount: i64) -> Result<WalletTransferResult> {
        if amount <= 0 {
            return Err(AppError::Validation("amount must be positive".to_string()));
        }

        self.runner
            .run(|tx| {
                let wallet_id = wallet_id;
                Box::pin(async move {
                    let wallet = self
                        .wallets
                        .get_for_update(tx, wallet_id)
                        .await?
                        .ok_or_else(|| AppError::WalletNotFound(wallet_id.to_string()))?;

                    if !wallet.is_active() {
                        return Err(AppError::WalletInactive(wallet_id.to_string()));
                    }
                    if !wallet.has_sufficient_balance(amount) {
                        return Err(AppError::InsufficientBalance);
                    }

                    let transfer = self
                        .transfers
                        .create(tx, TransferType::WithdrawFromWallet, wallet.id, wallet.id, amount)
                        .await?;

                    let entry = self.entries.create(tx, wallet.id, transfer.id, -amount).await?;

                    let wallet = self.wallets.add_balance(tx, wallet.id, -amount).await?;

                    Ok(WalletTransferResult {
                        wallet,
                        from_entry: entry.clone(),
                        to_entry: entry,
                        transfer,
                    })
                })
            })
            .await
    }

    /// Deadlock-free by construction: the two wallet rows are always
    /// locked in ascending `id` order, regardless of which address is the
    /// payer. Two concurrent transfers in opposite directions between the
    /// same pair always request the locks in the same order.
    pub async fn send_money(
        &self,
        from_address: &str,
        to_address: &str,
        amount: i64,
    ) -> Result<WalletTransferResult> {
        if amount <= 0 {
            return Err(AppError::Validation("amount must be positive".to_string()));
        }
        if from_address == to_address {
            return Err(AppError::Validation(
                "from and to addresses must differ".to_string(),
            ));
        }

        let from_address = from_address.to_string();
        let to_address = to_address.to_string();

        self.runner
            .run(|tx| {
                let from_address = from_address.clone();
                let to_address = to_address.clone();
                Box::pin(async move {
                    let (from, to) = self
                        .lock_pair_by_address(tx, &from_address, &to_address)
                        .await?;

                    if !from.is_active() {
                        return Err(AppError::WalletInactive(from.address.clone()));
                    }
                    if !to.is_active() {
                        return Err(AppError::WalletInactive(to.address.clone()));
                    }
                    if from.currency != to.currency {
                        return Err(AppError::CurrencyMismatch);
                    }
                    if !from.has_sufficient_balance(amount) {
                        return Err(AppError::InsufficientBalance);
                    }

                    let transfer = self
                        .transfers
                        .create(tx, TransferType::SendMoney, from.id, to.id, amount)
                        .await?;

                    let from_entry = self.entries.create(tx, from.id, transfer.id, -amount).await?;
                    let to_entry = self.entries.create(tx, to.id, transfer.id, amount).await?;

                    // Apply balances in the same canonical (ascending id) order the
                    // locks were acquired in.
                    let from_is_lower = from.id < to.id;
                    let (low_id, high_id) = if from_is_lower {
                        (from.id, to.id)
                    } else {
                        (to.id, from.id)
                    };
                    let (low_delta, high_delta) = if from_is_lower {
                        (-amount, amount)
                    } else {
                        (amount, -amount)
                    };

                    let low_wallet = self.wallets.add_balance(tx, low_id, low_delta).await?;
                    let high_wallet = self.wallets.add_balance(tx, high_id, high_delta).await?;

                    let wallet = if from_is_lower { low_wallet } else { high_wallet };

                    Ok(WalletTransferResult {
                        wallet,
                        from_entry,
                        to_entry,
                        transfer,
                    })
                })
            })
            .await
    }

    /// Resolves both ids to addresses (non-locking) then delegates to
    /// `send_money`. Lets `PaymentRequestService::approve` drive the
    /// engine without re-deriving addresses itself.
    pub async fn pay_by_wallet_id(
        &self,
        from_id: i64,
        to_id: i64,
        amount: i64,
    ) -> Result<WalletTransferResult> {
        let from = self
            .wallets
            .get(from_id)
            .await?
            .ok_or_else(|| AppError::WalletNotFound(from_id.to_string()))?;
        let to = self
            .wallets
            .get(to_id)
            .await?
            .ok_or_else(|| AppError::WalletNotFound(to_id.to_string()))?;

        self.send_money(&from.address, &to.address, amount).await
    }

    async fn lock_pair_by_address(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        from_address: &str,
        to_address: &str,
    ) -> Result<(Wallet, Wallet)> {
        let from_preview = self
            .wallets
            .get_by_address(from_address)
            .await?
            .ok_or_else(|| AppError::WalletNotFound(from_address.to_string()))?;
        let to_preview = self
            .wallets
            .get_by_address(to_address)
            .await?
            .ok_or_else(|| AppError::WalletNotFound(to_address.to_string()))?;

        let from_is_lower = from_preview.id < to_preview.id;
        let (first_address, second_address) = if from_is_lower {
            (from_address, to_address)
        } else {
            (to_address, from_address)
        };

        let first = self
            .wallets
            .get_by_address_for_update(tx, first_address)
            .await?
            .ok_or_else(|| AppError::WalletNotFound(first_address.to_string()))?;
        let second = self
            .wallets
            .get_by_address_for_update(tx, second_address)
            .await?
            .ok_or_else(|| AppError::WalletNotFound(second_address.to_string()))?;

        if from_is_lower {
            Ok((first, second))
        } else {
            Ok((second, first))
        }
    }
}
