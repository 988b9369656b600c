use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "VARCHAR", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WalletStatus {
    Inactive,
    Active,
    Blocked,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Wallet {
    pub id: i64,
    pub address: String,
    pub status: WalletStatus,
    pub user_id: i64,
    pub bank_account_id: i64,
    pub balance: i64,
    pub currency: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Wallet {
    pub fn is_active(&self) -> bool {
        matches!(self.status, WalletStatus::Active)
    }

    pub fn has_sufficient_balance(&self, amount: i64) -> bool {
        self.balance >= amount
    }

    /// Derives a wallet address from the email local part, per the
    /// `"{local}@my.wallet"` scheme. Collision handling (suffix retry)
    /// lives in the lifecycle service, not here.
    pub fn derive_address(local_part: &str, suffix: Option<u32>) -> String {
        match suffix {
            Some(n) => format!("{local_part}-{n}@my.wallet"),
            None => format!("{local_part}@my.wallet"),
        }
    }
}
