use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "VARCHAR", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransferType {
    DepositToWallet,
    WithdrawFromWallet,
    SendMoney,
}

/// One value-moving event; groups one or two `Entry` rows.
///
/// Deposit and withdraw model `from_wallet_id == to_wallet_id` (a
/// degenerate self-transfer) rather than a nullable counterpart column.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Transfer {
    pub id: i64,
    pub transfer_type: TransferType,
    pub from_wallet_id: i64,
    pub to_wallet_id: i64,
    pub amount: i64,
    pub created_at: DateTime<Utc>,
}
