use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "VARCHAR", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentRequestStatus {
    WaitingApproval,
    Approved,
    Refused,
    PaymentSuccess,
    PaymentFailed,
}

impl PaymentRequestStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            PaymentRequestStatus::Refused
                | PaymentRequestStatus::PaymentSuccess
                | PaymentRequestStatus::PaymentFailed
        )
    }
}

/// `from_wallet_id` is the payer (debited on approval); `to_wallet_id` is
/// the requester/payee.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PaymentRequest {
    pub id: i64,
    pub from_wallet_id: i64,
    pub to_wallet_id: i64,
    pub amount: i64,
    pub status: PaymentRequestStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PaymentRequest {
    pub fn is_waiting_approval(&self) -> bool {
        matches!(self.status, PaymentRequestStatus::WaitingApproval)
    }
}
