use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "VARCHAR", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BankAccountStatus {
    InVerification,
    Verified,
    VerificationFailed,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BankAccount {
    pub id: i64,
    pub account_no: String,
    pub ifsc: String,
    pub bank_name: String,
    pub currency: String,
    pub user_id: i64,
    pub status: BankAccountStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BankAccount {
    pub fn is_verified(&self) -> bool {
        matches!(self.status, BankAccountStatus::Verified)
    }

    pub fn is_in_verification(&self) -> bool {
        matches!(self.status, BankAccountStatus::InVerification)
    }
}
