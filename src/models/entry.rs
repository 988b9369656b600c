use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A single signed ledger line. Debit is negative, credit is positive.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Entry {
    pub id: i64,
    pub wallet_id: i64,
    pub transfer_id: i64,
    pub amount: i64,
    pub created_at: DateTime<Utc>,
}

impl Entry {
    pub fn is_debit(&self) -> bool {
        self.amount < 0
    }

    pub fn is_credit(&self) -> bool {
        self.amount > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debit_and_credit_are_sign_based() {
        let now = Utc::now();
        let debit = Entry { id: 1, wallet_id: 1, transfer_id: 1, amount: -100, created_at: now };
        let credit = Entry { id: 2, wallet_id: 2, transfer_id: 1, amount: 100, created_at: now };
        assert!(debit.is_debit());
        assert!(!debit.is_credit());
        assert!(credit.is_credit());
        assert!(!credit.is_debit());
    }
}
