use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to register a new user.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 3, max = 32))]
    pub username: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
    #[validate(length(min = 1, max = 255))]
    pub full_name: String,
    #[validate(email)]
    pub email: String,
}

/// Request to log in.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Request to register a currency in the catalogue.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateCurrencyRequest {
    #[validate(length(equal = 3))]
    pub code: String,
    #[validate(range(min = 1, max = 3))]
    pub fraction: i16,
}

/// Request to link a new bank account (and its 1:1 wallet) to a user.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateBankAccountRequest {
    #[validate(length(min = 1, max = 64))]
    pub account_no: String,
    #[validate(length(min = 1, max = 32))]
    pub ifsc: String,
    #[validate(length(min = 1, max = 255))]
    pub bank_name: String,
    #[validate(length(equal = 3))]
    pub currency: String,
    pub user_id: i64,
}

/// Request to deposit into a wallet from its linked bank account.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DepositRequest {
    pub wallet_id: i64,
    #[validate(range(min = 1))]
    pub amount: i64,
}

/// Request to withdraw from a wallet back to its linked bank account.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct WithdrawRequest {
    pub wallet_id: i64,
    #[validate(range(min = 1))]
    pub amount: i64,
}

/// Request to pay another wallet by address.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PayRequest {
    #[validate(length(min = 1))]
    pub from_address: String,
    #[validate(length(min = 1))]
    pub to_address: String,
    #[validate(range(min = 1))]
    pub amount: i64,
}

/// Request to ask another wallet to pay into this one.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreatePaymentRequestRequest {
    #[validate(length(min = 1))]
    pub from_address: String,
    #[validate(length(min = 1))]
    pub to_address: String,
    #[validate(range(min = 1))]
    pub amount: i64,
}

/// Query parameters for listing payment requests against a wallet.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ListPaymentRequestsQuery {
    pub from_wallet_id: i64,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_user_request_rejects_short_username() {
        let request = CreateUserRequest {
            username: "ab".to_string(),
            password: "password123".to_string(),
            full_name: "A B".to_string(),
            email: "ab@example.com".to_string(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn create_user_request_rejects_bad_email() {
        let request = CreateUserRequest {
            username: "alice".to_string(),
            password: "password123".to_string(),
            full_name: "Alice".to_string(),
            email: "not-an-email".to_string(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn create_user_request_accepts_valid_input() {
        let request = CreateUserRequest {
            username: "alice".to_string(),
            password: "password123".to_string(),
            full_name: "Alice Doe".to_string(),
            email: "alice@example.com".to_string(),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn deposit_request_rejects_non_positive_amount() {
        let request = DepositRequest { wallet_id: 1, amount: 0 };
        assert!(request.validate().is_err());
    }

    #[test]
    fn create_currency_request_rejects_wrong_length_code() {
        let request = CreateCurrencyRequest { code: "US".to_string(), fraction: 2 };
        assert!(request.validate().is_err());
    }
}
