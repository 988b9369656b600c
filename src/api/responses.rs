use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{
    BankAccount, BankAccountStatus, Currency, Entry, PaymentRequest, PaymentRequestStatus,
    Transfer, TransferType, User, UserStatus, Wallet, WalletStatus,
};
use crate::services::WalletTransferResult;

/// Standard API response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ErrorResponse>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

impl ApiResponse<()> {
    pub fn error(error: ErrorResponse) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
        }
    }
}

/// Error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    pub details: Option<Vec<ValidationErrorDetail>>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: Vec<ValidationErrorDetail>) -> Self {
        self.details = Some(details);
        self
    }
}

/// Validation error detail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationErrorDetail {
    pub field: String,
    pub message: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub database: bool,
}

/// User DTO. Never carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDto {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub status: UserStatus,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            full_name: user.full_name,
            status: user.status,
            created_at: user.created_at,
        }
    }
}

/// Response to a successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub user: UserDto,
}

/// Currency DTO.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyDto {
    pub code: String,
    pub fraction: i16,
}

impl From<Currency> for CurrencyDto {
    fn from(currency: Currency) -> Self {
        Self {
            code: currency.code,
            fraction: currency.fraction,
        }
    }
}

/// Bank account DTO.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankAccountDto {
    pub id: i64,
    pub account_no: String,
    pub ifsc: String,
    pub bank_name: String,
    pub currency: String,
    pub user_id: i64,
    pub status: BankAccountStatus,
    pub created_at: DateTime<Utc>,
}

impl From<BankAccount> for BankAccountDto {
    fn from(account: BankAccount) -> Self {
        Self {
            id: account.id,
            account_no: account.account_no,
            ifsc: account.ifsc,
            bank_name: account.bank_name,
            currency: account.currency,
            user_id: account.user_id,
            status: account.status,
            created_at: account.created_at,
        }
    }
}

/// Response to creating a bank account: the account and the wallet it
/// provisioned atomically alongside it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankAccountWithWalletDto {
    pub bank_account: BankAccountDto,
    pub wallet: WalletDto,
}

/// Wallet DTO.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletDto {
    pub id: i64,
    pub address: String,
    pub status: WalletStatus,
    pub user_id: i64,
    pub bank_account_id: i64,
    pub balance: i64,
    pub currency: String,
    pub created_at: DateTime<Utc>,
}

impl From<Wallet> for WalletDto {
    fn from(wallet: Wallet) -> Self {
        Self {
            id: wallet.id,
            address: wallet.address,
            status: wallet.status,
            user_id: wallet.user_id,
            bank_account_id: wallet.bank_account_id,
            balance: wallet.balance,
            currency: wallet.currency,
            created_at: wallet.created_at,
        }
    }
}

/// Entry DTO.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryDto {
    pub id: i64,
    pub wallet_id: i64,
    pub transfer_id: i64,
    pub amount: i64,
    pub created_at: DateTime<Utc>,
}

impl From<Entry> for EntryDto {
    fn from(entry: Entry) -> Self {
        Self {
            id: entry.id,
            wallet_id: entry.wallet_id,
            transfer_id: entry.transfer_id,
            amount: entry.amount,
            created_at: entry.created_at,
        }
    }
}

/// Transfer DTO.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferDto {
    pub id: i64,
    pub transfer_type: TransferType,
    pub from_wallet_id: i64,
    pub to_wallet_id: i64,
    pub amount: i64,
    pub created_at: DateTime<Utc>,
}

impl From<Transfer> for TransferDto {
    fn from(transfer: Transfer) -> Self {
        Self {
            id: transfer.id,
            transfer_type: transfer.transfer_type,
            from_wallet_id: transfer.from_wallet_id,
            to_wallet_id: transfer.to_wallet_id,
            amount: transfer.amount,
            created_at: transfer.created_at,
        }
    }
}

/// Result of a value-moving wallet operation: the updated wallet, the
/// transfer it recorded, and the entry/entries it wrote.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletTransferResultDto {
    pub wallet: WalletDto,
    pub transfer: TransferDto,
    pub from_entry: EntryDto,
    pub to_entry: EntryDto,
}

impl From<WalletTransferResult> for WalletTransferResultDto {
    fn from(result: WalletTransferResult) -> Self {
        Self {
            wallet: result.wallet.into(),
            transfer: result.transfer.into(),
            from_entry: result.from_entry.into(),
            to_entry: result.to_entry.into(),
        }
    }
}

/// Payment request DTO.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRequestDto {
    pub id: i64,
    pub from_wallet_id: i64,
    pub to_wallet_id: i64,
    pub amount: i64,
    pub status: PaymentRequestStatus,
    pub created_at: DateTime<Utc>,
}

impl From<PaymentRequest> for PaymentRequestDto {
    fn from(request: PaymentRequest) -> Self {
        Self {
            id: request.id,
            from_wallet_id: request.from_wallet_id,
            to_wallet_id: request.to_wallet_id,
            amount: request.amount,
            status: request.status,
            created_at: request.created_at,
        }
    }
}

/// Paginated list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub limit: i64,
    pub offset: i64,
}

impl<T> PaginatedResponse<T> {
    pub fn new(items: Vec<T>, limit: i64, offset: i64) -> Self {
        Self { items, limit, offset }
    }
}
