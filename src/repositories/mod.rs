pub mod auth_token_repository;
pub mod bank_account_repository;
pub mod currency_repository;
pub mod entry_repository;
pub mod payment_request_repository;
pub mod transfer_repository;
pub mod user_repository;
pub mod wallet_repository;

pub use auth_token_repository::{AuthToken, AuthTokenRepository};
pub use bank_account_repository::BankAccountRepository;
pub use currency_repository::CurrencyRepository;
pub use entry_repository::EntryRepository;
pub use payment_request_repository::PaymentRequestRepository;
pub use transfer_repository::TransferRepository;
pub use user_repository::UserRepository;
pub use wallet_repository::WalletRepository;

use sqlx::PgPool;

/// Database connection pool type alias.
pub type DbPool = PgPool;
