pub mod auth_service;
pub mod bank_account_lifecycle;
pub mod currency_service;
pub mod payment_request_service;
pub mod user_service;
pub mod wallet_engine;

pub use auth_service::AuthService;
pub use bank_account_lifecycle::{BankAccountLifecycle, BankAccountWithWallet};
pub use currency_service::CurrencyService;
pub use payment_request_service::PaymentRequestService;
pub use user_service::{RegisterUserRequest, UserService};
pub use wallet_engine::{WalletEngine, WalletTransferResult};
