pub mod bank_account;
pub mod currency;
pub mod entry;
pub mod money;
pub mod payment_request;
pub mod transfer;
pub mod user;
pub mod wallet;

pub use bank_account::{BankAccount, BankAccountStatus};
pub use currency::Currency;
pub use entry::Entry;
pub use money::Money;
pub use payment_request::{PaymentRequest, PaymentRequestStatus};
pub use transfer::{Transfer, TransferType};
pub use user::{User, UserStatus};
pub use wallet::{Wallet, WalletStatus};
