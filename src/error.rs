use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};

use crate::api::responses::{ApiResponse, ErrorResponse};

/// Stable error taxonomy surfaced at every boundary the core exposes.
///
/// Variant names are the abstract kinds; `code()` is the machine-readable
/// string that ships in the HTTP error envelope.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("user not found: {0}")]
    UserNotFound(String),
    #[error("wallet not found: {0}")]
    WalletNotFound(String),
    #[error("bank account not found: {0}")]
    BankAccountNotFound(String),
    #[error("currency not found: {0}")]
    CurrencyNotFound(String),
    #[error("payment request not found: {0}")]
    PaymentRequestNotFound(String),

    #[error("user already exists: {0}")]
    UserAlreadyExist(String),
    #[error("bank account already exists: {0}")]
    BankAccountAlreadyExist(String),
    #[error("wallet is not active: {0}")]
    WalletInactive(String),
    #[error("insufficient balance")]
    InsufficientBalance,

    #[error("currency mismatch")]
    CurrencyMismatch,
    #[error("illegal transition: {0}")]
    IllegalTransition(String),

    #[error("missing authorization header")]
    MissingAuthHeader,
    #[error("invalid authorization header format")]
    InvalidAuthHeaderFormat,
    #[error("unsupported authorization scheme")]
    UnsupportedAuth,
    #[error("unauthorized")]
    Unauthorized,
    #[error("incorrect password")]
    IncorrectPassword,
    #[error("token expired")]
    ExpiredToken,
    #[error("invalid token")]
    InvalidToken,

    #[error("validation error: {0}")]
    Validation(String),

    #[error("deadline exceeded")]
    DeadlineExceeded,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        use AppError::*;
        match self {
            UserNotFound(_) => (StatusCode::NOT_FOUND, "USER_NOT_FOUND"),
            WalletNotFound(_) => (StatusCode::NOT_FOUND, "WALLET_NOT_FOUND"),
            BankAccountNotFound(_) => (StatusCode::NOT_FOUND, "BANK_ACCOUNT_NOT_FOUND"),
            CurrencyNotFound(_) => (StatusCode::NOT_FOUND, "CURRENCY_NOT_FOUND"),
            PaymentRequestNotFound(_) => (StatusCode::NOT_FOUND, "PAYMENT_REQUEST_NOT_FOUND"),

            UserAlreadyExist(_) => (StatusCode::FORBIDDEN, "USER_ALREADY_EXISTS"),
            BankAccountAlreadyExist(_) => (StatusCode::FORBIDDEN, "BANK_ACCOUNT_ALREADY_EXISTS"),
            WalletInactive(_) => (StatusCode::FORBIDDEN, "WALLET_INACTIVE"),
            InsufficientBalance => (StatusCode::FORBIDDEN, "INSUFFICIENT_BALANCE"),

            CurrencyMismatch => (StatusCode::CONFLICT, "CURRENCY_MISMATCH"),
            IllegalTransition(_) => (StatusCode::CONFLICT, "ILLEGAL_TRANSITION"),

            MissingAuthHeader => (StatusCode::UNAUTHORIZED, "MISSING_AUTH_HEADER"),
            InvalidAuthHeaderFormat => (StatusCode::UNAUTHORIZED, "INVALID_AUTH_HEADER_FORMAT"),
            UnsupportedAuth => (StatusCode::UNAUTHORIZED, "UNSUPPORTED_AUTH"),
            Unauthorized => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            IncorrectPassword => (StatusCode::UNAUTHORIZED, "INCORRECT_PASSWORD"),
            ExpiredToken => (StatusCode::UNAUTHORIZED, "EXPIRED_TOKEN"),
            InvalidToken => (StatusCode::UNAUTHORIZED, "INVALID_TOKEN"),

            Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),

            DeadlineExceeded => (StatusCode::GATEWAY_TIMEOUT, "DEADLINE_EXCEEDED"),

            Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }

    /// True for storage failures that originate from a unique-constraint violation.
    pub fn is_unique_violation(err: &sqlx::Error) -> bool {
        matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some("23505"))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "internal error");
        }

        let message = match &self {
            AppError::Database(_) | AppError::Internal(_) => {
                "an internal error occurred".to_string()
            }
            other => other.to_string(),
        };

        (
            status,
            Json(ApiResponse::<()>::error(ErrorResponse::new(code, message))),
        )
            .into_response()
    }
}
