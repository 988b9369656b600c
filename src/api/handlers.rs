use axum::{
    extract::{Path, Query, State},
    Json,
};
use validator::Validate;

use crate::api::requests::{
    CreateBankAccountRequest, CreateCurrencyRequest, CreatePaymentRequestRequest,
    CreateUserRequest, DepositRequest, ListPaymentRequestsQuery, LoginRequest, PayRequest,
    WithdrawRequest,
};
use crate::api::responses::{
    ApiResponse, BankAccountDto, BankAccountWithWalletDto, CurrencyDto, HealthResponse,
    LoginResponse, PaginatedResponse, PaymentRequestDto, UserDto, ValidationErrorDetail,
    WalletDto, WalletTransferResultDto,
};
use crate::auth::AuthUser;
use crate::error::{AppError, Result};
use crate::services::RegisterUserRequest;

use super::routes::AppState;

fn validation_error(errors: validator::ValidationErrors) -> AppError {
    let details: Vec<ValidationErrorDetail> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| ValidationErrorDetail {
                field: field.to_string(),
                message: e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("invalid value for {field}")),
            })
        })
        .collect();
    let message = details
        .first()
        .map(|d| format!("{}: {}", d.field, d.message))
        .unwrap_or_else(|| "validation failed".to_string());
    AppError::Validation(message)
}

// ---------------------------------------------------------------------
// Health, readiness, metrics
// ---------------------------------------------------------------------

pub async fn health_check(State(state): State<AppState>) -> Json<ApiResponse<HealthResponse>> {
    let db_healthy = sqlx::query("SELECT 1").fetch_one(&state.pool).await.is_ok();
    let uptime = state
        .health_checker
        .as_ref()
        .map(|h| h.uptime_seconds())
        .unwrap_or(0);

    Json(ApiResponse::success(HealthResponse {
        status: if db_healthy { "healthy".to_string() } else { "unhealthy".to_string() },
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: uptime,
        database: db_healthy,
    }))
}

pub async fn detailed_health_check(
    State(state): State<AppState>,
) -> Json<ApiResponse<crate::observability::AggregatedHealth>> {
    let health = match &state.health_checker {
        Some(checker) => checker.check_all().await,
        None => crate::observability::AggregatedHealth::new(
            env!("CARGO_PKG_VERSION").to_string(),
            0,
            vec![],
        ),
    };
    Json(ApiResponse::success(health))
}

pub async fn readiness_check(State(state): State<AppState>) -> (axum::http::StatusCode, Json<ApiResponse<bool>>) {
    let ready = match &state.health_checker {
        Some(checker) => checker.is_ready().await,
        None => sqlx::query("SELECT 1").fetch_one(&state.pool).await.is_ok(),
    };
    let status = if ready {
        axum::http::StatusCode::OK
    } else {
        axum::http::StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(ApiResponse::success(ready)))
}

pub async fn liveness_check() -> Json<ApiResponse<bool>> {
    Json(ApiResponse::success(true))
}

pub async fn metrics_endpoint(State(state): State<AppState>) -> String {
    state
        .metrics_handle
        .as_ref()
        .map(|h| h.render())
        .unwrap_or_default()
}

// ---------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------

pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> Result<Json<ApiResponse<UserDto>>> {
    request.validate().map_err(validation_error)?;

    let user = state
        .user_service
        .register(RegisterUserRequest {
            username: request.username,
            password: request.password,
            full_name: request.full_name,
            email: request.email,
        })
        .await?;

    tracing::info!(user_id = user.id, "user registered");
    Ok(Json(ApiResponse::success(user.into())))
}

pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>> {
    request.validate().map_err(validation_error)?;

    let (access_token, user) = state
        .user_service
        .login(&request.username, &request.password)
        .await?;

    tracing::info!(user_id = user.id, "user logged in");
    Ok(Json(ApiResponse::success(LoginResponse {
        access_token,
        user: user.into(),
    })))
}

// ---------------------------------------------------------------------
// Currencies
// ---------------------------------------------------------------------

pub async fn create_currency(
    State(state): State<AppState>,
    Json(request): Json<CreateCurrencyRequest>,
) -> Result<Json<ApiResponse<CurrencyDto>>> {
    request.validate().map_err(validation_error)?;

    let currency = state
        .currency_service
        .create(&request.code, request.fraction)
        .await?;

    Ok(Json(ApiResponse::success(currency.into())))
}

pub async fn get_currency(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<ApiResponse<CurrencyDto>>> {
    let currency = state.currency_service.get(&code).await?;
    Ok(Json(ApiResponse::success(currency.into())))
}

// ---------------------------------------------------------------------
// Bank accounts
// ---------------------------------------------------------------------

pub async fn create_bank_account(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(request): Json<CreateBankAccountRequest>,
) -> Result<Json<ApiResponse<BankAccountWithWalletDto>>> {
    request.validate().map_err(validation_error)?;

    let result = state
        .bank_account_lifecycle
        .create_with_wallet(
            request.user_id,
            &request.account_no,
            &request.ifsc,
            &request.bank_name,
            &request.currency,
        )
        .await?;

    tracing::info!(
        bank_account_id = result.bank_account.id,
        wallet_id = result.wallet.id,
        "bank account and wallet created"
    );

    Ok(Json(ApiResponse::success(BankAccountWithWalletDto {
        bank_account: result.bank_account.into(),
        wallet: result.wallet.into(),
    })))
}

pub async fn get_bank_account(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<BankAccountDto>>> {
    let account = state.bank_account_lifecycle.get(id).await?;
    Ok(Json(ApiResponse::success(account.into())))
}

pub async fn verification_success(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<BankAccountWithWalletDto>>> {
    let result = state.bank_account_lifecycle.verification_success(id).await?;
    tracing::info!(bank_account_id = id, "bank account verification succeeded");
    Ok(Json(ApiResponse::success(BankAccountWithWalletDto {
        bank_account: result.bank_account.into(),
        wallet: result.wallet.into(),
    })))
}

pub async fn verification_failed(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<BankAccountDto>>> {
    let account = state.bank_account_lifecycle.verification_failed(id).await?;
    tracing::info!(bank_account_id = id, "bank account verification failed");
    Ok(Json(ApiResponse::success(account.into())))
}

// ---------------------------------------------------------------------
// Wallets
// ---------------------------------------------------------------------

pub async fn get_wallet(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<WalletDto>>> {
    let wallet = state.bank_account_lifecycle.get_wallet(id).await?;
    Ok(Json(ApiResponse::success(wallet.into())))
}

pub async fn deposit(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(request): Json<DepositRequest>,
) -> Result<Json<ApiResponse<WalletTransferResultDto>>> {
    request.validate().map_err(validation_error)?;

    let result = state
        .wallet_engine
        .deposit(request.wallet_id, request.amount)
        .await?;

    tracing::info!(wallet_id = request.wallet_id, amount = request.amount, "deposit completed");
    Ok(Json(ApiResponse::success(result.into())))
}

pub async fn withdraw(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(request): Json<WithdrawRequest>,
) -> Result<Json<ApiResponse<WalletTransferResultDto>>> {
    request.validate().map_err(validation_error)?;

    let result = state
        .wallet_engine
        .withdraw(request.wallet_id, request.amount)
        .await?;

    tracing::info!(wallet_id = request.wallet_id, amount = request.amount, "withdrawal completed");
    Ok(Json(ApiResponse::success(result.into())))
}

pub async fn pay(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(request): Json<PayRequest>,
) -> Result<Json<ApiResponse<WalletTransferResultDto>>> {
    request.validate().map_err(validation_error)?;

    let result = state
        .wallet_engine
        .send_money(&request.from_address, &request.to_address, request.amount)
        .await?;

    tracing::info!(
        from = %request.from_address,
        to = %request.to_address,
        amount = request.amount,
        "send_money completed"
    );
    Ok(Json(ApiResponse::success(result.into())))
}

// ---------------------------------------------------------------------
// Payment requests
// ---------------------------------------------------------------------

pub async fn create_payment_request(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(request): Json<CreatePaymentRequestRequest>,
) -> Result<Json<ApiResponse<PaymentRequestDto>>> {
    request.validate().map_err(validation_error)?;

    let payment_request = state
        .payment_request_service
        .create(&request.from_address, &request.to_address, request.amount)
        .await?;

    Ok(Json(ApiResponse::success(payment_request.into())))
}

pub async fn list_payment_requests(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<ListPaymentRequestsQuery>,
) -> Result<Json<ApiResponse<PaginatedResponse<PaymentRequestDto>>>> {
    let limit = query.limit.unwrap_or(20).clamp(1, 100);
    let offset = query.offset.unwrap_or(0).max(0);

    let requests = state
        .payment_request_service
        .list(query.from_wallet_id, limit, offset)
        .await?;

    let items = requests.into_iter().map(PaymentRequestDto::from).collect();
    Ok(Json(ApiResponse::success(PaginatedResponse::new(
        items, limit, offset,
    ))))
}

pub async fn approve_payment_request(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<PaymentRequestDto>>> {
    let request = state.payment_request_service.approve(id).await?;
    tracing::info!(payment_request_id = id, "payment request approved");
    Ok(Json(ApiResponse::success(request.into())))
}

pub async fn refuse_payment_request(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<PaymentRequestDto>>> {
    let request = state.payment_request_service.refuse(id).await?;
    tracing::info!(payment_request_id = id, "payment request refused");
    Ok(Json(ApiResponse::success(request.into())))
}
