use axum::{
    routing::{get, patch, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::handlers;
use crate::config::Settings;
use crate::observability::HealthChecker;
use crate::services::{
    AuthService, BankAccountLifecycle, CurrencyService, PaymentRequestService, UserService,
    WalletEngine,
};

/// Application state shared across handlers. Every field is cheap to
/// clone (a `PgPool` handle or a service wrapping one), matching the
/// teacher's shared-state-by-clone pattern.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub settings: Arc<Settings>,
    pub user_service: UserService,
    pub currency_service: CurrencyService,
    pub bank_account_lifecycle: BankAccountLifecycle,
    pub wallet_engine: WalletEngine,
    pub payment_request_service: PaymentRequestService,
    pub auth_service: AuthService,
    pub metrics_handle: Option<PrometheusHandle>,
    pub health_checker: Option<Arc<HealthChecker>>,
}

impl AppState {
    pub fn new(pool: PgPool, settings: Arc<Settings>) -> Self {
        Self {
            user_service: UserService::new(
                pool.clone(),
                settings.auth.token_secret.clone(),
                settings.auth.token_ttl_seconds,
            ),
            currency_service: CurrencyService::new(pool.clone()),
            bank_account_lifecycle: BankAccountLifecycle::new(pool.clone()),
            wallet_engine: WalletEngine::new(pool.clone()),
            payment_request_service: PaymentRequestService::new(pool.clone()),
            auth_service: AuthService::new(
                pool.clone(),
                settings.auth.token_secret.clone(),
                settings.auth.token_ttl_seconds,
            ),
            pool,
            settings,
            metrics_handle: None,
            health_checker: None,
        }
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics_handle = Some(handle);
        self
    }

    pub fn with_health_checker(mut self, checker: Arc<HealthChecker>) -> Self {
        self.health_checker = Some(checker);
        self
    }
}

/// Creates the main API router with every route in the REST surface.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health and metrics endpoints
        .route("/health", get(handlers::health_check))
        .route("/health/detailed", get(handlers::detailed_health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/live", get(handlers::liveness_check))
        .route("/metrics", get(handlers::metrics_endpoint))
        // Users
        .route("/users", post(handlers::create_user))
        .route("/users/login", post(handlers::login))
        // Currencies
        .route("/currencies", post(handlers::create_currency))
        .route("/currencies/:code", get(handlers::get_currency))
        // Bank accounts
        .route("/bank-accounts", post(handlers::create_bank_account))
        .route("/bank-accounts/:id", get(handlers::get_bank_account))
        .route(
            "/bank-accounts/:id/verification-success",
            patch(handlers::verification_success),
        )
        .route(
            "/bank-accounts/:id/verification-failed",
            patch(handlers::verification_failed),
        )
        // Wallets
        .route("/wallets/:id", get(handlers::get_wallet))
        .route("/wallets/deposit", post(handlers::deposit))
        .route("/wallets/withdraw", post(handlers::withdraw))
        .route("/wallets/pay", post(handlers::pay))
        // Payment requests
        .route("/payment-req", post(handlers::create_payment_request))
        .route("/payment-req", get(handlers::list_payment_requests))
        .route(
            "/payment-req/:id/approve",
            patch(handlers::approve_payment_request),
        )
        .route(
            "/payment-req/:id/refuse",
            patch(handlers::refuse_payment_request),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
