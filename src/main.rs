use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tracing::info;
use wallet_ledger::api::{create_router, AppState};
use wallet_ledger::config::Settings;
use wallet_ledger::observability::{init_logging, init_metrics, HealthChecker, LogConfig, LogFormat};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let settings = Settings::new()?;

    let log_config = LogConfig {
        level: settings.application.log_level.clone(),
        format: LogFormat::from(
            std::env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .as_str(),
        ),
        include_target: true,
        include_file: false,
        include_line: false,
    };
    init_logging(&log_config);

    let metrics_handle = init_metrics();
    info!("configuration loaded, metrics initialized");

    info!("connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(settings.database.pool_size)
        .acquire_timeout(Duration::from_secs(5))
        .connect(&settings.database.url)
        .await?;
    info!("database connection established");

    info!("running database migrations...");
    sqlx::migrate!("./migrations").run(&pool).await?;
    info!("migrations applied successfully");

    let health_checker = Arc::new(HealthChecker::new(pool.clone()));
    let settings = Arc::new(settings);

    let state = AppState::new(pool, settings.clone())
        .with_metrics(metrics_handle)
        .with_health_checker(health_checker);

    let app = create_router(state);

    let addr = format!("0.0.0.0:{}", settings.application.port);
    info!("starting HTTP server on {}", addr);

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
