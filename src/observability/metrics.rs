use metrics::{counter, describe_counter, describe_histogram, histogram, Unit};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;
use std::time::Instant;

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Global metrics instance.
pub static METRICS: OnceLock<Metrics> = OnceLock::new();

/// Metrics collector for the wallet ledger.
#[derive(Debug, Clone)]
pub struct Metrics {
    initialized: bool,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    pub fn new() -> Self {
        Self { initialized: true }
    }

    pub fn record_deposit(&self, currency: &str) {
        counter!("wallet_deposits_total", "currency" => currency.to_string()).increment(1);
    }

    pub fn record_withdrawal(&self, currency: &str) {
        counter!("wallet_withdrawals_total", "currency" => currency.to_string()).increment(1);
    }

    pub fn record_send_money(&self, currency: &str) {
        counter!("wallet_send_money_total", "currency" => currency.to_string()).increment(1);
    }

    pub fn record_wallet_operation_failed(&self, operation: &str, reason: &str) {
        counter!("wallet_operations_failed_total", "operation" => operation.to_string(), "reason" => reason.to_string())
            .increment(1);
    }

    pub fn record_wallet_operation_latency(&self, operation: &str, duration_ms: f64) {
        histogram!("wallet_operation_duration_ms", "operation" => operation.to_string()).record(duration_ms);
    }

    pub fn record_payment_request_created(&self) {
        counter!("payment_requests_created_total").increment(1);
    }

    pub fn record_payment_request_resolved(&self, outcome: &str) {
        counter!("payment_requests_resolved_total", "outcome" => outcome.to_string()).increment(1);
    }

    pub fn record_bank_account_verification(&self, outcome: &str) {
        counter!("bank_account_verifications_total", "outcome" => outcome.to_string()).increment(1);
    }

    pub fn record_http_request(&self, method: &str, path: &str, status: u16, duration_ms: f64) {
        counter!("http_requests_total", "method" => method.to_string(), "path" => path.to_string(), "status" => status.to_string()).increment(1);
        histogram!("http_request_duration_ms", "method" => method.to_string(), "path" => path.to_string()).record(duration_ms);
    }

    pub fn record_db_query(&self, query_type: &str, duration_ms: f64, success: bool) {
        counter!("db_queries_total", "type" => query_type.to_string(), "success" => success.to_string()).increment(1);
        histogram!("db_query_duration_ms", "type" => query_type.to_string()).record(duration_ms);
    }
}

/// Timer for measuring operation latency.
pub struct LatencyTimer {
    start: Instant,
}

impl LatencyTimer {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Default for LatencyTimer {
    fn default() -> Self {
        Self::new()
    }
}

/// Initializes the metrics system and returns the Prometheus handle.
pub fn init_metrics() -> PrometheusHandle {
    let handle = METRICS_HANDLE.get_or_init(|| {
        let builder = PrometheusBuilder::new();
        let handle = builder
            .install_recorder()
            .expect("failed to install prometheus recorder");

        describe_metrics();
        handle
    });

    METRICS.get_or_init(Metrics::new);

    handle.clone()
}

/// Describes all metrics for Prometheus.
fn describe_metrics() {
    describe_counter!("wallet_deposits_total", Unit::Count, "Total number of deposits");
    describe_counter!("wallet_withdrawals_total", Unit::Count, "Total number of withdrawals");
    describe_counter!("wallet_send_money_total", Unit::Count, "Total number of wallet-to-wallet transfers");
    describe_counter!("wallet_operations_failed_total", Unit::Count, "Total number of failed wallet operations");
    describe_histogram!("wallet_operation_duration_ms", Unit::Milliseconds, "Wallet operation latency in milliseconds");

    describe_counter!("payment_requests_created_total", Unit::Count, "Total number of payment requests created");
    describe_counter!("payment_requests_resolved_total", Unit::Count, "Total number of payment requests resolved, by outcome");

    describe_counter!("bank_account_verifications_total", Unit::Count, "Total number of bank account verification outcomes");

    describe_counter!("http_requests_total", Unit::Count, "Total HTTP requests");
    describe_histogram!("http_request_duration_ms", Unit::Milliseconds, "HTTP request latency in milliseconds");

    describe_counter!("db_queries_total", Unit::Count, "Total database queries");
    describe_histogram!("db_query_duration_ms", Unit::Milliseconds, "Database query latency in milliseconds");
}

/// Returns the global metrics instance.
pub fn get_metrics() -> &'static Metrics {
    METRICS.get_or_init(Metrics::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latency_timer() {
        let timer = LatencyTimer::new();
        std::thread::sleep(std::time::Duration::from_millis(10));
        let elapsed = timer.elapsed_ms();
        assert!(elapsed >= 10.0);
    }

    #[test]
    fn test_metrics_creation() {
        let metrics = Metrics::new();
        assert!(metrics.initialized);
    }
}
