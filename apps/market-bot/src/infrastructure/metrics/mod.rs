//! Prometheus Metrics Module
//!
//! Exposes bot metrics via Prometheus format for monitoring.
//!
//! # Metrics Categories
//!
//! - **Commands**: Invocation counts by outcome, and handling latency
//! - **Gateway**: Alpaca REST requests by endpoint and outcome
//!
//! # Integration
//!
//! Metrics are exposed at `/metrics` on the health server port.

use std::sync::OnceLock;
use std::time::Duration;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

use crate::application::commands::Command;
use crate::application::presentation::Outcome;

// =============================================================================
// Global Metrics Handle
// =============================================================================

static PROMETHEUS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Initialize the Prometheus metrics recorder.
///
/// # Panics
///
/// Panics if the recorder cannot be installed.
#[allow(clippy::expect_used)]
pub fn init_metrics() -> PrometheusHandle {
    PROMETHEUS_HANDLE
        .get_or_init(|| {
            let handle = PrometheusBuilder::new()
                .install_recorder()
                .expect("failed to install Prometheus recorder");

            register_metrics();
            handle
        })
        .clone()
}

/// Get the Prometheus handle for rendering metrics.
///
/// Returns `None` if metrics have not been initialized.
#[must_use]
pub fn get_metrics_handle() -> Option<PrometheusHandle> {
    PROMETHEUS_HANDLE.get().cloned()
}

// =============================================================================
// Metric Registration
// =============================================================================

fn register_metrics() {
    describe_counter!(
        "market_bot_commands_total",
        "Total slash command invocations by command and outcome"
    );
    describe_histogram!(
        "market_bot_command_duration_seconds",
        "Time from receiving a command to having its reply ready"
    );
    describe_counter!(
        "market_bot_gateway_requests_total",
        "Total Alpaca REST requests by endpoint and outcome"
    );
}

// =============================================================================
// Metric Recording Functions
// =============================================================================

/// Metric labels for Alpaca endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayEndpoint {
    /// `GET /v2/stocks/bars`
    Bars,
    /// `GET /v2/account`
    Account,
    /// `GET /v2/positions`
    Positions,
    /// `GET /v2/clock`
    Clock,
    /// `GET /v2/assets`
    Assets,
}

impl GatewayEndpoint {
    /// Label value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bars => "bars",
            Self::Account => "account",
            Self::Positions => "positions",
            Self::Clock => "clock",
            Self::Assets => "assets",
        }
    }
}

/// Metric labels for gateway request outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayOutcome {
    /// 2xx response parsed successfully.
    Success,
    /// Non-2xx response.
    ApiError,
    /// No response, or an unreadable one.
    TransportError,
}

impl GatewayOutcome {
    /// Label value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::ApiError => "api_error",
            Self::TransportError => "transport_error",
        }
    }
}

/// Record one handled command.
pub fn record_command(command: Command, outcome: Outcome, duration: Duration) {
    counter!(
        "market_bot_commands_total",
        "command" => command.name(),
        "outcome" => outcome.as_str()
    )
    .increment(1);
    histogram!(
        "market_bot_command_duration_seconds",
        "command" => command.name()
    )
    .record(duration.as_secs_f64());
}

/// Record one Alpaca REST request.
pub fn record_gateway_request(endpoint: GatewayEndpoint, outcome: GatewayOutcome) {
    counter!(
        "market_bot_gateway_requests_total",
        "endpoint" => endpoint.as_str(),
        "outcome" => outcome.as_str()
    )
    .increment(1);
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_labels() {
        assert_eq!(GatewayEndpoint::Bars.as_str(), "bars");
        assert_eq!(GatewayEndpoint::Assets.as_str(), "assets");
    }

    #[test]
    fn outcome_labels() {
        assert_eq!(GatewayOutcome::Success.as_str(), "success");
        assert_eq!(GatewayOutcome::TransportError.as_str(), "transport_error");
    }

    #[test]
    fn recording_without_recorder_is_noop() {
        record_command(Command::Help, Outcome::Success, Duration::from_millis(3));
        record_gateway_request(GatewayEndpoint::Clock, GatewayOutcome::ApiError);
    }
}
