//! Infrastructure Layer - Adapters and external integrations.
//!
//! This layer contains the concrete implementations of the port interfaces
//! defined in the application layer, plus the process plumbing.

/// Alpaca REST gateway (market data and trading APIs).
pub mod alpaca;

/// PNG chart rendering.
pub mod chart;

/// Configuration from environment variables.
pub mod config;

/// Discord slash commands and client wiring.
pub mod discord;

/// Health check HTTP endpoint.
pub mod health;

/// Prometheus metrics instrumentation.
pub mod metrics;

/// OpenTelemetry tracing integration.
pub mod telemetry;
