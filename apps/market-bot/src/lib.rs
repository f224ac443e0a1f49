#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::too_many_lines,
        clippy::needless_pass_by_value,
        clippy::items_after_statements
    )
)]

//! Market Bot - Discord front-end for Alpaca
//!
//! Slash commands that fetch quotes, price history, account and position
//! data from Alpaca and answer with embeds and rendered PNG charts.
//!
//! # Layers (inside → outside)
//!
//! - **Domain**: Pure types and arithmetic
//!   - `market`: Bars, series statistics, normalization, argument clamping
//!   - `portfolio`: Account and position P&L
//!   - `catalog`: Popular categories and asset search
//!
//! - **Application**: Use cases and port definitions
//!   - `ports`: Market data, brokerage and chart renderer interfaces
//!   - `presentation`: Platform-neutral replies and number formatting
//!   - `commands`: One handler per slash command behind a failure boundary
//!
//! - **Infrastructure**: Adapters and external integrations
//!   - `alpaca`: REST gateway for the trading and market data APIs
//!   - `chart`: PNG rendering
//!   - `discord`: Slash command registration and reply mapping
//!   - `config`, `telemetry`, `metrics`, `health`: Process plumbing
//!
//! # Request Flow
//!
//! ```text
//! Discord ──► poise command ──► BotServices::dispatch ──► handler
//!                                                         │
//!                      Alpaca REST ◄── MarketDataPort ◄───┤
//!                                  ◄── BrokeragePort  ◄───┤
//!                      plotters    ◄── ChartRenderer  ◄───┘
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Module Declarations
// =============================================================================

/// Domain layer - Market, portfolio and catalog types with no I/O.
pub mod domain;

/// Application layer - Use cases and port definitions.
pub mod application;

/// Infrastructure layer - Adapters and external integrations.
pub mod infrastructure;

// =============================================================================
// Re-exports
// =============================================================================

// Command handling
pub use application::commands::{BotServices, Command, CommandError, CommandRequest};
pub use application::presentation::{Embed, EmbedColor, Outcome, Reply};

// Ports (for integration tests)
pub use application::ports::{
    BarsRequest, BrokeragePort, ChartError, ChartRenderer, GatewayError, MarketDataPort,
};

// Infrastructure config
pub use infrastructure::config::{
    AlpacaSettings, BotConfig, ConfigError, Credentials, DataFeed, DiscordSettings, Environment,
    ServerSettings,
};

// Adapters
pub use infrastructure::alpaca::{AlpacaConfig, AlpacaError, AlpacaGateway, attach_gateway};
pub use infrastructure::chart::PlottersChartRenderer;

// Health server
pub use infrastructure::health::{
    ConnectionFlag, HealthServer, HealthServerError, HealthServerState,
};

// Metrics
pub use infrastructure::metrics::init_metrics;

// Telemetry
pub use infrastructure::telemetry::{TelemetryConfig, TelemetryGuard, init as init_telemetry};
