//! Market Bot Binary
//!
//! Connects to Discord and answers market slash commands.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin market-bot
//! ```
//!
//! # Environment Variables
//!
//! ## Required
//! - `DISCORD_TOKEN`: Bot token
//!
//! ## Optional
//! - `ALPACA_API_KEY`, `ALPACA_SECRET_KEY`: Alpaca credentials (without them
//!   only `/help` and `/browse` work)
//! - `GUILD_ID`: Register commands in one guild instead of globally
//! - `ALPACA_ENV`: paper | live (default: paper)
//! - `ALPACA_FEED`: Market data feed - "iex" | "sip" (default: account default)
//! - `ALPACA_TIMEOUT_SECS`: HTTP timeout (default: 30)
//! - `BOT_HEALTH_PORT`: Health check HTTP port, 0 disables (default: 8083)
//! - `OTEL_ENABLED`: Enable OpenTelemetry (default: false)
//! - `OTEL_EXPORTER_OTLP_ENDPOINT`: OTLP endpoint (default: <http://localhost:4317>)
//! - `OTEL_SERVICE_NAME`: Service name (default: market-bot)
//! - `RUST_LOG`: Log level (default: info)

use std::sync::Arc;
use std::time::Duration;

use market_bot::infrastructure::alpaca;
use market_bot::infrastructure::discord;
use market_bot::infrastructure::telemetry;
use market_bot::{
    BotConfig, BotServices, ConnectionFlag, HealthServer, HealthServerState,
    PlottersChartRenderer, init_metrics,
};
use tokio::signal;
use tokio_util::sync::CancellationToken;

/// Graceful shutdown timeout.
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    load_dotenv();

    // Initialize telemetry (OpenTelemetry + tracing)
    let _telemetry_guard = telemetry::init();

    tracing::info!("Starting Market Bot");

    // Initialize Prometheus metrics
    let _metrics_handle = init_metrics();

    let config = BotConfig::from_env()?;
    log_config(&config);

    let shutdown_token = CancellationToken::new();

    let services = alpaca::attach_gateway(
        BotServices::new(Arc::new(PlottersChartRenderer::new())),
        config.alpaca.as_ref(),
    );

    let discord_connected = ConnectionFlag::new();

    // Spawn health server
    if config.server.health_port == 0 {
        tracing::info!("Health server disabled");
    } else {
        let health_state = Arc::new(HealthServerState::new(
            env!("CARGO_PKG_VERSION").to_string(),
            services.is_gateway_configured(),
            discord_connected.clone(),
        ));
        let health_server = HealthServer::new(
            config.server.health_port,
            health_state,
            shutdown_token.clone(),
        );
        tokio::spawn(async move {
            if let Err(e) = health_server.run().await {
                tracing::error!(error = %e, "Health server error");
            }
        });
    }

    let signal_token = shutdown_token.clone();
    tokio::spawn(async move {
        await_shutdown(signal_token).await;
    });

    let bot = discord::run_bot(
        &config.discord,
        services,
        discord_connected,
        shutdown_token.clone(),
    );

    tokio::select! {
        result = bot => {
            if let Err(e) = result {
                tracing::error!(error = %e, "Discord client stopped with an error");
                shutdown_token.cancel();
                return Err(e);
            }
        }
        () = async {
            shutdown_token.cancelled().await;
            tokio::time::sleep(SHUTDOWN_TIMEOUT).await;
        } => {
            tracing::warn!(
                timeout_secs = SHUTDOWN_TIMEOUT.as_secs(),
                "Discord client did not stop in time"
            );
        }
    }

    shutdown_token.cancel();
    tracing::info!("Market Bot stopped");
    Ok(())
}

/// Log the parsed configuration.
fn log_config(config: &BotConfig) {
    tracing::info!(
        guild_id = config.discord.guild_id,
        gateway_configured = config.alpaca.is_some(),
        health_port = config.server.health_port,
        "Configuration loaded"
    );
    if let Some(alpaca) = &config.alpaca {
        tracing::info!(
            environment = alpaca.environment.as_str(),
            feed = alpaca.feed.map(|feed| feed.as_str()),
            timeout_secs = alpaca.timeout.as_secs(),
            "Alpaca gateway"
        );
    }
}

/// Load .env file from current directory or any ancestor directory.
fn load_dotenv() {
    if dotenvy::dotenv().is_ok() {
        return;
    }

    if let Ok(cwd) = std::env::current_dir() {
        let mut dir = cwd.as_path();
        while let Some(parent) = dir.parent() {
            let env_path = parent.join(".env");
            if env_path.exists() {
                let _ = dotenvy::from_path(&env_path);
                return;
            }
            dir = parent;
        }
    }
}

/// Wait for shutdown signal (SIGTERM or SIGINT).
#[allow(clippy::expect_used)]
async fn await_shutdown(shutdown_token: CancellationToken) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("signal handler installation is critical for graceful shutdown");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("SIGTERM handler installation is critical for graceful shutdown")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, initiating shutdown");
        }
    }

    shutdown_token.cancel();
}
