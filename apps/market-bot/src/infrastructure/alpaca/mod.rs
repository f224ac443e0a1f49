//! Alpaca REST Gateway
//!
//! Read-only implementation of the market data and brokerage ports over
//! Alpaca's HTTP APIs:
//! - Historical bars with `next_page_token` pagination
//! - Account, positions, market clock and asset list
//! - Paper or live trading endpoint by environment

use std::sync::Arc;

use crate::application::commands::BotServices;
use crate::infrastructure::config::AlpacaSettings;

mod adapter;
mod api_types;
mod config;
mod error;
mod http_client;

pub use adapter::AlpacaGateway;
pub use config::{AlpacaConfig, DATA_URL, LIVE_TRADING_URL, PAPER_TRADING_URL};
pub use error::AlpacaError;

/// Attach an Alpaca gateway to `services` when settings are present.
///
/// A gateway that fails to build is logged and left out, so the bot still
/// starts in degraded mode.
#[must_use]
pub fn attach_gateway(services: BotServices, settings: Option<&AlpacaSettings>) -> BotServices {
    let Some(settings) = settings else {
        tracing::warn!("Alpaca credentials not configured; only /help and /browse will succeed");
        return services;
    };

    match AlpacaGateway::new(&AlpacaConfig::from_settings(settings)) {
        Ok(gateway) => {
            let gateway = Arc::new(gateway);
            services
                .with_market_data(Arc::clone(&gateway) as _)
                .with_brokerage(gateway)
        }
        Err(e) => {
            tracing::error!(
                error = %e,
                "Failed to initialize Alpaca gateway; only /help and /browse will succeed"
            );
            services
        }
    }
}
