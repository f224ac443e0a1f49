//! Market Data Port (Driven Port)
//!
//! Interface for fetching historical bars.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use super::GatewayError;
use crate::domain::market::{BarSet, Timeframe};

/// Historical bars query for one or more symbols.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarsRequest {
    /// Symbols to fetch, already normalized.
    pub symbols: Vec<String>,
    /// Bar granularity.
    pub timeframe: Timeframe,
    /// Inclusive start of the window.
    pub start: DateTime<Utc>,
}

impl BarsRequest {
    /// Bars covering `lookback` up to `now`.
    #[must_use]
    pub fn since(
        symbols: Vec<String>,
        timeframe: Timeframe,
        lookback: Duration,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            symbols,
            timeframe,
            start: now - lookback,
        }
    }

    /// Minute bars for the last 24 hours.
    #[must_use]
    pub fn last_day_minutes(symbols: Vec<String>, now: DateTime<Utc>) -> Self {
        Self::since(symbols, Timeframe::Minute, Duration::days(1), now)
    }

    /// Daily bars for the last `days` days.
    #[must_use]
    pub fn daily(symbols: Vec<String>, days: i64, now: DateTime<Utc>) -> Self {
        Self::since(symbols, Timeframe::Day, Duration::days(days), now)
    }
}

/// Port for fetching historical market data.
#[async_trait]
pub trait MarketDataPort: Send + Sync {
    /// Fetch every bar in the request window, across all pages.
    ///
    /// Symbols without data are absent from the returned set.
    async fn get_bars(&self, request: BarsRequest) -> Result<BarSet, GatewayError>;
}
