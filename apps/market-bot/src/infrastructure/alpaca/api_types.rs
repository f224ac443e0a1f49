//! Alpaca API response types.
//!
//! These types map directly to Alpaca's REST API format and convert into
//! domain types at the adapter boundary.

use std::collections::HashMap;

use chrono::{DateTime, FixedOffset, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::domain::catalog::Asset;
use crate::domain::market::{Bar, MarketClock};
use crate::domain::portfolio::{AccountSnapshot, Position};

// ============================================================================
// Market Data Types
// ============================================================================

/// Response from GET /v2/stocks/bars endpoint.
#[derive(Debug, Deserialize)]
pub struct AlpacaBarsResponse {
    /// Map of symbol to bars; `null` when nothing matched.
    #[serde(default)]
    pub bars: Option<HashMap<String, Vec<AlpacaBar>>>,
    /// Token for pagination (if more results available).
    #[serde(default)]
    pub next_page_token: Option<String>,
}

/// Single OHLCV bar from Alpaca market data API.
#[derive(Debug, Deserialize, Clone)]
pub struct AlpacaBar {
    /// Bar start time.
    pub t: DateTime<Utc>,
    /// Open price.
    pub o: f64,
    /// High price.
    pub h: f64,
    /// Low price.
    pub l: f64,
    /// Close price.
    pub c: f64,
    /// Volume.
    pub v: u64,
}

impl From<AlpacaBar> for Bar {
    fn from(bar: AlpacaBar) -> Self {
        Self {
            timestamp: bar.t,
            open: bar.o,
            high: bar.h,
            low: bar.l,
            close: bar.c,
            volume: bar.v,
        }
    }
}

// ============================================================================
// Trading API Types
// ============================================================================

/// Error body returned by both APIs.
#[derive(Debug, Deserialize)]
pub struct AlpacaErrorResponse {
    /// Numeric or string error code.
    #[serde(default)]
    pub code: Option<serde_json::Value>,
    /// Error message.
    pub message: String,
}

/// Response from GET /v2/account.
#[derive(Debug, Deserialize)]
pub struct AlpacaAccountResponse {
    /// Account number (`P` prefix for paper accounts).
    pub account_number: String,
    /// Account status.
    pub status: String,
    /// Account equity.
    pub equity: Decimal,
    /// Cash balance.
    pub cash: Decimal,
    /// Buying power.
    pub buying_power: Decimal,
    /// Portfolio value.
    pub portfolio_value: Decimal,
    /// Equity at the previous close.
    pub last_equity: Decimal,
    /// Pattern day trader flag.
    #[serde(default)]
    pub pattern_day_trader: bool,
    /// Trading blocked flag.
    #[serde(default)]
    pub trading_blocked: bool,
}

impl From<AlpacaAccountResponse> for AccountSnapshot {
    fn from(account: AlpacaAccountResponse) -> Self {
        Self {
            account_number: account.account_number,
            status: account.status,
            equity: account.equity,
            cash: account.cash,
            buying_power: account.buying_power,
            portfolio_value: account.portfolio_value,
            last_equity: account.last_equity,
            pattern_day_trader: account.pattern_day_trader,
            trading_blocked: account.trading_blocked,
        }
    }
}

/// Element of GET /v2/positions.
#[derive(Debug, Deserialize)]
pub struct AlpacaPositionResponse {
    /// Symbol.
    pub symbol: String,
    /// Quantity.
    pub qty: Decimal,
    /// Current price.
    pub current_price: Decimal,
    /// Market value.
    pub market_value: Decimal,
    /// Unrealized P&L.
    pub unrealized_pl: Decimal,
    /// Unrealized P&L as a fraction.
    pub unrealized_plpc: Decimal,
}

impl From<AlpacaPositionResponse> for Position {
    fn from(position: AlpacaPositionResponse) -> Self {
        Self {
            symbol: position.symbol,
            qty: position.qty,
            current_price: position.current_price,
            market_value: position.market_value,
            unrealized_pl: position.unrealized_pl,
            unrealized_plpc: position.unrealized_plpc,
        }
    }
}

/// Response from GET /v2/clock.
#[derive(Debug, Deserialize)]
pub struct AlpacaClockResponse {
    /// Current exchange time.
    pub timestamp: DateTime<FixedOffset>,
    /// Whether the market is open.
    pub is_open: bool,
    /// Next open.
    pub next_open: DateTime<FixedOffset>,
    /// Next close.
    pub next_close: DateTime<FixedOffset>,
}

impl From<AlpacaClockResponse> for MarketClock {
    fn from(clock: AlpacaClockResponse) -> Self {
        Self {
            timestamp: clock.timestamp,
            is_open: clock.is_open,
            next_open: clock.next_open,
            next_close: clock.next_close,
        }
    }
}

/// Element of GET /v2/assets.
#[derive(Debug, Deserialize)]
pub struct AlpacaAssetResponse {
    /// Symbol.
    pub symbol: String,
    /// Company name; some listings have none.
    #[serde(default)]
    pub name: Option<String>,
    /// Listing exchange.
    #[serde(default)]
    pub exchange: String,
    /// Tradable flag.
    #[serde(default)]
    pub tradable: bool,
    /// Fractionable flag.
    #[serde(default)]
    pub fractionable: bool,
}

impl From<AlpacaAssetResponse> for Asset {
    fn from(asset: AlpacaAssetResponse) -> Self {
        Self {
            symbol: asset.symbol,
            name: asset.name.unwrap_or_default(),
            exchange: asset.exchange,
            tradable: asset.tradable,
            fractionable: asset.fractionable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bars_response_with_null_bars() {
        let response: AlpacaBarsResponse =
            serde_json::from_str(r#"{"bars": null, "next_page_token": null}"#).unwrap();
        assert!(response.bars.is_none());
        assert!(response.next_page_token.is_none());
    }

    #[test]
    fn bar_parses_rfc3339() {
        let bar: AlpacaBar = serde_json::from_str(
            r#"{"t":"2024-01-02T05:00:00Z","o":187.15,"h":188.44,"l":183.885,"c":185.64,"v":82488674,"n":1008871,"vw":185.9465}"#,
        )
        .unwrap();
        let bar = Bar::from(bar);
        assert_eq!(bar.timestamp.to_rfc3339(), "2024-01-02T05:00:00+00:00");
        assert_eq!(bar.volume, 82_488_674);
    }

    #[test]
    fn account_parses_string_decimals() {
        let account: AlpacaAccountResponse = serde_json::from_str(
            r#"{
                "id": "904837e3",
                "account_number": "PA3JQ5XMZ8N1",
                "status": "ACTIVE",
                "equity": "100523.45",
                "cash": "50000",
                "buying_power": "200000",
                "portfolio_value": "100523.45",
                "last_equity": "100000",
                "pattern_day_trader": false,
                "trading_blocked": false
            }"#,
        )
        .unwrap();
        let snapshot = AccountSnapshot::from(account);
        assert_eq!(snapshot.equity, Decimal::new(10_052_345, 2));
        assert_eq!(snapshot.daily_change(), Decimal::new(52_345, 2));
    }

    #[test]
    fn clock_keeps_exchange_offset() {
        let clock: AlpacaClockResponse = serde_json::from_str(
            r#"{
                "timestamp": "2024-01-02T10:15:20.123456789-05:00",
                "is_open": true,
                "next_open": "2024-01-03T09:30:00-05:00",
                "next_close": "2024-01-02T16:00:00-05:00"
            }"#,
        )
        .unwrap();
        let clock = MarketClock::from(clock);
        assert!(clock.is_open);
        assert_eq!(clock.next_open.offset().local_minus_utc(), -5 * 3600);
    }

    #[test]
    fn asset_without_name() {
        let asset: AlpacaAssetResponse = serde_json::from_str(
            r#"{"symbol":"XYZ","name":null,"exchange":"NYSE","tradable":true,"fractionable":false}"#,
        )
        .unwrap();
        assert_eq!(Asset::from(asset).name, "");
    }

    #[test]
    fn error_response_with_numeric_code() {
        let err: AlpacaErrorResponse =
            serde_json::from_str(r#"{"code":40010001,"message":"invalid symbol"}"#).unwrap();
        assert_eq!(err.code.map(|c| c.to_string()), Some("40010001".to_string()));
    }
}
