//! Application Ports (Driven)
//!
//! Interfaces the command handlers use to reach external systems. The
//! infrastructure layer provides the implementations.
//!
//! - `MarketDataPort`: historical bars
//! - `BrokeragePort`: account, positions, clock and asset list
//! - `ChartRenderer`: PNG rendering of price and comparison charts

mod brokerage_port;
mod chart_port;
mod gateway_error;
mod market_data_port;

pub use brokerage_port::BrokeragePort;
pub use chart_port::{
    ChartError, ChartRenderer, ComparisonChart, ComparisonSeries, PriceChart, SERIES_PALETTE,
    SeriesColor,
};
pub use gateway_error::GatewayError;
pub use market_data_port::{BarsRequest, MarketDataPort};
