//! Alpaca gateway implementing `MarketDataPort` and `BrokeragePort`.

use async_trait::async_trait;
use chrono::SecondsFormat;

use crate::application::ports::{BarsRequest, BrokeragePort, GatewayError, MarketDataPort};
use crate::domain::catalog::Asset;
use crate::domain::market::{Bar, BarSet, MarketClock};
use crate::domain::portfolio::{AccountSnapshot, Position};
use crate::infrastructure::config::DataFeed;
use crate::infrastructure::metrics::GatewayEndpoint;

use super::api_types::{
    AlpacaAccountResponse, AlpacaAssetResponse, AlpacaBarsResponse, AlpacaClockResponse,
    AlpacaPositionResponse,
};
use super::config::AlpacaConfig;
use super::error::AlpacaError;
use super::http_client::AlpacaHttpClient;

/// Maximum bars per page accepted by the bars endpoint.
const BARS_PAGE_LIMIT: u32 = 10_000;

const NO_QUERY: &[(&str, &str)] = &[];

/// Alpaca REST gateway.
///
/// Read-only: it never places or cancels orders.
#[derive(Debug, Clone)]
pub struct AlpacaGateway {
    client: AlpacaHttpClient,
    feed: Option<DataFeed>,
}

impl AlpacaGateway {
    /// Create a new gateway.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &AlpacaConfig) -> Result<Self, AlpacaError> {
        Ok(Self {
            client: AlpacaHttpClient::new(config)?,
            feed: config.feed,
        })
    }

    async fn bars_page(
        &self,
        request: &BarsRequest,
        symbols: &str,
        page_token: Option<&str>,
    ) -> Result<AlpacaBarsResponse, AlpacaError> {
        let mut query: Vec<(&str, String)> = vec![
            ("symbols", symbols.to_string()),
            ("timeframe", request.timeframe.as_str().to_string()),
            (
                "start",
                request.start.to_rfc3339_opts(SecondsFormat::Secs, true),
            ),
            ("limit", BARS_PAGE_LIMIT.to_string()),
        ];
        if let Some(feed) = self.feed {
            query.push(("feed", feed.as_str().to_string()));
        }
        if let Some(token) = page_token {
            query.push(("page_token", token.to_string()));
        }

        self.client
            .data_get(GatewayEndpoint::Bars, "/v2/stocks/bars", &query)
            .await
    }
}

#[async_trait]
impl MarketDataPort for AlpacaGateway {
    async fn get_bars(&self, request: BarsRequest) -> Result<BarSet, GatewayError> {
        let mut bars = BarSet::new();
        if request.symbols.is_empty() {
            return Ok(bars);
        }

        let symbols = request.symbols.join(",");
        let mut page_token: Option<String> = None;
        let mut pages = 0_u32;

        loop {
            let page = self
                .bars_page(&request, &symbols, page_token.as_deref())
                .await?;
            pages += 1;

            for (symbol, series) in page.bars.unwrap_or_default() {
                bars.extend(symbol, series.into_iter().map(Bar::from));
            }

            match page.next_page_token.filter(|token| !token.is_empty()) {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        tracing::debug!(
            symbols = %symbols,
            timeframe = %request.timeframe,
            pages,
            bars = bars.len(),
            "Fetched bars from Alpaca data API"
        );

        Ok(bars)
    }
}

#[async_trait]
impl BrokeragePort for AlpacaGateway {
    async fn get_account(&self) -> Result<AccountSnapshot, GatewayError> {
        let account: AlpacaAccountResponse = self
            .client
            .get(GatewayEndpoint::Account, "/v2/account", NO_QUERY)
            .await?;
        Ok(account.into())
    }

    async fn get_positions(&self) -> Result<Vec<Position>, GatewayError> {
        let positions: Vec<AlpacaPositionResponse> = self
            .client
            .get(GatewayEndpoint::Positions, "/v2/positions", NO_QUERY)
            .await?;
        Ok(positions.into_iter().map(Position::from).collect())
    }

    async fn get_clock(&self) -> Result<MarketClock, GatewayError> {
        let clock: AlpacaClockResponse = self
            .client
            .get(GatewayEndpoint::Clock, "/v2/clock", NO_QUERY)
            .await?;
        Ok(clock.into())
    }

    async fn get_assets(&self) -> Result<Vec<Asset>, GatewayError> {
        let params = [("status", "active"), ("asset_class", "us_equity")];
        let assets: Vec<AlpacaAssetResponse> = self
            .client
            .get(GatewayEndpoint::Assets, "/v2/assets", &params)
            .await?;

        tracing::debug!(count = assets.len(), "Fetched asset list");
        Ok(assets.into_iter().map(Asset::from).collect())
    }
}
