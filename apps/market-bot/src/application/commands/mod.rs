//! Command Dispatcher
//!
//! Maps a typed slash command request to exactly one handler and wraps the
//! handler in the failure boundary: any error becomes a
//! `❌ Error <doing X>: <description>` reply tagged with the command.
//!
//! Handlers are stateless. They share only the gateway clients and the chart
//! renderer held by [`BotServices`], all behind `Arc`.

mod discovery;
mod portfolio;
mod quotes;

use std::sync::Arc;

use tracing::Instrument;
use uuid::Uuid;

use crate::application::ports::{
    BrokeragePort, ChartError, ChartRenderer, GatewayError, MarketDataPort,
};
use crate::application::presentation::Reply;

pub use discovery::HELP_ENTRIES;

// =============================================================================
// Commands
// =============================================================================

/// Every slash command the bot answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Latest price of one symbol.
    Price,
    /// Closing price chart of one symbol.
    Chart,
    /// Percent-change comparison of up to five symbols.
    Compare,
    /// Account balances.
    Account,
    /// Open positions.
    Positions,
    /// Market open/closed status.
    Market,
    /// Asset search.
    Search,
    /// Prices for a popular category.
    Popular,
    /// Category listing.
    Browse,
    /// Command listing.
    Help,
}

impl Command {
    /// All commands in registration order.
    pub const ALL: [Self; 10] = [
        Self::Price,
        Self::Chart,
        Self::Compare,
        Self::Account,
        Self::Positions,
        Self::Market,
        Self::Search,
        Self::Popular,
        Self::Browse,
        Self::Help,
    ];

    /// Slash command name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Price => "price",
            Self::Chart => "chart",
            Self::Compare => "compare",
            Self::Account => "account",
            Self::Positions => "positions",
            Self::Market => "market",
            Self::Search => "search",
            Self::Popular => "popular",
            Self::Browse => "browse",
            Self::Help => "help",
        }
    }

    /// What the command was doing, for failure replies.
    #[must_use]
    pub const fn failure_label(&self) -> &'static str {
        match self {
            Self::Price => "fetching price",
            Self::Chart => "generating chart",
            Self::Compare => "comparing stocks",
            Self::Account => "fetching account info",
            Self::Positions => "fetching positions",
            Self::Market => "fetching market status",
            Self::Search => "searching stocks",
            Self::Popular => "fetching popular stocks",
            Self::Browse => "browsing categories",
            Self::Help => "showing help",
        }
    }

    /// Whether the command calls a gateway and so should defer its reply.
    #[must_use]
    pub const fn defers(&self) -> bool {
        !matches!(self, Self::Browse | Self::Help)
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A command with its typed arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandRequest {
    /// `/price symbol`
    Price {
        /// Raw symbol argument.
        symbol: String,
    },
    /// `/chart symbol [days]`
    Chart {
        /// Raw symbol argument.
        symbol: String,
        /// Requested window, clamped by the handler.
        days: Option<i64>,
    },
    /// `/compare symbols [days]`
    Compare {
        /// Comma-separated symbols.
        symbols: String,
        /// Requested window, clamped by the handler.
        days: Option<i64>,
    },
    /// `/account`
    Account,
    /// `/positions`
    Positions,
    /// `/market`
    Market,
    /// `/search query`
    Search {
        /// Symbol or name fragment.
        query: String,
    },
    /// `/popular [category]`
    Popular {
        /// Category key, defaulting to tech.
        category: Option<String>,
    },
    /// `/browse`
    Browse,
    /// `/help`
    Help,
}

impl CommandRequest {
    /// The command this request invokes.
    #[must_use]
    pub const fn command(&self) -> Command {
        match self {
            Self::Price { .. } => Command::Price,
            Self::Chart { .. } => Command::Chart,
            Self::Compare { .. } => Command::Compare,
            Self::Account => Command::Account,
            Self::Positions => Command::Positions,
            Self::Market => Command::Market,
            Self::Search { .. } => Command::Search,
            Self::Popular { .. } => Command::Popular,
            Self::Browse => Command::Browse,
            Self::Help => Command::Help,
        }
    }
}

// =============================================================================
// Errors
// =============================================================================

/// Failure inside a command handler.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    /// Gateway credentials were not configured at startup.
    #[error("Alpaca client is not initialized")]
    GatewayUnavailable,

    /// A gateway call failed.
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// Chart rendering failed.
    #[error(transparent)]
    Chart(#[from] ChartError),
}

// =============================================================================
// Services
// =============================================================================

/// Shared, immutable dependencies of every command handler.
///
/// Gateways are optional: without credentials the bot still starts and
/// answers the static commands, while gateway commands fail through the
/// boundary with [`CommandError::GatewayUnavailable`].
#[derive(Clone)]
pub struct BotServices {
    market_data: Option<Arc<dyn MarketDataPort>>,
    brokerage: Option<Arc<dyn BrokeragePort>>,
    charts: Arc<dyn ChartRenderer>,
}

impl BotServices {
    /// Services with no gateways configured.
    #[must_use]
    pub fn new(charts: Arc<dyn ChartRenderer>) -> Self {
        Self {
            market_data: None,
            brokerage: None,
            charts,
        }
    }

    /// Attach the market data gateway.
    #[must_use]
    pub fn with_market_data(mut self, market_data: Arc<dyn MarketDataPort>) -> Self {
        self.market_data = Some(market_data);
        self
    }

    /// Attach the brokerage gateway.
    #[must_use]
    pub fn with_brokerage(mut self, brokerage: Arc<dyn BrokeragePort>) -> Self {
        self.brokerage = Some(brokerage);
        self
    }

    /// Whether both gateways are available.
    #[must_use]
    pub const fn is_gateway_configured(&self) -> bool {
        self.market_data.is_some() && self.brokerage.is_some()
    }

    fn market_data(&self) -> Result<&dyn MarketDataPort, CommandError> {
        self.market_data
            .as_deref()
            .ok_or(CommandError::GatewayUnavailable)
    }

    fn brokerage(&self) -> Result<&dyn BrokeragePort, CommandError> {
        self.brokerage
            .as_deref()
            .ok_or(CommandError::GatewayUnavailable)
    }

    /// Run one command inside its failure boundary.
    ///
    /// Never fails: handler errors are turned into a failure reply. The
    /// invocation runs in a span carrying the command name and a fresh
    /// invocation id.
    pub async fn dispatch(&self, request: CommandRequest) -> Reply {
        let command = request.command();
        let span = tracing::info_span!(
            "command",
            command = command.name(),
            invocation_id = %Uuid::new_v4(),
        );

        async move {
            tracing::debug!(?request, "Handling command");
            match self.handle(request).await {
                Ok(reply) => {
                    tracing::debug!(outcome = reply.outcome.as_str(), "Command completed");
                    reply
                }
                Err(error) => {
                    tracing::warn!(error = %error, "Command failed");
                    Reply::failure(format!("❌ Error {}: {error}", command.failure_label()))
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn handle(&self, request: CommandRequest) -> Result<Reply, CommandError> {
        match request {
            CommandRequest::Price { symbol } => self.price(&symbol).await,
            CommandRequest::Chart { symbol, days } => self.chart(&symbol, days).await,
            CommandRequest::Compare { symbols, days } => self.compare(&symbols, days).await,
            CommandRequest::Account => self.account().await,
            CommandRequest::Positions => self.positions().await,
            CommandRequest::Market => self.market().await,
            CommandRequest::Search { query } => self.search(&query).await,
            CommandRequest::Popular { category } => self.popular(category.as_deref()).await,
            CommandRequest::Browse => Ok(Self::browse()),
            CommandRequest::Help => Ok(Self::help()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_names_are_unique() {
        let mut names: Vec<_> = Command::ALL.iter().map(Command::name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), Command::ALL.len());
    }

    #[test]
    fn static_commands_do_not_defer() {
        assert!(!Command::Browse.defers());
        assert!(!Command::Help.defers());
        assert!(Command::Price.defers());
        assert!(Command::Popular.defers());
    }

    #[test]
    fn request_maps_to_command() {
        let request = CommandRequest::Compare {
            symbols: "AAPL".to_string(),
            days: None,
        };
        assert_eq!(request.command(), Command::Compare);
        assert_eq!(CommandRequest::Help.command().name(), "help");
    }

    #[test]
    fn error_text_is_user_facing() {
        assert_eq!(
            CommandError::GatewayUnavailable.to_string(),
            "Alpaca client is not initialized"
        );
        assert_eq!(
            CommandError::from(GatewayError::AuthenticationFailed).to_string(),
            "authentication failed"
        );
    }
}
