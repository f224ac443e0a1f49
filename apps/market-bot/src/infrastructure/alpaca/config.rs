//! Alpaca gateway configuration.

use std::time::Duration;

use crate::infrastructure::config::{AlpacaSettings, Credentials, DataFeed, Environment};

/// Paper trading API.
pub const PAPER_TRADING_URL: &str = "https://paper-api.alpaca.markets";
/// Live trading API.
pub const LIVE_TRADING_URL: &str = "https://api.alpaca.markets";
/// Market data API, shared by paper and live accounts.
pub const DATA_URL: &str = "https://data.alpaca.markets";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the Alpaca gateway.
#[derive(Debug, Clone)]
pub struct AlpacaConfig {
    /// API credentials.
    pub credentials: Credentials,
    /// Trading environment.
    pub environment: Environment,
    /// Bars feed; the API default applies when unset.
    pub feed: Option<DataFeed>,
    /// HTTP request timeout.
    pub timeout: Duration,
    /// Trading API base URL.
    pub trading_base_url: String,
    /// Market data API base URL.
    pub data_base_url: String,
}

impl AlpacaConfig {
    /// Create a new configuration with the environment's default URLs.
    #[must_use]
    pub fn new(credentials: Credentials, environment: Environment) -> Self {
        let trading_base_url = if environment.is_live() {
            LIVE_TRADING_URL
        } else {
            PAPER_TRADING_URL
        };

        Self {
            credentials,
            environment,
            feed: None,
            timeout: DEFAULT_TIMEOUT,
            trading_base_url: trading_base_url.to_string(),
            data_base_url: DATA_URL.to_string(),
        }
    }

    /// Build from loaded settings.
    #[must_use]
    pub fn from_settings(settings: &AlpacaSettings) -> Self {
        let config = Self::new(settings.credentials.clone(), settings.environment)
            .with_timeout(settings.timeout);
        match settings.feed {
            Some(feed) => config.with_feed(feed),
            None => config,
        }
    }

    /// Set the HTTP timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Request bars from a specific feed.
    #[must_use]
    pub const fn with_feed(mut self, feed: DataFeed) -> Self {
        self.feed = Some(feed);
        self
    }

    /// Point both APIs somewhere else (e.g. a local stub server).
    #[must_use]
    pub fn with_base_urls(mut self, trading: impl Into<String>, data: impl Into<String>) -> Self {
        self.trading_base_url = trading.into();
        self.data_base_url = data.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials() -> Credentials {
        Credentials::new("key".to_string(), "secret".to_string())
    }

    #[test]
    fn paper_environment_urls() {
        let config = AlpacaConfig::new(credentials(), Environment::Paper);
        assert!(config.trading_base_url.contains("paper"));
        assert!(config.data_base_url.contains("data.alpaca"));
    }

    #[test]
    fn live_environment_urls() {
        let config = AlpacaConfig::new(credentials(), Environment::Live);
        assert!(!config.trading_base_url.contains("paper"));
    }

    #[test]
    fn from_settings_carries_feed_and_timeout() {
        let settings = AlpacaSettings {
            credentials: credentials(),
            environment: Environment::Paper,
            feed: Some(DataFeed::Sip),
            timeout: Duration::from_secs(7),
        };
        let config = AlpacaConfig::from_settings(&settings);
        assert_eq!(config.feed, Some(DataFeed::Sip));
        assert_eq!(config.timeout, Duration::from_secs(7));
    }

    #[test]
    fn base_url_override() {
        let config = AlpacaConfig::new(credentials(), Environment::Paper)
            .with_base_urls("http://127.0.0.1:1", "http://127.0.0.1:2");
        assert_eq!(config.trading_base_url, "http://127.0.0.1:1");
        assert_eq!(config.data_base_url, "http://127.0.0.1:2");
    }
}
