//! Bot Configuration Settings
//!
//! Configuration types for the bot, loaded from environment variables.
//!
//! Only `DISCORD_TOKEN` is required. Without both Alpaca keys the bot starts
//! in degraded mode: static commands work and gateway commands report that
//! the client is not initialized.

use std::str::FromStr;
use std::time::Duration;

/// Market data feed for historical bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DataFeed {
    /// IEX (Investors Exchange) - Free tier with limited data.
    #[default]
    Iex,
    /// SIP (Securities Information Processor) - Full market data.
    Sip,
}

impl DataFeed {
    /// Parse feed type from string.
    #[must_use]
    pub fn from_str_case_insensitive(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "sip" => Self::Sip,
            _ => Self::Iex,
        }
    }

    /// Feed name as sent in the `feed` query parameter.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Sip => "sip",
            Self::Iex => "iex",
        }
    }
}

/// Trading environment (paper vs live).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    /// Paper trading environment (simulated).
    #[default]
    Paper,
    /// Live trading environment (real money).
    Live,
}

impl Environment {
    /// Parse environment from string.
    #[must_use]
    pub fn from_str_case_insensitive(s: &str) -> Self {
        match s.to_uppercase().as_str() {
            "LIVE" => Self::Live,
            _ => Self::Paper,
        }
    }

    /// Check if this is the live environment.
    #[must_use]
    pub const fn is_live(&self) -> bool {
        matches!(self, Self::Live)
    }

    /// Get the environment name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Paper => "paper",
            Self::Live => "live",
        }
    }
}

/// Alpaca API credentials.
#[derive(Clone)]
pub struct Credentials {
    api_key: String,
    api_secret: String,
}

impl Credentials {
    /// Create new credentials.
    #[must_use]
    pub const fn new(api_key: String, api_secret: String) -> Self {
        Self {
            api_key,
            api_secret,
        }
    }

    /// Get the API key.
    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Get the API secret.
    #[must_use]
    pub fn api_secret(&self) -> &str {
        &self.api_secret
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"[REDACTED]")
            .field("api_secret", &"[REDACTED]")
            .finish()
    }
}

/// Discord connection settings.
#[derive(Clone)]
pub struct DiscordSettings {
    /// Bot token.
    pub token: String,
    /// Guild for instant command registration; global registration when unset.
    pub guild_id: Option<u64>,
}

impl std::fmt::Debug for DiscordSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscordSettings")
            .field("token", &"[REDACTED]")
            .field("guild_id", &self.guild_id)
            .finish()
    }
}

/// Alpaca gateway settings. Present only when both keys are set.
#[derive(Debug, Clone)]
pub struct AlpacaSettings {
    /// API credentials.
    pub credentials: Credentials,
    /// Trading environment.
    pub environment: Environment,
    /// Bars feed; the API default applies when unset.
    pub feed: Option<DataFeed>,
    /// HTTP request timeout.
    pub timeout: Duration,
}

/// Server port settings.
#[derive(Debug, Clone)]
pub struct ServerSettings {
    /// Health check HTTP port (0 = disabled).
    pub health_port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self { health_port: 8083 }
    }
}

/// Complete bot configuration.
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Discord settings.
    pub discord: DiscordSettings,
    /// Alpaca settings, `None` in degraded mode.
    pub alpaca: Option<AlpacaSettings>,
    /// Server port settings.
    pub server: ServerSettings,
}

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

impl BotConfig {
    /// Create configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `DISCORD_TOKEN` is missing or a value is malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if `DISCORD_TOKEN` is missing or a value is malformed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = lookup("DISCORD_TOKEN")
            .ok_or_else(|| ConfigError::MissingEnvVar("DISCORD_TOKEN".to_string()))?;
        if token.trim().is_empty() {
            return Err(ConfigError::EmptyValue("DISCORD_TOKEN".to_string()));
        }

        let guild_id = match non_empty(&lookup, "GUILD_ID") {
            Some(raw) => Some(parse_value::<u64>("GUILD_ID", &raw)?),
            None => None,
        };

        let alpaca = match (
            non_empty(&lookup, "ALPACA_API_KEY"),
            non_empty(&lookup, "ALPACA_SECRET_KEY"),
        ) {
            (Some(api_key), Some(api_secret)) => Some(AlpacaSettings {
                credentials: Credentials::new(api_key, api_secret),
                environment: non_empty(&lookup, "ALPACA_ENV")
                    .map(|s| Environment::from_str_case_insensitive(&s))
                    .unwrap_or_default(),
                feed: non_empty(&lookup, "ALPACA_FEED")
                    .map(|s| DataFeed::from_str_case_insensitive(&s)),
                timeout: non_empty(&lookup, "ALPACA_TIMEOUT_SECS")
                    .map(|raw| parse_value::<u64>("ALPACA_TIMEOUT_SECS", &raw))
                    .transpose()?
                    .map_or(DEFAULT_TIMEOUT, Duration::from_secs),
            }),
            (None, None) => None,
            (Some(_), None) | (None, Some(_)) => {
                tracing::warn!(
                    "Only one of ALPACA_API_KEY / ALPACA_SECRET_KEY is set; Alpaca commands are disabled"
                );
                None
            }
        };

        let server = ServerSettings {
            health_port: non_empty(&lookup, "BOT_HEALTH_PORT")
                .map(|raw| parse_value::<u16>("BOT_HEALTH_PORT", &raw))
                .transpose()?
                .unwrap_or(ServerSettings::default().health_port),
        };

        Ok(Self {
            discord: DiscordSettings {
                token: token.trim().to_string(),
                guild_id,
            },
            alpaca,
            server,
        })
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Required environment variable is missing.
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    /// Environment variable has empty value.
    #[error("environment variable {0} cannot be empty")]
    EmptyValue(String),
    /// Environment variable could not be parsed.
    #[error("environment variable {key} has invalid value: {value}")]
    InvalidValue {
        /// Variable name.
        key: String,
        /// Offending value.
        value: String,
    },
}

fn non_empty<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_value<T: FromStr>(key: &str, raw: &str) -> Result<T, ConfigError> {
    raw.parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<BotConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        BotConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn data_feed_parsing() {
        assert_eq!(DataFeed::from_str_case_insensitive("sip"), DataFeed::Sip);
        assert_eq!(DataFeed::from_str_case_insensitive("SIP"), DataFeed::Sip);
        assert_eq!(DataFeed::from_str_case_insensitive("iex"), DataFeed::Iex);
        assert_eq!(DataFeed::from_str_case_insensitive("unknown"), DataFeed::Iex);
    }

    #[test]
    fn environment_parsing() {
        assert_eq!(
            Environment::from_str_case_insensitive("LIVE"),
            Environment::Live
        );
        assert_eq!(
            Environment::from_str_case_insensitive("paper"),
            Environment::Paper
        );
        assert_eq!(
            Environment::from_str_case_insensitive("unknown"),
            Environment::Paper
        );
        assert!(Environment::Live.is_live());
    }

    #[test]
    fn credentials_redacted_debug() {
        let creds = Credentials::new("key123".to_string(), "secret456".to_string());
        let debug = format!("{creds:?}");
        assert!(!debug.contains("key123"));
        assert!(!debug.contains("secret456"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn discord_token_redacted_debug() {
        let config = config_from(&[("DISCORD_TOKEN", "tok-abc")]).unwrap();
        assert!(!format!("{config:?}").contains("tok-abc"));
    }

    #[test]
    fn token_is_required() {
        assert!(matches!(
            config_from(&[]),
            Err(ConfigError::MissingEnvVar(key)) if key == "DISCORD_TOKEN"
        ));
        assert!(matches!(
            config_from(&[("DISCORD_TOKEN", "  ")]),
            Err(ConfigError::EmptyValue(_))
        ));
    }

    #[test]
    fn missing_keys_mean_degraded_mode() {
        let config = config_from(&[("DISCORD_TOKEN", "t")]).unwrap();
        assert!(config.alpaca.is_none());
        assert!(config.discord.guild_id.is_none());
        assert_eq!(config.server.health_port, 8083);

        let half = config_from(&[("DISCORD_TOKEN", "t"), ("ALPACA_API_KEY", "k")]).unwrap();
        assert!(half.alpaca.is_none());
    }

    #[test]
    fn full_configuration() {
        let config = config_from(&[
            ("DISCORD_TOKEN", "t"),
            ("GUILD_ID", "123456789012345678"),
            ("ALPACA_API_KEY", "k"),
            ("ALPACA_SECRET_KEY", "s"),
            ("ALPACA_ENV", "live"),
            ("ALPACA_FEED", "sip"),
            ("ALPACA_TIMEOUT_SECS", "5"),
            ("BOT_HEALTH_PORT", "0"),
        ])
        .unwrap();

        assert_eq!(config.discord.guild_id, Some(123_456_789_012_345_678));
        let alpaca = config.alpaca.unwrap();
        assert_eq!(alpaca.credentials.api_key(), "k");
        assert_eq!(alpaca.environment, Environment::Live);
        assert_eq!(alpaca.feed, Some(DataFeed::Sip));
        assert_eq!(alpaca.timeout, Duration::from_secs(5));
        assert_eq!(config.server.health_port, 0);
    }

    #[test]
    fn malformed_values_are_rejected() {
        assert!(matches!(
            config_from(&[("DISCORD_TOKEN", "t"), ("GUILD_ID", "general")]),
            Err(ConfigError::InvalidValue { key, .. }) if key == "GUILD_ID"
        ));
        assert!(matches!(
            config_from(&[("DISCORD_TOKEN", "t"), ("BOT_HEALTH_PORT", "99999")]),
            Err(ConfigError::InvalidValue { .. })
        ));
    }
}
