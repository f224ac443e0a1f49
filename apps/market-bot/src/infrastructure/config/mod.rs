//! Configuration Module
//!
//! Configuration loading for the bot process.

mod settings;

pub use settings::{
    AlpacaSettings, BotConfig, ConfigError, Credentials, DataFeed, DiscordSettings, Environment,
    ServerSettings,
};
