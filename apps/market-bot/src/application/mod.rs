//! Application Layer - Command handlers and port definitions.
//!
//! This layer turns slash command arguments into gateway calls and the
//! gateway results into platform-neutral replies. It knows nothing about
//! Discord, HTTP or image encoding.

/// Port interfaces for the market data, brokerage and chart adapters.
pub mod ports;

/// Platform-neutral reply model and number formatting.
pub mod presentation;

/// Command dispatcher and per-command handlers.
pub mod commands;
