//! Brokerage Port (Driven Port)
//!
//! Read-only interface to the brokerage account: balances, positions, the
//! market clock and the tradable asset list.

use async_trait::async_trait;

use super::GatewayError;
use crate::domain::catalog::Asset;
use crate::domain::market::MarketClock;
use crate::domain::portfolio::{AccountSnapshot, Position};

/// Port for reading brokerage account state.
#[async_trait]
pub trait BrokeragePort: Send + Sync {
    /// Current account balances and flags.
    async fn get_account(&self) -> Result<AccountSnapshot, GatewayError>;

    /// All open positions.
    async fn get_positions(&self) -> Result<Vec<Position>, GatewayError>;

    /// Market open/closed status.
    async fn get_clock(&self) -> Result<MarketClock, GatewayError>;

    /// Active US equities.
    async fn get_assets(&self) -> Result<Vec<Asset>, GatewayError>;
}
