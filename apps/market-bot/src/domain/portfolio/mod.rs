//! Portfolio Types
//!
//! Read-only account and position snapshots with the P&L arithmetic the
//! account and positions commands display. Money stays in [`Decimal`] until
//! it is formatted.

use rust_decimal::Decimal;

/// Maximum number of positions listed individually.
pub const MAX_DISPLAYED_POSITIONS: usize = 10;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// `numerator / denominator * 100`, or zero when the denominator is zero.
#[must_use]
pub fn percent_of(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator.is_zero() {
        Decimal::ZERO
    } else {
        numerator / denominator * HUNDRED
    }
}

// =============================================================================
// Account
// =============================================================================

/// Paper or live account, derived from the account number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountKind {
    /// Simulated trading account.
    Paper,
    /// Real money account.
    Live,
}

impl AccountKind {
    /// Paper account numbers start with `P`.
    #[must_use]
    pub fn from_account_number(account_number: &str) -> Self {
        if account_number.starts_with('P') {
            Self::Paper
        } else {
            Self::Live
        }
    }

    /// Human readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Paper => "Paper Trading Account",
            Self::Live => "Live Trading Account",
        }
    }
}

/// Point-in-time account balances and flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountSnapshot {
    /// Broker account number.
    pub account_number: String,
    /// Account status as reported by the broker (e.g. `ACTIVE`).
    pub status: String,
    /// Current equity.
    pub equity: Decimal,
    /// Cash balance.
    pub cash: Decimal,
    /// Buying power.
    pub buying_power: Decimal,
    /// Current portfolio value.
    pub portfolio_value: Decimal,
    /// Equity at the previous close.
    pub last_equity: Decimal,
    /// Pattern day trader flag.
    pub pattern_day_trader: bool,
    /// Trading blocked flag.
    pub trading_blocked: bool,
}

impl AccountSnapshot {
    /// Today's P&L: portfolio value minus last equity.
    #[must_use]
    pub fn daily_change(&self) -> Decimal {
        self.portfolio_value - self.last_equity
    }

    /// Today's P&L as a percentage of last equity.
    #[must_use]
    pub fn daily_change_percent(&self) -> Decimal {
        percent_of(self.daily_change(), self.last_equity)
    }

    /// Paper or live.
    #[must_use]
    pub fn kind(&self) -> AccountKind {
        AccountKind::from_account_number(&self.account_number)
    }
}

// =============================================================================
// Positions
// =============================================================================

/// One open position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    /// Ticker symbol.
    pub symbol: String,
    /// Quantity held (negative for shorts).
    pub qty: Decimal,
    /// Latest price.
    pub current_price: Decimal,
    /// Market value of the position.
    pub market_value: Decimal,
    /// Unrealized P&L.
    pub unrealized_pl: Decimal,
    /// Unrealized P&L as a fraction (0.05 = 5%).
    pub unrealized_plpc: Decimal,
}

impl Position {
    /// Unrealized P&L in percent.
    #[must_use]
    pub fn unrealized_pl_percent(&self) -> Decimal {
        self.unrealized_plpc * HUNDRED
    }
}

/// Totals across every open position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortfolioRollup {
    /// Number of positions.
    pub count: usize,
    /// Sum of market values.
    pub total_value: Decimal,
    /// Sum of unrealized P&L.
    pub total_pl: Decimal,
}

impl PortfolioRollup {
    /// Sum all positions, not only the displayed ones.
    #[must_use]
    pub fn from_positions(positions: &[Position]) -> Self {
        let (total_value, total_pl) = positions
            .iter()
            .fold((Decimal::ZERO, Decimal::ZERO), |(value, pl), p| {
                (value + p.market_value, pl + p.unrealized_pl)
            });

        Self {
            count: positions.len(),
            total_value,
            total_pl,
        }
    }

    /// Value paid for the positions: market value minus unrealized P&L.
    #[must_use]
    pub fn cost_basis(&self) -> Decimal {
        self.total_value - self.total_pl
    }

    /// Total P&L as a percentage of cost basis.
    #[must_use]
    pub fn total_pl_percent(&self) -> Decimal {
        percent_of(self.total_pl, self.cost_basis())
    }

    /// Positions left out of the display.
    #[must_use]
    pub const fn hidden_count(&self) -> usize {
        self.count.saturating_sub(MAX_DISPLAYED_POSITIONS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(portfolio_value: Decimal, last_equity: Decimal) -> AccountSnapshot {
        AccountSnapshot {
            account_number: "PA123456".to_string(),
            status: "ACTIVE".to_string(),
            equity: portfolio_value,
            cash: Decimal::new(1000, 0),
            buying_power: Decimal::new(2000, 0),
            portfolio_value,
            last_equity,
            pattern_day_trader: false,
            trading_blocked: false,
        }
    }

    fn position(symbol: &str, market_value: i64, unrealized_pl: i64) -> Position {
        Position {
            symbol: symbol.to_string(),
            qty: Decimal::new(10, 0),
            current_price: Decimal::new(market_value, 0) / Decimal::new(10, 0),
            market_value: Decimal::new(market_value, 0),
            unrealized_pl: Decimal::new(unrealized_pl, 0),
            unrealized_plpc: Decimal::new(1, 1),
        }
    }

    #[test]
    fn daily_change_against_last_equity() {
        let snapshot = account(Decimal::new(10_500, 0), Decimal::new(10_000, 0));
        assert_eq!(snapshot.daily_change(), Decimal::new(500, 0));
        assert_eq!(snapshot.daily_change_percent(), Decimal::new(5, 0));
    }

    #[test]
    fn daily_change_percent_zero_when_no_last_equity() {
        let snapshot = account(Decimal::new(250, 0), Decimal::ZERO);
        assert_eq!(snapshot.daily_change(), Decimal::new(250, 0));
        assert_eq!(snapshot.daily_change_percent(), Decimal::ZERO);
    }

    #[test]
    fn account_kind_by_prefix() {
        assert_eq!(AccountKind::from_account_number("PA3X"), AccountKind::Paper);
        assert_eq!(AccountKind::from_account_number("123456"), AccountKind::Live);
        assert_eq!(AccountKind::from_account_number(""), AccountKind::Live);
        assert_eq!(AccountKind::Paper.label(), "Paper Trading Account");
    }

    #[test]
    fn rollup_covers_all_positions() {
        let positions: Vec<Position> = (0..12)
            .map(|i| position(&format!("S{i}"), 1_100, 100))
            .collect();
        let rollup = PortfolioRollup::from_positions(&positions);

        assert_eq!(rollup.count, 12);
        assert_eq!(rollup.total_value, Decimal::new(13_200, 0));
        assert_eq!(rollup.total_pl, Decimal::new(1_200, 0));
        assert_eq!(rollup.total_pl_percent(), Decimal::new(10, 0));
        assert_eq!(rollup.hidden_count(), 2);
    }

    #[test]
    fn rollup_percent_zero_when_cost_basis_zero() {
        let rollup = PortfolioRollup::from_positions(&[position("X", 50, 50)]);
        assert_eq!(rollup.cost_basis(), Decimal::ZERO);
        assert_eq!(rollup.total_pl_percent(), Decimal::ZERO);
    }

    #[test]
    fn empty_rollup() {
        let rollup = PortfolioRollup::from_positions(&[]);
        assert_eq!(rollup.count, 0);
        assert_eq!(rollup.total_value, Decimal::ZERO);
        assert_eq!(rollup.hidden_count(), 0);
    }

    #[test]
    fn position_percent_scales_fraction() {
        assert_eq!(position("A", 100, 10).unrealized_pl_percent(), Decimal::new(10, 0));
    }
}
