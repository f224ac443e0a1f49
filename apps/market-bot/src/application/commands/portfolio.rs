//! Account handlers: `/account`, `/positions`, `/market`.

use chrono::Utc;
use rust_decimal::Decimal;

use super::{BotServices, CommandError};
use crate::application::presentation::format::{self, direction_emoji, yes_no};
use crate::application::presentation::{Embed, EmbedColor, Reply};
use crate::domain::portfolio::{MAX_DISPLAYED_POSITIONS, PortfolioRollup, Position};

const CLOCK_FORMAT: &str = "%Y-%m-%d %H:%M:%S %Z";

fn position_summary(position: &Position) -> String {
    format!(
        "**Quantity:** {}\n**Current Price:** {}\n**Market Value:** {}\n**P&L:** {} {} ({})",
        position.qty.normalize(),
        format::price(position.current_price),
        format::money(position.market_value),
        direction_emoji(position.unrealized_pl >= Decimal::ZERO),
        format::signed_money(position.unrealized_pl),
        format::signed_percent(position.unrealized_pl_percent()),
    )
}

impl BotServices {
    pub(super) async fn account(&self) -> Result<Reply, CommandError> {
        let account = self.brokerage()?.get_account().await?;
        let daily_change = account.daily_change();

        let embed = Embed::new("💼 Account Information", EmbedColor::Blue)
            .field("Equity", format::money(account.equity), true)
            .field("Cash", format::money(account.cash), true)
            .field("Buying Power", format::money(account.buying_power), true)
            .field(
                "Today's P&L",
                format!(
                    "{} {} ({})",
                    direction_emoji(daily_change >= Decimal::ZERO),
                    format::signed_money(daily_change),
                    format::signed_percent(account.daily_change_percent())
                ),
                false,
            )
            .field("Account Status", account.status.clone(), true)
            .field("Pattern Day Trader", yes_no(account.pattern_day_trader), true)
            .field("Trading Blocked", yes_no(account.trading_blocked), true)
            .footer(account.kind().label())
            .timestamp(Utc::now());

        Ok(Reply::embed(embed))
    }

    pub(super) async fn positions(&self) -> Result<Reply, CommandError> {
        let positions = self.brokerage()?.get_positions().await?;
        if positions.is_empty() {
            return Ok(Reply::notice("📭 You don't have any open positions."));
        }

        let rollup = PortfolioRollup::from_positions(&positions);
        let mut embed = Embed::new("📊 Current Positions", EmbedColor::Gold);
        for position in positions.iter().take(MAX_DISPLAYED_POSITIONS) {
            embed = embed.field(position.symbol.clone(), position_summary(position), true);
        }
        if rollup.hidden_count() > 0 {
            embed = embed.field(
                "...",
                format!("*And {} more positions*", rollup.hidden_count()),
                false,
            );
        }
        let embed = embed
            .field(
                "📊 Total",
                format!(
                    "**Value:** {}\n**P&L:** {} ({})",
                    format::money(rollup.total_value),
                    format::signed_money(rollup.total_pl),
                    format::signed_percent(rollup.total_pl_percent())
                ),
                false,
            )
            .timestamp(Utc::now());

        Ok(Reply::embed(embed))
    }

    pub(super) async fn market(&self) -> Result<Reply, CommandError> {
        let clock = self.brokerage()?.get_clock().await?;
        let status = if clock.is_open { "🟢 OPEN" } else { "🔴 CLOSED" };

        let embed = Embed::new("🏦 Market Status", EmbedColor::for_direction(clock.is_open))
            .field("Status", status, false)
            .field("Current Time", clock.timestamp.format(CLOCK_FORMAT).to_string(), true)
            .field("Next Open", clock.next_open.format(CLOCK_FORMAT).to_string(), true)
            .field("Next Close", clock.next_close.format(CLOCK_FORMAT).to_string(), true)
            .timestamp(Utc::now());

        Ok(Reply::embed(embed))
    }
}
