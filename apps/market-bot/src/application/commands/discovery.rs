//! Discovery handlers: `/search`, `/popular`, `/browse`, `/help`.

use chrono::Utc;

use super::{BotServices, CommandError};
use crate::application::ports::BarsRequest;
use crate::application::presentation::format::{self, QUERY_ECHO_CHARS, direction_emoji};
use crate::application::presentation::{Embed, EmbedColor, Reply};
use crate::domain::catalog::{
    CATEGORIES, DEFAULT_CATEGORY, SEARCH_RESULT_LIMIT, category_keys, find_category,
    search_assets,
};

/// `/help` entries: usage line and description.
pub const HELP_ENTRIES: [(&str, &str); 10] = [
    (
        "🔍 /search <query>",
        "Search for stocks by symbol or name\nExample: `/search Apple` or `/search TSLA`",
    ),
    ("📂 /browse", "Browse all available stock categories"),
    (
        "⭐ /popular [category]",
        "View popular stocks by category\nExample: `/popular tech` or `/popular finance`",
    ),
    (
        "📈 /price <symbol>",
        "Get the latest price of a stock\nExample: `/price AAPL`",
    ),
    (
        "📊 /chart <symbol> [days]",
        "Display a stock price chart\nExample: `/chart TSLA 60`",
    ),
    (
        "📊 /compare <symbols> [days]",
        "Compare multiple stocks\nExample: `/compare AAPL,TSLA,MSFT 30`",
    ),
    ("💼 /account", "View your Alpaca account information"),
    ("📊 /positions", "View your current stock positions"),
    ("🏦 /market", "Check if the stock market is open"),
    ("📚 /help", "Show this help message"),
];

fn invalid_category() -> Reply {
    let available = category_keys()
        .map(|key| format!("`{key}`"))
        .collect::<Vec<_>>()
        .join(", ");
    Reply::notice(format!(
        "❌ Invalid category. Available categories:\n{available}\n\nExample: `/popular {DEFAULT_CATEGORY}`"
    ))
}

impl BotServices {
    pub(super) async fn search(&self, query: &str) -> Result<Reply, CommandError> {
        let query = query.trim().to_uppercase();
        if query.is_empty() {
            return Ok(Reply::notice(
                "❌ Please provide a search query. Example: `/search Apple`",
            ));
        }

        let assets = self.brokerage()?.get_assets().await?;
        let matches = search_assets(&assets, &query, SEARCH_RESULT_LIMIT);
        tracing::debug!(%query, listed = assets.len(), matched = matches.len(), "Searched assets");
        let echoed = format::echo(&query, QUERY_ECHO_CHARS);
        if matches.is_empty() {
            return Ok(Reply::notice(format!("❌ No stocks found matching: `{echoed}`")));
        }

        let plural = if matches.len() == 1 { "" } else { "s" };
        let mut embed = Embed::new(format!("🔍 Search Results for '{echoed}'"), EmbedColor::Blue)
            .description(format!("Top {} stock{plural}", matches.len()));
        for asset in &matches {
            let tradable = if asset.tradable { "✅" } else { "❌" };
            let fractionable = if asset.fractionable { " 🔸" } else { "" };
            embed = embed.field(
                asset.symbol.clone(),
                format!(
                    "**Name:** {}\n**Exchange:** {}\n**Tradeable:** {tradable}{fractionable}",
                    asset.name, asset.exchange
                ),
                true,
            );
        }

        let footer = if matches.len() == SEARCH_RESULT_LIMIT {
            format!("Showing top {SEARCH_RESULT_LIMIT} results\n🔸 fractionable asset")
        } else {
            "Use /price <symbol> to check any stock".to_string()
        };

        Ok(Reply::embed(embed.footer(footer).timestamp(Utc::now())))
    }

    pub(super) async fn popular(&self, category: Option<&str>) -> Result<Reply, CommandError> {
        let Some(category) = find_category(category.unwrap_or(DEFAULT_CATEGORY)) else {
            return Ok(invalid_category());
        };

        let now = Utc::now();
        let symbols: Vec<String> = category.symbols.iter().map(ToString::to_string).collect();
        let bars = self
            .market_data()?
            .get_bars(BarsRequest::last_day_minutes(symbols, now))
            .await?;

        let mut embed = Embed::new(
            format!("⭐ Popular Stocks: {}", category.name),
            EmbedColor::Gold,
        )
        .description(format!(
            "Top {} stocks in {}",
            category.symbols.len(),
            category.name.to_lowercase()
        ));
        for symbol in category.symbols {
            let value = bars.latest(symbol).map_or_else(
                || "*Data unavailable*".to_string(),
                |bar| {
                    let change = bar.change();
                    format!(
                        "**Price:** {}\n**Change:** {} {}",
                        format::price(bar.close),
                        direction_emoji(change.is_gain()),
                        format::signed_percent(change.percent)
                    )
                },
            );
            embed = embed.field(*symbol, value, true);
        }

        let embed = embed
            .footer(format!(
                "Use /price <symbol> for detailed info • Category: {}",
                category.key
            ))
            .timestamp(now);

        Ok(Reply::embed(embed))
    }

    pub(super) fn browse() -> Reply {
        let mut embed = Embed::new("📂 Browse Stock Categories", EmbedColor::Purple)
            .description("Choose a category to explore popular stocks");
        for category in &CATEGORIES {
            embed = embed.field(
                format!("{} {}", category.emoji, category.label),
                format!("`/popular {}`\n{}", category.key, category.blurb),
                false,
            );
        }

        Reply::embed(
            embed
                .footer("Or use /search <query> to find specific stocks")
                .timestamp(Utc::now()),
        )
    }

    pub(super) fn help() -> Reply {
        let mut embed = Embed::new("📚 Stock Market Bot Commands", EmbedColor::Blue)
            .description("Track stocks and manage your portfolio with Alpaca API");
        for (usage, description) in HELP_ENTRIES {
            embed = embed.field(usage, description, false);
        }

        Reply::embed(embed.footer("Powered by Alpaca API").timestamp(Utc::now()))
    }
}
