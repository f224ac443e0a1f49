//! Slash command definitions.
//!
//! Doc comments on the command functions become the descriptions shown in
//! Discord's command picker.

use std::time::Instant;

use super::{Context, Data, Error, create_reply};
use crate::application::commands::CommandRequest;
use crate::infrastructure::metrics::record_command;

/// Every command, in registration order.
#[must_use]
pub fn all_commands() -> Vec<poise::Command<Data, Error>> {
    vec![
        price(),
        chart(),
        compare(),
        account(),
        positions(),
        market(),
        search(),
        popular(),
        browse(),
        help(),
    ]
}

/// Defer if needed, dispatch, record, reply.
async fn respond(ctx: Context<'_>, request: CommandRequest) -> Result<(), Error> {
    let command = request.command();
    let started = Instant::now();

    if command.defers() {
        ctx.defer().await?;
    }

    let reply = ctx.data().services.dispatch(request).await;
    record_command(command, reply.outcome, started.elapsed());

    ctx.send(create_reply(reply)).await?;
    Ok(())
}

/// Get the current price of a stock
#[poise::command(slash_command)]
pub async fn price(
    ctx: Context<'_>,
    #[description = "Stock symbol (e.g., AAPL, TSLA)"]
    #[max_length = 32]
    symbol: String,
) -> Result<(), Error> {
    respond(ctx, CommandRequest::Price { symbol }).await
}

/// Generate a price chart for a stock
#[poise::command(slash_command)]
pub async fn chart(
    ctx: Context<'_>,
    #[description = "Stock symbol (e.g., AAPL, TSLA)"]
    #[max_length = 32]
    symbol: String,
    #[description = "Number of days (1-365, default 30)"] days: Option<i64>,
) -> Result<(), Error> {
    respond(ctx, CommandRequest::Chart { symbol, days }).await
}

/// Compare multiple stocks on one chart
#[poise::command(slash_command)]
pub async fn compare(
    ctx: Context<'_>,
    #[description = "Comma-separated symbols (e.g., AAPL,TSLA,MSFT)"]
    #[max_length = 100]
    symbols: String,
    #[description = "Number of days (1-365, default 30)"] days: Option<i64>,
) -> Result<(), Error> {
    respond(ctx, CommandRequest::Compare { symbols, days }).await
}

/// Show your Alpaca account information
#[poise::command(slash_command)]
pub async fn account(ctx: Context<'_>) -> Result<(), Error> {
    respond(ctx, CommandRequest::Account).await
}

/// Show your current positions
#[poise::command(slash_command)]
pub async fn positions(ctx: Context<'_>) -> Result<(), Error> {
    respond(ctx, CommandRequest::Positions).await
}

/// Check if the market is open
#[poise::command(slash_command)]
pub async fn market(ctx: Context<'_>) -> Result<(), Error> {
    respond(ctx, CommandRequest::Market).await
}

/// Search for stocks by symbol or company name
#[poise::command(slash_command)]
pub async fn search(
    ctx: Context<'_>,
    #[description = "Symbol or company name (e.g., apple, AAPL)"]
    #[max_length = 100]
    query: String,
) -> Result<(), Error> {
    respond(ctx, CommandRequest::Search { query }).await
}

/// Show popular stocks in a category
#[poise::command(slash_command)]
pub async fn popular(
    ctx: Context<'_>,
    #[description = "Category: tech, finance, healthcare, consumer, energy, entertainment, automotive, airlines"]
    #[max_length = 100]
    category: Option<String>,
) -> Result<(), Error> {
    respond(ctx, CommandRequest::Popular { category }).await
}

/// Browse stock categories
#[poise::command(slash_command)]
pub async fn browse(ctx: Context<'_>) -> Result<(), Error> {
    respond(ctx, CommandRequest::Browse).await
}

/// Show all available commands
#[poise::command(slash_command)]
pub async fn help(ctx: Context<'_>) -> Result<(), Error> {
    respond(ctx, CommandRequest::Help).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::commands::Command;

    #[test]
    fn registers_every_command_in_order() {
        let names: Vec<String> = all_commands().into_iter().map(|c| c.name).collect();
        let expected: Vec<&str> = Command::ALL.iter().map(Command::name).collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn every_command_is_a_described_slash_command() {
        for command in all_commands() {
            assert!(command.slash_action.is_some(), "{}", command.name);
            let description = command.description.unwrap_or_default();
            assert!(!description.is_empty(), "{}", command.name);
            assert!(description.len() <= 100, "{}", command.name);
        }
    }

    #[test]
    fn text_options_are_length_limited() {
        let mut limits = Vec::new();
        for command in all_commands() {
            for parameter in &command.parameters {
                let Some(option) = parameter.create_as_slash_command_option() else {
                    continue;
                };
                let json = serde_json::to_value(&option).unwrap();
                if json["type"] == 3 {
                    limits.push((
                        command.name.clone(),
                        parameter.name.clone(),
                        json["max_length"].clone(),
                    ));
                }
            }
        }
        let limits: Vec<(&str, &str, Option<u64>)> = limits
            .iter()
            .map(|(command, parameter, max)| (command.as_str(), parameter.as_str(), max.as_u64()))
            .collect();
        assert_eq!(
            limits,
            [
                ("price", "symbol", Some(32)),
                ("chart", "symbol", Some(32)),
                ("compare", "symbols", Some(100)),
                ("search", "query", Some(100)),
                ("popular", "category", Some(100)),
            ]
        );
    }
}
