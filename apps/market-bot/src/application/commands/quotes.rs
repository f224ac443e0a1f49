//! Quote and chart handlers: `/price`, `/chart`, `/compare`.

use chrono::Utc;

use super::{BotServices, CommandError};
use crate::application::ports::{
    BarsRequest, ChartError, ComparisonChart, ComparisonSeries, PriceChart, SeriesColor,
};
use crate::application::presentation::format::{self, SYMBOL_ECHO_CHARS, direction_emoji};
use crate::application::presentation::{Embed, EmbedColor, Reply};
use crate::domain::market::{
    DEFAULT_DAYS, MAX_COMPARE_SYMBOLS, SeriesSummary, clamp_days, normalize_symbol,
    normalize_to_percent, padded_range, parse_symbol_list,
};

const COMPARISON_FILENAME: &str = "comparison_chart.png";

fn symbol_not_found(symbol: &str) -> Reply {
    Reply::notice(format!(
        "❌ Could not find data for symbol: {}",
        format::echo(symbol, SYMBOL_ECHO_CHARS)
    ))
}

fn echo_list(symbols: &[impl AsRef<str>]) -> String {
    symbols
        .iter()
        .map(|symbol| format::echo(symbol.as_ref(), SYMBOL_ECHO_CHARS))
        .collect::<Vec<_>>()
        .join(", ")
}

fn missing_symbol() -> Reply {
    Reply::notice("❌ Please provide a stock symbol. Example: `/price AAPL`")
}

impl BotServices {
    pub(super) async fn price(&self, symbol: &str) -> Result<Reply, CommandError> {
        let symbol = normalize_symbol(symbol);
        if symbol.is_empty() {
            return Ok(missing_symbol());
        }

        let now = Utc::now();
        let bars = self
            .market_data()?
            .get_bars(BarsRequest::last_day_minutes(vec![symbol.clone()], now))
            .await?;

        let Some(bar) = bars.latest(&symbol) else {
            return Ok(symbol_not_found(&symbol));
        };
        let title = format::echo(&symbol, SYMBOL_ECHO_CHARS);

        let change = bar.change();
        let embed = Embed::new(
            format!("📈 {title} Stock Price"),
            EmbedColor::for_direction(bar.close >= bar.open),
        )
        .field("Price", format::price(bar.close), true)
        .field("Open", format::price(bar.open), true)
        .field("High", format::price(bar.high), true)
        .field("Low", format::price(bar.low), true)
        .field("Volume", format::volume(bar.volume), true)
        .field(
            "Change",
            format!(
                "{} {} ({})",
                direction_emoji(change.is_gain()),
                format::price(change.absolute),
                format::signed_percent(change.percent)
            ),
            true,
        )
        .footer(format!(
            "Data from Alpaca • {}",
            bar.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
        ))
        .timestamp(now);

        Ok(Reply::embed(embed))
    }

    pub(super) async fn chart(&self, symbol: &str, days: Option<i64>) -> Result<Reply, CommandError> {
        let symbol = normalize_symbol(symbol);
        if symbol.is_empty() {
            return Ok(missing_symbol());
        }
        let days = clamp_days(days.unwrap_or(DEFAULT_DAYS));

        let now = Utc::now();
        let bars = self
            .market_data()?
            .get_bars(BarsRequest::daily(vec![symbol.clone()], days, now))
            .await?;

        let Some(series) = bars.series(&symbol) else {
            return Ok(symbol_not_found(&symbol));
        };
        let Some(summary) = SeriesSummary::from_bars(series) else {
            return Ok(symbol_not_found(&symbol));
        };

        let closes: Vec<f64> = series.iter().map(|bar| bar.close).collect();
        let y_range = padded_range(&closes).ok_or(ChartError::NoData)?;
        let chart = PriceChart {
            symbol: symbol.clone(),
            points: series.iter().map(|bar| (bar.timestamp, bar.close)).collect(),
            y_range,
            color: SeriesColor::cycle(0),
        };
        let png = self.charts.render_price_chart(&chart)?;
        tracing::debug!(%symbol, days, points = chart.points.len(), bytes = png.len(), "Rendered price chart");

        let filename = format!("{symbol}_chart.png");
        let embed = Embed::new(
            format!("📊 {} Chart ({days} days)", format::echo(&symbol, SYMBOL_ECHO_CHARS)),
            EmbedColor::for_direction(summary.change.is_gain()),
        )
        .field("Current Price", format::price(summary.last), true)
        .field(
            "Period Change",
            format!(
                "{} ({})",
                format::signed_price(summary.change.absolute),
                format::signed_percent(summary.change.percent)
            ),
            true,
        )
        .field("High", format::price(summary.high), true)
        .field("Low", format::price(summary.low), true)
        .image(filename.clone())
        .timestamp(now);

        Ok(Reply::embed(embed).with_attachment(filename, png))
    }

    pub(super) async fn compare(&self, symbols: &str, days: Option<i64>) -> Result<Reply, CommandError> {
        let symbols = parse_symbol_list(symbols);
        if symbols.is_empty() {
            return Ok(Reply::notice(
                "❌ Please provide at least one stock symbol. Example: `/compare AAPL,TSLA,MSFT 30`",
            ));
        }
        if symbols.len() > MAX_COMPARE_SYMBOLS {
            return Ok(Reply::notice(format!(
                "❌ Please compare no more than {MAX_COMPARE_SYMBOLS} stocks at once."
            )));
        }
        let days = clamp_days(days.unwrap_or(DEFAULT_DAYS));

        let now = Utc::now();
        let bars = self
            .market_data()?
            .get_bars(BarsRequest::daily(symbols.clone(), days, now))
            .await?;

        let mut chart = ComparisonChart::default();
        let mut skipped = Vec::new();
        for symbol in &symbols {
            let Some(series) = bars.series(symbol) else {
                skipped.push(symbol.as_str());
                continue;
            };
            let closes: Vec<f64> = series.iter().map(|bar| bar.close).collect();
            match normalize_to_percent(&closes) {
                Ok(normalized) => chart.series.push(ComparisonSeries {
                    symbol: symbol.clone(),
                    color: SeriesColor::cycle(chart.series.len()),
                    points: series
                        .iter()
                        .map(|bar| bar.timestamp)
                        .zip(normalized)
                        .collect(),
                }),
                Err(reason) => {
                    tracing::debug!(%symbol, %reason, "Skipping series");
                    skipped.push(symbol.as_str());
                }
            }
        }

        if chart.series.is_empty() {
            return Ok(Reply::notice(format!(
                "❌ Could not find data for symbols: {}",
                echo_list(&symbols)
            )));
        }

        let png = self.charts.render_comparison(&chart)?;

        let mut embed = Embed::new("📊 Stock Comparison", EmbedColor::Blue).description(format!(
            "Comparing: {}\n% change over the last {days} days",
            echo_list(&symbols)
        ));
        for series in &chart.series {
            let total = series.points.last().map_or(0.0, |(_, percent)| *percent);
            embed = embed.field(
                format::echo(&series.symbol, SYMBOL_ECHO_CHARS),
                format!(
                    "{} {} • {}",
                    direction_emoji(total >= 0.0),
                    format::signed_percent(total),
                    series.color.name
                ),
                true,
            );
        }
        if !skipped.is_empty() {
            embed = embed.field(
                "Skipped",
                format!("{} (no usable data)", echo_list(&skipped)),
                false,
            );
        }
        let embed = embed.image(COMPARISON_FILENAME).timestamp(now);

        Ok(Reply::embed(embed).with_attachment(COMPARISON_FILENAME, png))
    }
}
