//! Market Data Types
//!
//! OHLCV bars, per-symbol series, the market clock, and the arithmetic the
//! quote and chart commands perform over them.
//!
//! All percentage math guards its divisor explicitly instead of relying on
//! floating point infinity or NaN.

use std::collections::HashMap;

use chrono::{DateTime, FixedOffset, Utc};

// =============================================================================
// Constants
// =============================================================================

/// Smallest day window accepted by chart and compare.
pub const MIN_DAYS: i64 = 1;

/// Largest day window accepted by chart and compare.
pub const MAX_DAYS: i64 = 365;

/// Default day window for chart and compare.
pub const DEFAULT_DAYS: i64 = 30;

/// Maximum number of symbols in one comparison.
pub const MAX_COMPARE_SYMBOLS: usize = 5;

/// Fraction of the price range added above and below a price chart.
pub const CHART_PADDING_RATIO: f64 = 0.05;

// =============================================================================
// Bars
// =============================================================================

/// Bucket size of a bar series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Timeframe {
    /// One-minute bars.
    Minute,
    /// Daily bars.
    Day,
}

impl Timeframe {
    /// Timeframe identifier used by the market data API.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Minute => "1Min",
            Self::Day => "1Day",
        }
    }
}

impl std::fmt::Display for Timeframe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One OHLCV sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bar {
    /// Start of the bar period.
    pub timestamp: DateTime<Utc>,
    /// Open price.
    pub open: f64,
    /// High price.
    pub high: f64,
    /// Low price.
    pub low: f64,
    /// Close price.
    pub close: f64,
    /// Traded volume.
    pub volume: u64,
}

impl Bar {
    /// Change from open to close.
    #[must_use]
    pub fn change(&self) -> PriceChange {
        PriceChange::between(self.open, self.close)
    }
}

/// Bars keyed by symbol, as returned by one bars query.
///
/// Each series is in chronological order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BarSet {
    series: HashMap<String, Vec<Bar>>,
}

impl BarSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append bars for a symbol, keeping them sorted by timestamp.
    pub fn extend(&mut self, symbol: impl Into<String>, bars: impl IntoIterator<Item = Bar>) {
        let entry = self.series.entry(symbol.into()).or_default();
        entry.extend(bars);
        entry.sort_by_key(|bar| bar.timestamp);
    }

    /// Bars for a symbol, or `None` when the symbol has no data.
    #[must_use]
    pub fn series(&self, symbol: &str) -> Option<&[Bar]> {
        self.series
            .get(symbol)
            .map(Vec::as_slice)
            .filter(|bars| !bars.is_empty())
    }

    /// Most recent bar for a symbol.
    #[must_use]
    pub fn latest(&self, symbol: &str) -> Option<&Bar> {
        self.series(symbol).and_then(<[Bar]>::last)
    }

    /// Total number of bars across all symbols.
    #[must_use]
    pub fn len(&self) -> usize {
        self.series.values().map(Vec::len).sum()
    }

    /// Whether the set contains no bars at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<S: Into<String>> FromIterator<(S, Vec<Bar>)> for BarSet {
    fn from_iter<I: IntoIterator<Item = (S, Vec<Bar>)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (symbol, bars) in iter {
            set.extend(symbol, bars);
        }
        set
    }
}

// =============================================================================
// Price Change
// =============================================================================

/// Absolute and relative change between two prices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceChange {
    /// `to - from`.
    pub absolute: f64,
    /// Change as a percentage of `from`; zero when `from` is zero.
    pub percent: f64,
}

impl PriceChange {
    /// Change from `from` to `to`.
    #[must_use]
    pub fn between(from: f64, to: f64) -> Self {
        let absolute = to - from;
        let percent = if from == 0.0 {
            0.0
        } else {
            absolute / from * 100.0
        };
        Self { absolute, percent }
    }

    /// Whether the price went up or stayed flat.
    #[must_use]
    pub fn is_gain(&self) -> bool {
        self.absolute >= 0.0
    }
}

// =============================================================================
// Series Statistics
// =============================================================================

/// Summary of a closing price series over a chart window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesSummary {
    /// First close in the window.
    pub first: f64,
    /// Last close in the window.
    pub last: f64,
    /// Highest close.
    pub high: f64,
    /// Lowest close.
    pub low: f64,
    /// First to last change.
    pub change: PriceChange,
}

impl SeriesSummary {
    /// Summarize the closes of `bars`. Returns `None` for an empty series.
    #[must_use]
    pub fn from_bars(bars: &[Bar]) -> Option<Self> {
        let first = bars.first()?.close;
        let last = bars.last()?.close;
        let (low, high) = bars.iter().fold((f64::MAX, f64::MIN), |(lo, hi), bar| {
            (lo.min(bar.close), hi.max(bar.close))
        });

        Some(Self {
            first,
            last,
            high,
            low,
            change: PriceChange::between(first, last),
        })
    }
}

/// Y-axis bounds for a price chart: the value range padded by
/// [`CHART_PADDING_RATIO`] on each side.
///
/// A flat series is padded by the same ratio of its value (or by 1.0 when
/// the value is zero) so the axis never collapses.
#[must_use]
pub fn padded_range(values: &[f64]) -> Option<(f64, f64)> {
    let (min, max) = values.iter().fold(None, |acc: Option<(f64, f64)>, &v| {
        Some(acc.map_or((v, v), |(lo, hi)| (lo.min(v), hi.max(v))))
    })?;

    let range = max - min;
    let padding = if range > 0.0 {
        range * CHART_PADDING_RATIO
    } else if min == 0.0 {
        1.0
    } else {
        min.abs() * CHART_PADDING_RATIO
    };

    Some((min - padding, max + padding))
}

// =============================================================================
// Normalization
// =============================================================================

/// Reasons a series cannot be normalized to percentage change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum NormalizationError {
    /// The series has no points.
    #[error("series is empty")]
    Empty,
    /// The first close is zero, so no percentage base exists.
    #[error("first close is zero")]
    ZeroBase,
}

/// Convert closes to percentage change relative to the first close.
///
/// `[100, 110, 121]` becomes `[0, 10, 21]`.
///
/// # Errors
///
/// Returns [`NormalizationError`] when the series is empty or starts at zero.
pub fn normalize_to_percent(closes: &[f64]) -> Result<Vec<f64>, NormalizationError> {
    let base = *closes.first().ok_or(NormalizationError::Empty)?;
    if base == 0.0 {
        return Err(NormalizationError::ZeroBase);
    }
    Ok(closes
        .iter()
        .map(|price| (price / base - 1.0) * 100.0)
        .collect())
}

// =============================================================================
// Argument Normalization
// =============================================================================

/// Clamp a user-supplied day count to `[MIN_DAYS, MAX_DAYS]`.
#[must_use]
pub const fn clamp_days(days: i64) -> i64 {
    if days < MIN_DAYS {
        MIN_DAYS
    } else if days > MAX_DAYS {
        MAX_DAYS
    } else {
        days
    }
}

/// Trim and uppercase a ticker symbol.
#[must_use]
pub fn normalize_symbol(symbol: &str) -> String {
    symbol.trim().to_uppercase()
}

/// Split a comma-separated symbol list.
///
/// Symbols are normalized, empty entries dropped and duplicates removed
/// while keeping first-seen order.
#[must_use]
pub fn parse_symbol_list(input: &str) -> Vec<String> {
    let mut symbols: Vec<String> = Vec::new();
    for symbol in input.split(',').map(normalize_symbol) {
        if !symbol.is_empty() && !symbols.contains(&symbol) {
            symbols.push(symbol);
        }
    }
    symbols
}

// =============================================================================
// Market Clock
// =============================================================================

/// Exchange open/closed status with the surrounding session boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarketClock {
    /// Current exchange time.
    pub timestamp: DateTime<FixedOffset>,
    /// Whether the market is currently open.
    pub is_open: bool,
    /// Next session open.
    pub next_open: DateTime<FixedOffset>,
    /// Next session close.
    pub next_close: DateTime<FixedOffset>,
}

// =============================================================================
// Tests
// =============================================================================
