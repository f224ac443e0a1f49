//! Chart Renderer Port
//!
//! Turns prepared series into PNG bytes. Rendering is synchronous and
//! CPU-bound; the inputs are fully computed by the command handlers so an
//! adapter only draws.

use chrono::{DateTime, Utc};

/// A named series color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesColor {
    /// Name shown in the chart legend.
    pub name: &'static str,
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl SeriesColor {
    /// Color for the `index`-th series, cycling through [`SERIES_PALETTE`].
    #[must_use]
    pub const fn cycle(index: usize) -> Self {
        SERIES_PALETTE[index % SERIES_PALETTE.len()]
    }
}

/// Series colors in assignment order.
pub const SERIES_PALETTE: [SeriesColor; 5] = [
    SeriesColor { name: "Blue", r: 0x00, g: 0xA3, b: 0xE0 },
    SeriesColor { name: "Coral", r: 0xFF, g: 0x6B, b: 0x6B },
    SeriesColor { name: "Teal", r: 0x4E, g: 0xCD, b: 0xC4 },
    SeriesColor { name: "Yellow", r: 0xFF, g: 0xD9, b: 0x3D },
    SeriesColor { name: "Mint", r: 0xA8, g: 0xE6, b: 0xCF },
];

/// A single-symbol closing price chart.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceChart {
    /// Symbol being plotted.
    pub symbol: String,
    /// `(timestamp, close)` in chronological order.
    pub points: Vec<(DateTime<Utc>, f64)>,
    /// Y-axis bounds, already padded.
    pub y_range: (f64, f64),
    /// Line and fill color.
    pub color: SeriesColor,
}

/// One normalized series of a comparison chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonSeries {
    /// Symbol being plotted.
    pub symbol: String,
    /// Line color.
    pub color: SeriesColor,
    /// `(timestamp, percent change)` in chronological order.
    pub points: Vec<(DateTime<Utc>, f64)>,
}

/// Several series normalized to percent change, on a shared time axis.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ComparisonChart {
    /// Series in legend order.
    pub series: Vec<ComparisonSeries>,
}

/// Chart rendering failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChartError {
    /// Nothing to plot.
    #[error("no data points to plot")]
    NoData,
    /// The drawing backend failed.
    #[error("chart drawing failed: {0}")]
    Draw(String),
    /// PNG encoding failed.
    #[error("chart encoding failed: {0}")]
    Encode(String),
}

/// Port for rendering charts to PNG.
pub trait ChartRenderer: Send + Sync {
    /// Render a filled line chart of closing prices.
    ///
    /// # Errors
    ///
    /// Returns [`ChartError`] when there are no points or drawing fails.
    fn render_price_chart(&self, chart: &PriceChart) -> Result<Vec<u8>, ChartError>;

    /// Render several percent-change series with a zero reference line.
    ///
    /// # Errors
    ///
    /// Returns [`ChartError`] when there are no points or drawing fails.
    fn render_comparison(&self, chart: &ComparisonChart) -> Result<Vec<u8>, ChartError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_cycles() {
        assert_eq!(SeriesColor::cycle(0), SERIES_PALETTE[0]);
        assert_eq!(SeriesColor::cycle(5), SERIES_PALETTE[0]);
        assert_eq!(SeriesColor::cycle(7).name, "Teal");
    }
}
