//! Chart Rendering
//!
//! `ChartRenderer` implementation on `plotters`' bitmap backend, encoded to
//! PNG with `image`.
//!
//! Charts carry no text: titles, legends and axis values are shown in the
//! embed next to the image. This keeps the renderer free of font
//! dependencies, so it behaves the same on every host.

use std::io::Cursor;
use std::ops::Range;

use chrono::{DateTime, Utc};
use image::{ImageFormat, RgbImage};
use plotters::coord::Shift;
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::{RangedCoordf64, RangedCoordi64};
use plotters::prelude::*;

use crate::application::ports::{
    ChartError, ChartRenderer, ComparisonChart, PriceChart, SeriesColor,
};
use crate::domain::market::padded_range;

/// Image width in pixels.
pub const CHART_WIDTH: u32 = 1200;
/// Image height in pixels.
pub const CHART_HEIGHT: u32 = 600;

const MARGIN: u32 = 24;
const GRID_LINES: u32 = 5;
const LINE_WIDTH: u32 = 2;
const FILL_ALPHA: f64 = 0.3;
const GRID_COLOR: RGBColor = RGBColor(0xE0, 0xE0, 0xE0);
const ZERO_LINE_COLOR: RGBColor = RGBColor(0x80, 0x80, 0x80);

type Area<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

fn draw_err(e: impl std::fmt::Display) -> ChartError {
    ChartError::Draw(e.to_string())
}

const fn rgb(color: SeriesColor) -> RGBColor {
    RGBColor(color.r, color.g, color.b)
}

/// Renders charts with `plotters`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlottersChartRenderer;

impl PlottersChartRenderer {
    /// Create a renderer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Draw into a fresh RGB buffer and encode it as PNG.
    fn render<F>(draw: F) -> Result<Vec<u8>, ChartError>
    where
        F: FnOnce(&Area<'_>) -> Result<(), ChartError>,
    {
        let mut pixels = vec![0_u8; (CHART_WIDTH * CHART_HEIGHT * 3) as usize];
        {
            let root = BitMapBackend::with_buffer(&mut pixels, (CHART_WIDTH, CHART_HEIGHT))
                .into_drawing_area();
            root.fill(&WHITE).map_err(draw_err)?;
            draw(&root)?;
            root.present().map_err(draw_err)?;
        }

        let image = RgbImage::from_raw(CHART_WIDTH, CHART_HEIGHT, pixels)
            .ok_or_else(|| ChartError::Encode("pixel buffer size mismatch".to_string()))?;
        let mut png = Cursor::new(Vec::new());
        image
            .write_to(&mut png, ImageFormat::Png)
            .map_err(|e| ChartError::Encode(e.to_string()))?;
        Ok(png.into_inner())
    }
}

/// Time axis covering every point; a single instant is widened to one day.
fn time_range<'a>(
    timestamps: impl Iterator<Item = &'a DateTime<Utc>>,
) -> Option<Range<i64>> {
    let (start, end) = timestamps
        .map(DateTime::timestamp)
        .fold(None, |acc: Option<(i64, i64)>, t| {
            Some(acc.map_or((t, t), |(lo, hi)| (lo.min(t), hi.max(t))))
        })?;
    if start == end {
        Some(start - 43_200..end + 43_200)
    } else {
        Some(start..end)
    }
}

fn draw_grid<DB: DrawingBackend>(
    chart: &mut ChartContext<'_, DB, Cartesian2d<RangedCoordi64, RangedCoordf64>>,
    x: &Range<i64>,
    y: &Range<f64>,
) -> Result<(), ChartError> {
    let step = (y.end - y.start) / f64::from(GRID_LINES);
    for i in 0..=GRID_LINES {
        let level = f64::from(i).mul_add(step, y.start);
        chart
            .draw_series(LineSeries::new(
                [(x.start, level), (x.end, level)],
                &GRID_COLOR,
            ))
            .map_err(draw_err)?;
    }
    Ok(())
}

impl ChartRenderer for PlottersChartRenderer {
    fn render_price_chart(&self, chart: &PriceChart) -> Result<Vec<u8>, ChartError> {
        let x_range =
            time_range(chart.points.iter().map(|(t, _)| t)).ok_or(ChartError::NoData)?;
        let (low, high) = chart.y_range;
        let y_range = low..high;
        let color = rgb(chart.color);

        Self::render(|root| {
            let mut ctx = ChartBuilder::on(root)
                .margin(MARGIN)
                .build_cartesian_2d(x_range.clone(), y_range.clone())
                .map_err(draw_err)?;

            draw_grid(&mut ctx, &x_range, &y_range)?;

            let points: Vec<(i64, f64)> = chart
                .points
                .iter()
                .map(|(t, close)| (t.timestamp(), *close))
                .collect();

            ctx.draw_series(AreaSeries::new(
                points.iter().copied(),
                low,
                color.mix(FILL_ALPHA).filled(),
            ))
            .map_err(draw_err)?;
            ctx.draw_series(LineSeries::new(points, color.stroke_width(LINE_WIDTH)))
                .map_err(draw_err)?;
            Ok(())
        })
    }

    fn render_comparison(&self, chart: &ComparisonChart) -> Result<Vec<u8>, ChartError> {
        let x_range = time_range(
            chart
                .series
                .iter()
                .flat_map(|series| series.points.iter().map(|(t, _)| t)),
        )
        .ok_or(ChartError::NoData)?;

        let mut values: Vec<f64> = chart
            .series
            .iter()
            .flat_map(|series| series.points.iter().map(|(_, percent)| *percent))
            .collect();
        values.push(0.0);
        let (low, high) = padded_range(&values).ok_or(ChartError::NoData)?;
        let y_range = low..high;

        Self::render(|root| {
            let mut ctx = ChartBuilder::on(root)
                .margin(MARGIN)
                .build_cartesian_2d(x_range.clone(), y_range.clone())
                .map_err(draw_err)?;

            draw_grid(&mut ctx, &x_range, &y_range)?;
            ctx.draw_series(LineSeries::new(
                [(x_range.start, 0.0), (x_range.end, 0.0)],
                ZERO_LINE_COLOR.stroke_width(1),
            ))
            .map_err(draw_err)?;

            for series in &chart.series {
                ctx.draw_series(LineSeries::new(
                    series.points.iter().map(|(t, percent)| (t.timestamp(), *percent)),
                    rgb(series.color).stroke_width(LINE_WIDTH),
                ))
                .map_err(draw_err)?;
            }
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;
    use crate::application::ports::ComparisonSeries;

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    fn day(n: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 2, 5, 0, 0).unwrap() + Duration::days(n)
    }

    #[test]
    fn price_chart_is_png() {
        let chart = PriceChart {
            symbol: "AAPL".to_string(),
            points: vec![(day(0), 100.0), (day(1), 104.5), (day(2), 102.0)],
            y_range: (99.75, 104.75),
            color: SeriesColor::cycle(0),
        };
        let png = PlottersChartRenderer::new().render_price_chart(&chart).unwrap();
        assert_eq!(png[..8], PNG_SIGNATURE);
    }

    #[test]
    fn single_point_chart_renders() {
        let chart = PriceChart {
            symbol: "AAPL".to_string(),
            points: vec![(day(0), 100.0)],
            y_range: (95.0, 105.0),
            color: SeriesColor::cycle(0),
        };
        assert!(PlottersChartRenderer::new().render_price_chart(&chart).is_ok());
    }

    #[test]
    fn empty_price_chart_is_rejected() {
        let chart = PriceChart {
            symbol: "AAPL".to_string(),
            points: Vec::new(),
            y_range: (0.0, 1.0),
            color: SeriesColor::cycle(0),
        };
        assert_eq!(
            PlottersChartRenderer::new().render_price_chart(&chart),
            Err(ChartError::NoData)
        );
    }

    #[test]
    fn comparison_chart_is_png() {
        let chart = ComparisonChart {
            series: vec![
                ComparisonSeries {
                    symbol: "AAPL".to_string(),
                    color: SeriesColor::cycle(0),
                    points: vec![(day(0), 0.0), (day(1), 2.5), (day(2), 4.0)],
                },
                ComparisonSeries {
                    symbol: "TSLA".to_string(),
                    color: SeriesColor::cycle(1),
                    points: vec![(day(0), 0.0), (day(1), -3.0), (day(2), -1.5)],
                },
            ],
        };
        let png = PlottersChartRenderer::new().render_comparison(&chart).unwrap();
        assert_eq!(png[..8], PNG_SIGNATURE);
    }

    #[test]
    fn empty_comparison_is_rejected() {
        assert_eq!(
            PlottersChartRenderer::new().render_comparison(&ComparisonChart::default()),
            Err(ChartError::NoData)
        );
    }

    #[test]
    fn time_range_widens_single_instant() {
        let only = [day(0)];
        let range = time_range(only.iter()).unwrap();
        assert_eq!(range.end - range.start, 86_400);
    }
}
