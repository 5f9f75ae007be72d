//! Price chart panel - one asset's USD price over the lookback window
//!
//! Displays:
//! - Price line (green when the window closed higher, pink when lower)
//! - First/middle/last date labels on the x axis
//! - Min/mid/max price labels on the y axis

use coinchart_core::domain::{capitalize, PriceSeries};
use coinchart_core::presenter::{check_presentable, display_dates};
use coinchart_core::Result;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Widget},
};

use crate::theme::Theme;

pub const X_AXIS_TITLE: &str = "Date and time";
pub const Y_AXIS_TITLE: &str = "Price (USD)";
pub const CLOSE_HINT: &str = " q / Esc / Enter: back to menu ";

/// Validated, display-ready chart data.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceChartView {
    pub title: String,
    pub dates: Vec<String>,
    pub points: Vec<(f64, f64)>,
    pub y_bounds: [f64; 2],
}

impl PriceChartView {
    /// Check the presenter contract and lay the series out for drawing.
    ///
    /// # Errors
    /// `DataValidation` when `series` or either label breaks the contract.
    pub fn prepare(series: &PriceSeries, asset_label: &str, period_label: &str) -> Result<Self> {
        check_presentable(series, asset_label, period_label)?;
        let dates = display_dates(series)?;

        let points: Vec<(f64, f64)> = series
            .prices
            .iter()
            .enumerate()
            .map(|(i, &p)| (i as f64, p))
            .collect();

        let y_min = series.prices.iter().copied().fold(f64::INFINITY, f64::min);
        let y_max = series
            .prices
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);

        // Halved before subtracting so extreme finite prices cannot overflow.
        // Flat series still get a visible band around the line.
        let half_range = y_max / 2.0 - y_min / 2.0;
        let y_pad = if half_range > 0.0 {
            half_range * 0.1
        } else {
            (y_max.abs() * 0.05).max(1.0)
        };

        Ok(Self {
            title: format!(
                "{} price over {}",
                capitalize(asset_label.trim()),
                period_label.trim()
            ),
            dates,
            points,
            y_bounds: [(y_min - y_pad).max(f64::MIN), (y_max + y_pad).min(f64::MAX)],
        })
    }

    pub fn x_max(&self) -> f64 {
        self.points.len().saturating_sub(1).max(1) as f64
    }

    /// First, middle and last date labels.
    pub fn x_labels(&self) -> Vec<String> {
        let n = self.dates.len();
        match n {
            0 => Vec::new(),
            1 => vec![self.dates[0].clone()],
            2 => vec![self.dates[0].clone(), self.dates[1].clone()],
            _ => vec![
                self.dates[0].clone(),
                self.dates[n / 2].clone(),
                self.dates[n - 1].clone(),
            ],
        }
    }

    pub fn y_labels(&self) -> Vec<String> {
        let [lower, upper] = self.y_bounds;
        let mid = lower / 2.0 + upper / 2.0;
        [lower, mid, upper].iter().map(|v| format_price(*v)).collect()
    }

    fn first_and_last(&self) -> (f64, f64) {
        let first = self.points.first().map_or(0.0, |p| p.1);
        let last = self.points.last().map_or(first, |p| p.1);
        (first, last)
    }
}

/// Dollar amount with precision scaled to magnitude.
pub fn format_price(value: f64) -> String {
    let abs = value.abs();
    if abs >= 1000.0 {
        format!("${value:.0}")
    } else if abs >= 1.0 {
        format!("${value:.2}")
    } else {
        format!("${value:.6}")
    }
}

/// Price chart widget
pub struct PriceChartPanel<'a> {
    view: &'a PriceChartView,
    theme: &'a Theme,
}

impl<'a> PriceChartPanel<'a> {
    pub fn new(view: &'a PriceChartView, theme: &'a Theme) -> Self {
        Self { view, theme }
    }
}

impl<'a> Widget for PriceChartPanel<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (first, last) = self.view.first_and_last();
        let line_color = self.theme.trend_color(first, last);

        let datasets = vec![Dataset::default()
            .name("Price")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(line_color))
            .data(&self.view.points)];

        let x_labels: Vec<Span> = self.view.x_labels().into_iter().map(Span::raw).collect();
        let y_labels: Vec<Span> = self.view.y_labels().into_iter().map(Span::raw).collect();

        let chart = Chart::new(datasets)
            .block(
                Block::default()
                    .title(Span::styled(
                        format!(" {} ", self.view.title),
                        Style::default()
                            .fg(self.theme.text_primary)
                            .add_modifier(Modifier::BOLD),
                    ))
                    .title_bottom(Line::from(Span::styled(
                        CLOSE_HINT,
                        Style::default().fg(self.theme.muted),
                    )))
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(self.theme.accent))
                    .style(Style::default().bg(self.theme.background)),
            )
            .x_axis(
                Axis::default()
                    .title(Span::styled(
                        X_AXIS_TITLE,
                        Style::default().fg(self.theme.text_secondary),
                    ))
                    .style(Style::default().fg(self.theme.muted))
                    .bounds([0.0, self.view.x_max()])
                    .labels(x_labels),
            )
            .y_axis(
                Axis::default()
                    .title(Span::styled(
                        Y_AXIS_TITLE,
                        Style::default().fg(self.theme.text_secondary),
                    ))
                    .style(Style::default().fg(self.theme.muted))
                    .bounds(self.view.y_bounds)
                    .labels(y_labels),
            );

        chart.render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coinchart_core::domain::Timestamp;
    use coinchart_core::{DashboardError, ErrorKind};

    fn labelled_series(prices: Vec<f64>) -> PriceSeries {
        PriceSeries::new(
            (0..prices.len())
                .map(|i| Timestamp::Label(format!("d{i}")))
                .collect(),
            prices,
        )
    }

    #[test]
    fn title_capitalizes_asset_and_names_period() {
        let view =
            PriceChartView::prepare(&labelled_series(vec![1.0, 2.0]), " bitcoin ", "7 days")
                .unwrap();
        assert_eq!(view.title, "Bitcoin price over 7 days");
    }

    #[test]
    fn points_are_indexed_by_position() {
        let view = PriceChartView::prepare(&labelled_series(vec![5.0, 6.0, 7.0]), "eth", "3 days")
            .unwrap();
        assert_eq!(view.points, vec![(0.0, 5.0), (1.0, 6.0), (2.0, 7.0)]);
        assert_eq!(view.x_max(), 2.0);
    }

    #[test]
    fn y_bounds_pad_the_range() {
        let view = PriceChartView::prepare(&labelled_series(vec![100.0, 200.0]), "btc", "1 day")
            .unwrap();
        assert_eq!(view.y_bounds, [95.0, 205.0]);
    }

    #[test]
    fn extreme_prices_keep_finite_bounds_and_labels() {
        let view = PriceChartView::prepare(
            &labelled_series(vec![-1.7e308, 1.7e308]),
            "btc",
            "1 day",
        )
        .unwrap();
        let [lower, upper] = view.y_bounds;
        assert!(lower.is_finite() && upper.is_finite());
        assert!(lower <= -1.7e308 && upper >= 1.7e308);
        for label in view.y_labels() {
            assert!(!label.contains("inf") && !label.contains("NaN"), "{label}");
        }

        let flat = PriceChartView::prepare(&labelled_series(vec![f64::MAX; 2]), "btc", "1 day")
            .unwrap();
        assert!(flat.y_bounds.iter().all(|b| b.is_finite()));
    }

    #[test]
    fn flat_series_gets_nonzero_band() {
        let view =
            PriceChartView::prepare(&labelled_series(vec![1.0, 1.0]), "usdt", "1 day").unwrap();
        let [lower, upper] = view.y_bounds;
        assert!(lower < 1.0 && upper > 1.0);
    }

    #[test]
    fn x_labels_pick_first_middle_last() {
        let view = PriceChartView::prepare(
            &labelled_series(vec![1.0, 2.0, 3.0, 4.0, 5.0]),
            "btc",
            "5 days",
        )
        .unwrap();
        assert_eq!(view.x_labels(), vec!["d0", "d2", "d4"]);
    }

    #[test]
    fn contract_violations_surface_as_validation_errors() {
        let mismatched = PriceSeries::new(vec![Timestamp::EpochMillis(1)], vec![1.0, 2.0]);
        let err = PriceChartView::prepare(&mismatched, "btc", "1 day").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DataValidation);

        let err = PriceChartView::prepare(&labelled_series(vec![1.0]), "", "1 day").unwrap_err();
        assert_eq!(err, DashboardError::validation("asset name cannot be empty"));
    }

    #[test]
    fn price_format_scales_precision() {
        assert_eq!(format_price(50500.4), "$50500");
        assert_eq!(format_price(12.346), "$12.35");
        assert_eq!(format_price(0.000123), "$0.000123");
    }
}
