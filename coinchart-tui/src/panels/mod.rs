//! Drawable panels.

pub mod price_chart;

pub use price_chart::{format_price, PriceChartPanel, PriceChartView};
