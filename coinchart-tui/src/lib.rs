//! CoinChart TUI - terminal price chart presenter
//!
//! Implements the core `PricePresenter` contract with a ratatui line chart:
//! - Contract checks and layout in `PriceChartView`
//! - `PriceChartPanel` widget
//! - `TerminalPresenter` owning the terminal while the chart is open

pub mod panels;
pub mod presenter;
pub mod theme;

pub use panels::{PriceChartPanel, PriceChartView};
pub use presenter::{is_close_key, TerminalPresenter};
pub use theme::Theme;
