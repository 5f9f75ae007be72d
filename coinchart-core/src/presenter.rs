//! Contract between the fetcher and whatever draws the chart.
//!
//! Live third-party data only satisfies these preconditions most of the
//! time, so every presenter runs [`check_presentable`] before touching the
//! screen and fails loudly instead of drawing garbage.

use crate::domain::PriceSeries;
use crate::error::{DashboardError, Result};
use crate::validation::{ensure_all_numeric, ensure_matching_lengths, ensure_non_empty};

/// Something that can display a price series.
pub trait PricePresenter {
    /// Draw `series` for the asset named `asset_label` over `period_label`.
    ///
    /// # Errors
    /// - `DataValidation` when the input breaks the contract
    /// - `Chart` when drawing itself fails
    fn present(
        &mut self,
        series: &PriceSeries,
        asset_label: &str,
        period_label: &str,
    ) -> Result<()>;
}

impl<P: PricePresenter + ?Sized> PricePresenter for &mut P {
    fn present(
        &mut self,
        series: &PriceSeries,
        asset_label: &str,
        period_label: &str,
    ) -> Result<()> {
        (**self).present(series, asset_label, period_label)
    }
}

/// Pre-render checks, in order: non-empty dates, non-empty prices, equal
/// lengths, numeric prices, non-blank asset label, non-blank period label.
///
/// # Errors
/// `DataValidation` naming the first violated condition.
pub fn check_presentable(
    series: &PriceSeries,
    asset_label: &str,
    period_label: &str,
) -> Result<()> {
    ensure_non_empty(&series.timestamps, "date list is empty")?;
    ensure_non_empty(&series.prices, "price list is empty")?;
    ensure_matching_lengths(
        &series.timestamps,
        &series.prices,
        "date and price lists differ in length",
    )?;
    ensure_all_numeric(&series.prices, "price list contains invalid values")?;

    if asset_label.trim().is_empty() {
        return Err(DashboardError::validation("asset name cannot be empty"));
    }
    if period_label.trim().is_empty() {
        return Err(DashboardError::validation("period cannot be empty"));
    }

    Ok(())
}

/// Human readable x-axis labels for every timestamp in `series`.
///
/// # Errors
/// `DataValidation` when an epoch value cannot be shown as a date.
pub fn display_dates(series: &PriceSeries) -> Result<Vec<String>> {
    series.timestamps.iter().map(|t| t.to_display()).collect()
}

/// Wrap a failure raised while drawing into a `Chart` error.
pub fn render_failure(cause: impl std::fmt::Display) -> DashboardError {
    DashboardError::chart(format!("failed to render chart: {cause}"))
}
