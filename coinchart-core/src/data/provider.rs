//! Market data provider trait.
//!
//! The MarketDataProvider trait abstracts over the upstream API so the menu
//! loop can be driven by a fake provider in tests.

use crate::domain::{AssetCatalog, AssetId, LookbackDays, PriceSeries};
use crate::error::Result;

pub trait MarketDataProvider {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch every asset the provider can chart.
    ///
    /// # Errors
    /// - `Api` on transport failure or a non-2xx status
    /// - `DataValidation` when the body is not JSON or holds no assets
    fn fetch_supported_assets(&self) -> Result<AssetCatalog>;

    /// Fetch USD prices for `asset` over the trailing `days`.
    ///
    /// # Errors
    /// - `Api` on transport failure or a non-2xx status
    /// - `DataValidation` when the body is not JSON, lacks `prices`, holds a
    ///   malformed pair, or yields no points
    fn fetch_market_chart(&self, asset: &AssetId, days: LookbackDays) -> Result<PriceSeries>;
}

impl<P: MarketDataProvider + ?Sized> MarketDataProvider for &P {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn fetch_supported_assets(&self) -> Result<AssetCatalog> {
        (**self).fetch_supported_assets()
    }

    fn fetch_market_chart(&self, asset: &AssetId, days: LookbackDays) -> Result<PriceSeries> {
        (**self).fetch_market_chart(asset, days)
    }
}
