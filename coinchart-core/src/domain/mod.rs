//! Domain types for assets and price history.

pub mod asset;
pub mod series;

pub use asset::{capitalize, AssetCatalog, AssetId};
pub use series::{LookbackDays, PricePoint, PriceSeries, Timestamp, DISPLAY_DATE_FORMAT};
