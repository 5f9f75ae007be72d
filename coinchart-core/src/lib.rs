//! CoinChart Core — market data fetching, payload validation, presenter contract.
//!
//! This crate turns untrusted CoinGecko responses into values a chart can
//! safely consume:
//! - Validator combinators over sequences
//! - Domain types (asset ids, catalogs, price series, lookback windows)
//! - Blocking HTTP transport seam and the CoinGecko provider
//! - Presenter trait and its pre-render preconditions
//! - One error enum covering API, validation, chart and empty-data failures

pub mod data;
pub mod domain;
pub mod error;
pub mod presenter;
pub mod validation;

pub use error::{ApiFailure, DashboardError, ErrorKind, Result};
