//! CoinGecko v3 data provider.
//!
//! Fetches the coin catalog and per-coin USD market charts. Each call is a
//! single blocking request: no retries, no caching, no rate limiting.
//!
//! Catalog parsing is deliberately lenient: entries that are not objects with
//! a string `id` are skipped rather than failing the whole fetch, because the
//! upstream catalog is heterogeneous. Chart parsing is strict: every entry of
//! `prices` must be a `[timestamp, price]` pair.

use super::provider::MarketDataProvider;
use super::transport::{HttpRequest, HttpTransport, ReqwestTransport};
use crate::domain::{AssetCatalog, AssetId, LookbackDays, PriceSeries, Timestamp};
use crate::error::{DashboardError, Result};
use crate::validation::{ensure_all_numeric, ensure_non_empty};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};

pub const DEFAULT_BASE_URL: &str = "https://api.coingecko.com/api/v3";

/// Quote currency requested for every chart.
const VS_CURRENCY: &str = "usd";

/// CoinGecko provider over a pluggable blocking transport.
#[derive(Debug, Clone)]
pub struct CoinGeckoProvider<T = ReqwestTransport> {
    transport: T,
    base_url: String,
}

impl CoinGeckoProvider<ReqwestTransport> {
    /// Provider against `base_url` using reqwest with the given timeout.
    ///
    /// # Errors
    /// `Api` when the HTTP client cannot be constructed.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let transport =
            ReqwestTransport::new(timeout).map_err(|e| DashboardError::transport(e.to_string()))?;
        Ok(Self::new(transport, base_url))
    }
}

impl<T: HttpTransport> CoinGeckoProvider<T> {
    pub fn new(transport: T, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            transport,
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn catalog_request(&self) -> HttpRequest {
        HttpRequest::get(format!("{}/coins/list", self.base_url))
    }

    fn chart_request(&self, asset: &AssetId, days: LookbackDays) -> HttpRequest {
        HttpRequest::get(format!(
            "{}/coins/{}/market_chart",
            self.base_url,
            asset.as_str()
        ))
        .with_query("vs_currency", VS_CURRENCY)
        .with_query("days", days.get().to_string())
    }

    /// Send one request and hand back the body of a 2xx response.
    fn execute(&self, request: &HttpRequest) -> Result<String> {
        debug!(url = %request.url, query = ?request.query, "sending request");

        let response = self.transport.get(request).map_err(|e| {
            warn!(url = %request.url, error = %e, "request failed");
            DashboardError::transport(e.to_string())
        })?;

        if !response.is_success() {
            warn!(
                url = %request.url,
                status = response.status,
                "provider returned error status"
            );
            return Err(DashboardError::status(response.status));
        }

        Ok(response.body)
    }
}

impl<T: HttpTransport> MarketDataProvider for CoinGeckoProvider<T> {
    fn name(&self) -> &str {
        "coingecko"
    }

    fn fetch_supported_assets(&self) -> Result<AssetCatalog> {
        let body = self.execute(&self.catalog_request())?;
        let catalog = parse_catalog(&body)?;
        info!(assets = catalog.len(), "fetched asset catalog");
        Ok(catalog)
    }

    fn fetch_market_chart(&self, asset: &AssetId, days: LookbackDays) -> Result<PriceSeries> {
        let body = self.execute(&self.chart_request(asset, days))?;
        let series = parse_market_chart(&body)?;
        info!(
            asset = %asset,
            days = days.get(),
            points = series.prices.len(),
            "fetched market chart"
        );
        Ok(series)
    }
}

fn parse_json(body: &str) -> Result<Value> {
    serde_json::from_str(body)
        .map_err(|e| DashboardError::validation(format!("API response is not valid JSON: {e}")))
}

/// Parse a `/coins/list` body into a catalog.
///
/// # Errors
/// `DataValidation` when the body is not JSON, not an array, or empty.
pub fn parse_catalog(body: &str) -> Result<AssetCatalog> {
    let entries = match parse_json(body)? {
        Value::Array(entries) => entries,
        other => {
            return Err(DashboardError::validation(format!(
                "expected a list of assets, got {}",
                json_type_name(&other)
            )))
        }
    };

    ensure_non_empty(&entries, "received an empty asset list")?;

    let total = entries.len();
    let catalog: AssetCatalog = entries.iter().filter_map(catalog_entry_id).collect();

    let skipped = total - catalog.len();
    if skipped > 0 {
        debug!(skipped, total, "skipped catalog entries without a usable id");
    }
    ensure_non_empty(catalog.as_slice(), "asset list contains no usable ids")?;

    Ok(catalog)
}

/// The `id` of a catalog record, or `None` for anything else.
fn catalog_entry_id(entry: &Value) -> Option<AssetId> {
    entry
        .as_object()?
        .get("id")?
        .as_str()
        .and_then(|id| AssetId::parse(id).ok())
}

/// Parse a `/coins/{id}/market_chart` body into a price series.
///
/// # Errors
/// `DataValidation` when the body is not JSON, has no `prices` array, holds
/// an entry that is not a `[timestamp, price]` pair, or yields no points.
pub fn parse_market_chart(body: &str) -> Result<PriceSeries> {
    let data = parse_json(body)?;

    let prices = data
        .get("prices")
        .ok_or_else(|| {
            DashboardError::validation("unexpected API data format: missing 'prices'")
        })?
        .as_array()
        .ok_or_else(|| {
            DashboardError::validation("unexpected API data format: 'prices' is not a list")
        })?;

    let mut timestamps = Vec::with_capacity(prices.len());
    let mut raw_prices = Vec::with_capacity(prices.len());

    for (i, entry) in prices.iter().enumerate() {
        match entry.as_array().map(Vec::as_slice) {
            Some([timestamp, price]) => {
                timestamps.push(Timestamp::from_json(timestamp).map_err(|e| {
                    DashboardError::validation(format!("price entry {i}: {}", inner_message(e)))
                })?);
                raw_prices.push(price);
            }
            _ => {
                return Err(DashboardError::validation(format!(
                    "price entry {i} is not a [timestamp, price] pair"
                )))
            }
        }
    }

    ensure_non_empty(&timestamps, "date list is empty")?;
    ensure_non_empty(&raw_prices, "price list is empty")?;
    ensure_all_numeric(&raw_prices, "price list contains non-numeric values")?;

    let prices = raw_prices.iter().filter_map(|v| v.as_f64()).collect();

    Ok(PriceSeries::new(timestamps, prices))
}

fn inner_message(err: DashboardError) -> String {
    match err {
        DashboardError::DataValidation(message) => message,
        other => other.to_string(),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::transport::{HttpResponse, TransportError};
    use crate::error::ErrorKind;

    #[test]
    fn catalog_keeps_records_with_ids_in_order() {
        let catalog =
            parse_catalog(r#"[{"id":"bitcoin","symbol":"btc"},{"id":"ethereum"}]"#).unwrap();
        let ids: Vec<&str> = catalog.iter().map(AssetId::as_str).collect();
        assert_eq!(ids, vec!["bitcoin", "ethereum"]);
    }

    #[test]
    fn catalog_skips_malformed_entries() {
        let body = r#"[{"id":"bitcoin"},"not-a-record",{},{"id":42},{"id":"  "},null,{"id":"ethereum"}]"#;
        let ids: Vec<String> = parse_catalog(body)
            .unwrap()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(ids, vec!["bitcoin", "ethereum"]);
    }

    #[test]
    fn catalog_with_only_malformed_entries_is_rejected() {
        let err = parse_catalog(r#"["x", {}]"#).unwrap_err();
        assert_eq!(err, DashboardError::validation("asset list contains no usable ids"));
    }

    #[test]
    fn empty_catalog_is_rejected() {
        let err = parse_catalog("[]").unwrap_err();
        assert_eq!(err, DashboardError::validation("received an empty asset list"));
    }

    #[test]
    fn catalog_must_be_json_list() {
        assert_eq!(
            parse_catalog("not json").unwrap_err().kind(),
            ErrorKind::DataValidation
        );
        assert_eq!(
            parse_catalog(r#"{"id":"bitcoin"}"#).unwrap_err().kind(),
            ErrorKind::DataValidation
        );
    }

    #[test]
    fn chart_splits_pairs_into_parallel_sequences() {
        let series = parse_market_chart(r#"{"prices":[[1000,50000.0],[2000,50500.0]]}"#).unwrap();
        assert_eq!(
            series.timestamps,
            vec![Timestamp::EpochMillis(1000), Timestamp::EpochMillis(2000)]
        );
        assert_eq!(series.prices, vec![50000.0, 50500.0]);
    }

    #[test]
    fn chart_accepts_string_dates_and_integer_prices() {
        let series = parse_market_chart(r#"{"prices":[["2024-01-01",42]]}"#).unwrap();
        assert_eq!(series.timestamps, vec![Timestamp::Label("2024-01-01".into())]);
        assert_eq!(series.prices, vec![42.0]);
    }

    #[test]
    fn chart_ignores_other_fields() {
        let body = r#"{"prices":[[1,2.0]],"market_caps":[[1,3.0]],"total_volumes":[]}"#;
        assert_eq!(parse_market_chart(body).unwrap().prices, vec![2.0]);
    }

    #[test]
    fn chart_without_prices_is_rejected() {
        let err = parse_market_chart(r#"{"market_caps":[]}"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DataValidation);
        assert!(err.to_string().contains("prices"));
    }

    #[test]
    fn chart_prices_must_be_a_list() {
        assert!(parse_market_chart(r#"{"prices":{}}"#).is_err());
        assert!(parse_market_chart(r#"[1,2]"#).is_err());
    }

    #[test]
    fn empty_chart_is_rejected() {
        let err = parse_market_chart(r#"{"prices":[]}"#).unwrap_err();
        assert_eq!(err, DashboardError::validation("date list is empty"));
    }

    #[test]
    fn malformed_pairs_are_validation_errors() {
        for body in [
            r#"{"prices":[[1000]]}"#,
            r#"{"prices":[[1000,1.0,2.0]]}"#,
            r#"{"prices":[1000]}"#,
            r#"{"prices":[[1000,"x"]]}"#,
            r#"{"prices":[[1000,true]]}"#,
            r#"{"prices":[[1000,null]]}"#,
            r#"{"prices":[[false,1.0]]}"#,
        ] {
            let err = parse_market_chart(body).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::DataValidation, "{body}");
        }
    }

    #[test]
    fn malformed_pair_error_names_the_entry() {
        let err = parse_market_chart(r#"{"prices":[[1,1.0],[2]]}"#).unwrap_err();
        assert!(err.to_string().contains("entry 1"), "{err}");
    }

    #[test]
    fn chart_url_carries_currency_and_window() {
        let provider = CoinGeckoProvider::new(NoTransport, "https://api.example.test/v3/");
        let request = provider.chart_request(
            &AssetId::parse("bitcoin").unwrap(),
            LookbackDays::new(30).unwrap(),
        );

        assert_eq!(request.url, "https://api.example.test/v3/coins/bitcoin/market_chart");
        assert_eq!(
            request.query,
            vec![
                ("vs_currency".to_string(), "usd".to_string()),
                ("days".to_string(), "30".to_string()),
            ]
        );
    }

    struct NoTransport;

    impl HttpTransport for NoTransport {
        fn get(
            &self,
            _request: &HttpRequest,
        ) -> std::result::Result<HttpResponse, TransportError> {
            unreachable!("url building only")
        }
    }
}
