use crate::error::{DashboardError, Result};
use chrono::{Local, TimeZone};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

/// Date format used when rendering epoch timestamps.
pub const DISPLAY_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// X-axis value of a price point: epoch milliseconds or an already
/// formatted date label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    EpochMillis(i64),
    Label(String),
}

impl Timestamp {
    /// Convert one raw payload element.
    ///
    /// Numbers become [`Timestamp::EpochMillis`] (fractional milliseconds are
    /// truncated), strings become [`Timestamp::Label`].
    ///
    /// # Errors
    /// `DataValidation` for any other JSON type, including booleans.
    pub fn from_json(value: &Value) -> Result<Self> {
        match value {
            Value::Number(n) => {
                if let Some(ms) = n.as_i64() {
                    return Ok(Self::EpochMillis(ms));
                }
                match n.as_f64() {
                    Some(ms) if ms.is_finite() && ms.abs() < i64::MAX as f64 => {
                        Ok(Self::EpochMillis(ms.trunc() as i64))
                    }
                    _ => Err(DashboardError::validation(format!(
                        "timestamp out of range: {n}"
                    ))),
                }
            }
            Value::String(label) => Ok(Self::Label(label.clone())),
            other => Err(DashboardError::validation(format!(
                "unsupported date format: {other}"
            ))),
        }
    }

    /// Human readable form: epoch values in local time, labels unchanged.
    ///
    /// # Errors
    /// `DataValidation` when the epoch value cannot be represented as a date.
    pub fn to_display(&self) -> Result<String> {
        match self {
            Self::EpochMillis(ms) => Local
                .timestamp_millis_opt(*ms)
                .single()
                .map(|dt| dt.format(DISPLAY_DATE_FORMAT).to_string())
                .ok_or_else(|| {
                    DashboardError::validation(format!("timestamp out of range: {ms}"))
                }),
            Self::Label(label) => Ok(label.clone()),
        }
    }
}

impl From<i64> for Timestamp {
    fn from(ms: i64) -> Self {
        Self::EpochMillis(ms)
    }
}

impl From<&str> for Timestamp {
    fn from(label: &str) -> Self {
        Self::Label(label.to_string())
    }
}

/// One observation on the chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: Timestamp,
    pub price: f64,
}

/// Parallel timestamp/price sequences for one asset over one lookback window.
///
/// Construction does not check that both sides have the same length; the
/// presenter contract rejects a mismatched series before anything is drawn.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PriceSeries {
    pub timestamps: Vec<Timestamp>,
    pub prices: Vec<f64>,
}

impl PriceSeries {
    pub fn new(timestamps: Vec<Timestamp>, prices: Vec<f64>) -> Self {
        Self { timestamps, prices }
    }

    /// Zip into points; a trailing unmatched element on either side is dropped.
    pub fn points(&self) -> impl Iterator<Item = PricePoint> + '_ {
        self.timestamps
            .iter()
            .zip(self.prices.iter())
            .map(|(timestamp, &price)| PricePoint {
                timestamp: timestamp.clone(),
                price,
            })
    }
}

impl FromIterator<PricePoint> for PriceSeries {
    fn from_iter<I: IntoIterator<Item = PricePoint>>(iter: I) -> Self {
        let (timestamps, prices) = iter
            .into_iter()
            .map(|p| (p.timestamp, p.price))
            .unzip();
        Self { timestamps, prices }
    }
}

/// Number of trailing days of price history to request. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LookbackDays(NonZeroU32);

impl LookbackDays {
    pub fn new(days: u32) -> Option<Self> {
        NonZeroU32::new(days).map(Self)
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }

    /// Period label shown on the chart, e.g. `30 days`.
    pub fn label(self) -> String {
        match self.get() {
            1 => "1 day".to_string(),
            n => format!("{n} days"),
        }
    }
}

impl fmt::Display for LookbackDays {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for LookbackDays {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let days: i64 = trimmed.parse().map_err(|_| {
            DashboardError::validation(format!("'{trimmed}' is not a whole number"))
        })?;
        if days <= 0 {
            return Err(DashboardError::validation("period must be a positive number"));
        }
        u32::try_from(days)
            .ok()
            .and_then(Self::new)
            .ok_or_else(|| DashboardError::validation(format!("period of {days} days is too long")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use serde_json::json;

    #[test]
    fn numbers_become_epoch_millis() {
        assert_eq!(
            Timestamp::from_json(&json!(1_700_000_000_000_i64)).unwrap(),
            Timestamp::EpochMillis(1_700_000_000_000)
        );
        assert_eq!(
            Timestamp::from_json(&json!(1500.9)).unwrap(),
            Timestamp::EpochMillis(1500)
        );
    }

    #[test]
    fn strings_become_labels() {
        assert_eq!(
            Timestamp::from_json(&json!("2024-01-01")).unwrap(),
            Timestamp::Label("2024-01-01".into())
        );
    }

    #[test]
    fn other_json_types_are_rejected() {
        for value in [json!(true), json!(null), json!([1]), json!({"t": 1})] {
            let err = Timestamp::from_json(&value).unwrap_err();
            assert!(matches!(err, DashboardError::DataValidation(_)), "{value}");
        }
    }

    #[test]
    fn epoch_display_uses_local_time() {
        let ms = 1_704_067_200_000_i64;
        let shown = Timestamp::EpochMillis(ms).to_display().unwrap();

        let expected = Local
            .timestamp_millis_opt(ms)
            .unwrap()
            .format(DISPLAY_DATE_FORMAT)
            .to_string();
        assert_eq!(shown, expected);
        assert!(NaiveDateTime::parse_from_str(&shown, DISPLAY_DATE_FORMAT).is_ok());
    }

    #[test]
    fn label_display_is_passthrough() {
        let label = Timestamp::from("yesterday");
        assert_eq!(label.to_display().unwrap(), "yesterday");
    }

    #[test]
    fn out_of_range_epoch_is_a_validation_error() {
        assert!(Timestamp::EpochMillis(i64::MAX).to_display().is_err());
    }

    #[test]
    fn points_pair_up_parallel_sequences() {
        let series = PriceSeries::new(
            vec![Timestamp::EpochMillis(1000), Timestamp::EpochMillis(2000)],
            vec![1.0, 2.0],
        );
        let points: Vec<_> = series.points().collect();
        assert_eq!(points.len(), 2);
        assert_eq!(points[1].timestamp, Timestamp::EpochMillis(2000));
        assert_eq!(points[1].price, 2.0);

        let rebuilt: PriceSeries = points.into_iter().collect();
        assert_eq!(rebuilt, series);
    }

    #[test]
    fn lookback_parses_positive_integers_only() {
        assert_eq!("30".parse::<LookbackDays>().unwrap().get(), 30);
        assert_eq!(" 7 ".parse::<LookbackDays>().unwrap().get(), 7);
        assert!("0".parse::<LookbackDays>().is_err());
        assert!("-5".parse::<LookbackDays>().is_err());
        assert!("seven".parse::<LookbackDays>().is_err());
        assert!("1.5".parse::<LookbackDays>().is_err());
        assert!("99999999999".parse::<LookbackDays>().is_err());
    }

    #[test]
    fn lookback_label_pluralizes() {
        assert_eq!(LookbackDays::new(1).unwrap().label(), "1 day");
        assert_eq!(LookbackDays::new(14).unwrap().label(), "14 days");
        assert!(LookbackDays::new(0).is_none());
    }
}
