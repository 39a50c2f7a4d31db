use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

use super::traits::PriceProvider;
use crate::errors::CoreError;
use crate::models::price::{PricePoint, PriceSeries};

const BASE_URL: &str = "https://www.alphavantage.co/query";
const PROVIDER_NAME: &str = "Alpha Vantage";

/// Alpha Vantage API provider for stock/equity prices.
///
/// - **Free tier**: 25 requests/day (across ALL endpoints).
/// - **Requires**: API key (set via settings as "alphavantage").
/// - **Coverage**: 100k+ global equity symbols.
/// - **Intervals**: daily only ("1d").
/// - **Periods**: "max" requests the full history, anything else the
///   compact output (last 100 trading days).
pub struct AlphaVantageProvider {
    client: Client,
    api_key: String,
    base_url: String,
}

impl AlphaVantageProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, BASE_URL)
    }

    /// Point the provider at a different endpoint (mirrors, local stubs).
    pub fn with_base_url(api_key: String, base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            api_key,
            base_url: base_url.into(),
        }
    }

    /// Map a period token to the API's `outputsize` parameter.
    pub fn output_size(period: &str) -> &'static str {
        if period.eq_ignore_ascii_case("max") {
            "full"
        } else {
            "compact"
        }
    }
}

// ── Alpha Vantage API response types ────────────────────────────────

#[derive(Deserialize)]
pub(crate) struct TimeSeriesResponse {
    #[serde(rename = "Time Series (Daily)")]
    time_series: Option<HashMap<String, DailyData>>,

    #[serde(rename = "Error Message")]
    error_message: Option<String>,

    #[serde(rename = "Note")]
    note: Option<String>,
}

#[derive(Deserialize)]
struct DailyData {
    #[serde(rename = "4. close")]
    close: String,
}

impl TimeSeriesResponse {
    /// Turn a decoded response into a series, surfacing the API's own
    /// error and rate-limit messages.
    pub(crate) fn into_series(self, symbol: &str) -> Result<PriceSeries, CoreError> {
        if let Some(message) = self.error_message.or(self.note) {
            return Err(CoreError::Api {
                provider: PROVIDER_NAME.into(),
                message: format!("{symbol}: {message}"),
            });
        }

        let time_series = self.time_series.ok_or_else(|| CoreError::Api {
            provider: PROVIDER_NAME.into(),
            message: format!("No time series data for {symbol}. API limit may be exceeded."),
        })?;

        let points: Vec<PricePoint> = time_series
            .iter()
            .filter_map(|(date_str, data)| {
                let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").ok()?;
                let close: f64 = data.close.parse().ok()?;
                Some(PricePoint::new(date, close))
            })
            .collect();

        Ok(PriceSeries::new(symbol, points))
    }
}

#[async_trait]
impl PriceProvider for AlphaVantageProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn fetch_series(
        &self,
        symbol: &str,
        period: &str,
        interval: &str,
    ) -> Result<PriceSeries, CoreError> {
        if !interval.eq_ignore_ascii_case("1d") {
            return Err(CoreError::Api {
                provider: PROVIDER_NAME.into(),
                message: format!("Unsupported interval '{interval}': only daily (1d) data is available"),
            });
        }

        let body = self
            .client
            .get(&self.base_url)
            .query(&[
                ("function", "TIME_SERIES_DAILY"),
                ("symbol", symbol.to_uppercase().as_str()),
                ("outputsize", Self::output_size(period)),
                ("apikey", self.api_key.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let resp: TimeSeriesResponse = serde_json::from_str(&body).map_err(|e| CoreError::Api {
            provider: PROVIDER_NAME.into(),
            message: format!("Failed to parse time series for {symbol}: {e}"),
        })?;

        let series = resp.into_series(symbol)?;
        log::debug!(
            "{}: {symbol} outputsize={} -> {} points",
            PROVIDER_NAME,
            Self::output_size(period),
            series.len()
        );
        Ok(series)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn output_size_maps_max_to_full() {
        assert_eq!(AlphaVantageProvider::output_size("max"), "full");
        assert_eq!(AlphaVantageProvider::output_size("MAX"), "full");
        assert_eq!(AlphaVantageProvider::output_size("1d"), "compact");
        assert_eq!(AlphaVantageProvider::output_size("1y"), "compact");
    }

    #[test]
    fn parses_daily_series_sorted() {
        let json = r#"{
            "Meta Data": {"2. Symbol": "IBM"},
            "Time Series (Daily)": {
                "2025-01-16": {"1. open": "1", "4. close": "191.50"},
                "2025-01-14": {"1. open": "1", "4. close": "188.00"},
                "2025-01-15": {"1. open": "1", "4. close": "190.25"}
            }
        }"#;
        let resp: TimeSeriesResponse = serde_json::from_str(json).unwrap();
        let series = resp.into_series("ibm").unwrap();

        assert_eq!(series.symbol, "IBM");
        assert_eq!(series.len(), 3);
        assert_eq!(series.points()[0].date, d(2025, 1, 14));
        assert_eq!(series.latest_close(), Some(191.50));
        assert_eq!(series.close_on(d(2025, 1, 15)), Some(190.25));
    }

    #[test]
    fn skips_unparseable_rows() {
        let json = r#"{
            "Time Series (Daily)": {
                "2025-01-16": {"4. close": "n/a"},
                "not-a-date": {"4. close": "1.0"},
                "2025-01-15": {"4. close": "10.0"}
            }
        }"#;
        let resp: TimeSeriesResponse = serde_json::from_str(json).unwrap();
        let series = resp.into_series("X").unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series.latest_close(), Some(10.0));
    }

    #[test]
    fn error_message_becomes_api_error() {
        let json = r#"{"Error Message": "Invalid API call."}"#;
        let resp: TimeSeriesResponse = serde_json::from_str(json).unwrap();
        let err = resp.into_series("NOPE").unwrap_err();
        assert!(matches!(err, CoreError::Api { .. }));
        assert!(err.to_string().contains("Invalid API call."));
    }

    #[test]
    fn rate_limit_note_becomes_api_error() {
        let json = r#"{"Note": "Thank you for using Alpha Vantage! Our standard API call frequency is 25 requests per day."}"#;
        let resp: TimeSeriesResponse = serde_json::from_str(json).unwrap();
        let err = resp.into_series("IBM").unwrap_err();
        assert!(err.to_string().contains("25 requests per day"));
    }

    #[test]
    fn missing_series_is_api_error() {
        let resp: TimeSeriesResponse = serde_json::from_str("{}").unwrap();
        assert!(matches!(resp.into_series("IBM"), Err(CoreError::Api { .. })));
    }

    #[tokio::test]
    async fn rejects_intraday_interval_without_request() {
        let provider = AlphaVantageProvider::with_base_url("key".into(), "http://127.0.0.1:1");
        let err = provider.fetch_series("IBM", "1d", "5m").await.unwrap_err();
        assert!(err.to_string().contains("Unsupported interval"));
    }
}
