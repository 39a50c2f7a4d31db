use async_trait::async_trait;
use chrono::NaiveDate;
use yahoo_finance_api as yahoo;

use super::traits::PriceProvider;
use crate::errors::CoreError;
use crate::models::price::{PricePoint, PriceSeries};

const PROVIDER_NAME: &str = "Yahoo Finance";

/// Yahoo Finance API provider for stock/equity prices.
///
/// - **Free**: No API key required.
/// - **No strict rate limits** (unofficial public API).
/// - **Coverage**: Global equities, ETFs, indices, mutual funds.
/// - **Periods**: "1d", "5d", "1mo", "3mo", "6mo", "1y", "2y", "5y", "10y", "ytd", "max".
/// - **Intervals**: "1m" … "1h", "1d", "5d", "1wk", "1mo", "3mo".
///
/// Uses the `yahoo_finance_api` crate which wraps Yahoo Finance's
/// public chart endpoint. Prices are in the listing's native currency.
pub struct YahooFinanceProvider {
    connector: yahoo::YahooConnector,
}

impl YahooFinanceProvider {
    pub fn new() -> Result<Self, CoreError> {
        let connector = yahoo::YahooConnector::new().map_err(|e| CoreError::Api {
            provider: PROVIDER_NAME.into(),
            message: format!("Failed to create connector: {e}"),
        })?;
        Ok(Self { connector })
    }

    /// Convert a unix timestamp (seconds) to `chrono::NaiveDate`.
    fn timestamp_to_naive_date(ts: i64) -> Option<NaiveDate> {
        chrono::DateTime::from_timestamp(ts, 0).map(|dt| dt.date_naive())
    }

    fn api_error(symbol: &str, e: yahoo::YahooError) -> CoreError {
        if matches!(e, yahoo::YahooError::NoQuotes | yahoo::YahooError::NoResult) {
            CoreError::Api {
                provider: PROVIDER_NAME.into(),
                message: format!("No quotes found for {symbol}"),
            }
        } else {
            CoreError::Api {
                provider: PROVIDER_NAME.into(),
                message: format!("Failed to fetch quotes for {symbol}: {e}"),
            }
        }
    }
}

#[async_trait]
impl PriceProvider for YahooFinanceProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn fetch_series(
        &self,
        symbol: &str,
        period: &str,
        interval: &str,
    ) -> Result<PriceSeries, CoreError> {
        let resp = self
            .connector
            .get_quote_range(symbol, interval, period)
            .await
            .map_err(|e| Self::api_error(symbol, e))?;

        let quotes = resp.quotes().map_err(|e| Self::api_error(symbol, e))?;

        // Intraday intervals produce several quotes per day; the last one
        // for a date wins inside `PriceSeries::new`.
        let points: Vec<PricePoint> = quotes
            .iter()
            .filter_map(|q| {
                let date = Self::timestamp_to_naive_date(q.timestamp as i64)?;
                Some(PricePoint::new(date, q.close))
            })
            .collect();

        log::debug!(
            "{}: {symbol} period={period} interval={interval} -> {} points",
            PROVIDER_NAME,
            points.len()
        );

        Ok(PriceSeries::new(symbol, points))
    }
}
