use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::price::PriceSeries;

/// Trait abstraction for market-data sources.
///
/// Each API (Yahoo Finance, Alpha Vantage) implements this trait. The
/// valuation code only ever sees `dyn PriceProvider`, so tests swap in an
/// in-memory provider and the shell picks one by name at startup.
#[async_trait]
pub trait PriceProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Fetch the close-price series for `symbol`.
    ///
    /// `period` and `interval` are provider tokens such as "1d" or "max",
    /// passed through without validation. Returns a series sorted by date,
    /// possibly empty. Any failure (unknown symbol, network, provider
    /// outage) is an `Err`; the caller decides how to degrade.
    async fn fetch_series(
        &self,
        symbol: &str,
        period: &str,
        interval: &str,
    ) -> Result<PriceSeries, CoreError>;
}
