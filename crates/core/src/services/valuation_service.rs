use chrono::NaiveDate;
use futures::future::join_all;
use std::sync::Arc;

use crate::errors::CoreError;
use crate::models::history::HistoricalSeries;
use crate::models::ledger::{Holding, Ledger};
use crate::models::price::PriceSeries;
use crate::models::settings::Settings;
use crate::models::valuation::{PortfolioValuation, SymbolValue};
use crate::providers::traits::PriceProvider;

/// Values the ledger against fresh provider data.
///
/// Each call fetches one series per holding, concurrently, with no caching
/// and no retries. A symbol that cannot be priced contributes zero and is
/// reported as a warning; it never aborts the other symbols. Fetches are
/// independent, so prices in one valuation may come from slightly different
/// moments.
pub struct ValuationService {
    provider: Arc<dyn PriceProvider>,
    latest_window: (String, String),
    history_window: (String, String),
}

impl ValuationService {
    pub fn new(provider: Arc<dyn PriceProvider>, settings: &Settings) -> Self {
        Self {
            provider,
            latest_window: (settings.latest_period.clone(), settings.latest_interval.clone()),
            history_window: (settings.history_period.clone(), settings.history_interval.clone()),
        }
    }

    /// Name of the provider prices come from.
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Value of all holdings at their latest available close.
    pub async fn current_value(&self, ledger: &Ledger) -> PortfolioValuation {
        let (period, interval) = &self.latest_window;
        let mut valuation = PortfolioValuation::default();

        for (holding, result) in self.fetch_all(ledger, period, interval).await {
            let price = result.and_then(|series| {
                series.latest_close().ok_or_else(|| CoreError::DataUnavailable {
                    symbol: holding.symbol.clone(),
                    message: "provider returned no prices".into(),
                })
            });
            Self::record(&mut valuation, holding, price);
        }

        valuation
    }

    /// Value of all holdings at their close on exactly `date`.
    pub async fn value_on_date(&self, ledger: &Ledger, date: NaiveDate) -> PortfolioValuation {
        let (period, interval) = &self.history_window;
        let mut valuation = PortfolioValuation::default();

        for (holding, result) in self.fetch_all(ledger, period, interval).await {
            let price = result.and_then(|series| {
                series.close_on(date).ok_or_else(|| CoreError::NoDataOnDate {
                    symbol: holding.symbol.clone(),
                    date: date.to_string(),
                })
            });
            Self::record(&mut valuation, holding, price);
        }

        valuation
    }

    /// Close-price history of every holding restricted to `[start, end]`.
    ///
    /// Symbols that fail to fetch are left out and reported in `warnings`;
    /// symbols with no points in the window are kept with an empty series.
    pub async fn historical_series(
        &self,
        ledger: &Ledger,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<HistoricalSeries, CoreError> {
        if start > end {
            return Err(CoreError::ValidationError(format!(
                "start date ({start}) must not be after end date ({end})"
            )));
        }

        let (period, interval) = &self.history_window;
        let mut history = HistoricalSeries {
            start: Some(start),
            end: Some(end),
            ..Default::default()
        };

        for (holding, result) in self.fetch_all(ledger, period, interval).await {
            match result {
                Ok(series) => {
                    history
                        .series
                        .insert(holding.symbol, series.slice(start, end));
                }
                Err(e) => {
                    log::warn!("{e}");
                    history.warnings.push(e);
                }
            }
        }

        Ok(history)
    }

    /// One fetch per holding, run concurrently. Results keep ledger order and
    /// every error is already a per-symbol `DataUnavailable`.
    async fn fetch_all(
        &self,
        ledger: &Ledger,
        period: &str,
        interval: &str,
    ) -> Vec<(Holding, Result<PriceSeries, CoreError>)> {
        let holdings = ledger.holdings();
        let fetches = holdings.iter().map(|h| {
            log::debug!(
                "fetching {} from {} (period={period}, interval={interval})",
                h.symbol,
                self.provider.name()
            );
            self.provider.fetch_series(&h.symbol, period, interval)
        });
        let results = join_all(fetches).await;

        holdings
            .into_iter()
            .zip(results)
            .map(|(holding, result)| {
                let result = result.map_err(|e| Self::unavailable(&holding.symbol, e));
                (holding, result)
            })
            .collect()
    }

    fn unavailable(symbol: &str, error: CoreError) -> CoreError {
        match error {
            CoreError::DataUnavailable { .. } => error,
            other => CoreError::DataUnavailable {
                symbol: symbol.to_string(),
                message: other.to_string(),
            },
        }
    }

    fn record(
        valuation: &mut PortfolioValuation,
        holding: Holding,
        price: Result<f64, CoreError>,
    ) {
        let price = match price {
            Ok(price) => Some(price),
            Err(e) => {
                log::warn!("{e}");
                valuation.warnings.push(e);
                None
            }
        };

        valuation.push(SymbolValue {
            value: price.map_or(0.0, |p| p * holding.quantity as f64),
            symbol: holding.symbol,
            quantity: holding.quantity,
            price,
        });
    }
}
