pub mod errors;
pub mod models;
pub mod providers;
pub mod services;

use chrono::NaiveDate;
use models::{
    history::HistoricalSeries,
    ledger::{Holding, Ledger},
    settings::Settings,
    valuation::PortfolioValuation,
};
use providers::{registry::PriceProviderRegistry, traits::PriceProvider};
use services::{ledger_service::LedgerService, valuation_service::ValuationService};
use std::collections::BTreeMap;
use std::sync::Arc;

use errors::CoreError;

/// Main entry point for the portfolio-tracker core library.
/// Owns the holdings ledger and the services that operate on it.
///
/// State lives only as long as this value; nothing is persisted.
#[must_use]
pub struct PortfolioTracker {
    ledger: Ledger,
    ledger_service: LedgerService,
    valuation_service: ValuationService,
}

impl std::fmt::Debug for PortfolioTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PortfolioTracker")
            .field("holdings", &self.ledger.len())
            .field("provider", &self.valuation_service.provider_name())
            .finish()
    }
}

impl PortfolioTracker {
    /// Create an empty tracker backed by an explicit price provider.
    pub fn new(provider: Arc<dyn PriceProvider>, settings: &Settings) -> Self {
        Self {
            ledger: Ledger::new(),
            ledger_service: LedgerService::new(),
            valuation_service: ValuationService::new(provider, settings),
        }
    }

    /// Create an empty tracker using the provider named in `settings`,
    /// picked from the default provider registry.
    pub fn from_settings(settings: &Settings) -> Result<Self, CoreError> {
        let registry = PriceProviderRegistry::new_with_defaults(&settings.api_keys);
        let provider = registry.require(&settings.provider)?;
        Ok(Self::new(provider, settings))
    }

    // ── Holdings ────────────────────────────────────────────────────

    /// Add shares of a symbol. Returns the quantity now held.
    pub fn add_holding(&mut self, symbol: &str, quantity: i64) -> Result<u64, CoreError> {
        self.ledger_service.add(&mut self.ledger, symbol, quantity)
    }

    /// Remove shares of a symbol. Returns the quantity still held (0 once
    /// the holding is gone).
    pub fn remove_holding(&mut self, symbol: &str, quantity: i64) -> Result<u64, CoreError> {
        self.ledger_service.remove(&mut self.ledger, symbol, quantity)
    }

    /// Read-only view of symbol → quantity.
    #[must_use]
    pub fn snapshot(&self) -> &BTreeMap<String, u64> {
        self.ledger.snapshot()
    }

    /// Current holdings ordered by symbol.
    #[must_use]
    pub fn holdings(&self) -> Vec<Holding> {
        self.ledger.holdings()
    }

    // ── Valuation ───────────────────────────────────────────────────

    /// Portfolio value at the latest available close of each holding.
    pub async fn current_value(&self) -> PortfolioValuation {
        self.valuation_service.current_value(&self.ledger).await
    }

    /// Portfolio value at each holding's close on exactly `date`.
    pub async fn value_on_date(&self, date: NaiveDate) -> PortfolioValuation {
        self.valuation_service.value_on_date(&self.ledger, date).await
    }

    /// Close-price history of every holding over `[start, end]`.
    pub async fn historical_series(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<HistoricalSeries, CoreError> {
        self.valuation_service
            .historical_series(&self.ledger, start, end)
            .await
    }

    /// Name of the provider prices come from.
    #[must_use]
    pub fn provider_name(&self) -> &str {
        self.valuation_service.provider_name()
    }
}
