use std::collections::HashMap;
use std::sync::Arc;

use super::alphavantage::AlphaVantageProvider;
use super::traits::PriceProvider;
use super::yahoo_finance::YahooFinanceProvider;
use crate::errors::CoreError;

/// Registry key for the Yahoo Finance provider.
pub const YAHOO: &str = "yahoo";
/// Registry key (and API-key name) for the Alpha Vantage provider.
pub const ALPHAVANTAGE: &str = "alphavantage";

/// Registry of all available price providers.
///
/// Providers are looked up by a short key (case-insensitive), so the
/// shell can choose one from configuration. New providers can be added
/// without modifying existing code.
pub struct PriceProviderRegistry {
    providers: Vec<(String, Arc<dyn PriceProvider>)>,
}

impl PriceProviderRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
        }
    }

    /// Create a registry with all default providers pre-configured.
    pub fn new_with_defaults(api_keys: &HashMap<String, String>) -> Self {
        let mut registry = Self::new();

        // Yahoo Finance — stocks, NO API key needed
        match YahooFinanceProvider::new() {
            Ok(yahoo) => registry.register(YAHOO, Arc::new(yahoo)),
            Err(e) => log::warn!("Yahoo Finance provider unavailable: {e}"),
        }

        // Alpha Vantage — stocks, requires API key
        if let Some(key) = api_keys.get(ALPHAVANTAGE) {
            registry.register(ALPHAVANTAGE, Arc::new(AlphaVantageProvider::new(key.clone())));
        }

        registry
    }

    /// Register a provider under `key`. A later registration with the same
    /// key replaces the earlier one.
    pub fn register(&mut self, key: &str, provider: Arc<dyn PriceProvider>) {
        let key = key.to_lowercase();
        self.providers.retain(|(k, _)| *k != key);
        self.providers.push((key, provider));
    }

    /// Look up a provider by key.
    pub fn get(&self, key: &str) -> Option<Arc<dyn PriceProvider>> {
        let key = key.to_lowercase();
        self.providers
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, p)| Arc::clone(p))
    }

    /// Look up a provider by key, failing with `NoProvider` when missing.
    pub fn require(&self, key: &str) -> Result<Arc<dyn PriceProvider>, CoreError> {
        self.get(key)
            .ok_or_else(|| CoreError::NoProvider(key.to_string()))
    }

    /// Registered keys, in registration order.
    pub fn keys(&self) -> Vec<&str> {
        self.providers.iter().map(|(k, _)| k.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl Default for PriceProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}
