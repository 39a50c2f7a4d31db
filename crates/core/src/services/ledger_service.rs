use crate::errors::CoreError;
use crate::models::ledger::Ledger;

/// Mutates the holdings ledger.
///
/// Pure business logic — no I/O, no API calls. Every operation either
/// applies fully or leaves the ledger untouched.
pub struct LedgerService;

impl LedgerService {
    pub fn new() -> Self {
        Self
    }

    /// Add `quantity` shares of `symbol`, accumulating onto an existing
    /// holding. Returns the quantity now held.
    pub fn add(&self, ledger: &mut Ledger, symbol: &str, quantity: i64) -> Result<u64, CoreError> {
        let symbol = Self::normalize_symbol(symbol)?;
        let quantity = Self::validate_quantity(quantity)?;

        let held = ledger.holdings.get(&symbol).copied().unwrap_or(0);
        let total = held.checked_add(quantity).ok_or_else(|| {
            CoreError::InvalidQuantity(format!(
                "adding {quantity} to {held} shares of {symbol} overflows"
            ))
        })?;

        ledger.holdings.insert(symbol, total);
        Ok(total)
    }

    /// Remove `quantity` shares of `symbol`. Returns the quantity still held;
    /// a holding that reaches zero is deleted and 0 is returned.
    ///
    /// Fails without touching the ledger when the symbol is not held or
    /// fewer than `quantity` shares are held.
    pub fn remove(&self, ledger: &mut Ledger, symbol: &str, quantity: i64) -> Result<u64, CoreError> {
        let symbol = Self::normalize_symbol(symbol)?;
        let quantity = Self::validate_quantity(quantity)?;

        let held = ledger
            .holdings
            .get(&symbol)
            .copied()
            .ok_or_else(|| CoreError::SymbolNotHeld(symbol.clone()))?;

        if held < quantity {
            return Err(CoreError::InsufficientShares {
                symbol,
                held,
                requested: quantity,
            });
        }

        let remaining = held - quantity;
        if remaining == 0 {
            ledger.holdings.remove(&symbol);
        } else {
            ledger.holdings.insert(symbol, remaining);
        }
        Ok(remaining)
    }

    /// Parse a user-supplied quantity. Anything that is not a positive
    /// whole number is rejected.
    pub fn parse_quantity(input: &str) -> Result<i64, CoreError> {
        let trimmed = input.trim();
        let quantity: i64 = trimmed.parse().map_err(|_| {
            CoreError::InvalidQuantity(format!("'{trimmed}' is not a whole number"))
        })?;
        Self::validate_quantity(quantity)?;
        Ok(quantity)
    }

    /// Trim and uppercase a ticker symbol, rejecting blanks.
    pub fn normalize_symbol(symbol: &str) -> Result<String, CoreError> {
        let trimmed = symbol.trim();
        if trimmed.is_empty() || trimmed.chars().any(char::is_whitespace) {
            return Err(CoreError::InvalidSymbol(symbol.to_string()));
        }
        Ok(trimmed.to_uppercase())
    }

    fn validate_quantity(quantity: i64) -> Result<u64, CoreError> {
        if quantity <= 0 {
            return Err(CoreError::InvalidQuantity(format!(
                "{quantity} (must be a positive whole number)"
            )));
        }
        Ok(quantity as u64)
    }
}

impl Default for LedgerService {
    fn default() -> Self {
        Self::new()
    }
}
