use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// What one holding contributed to a valuation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolValue {
    pub symbol: String,
    pub quantity: u64,

    /// Close price used, `None` when the symbol degraded to zero
    pub price: Option<f64>,

    /// `quantity * price`, or 0.0 without a price
    pub value: f64,
}

/// Result of a portfolio valuation (latest or on a date).
///
/// Derived on every request and never stored. A symbol whose price could not
/// be obtained contributes zero and shows up in `warnings` instead of failing
/// the whole valuation.
#[derive(Debug, Default)]
pub struct PortfolioValuation {
    /// Sum of all contributions
    pub total: f64,

    /// One entry per holding, ordered by symbol
    pub contributions: Vec<SymbolValue>,

    /// `DataUnavailable` / `NoDataOnDate` for the symbols that contributed zero
    pub warnings: Vec<CoreError>,
}

impl PortfolioValuation {
    pub(crate) fn push(&mut self, contribution: SymbolValue) {
        self.total += contribution.value;
        self.contributions.push(contribution);
    }

    /// Contribution for `symbol`, if it is held.
    pub fn contribution(&self, symbol: &str) -> Option<&SymbolValue> {
        let upper = symbol.trim().to_uppercase();
        self.contributions.iter().find(|c| c.symbol == upper)
    }

    /// `true` when every holding was priced.
    pub fn is_complete(&self) -> bool {
        self.warnings.is_empty()
    }
}
