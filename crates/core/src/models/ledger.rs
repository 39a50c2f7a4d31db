use std::collections::BTreeMap;

/// A single (symbol, quantity) pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Holding {
    /// Ticker symbol, uppercased (e.g., "AAPL", "MSFT")
    pub symbol: String,

    /// Number of shares, always > 0 while held
    pub quantity: u64,
}

/// All current holdings: symbol → quantity.
///
/// Lives for the duration of the process and is never written anywhere.
/// Mutated only through `LedgerService`, which guarantees that no entry
/// ever carries a zero quantity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    pub(crate) holdings: BTreeMap<String, u64>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read-only view of the holdings map.
    pub fn snapshot(&self) -> &BTreeMap<String, u64> {
        &self.holdings
    }

    /// Shares held for `symbol` (case-insensitive), `None` if not held.
    pub fn quantity_of(&self, symbol: &str) -> Option<u64> {
        self.holdings.get(&symbol.trim().to_uppercase()).copied()
    }

    /// Holdings as owned pairs, ordered by symbol.
    pub fn holdings(&self) -> Vec<Holding> {
        self.holdings
            .iter()
            .map(|(symbol, quantity)| Holding {
                symbol: symbol.clone(),
                quantity: *quantity,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.holdings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.holdings.is_empty()
    }
}
