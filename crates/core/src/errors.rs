use thiserror::Error;

/// Unified error type for the entire portfolio-tracker-core library.
/// Every public function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Ledger ──────────────────────────────────────────────────────
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),

    #[error("Invalid symbol: {0:?}")]
    InvalidSymbol(String),

    #[error("{0} is not in your portfolio")]
    SymbolNotHeld(String),

    #[error("Not enough shares of {symbol} in your portfolio (held {held}, requested {requested})")]
    InsufficientShares {
        symbol: String,
        held: u64,
        requested: u64,
    },

    // ── Valuation ───────────────────────────────────────────────────
    #[error("Price data unavailable for {symbol}: {message}")]
    DataUnavailable { symbol: String, message: String },

    #[error("No data available for {symbol} on {date}")]
    NoDataOnDate { symbol: String, date: String },

    #[error("Validation failed: {0}")]
    ValidationError(String),

    // ── API / Network ───────────────────────────────────────────────
    #[error("API error ({provider}): {message}")]
    Api { provider: String, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("No price provider registered under name: {0}")]
    NoProvider(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

impl CoreError {
    /// Returns `true` for the per-symbol conditions that valuation degrades on
    /// instead of aborting.
    #[must_use]
    pub fn is_per_symbol_warning(&self) -> bool {
        matches!(
            self,
            CoreError::DataUnavailable { .. } | CoreError::NoDataOnDate { .. }
        )
    }
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        // reqwest errors carry the full URL; the query holds the API key.
        let msg = e.to_string();
        let sanitized = if let Some(idx) = msg.find('?') {
            format!("{}?<query redacted>", &msg[..idx])
        } else {
            msg
        };
        CoreError::Network(sanitized)
    }
}
