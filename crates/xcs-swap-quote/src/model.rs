// ----- standard library imports
// ----- extra library imports
use serde::{Deserialize, Serialize};
// ----- local imports

// ----- end imports

/// One side of the swap form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSelection {
    /// empty, or digits with at most one decimal point
    #[serde(default)]
    pub amount: String,
    pub symbol: String,
    pub chain: String,
}

impl TokenSelection {
    pub fn new(symbol: impl Into<String>, chain: impl Into<String>) -> Self {
        Self {
            amount: String::new(),
            symbol: symbol.into(),
            chain: chain.into(),
        }
    }
}

/// State exposed by a price hook.
///
/// `unit_price_usd` and `error` describe the outcome of the most recent
/// fetch attempt and are never both set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceQuote {
    pub unit_price_usd: Option<f64>,
    pub loading: bool,
    pub error: Option<String>,
}

impl PriceQuote {
    pub fn priced(unit_price_usd: Option<f64>) -> Self {
        Self {
            unit_price_usd,
            loading: false,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            unit_price_usd: None,
            loading: false,
            error: Some(error.into()),
        }
    }
}
