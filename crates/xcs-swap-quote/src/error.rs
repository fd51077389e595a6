// ----- standard library imports
// ----- extra library imports
use thiserror::Error;
// ----- local imports

// ----- end imports

pub type Result<T> = std::result::Result<T, Error>;

/// Failures a price hook records in its `error` slot.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Unsupported token: {0}")]
    UnsupportedToken(String),
    #[error("Token {symbol} not supported on {network}")]
    TokenNotOnNetwork { symbol: String, network: String },
    #[error("Price data not available")]
    PriceNotAvailable,

    #[error("{0}")]
    Relay(#[from] xcs_price_relay_client::Error),
}
