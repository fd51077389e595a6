// ----- standard library imports
// ----- extra library imports
// ----- local modules
mod address_book;
mod coin_id;
mod spot;
mod symbol;
// ----- local imports
use crate::error::Result;
use crate::relay::PriceRelay;
pub use address_book::{TokenAddressBook, NATIVE_TOKEN};
pub use coin_id::{CoinIdSource, DEFAULT_COIN_ID};
pub use spot::{SpotParams, SpotPriceSource, SpotRequest};
pub use symbol::{default_coin_ids, SymbolPriceSource};

// ----- end imports

/// a missing or zero `usd` entry is "no price yet", not a failure
async fn coin_usd_price(relay: &dyn PriceRelay, coin_id: &str) -> Result<Option<f64>> {
    let prices = relay.aggregate_price(&[coin_id.to_owned()]).await?;
    Ok(prices.usd(coin_id).filter(|usd| *usd != 0.0))
}
