// ----- standard library imports
use std::sync::Arc;
// ----- extra library imports
use async_trait::async_trait;
// ----- local imports
use crate::error::Result;
use crate::hook::PriceSource;
use crate::model::TokenSelection;
use crate::relay::PriceRelay;

// ----- end imports

pub const DEFAULT_COIN_ID: &str = "tron";

/// Prices one fixed coin, whatever the form side holds.
pub struct CoinIdSource {
    relay: Arc<dyn PriceRelay>,
    coin_id: String,
}

impl CoinIdSource {
    pub fn new(relay: Arc<dyn PriceRelay>, coin_id: impl Into<String>) -> Self {
        Self {
            relay,
            coin_id: coin_id.into(),
        }
    }
}

#[async_trait]
impl PriceSource for CoinIdSource {
    type Params = ();
    type Request = String;

    fn name(&self) -> &'static str {
        "coin-id"
    }

    fn params_for(&self, _selection: &TokenSelection) -> Self::Params {}

    fn prepare(&self, _params: &Self::Params) -> Result<Option<String>> {
        Ok(Some(self.coin_id.clone()))
    }

    async fn fetch(&self, coin_id: String) -> Result<Option<f64>> {
        super::coin_usd_price(self.relay.as_ref(), &coin_id).await
    }
}
