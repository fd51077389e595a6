// ----- standard library imports
use std::collections::HashMap;
use std::sync::Arc;
// ----- extra library imports
use async_trait::async_trait;
// ----- local imports
use crate::error::{Error, Result};
use crate::hook::PriceSource;
use crate::model::TokenSelection;
use crate::relay::PriceRelay;

// ----- end imports

/// ETH -> ethereum, TRX -> tron
pub fn default_coin_ids() -> HashMap<String, String> {
    HashMap::from([
        (String::from("ETH"), String::from("ethereum")),
        (String::from("TRX"), String::from("tron")),
    ])
}

/// Prices the selected symbol through its aggregator coin id.
pub struct SymbolPriceSource {
    relay: Arc<dyn PriceRelay>,
    coin_ids: HashMap<String, String>,
}

impl SymbolPriceSource {
    pub fn new(relay: Arc<dyn PriceRelay>, coin_ids: &HashMap<String, String>) -> Self {
        let coin_ids = coin_ids
            .iter()
            .map(|(symbol, coin_id)| (symbol.to_uppercase(), coin_id.clone()))
            .collect();
        Self { relay, coin_ids }
    }
}

#[async_trait]
impl PriceSource for SymbolPriceSource {
    type Params = String;
    type Request = String;

    fn name(&self) -> &'static str {
        "symbol"
    }

    fn params_for(&self, selection: &TokenSelection) -> String {
        selection.symbol.clone()
    }

    fn prepare(&self, symbol: &String) -> Result<Option<String>> {
        self.coin_ids
            .get(&symbol.to_uppercase())
            .cloned()
            .map(Some)
            .ok_or_else(|| Error::UnsupportedToken(symbol.clone()))
    }

    async fn fetch(&self, coin_id: String) -> Result<Option<f64>> {
        super::coin_usd_price(self.relay.as_ref(), &coin_id).await
    }
}
