// ----- standard library imports
use std::sync::Arc;
// ----- extra library imports
use async_trait::async_trait;
// ----- local imports
use crate::error::{Error, Result};
use crate::hook::PriceSource;
use crate::model::TokenSelection;
use crate::quote::positive_amount;
use crate::relay::PriceRelay;
use crate::sources::TokenAddressBook;

// ----- end imports

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpotParams {
    pub symbol: String,
    /// lowercased chain name
    pub network: String,
    pub amount: String,
}

#[derive(Debug)]
pub struct SpotRequest {
    network: String,
    address: String,
}

/// Prices a token by contract address on its chain.
///
/// The entered amount is part of the parameters so every settled edit
/// refetches; an empty or non-positive amount prices nothing.
pub struct SpotPriceSource {
    relay: Arc<dyn PriceRelay>,
    book: TokenAddressBook,
}

impl SpotPriceSource {
    pub fn new(relay: Arc<dyn PriceRelay>, book: TokenAddressBook) -> Self {
        Self { relay, book }
    }
}

#[async_trait]
impl PriceSource for SpotPriceSource {
    type Params = SpotParams;
    type Request = SpotRequest;

    fn name(&self) -> &'static str {
        "spot"
    }

    fn params_for(&self, selection: &TokenSelection) -> SpotParams {
        SpotParams {
            symbol: selection.symbol.clone(),
            network: selection.chain.to_lowercase(),
            amount: selection.amount.clone(),
        }
    }

    fn prepare(&self, params: &SpotParams) -> Result<Option<SpotRequest>> {
        if params.symbol.is_empty() || positive_amount(&params.amount).is_none() {
            return Ok(None);
        }
        let address = self
            .book
            .address(&params.symbol, &params.network)
            .ok_or_else(|| Error::TokenNotOnNetwork {
                symbol: params.symbol.clone(),
                network: params.network.clone(),
            })?;
        Ok(Some(SpotRequest {
            network: params.network.clone(),
            address: address.to_owned(),
        }))
    }

    async fn fetch(&self, request: SpotRequest) -> Result<Option<f64>> {
        let SpotRequest { network, address } = request;
        let prices = self
            .relay
            .spot_price(&network, std::slice::from_ref(&address))
            .await?;
        let price = prices
            .0
            .iter()
            .find(|(token, _)| token.eq_ignore_ascii_case(&address))
            .and_then(|(_, usd)| usd.parse::<f64>().ok())
            .filter(|usd| usd.is_finite())
            .ok_or(Error::PriceNotAvailable)?;
        Ok(Some(price))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relay::MockPriceRelay;
    use crate::sources::NATIVE_TOKEN;
    use std::collections::HashMap;
    use xcs_webapi::prices::SpotPriceResponse;

    fn selection(symbol: &str, chain: &str, amount: &str) -> TokenSelection {
        TokenSelection {
            amount: amount.to_owned(),
            symbol: symbol.to_owned(),
            chain: chain.to_owned(),
        }
    }

    fn source(relay: MockPriceRelay) -> SpotPriceSource {
        SpotPriceSource::new(Arc::new(relay), TokenAddressBook::default())
    }

    #[test]
    fn params_lowercase_the_chain() {
        let source = source(MockPriceRelay::new());
        let params = source.params_for(&selection("ETH", "Ethereum", "1.5"));
        assert_eq!(params.network, "ethereum");
        assert_eq!(params.amount, "1.5");
    }

    #[test]
    fn nothing_to_price_without_a_positive_amount() {
        let source = source(MockPriceRelay::new());
        for amount in ["", "0", "0.0", "."] {
            let params = source.params_for(&selection("ETH", "Ethereum", amount));
            assert!(source.prepare(&params).unwrap().is_none(), "{amount}");
        }
        let params = source.params_for(&selection("", "Ethereum", "1"));
        assert!(source.prepare(&params).unwrap().is_none());
    }

    #[test]
    fn unknown_token_fails_fast() {
        let source = source(MockPriceRelay::new());
        let params = source.params_for(&selection("TRX", "Tron", "1"));
        let err = source.prepare(&params).unwrap_err();
        assert_eq!(err.to_string(), "Token TRX not supported on tron");
    }

    #[tokio::test]
    async fn fetches_by_address() {
        let mut relay = MockPriceRelay::new();
        relay
            .expect_spot_price()
            .withf(|network, tokens| {
                network.to_string() == "arbitrum" && tokens.join(",") == NATIVE_TOKEN
            })
            .times(1)
            .returning(|_, _| {
                Ok(SpotPriceResponse(HashMap::from([(
                    NATIVE_TOKEN.to_uppercase().replace("0X", "0x"),
                    String::from("3012.25"),
                )])))
            });
        let source = source(relay);

        let params = source.params_for(&selection("ETH", "Arbitrum", "2"));
        let request = source.prepare(&params).unwrap().unwrap();
        let price = source.fetch(request).await.unwrap();
        assert_eq!(price, Some(3012.25));
    }

    #[tokio::test]
    async fn missing_entry_is_price_not_available() {
        let mut relay = MockPriceRelay::new();
        relay
            .expect_spot_price()
            .returning(|_, _| Ok(SpotPriceResponse::default()));
        let source = source(relay);

        let params = source.params_for(&selection("WETH", "ethereum", "1"));
        let request = source.prepare(&params).unwrap().unwrap();
        let err = source.fetch(request).await.unwrap_err();
        assert_eq!(err.to_string(), "Price data not available");
    }
}
