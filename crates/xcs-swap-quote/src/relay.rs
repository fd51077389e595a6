// ----- standard library imports
// ----- extra library imports
use async_trait::async_trait;
use xcs_price_relay_client::PriceRelayClient;
use xcs_webapi::prices as web_prices;
// ----- local imports
use crate::error::Result;

// ----- end imports

/// The two relay endpoints, as seen by the price sources.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PriceRelay: Send + Sync {
    async fn aggregate_price(
        &self,
        coin_ids: &[String],
    ) -> Result<web_prices::AggregatePriceResponse>;
    async fn spot_price(
        &self,
        network: &str,
        tokens: &[String],
    ) -> Result<web_prices::SpotPriceResponse>;
}

#[async_trait]
impl PriceRelay for PriceRelayClient {
    async fn aggregate_price(
        &self,
        coin_ids: &[String],
    ) -> Result<web_prices::AggregatePriceResponse> {
        let prices = PriceRelayClient::aggregate_price(self, coin_ids).await?;
        Ok(prices)
    }

    async fn spot_price(
        &self,
        network: &str,
        tokens: &[String],
    ) -> Result<web_prices::SpotPriceResponse> {
        let prices = PriceRelayClient::spot_price(self, Some(network), tokens).await?;
        Ok(prices)
    }
}
