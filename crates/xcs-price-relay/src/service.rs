// ----- standard library imports
// ----- extra library imports
use async_trait::async_trait;
use serde_json::Value;
// ----- local imports
use crate::error::{Error, Result};
use crate::networks::{NetworkTable, DEFAULT_NETWORK};

// ----- end imports

/// Coin-id keyed USD price provider.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AggregatePriceProvider: Send + Sync {
    /// one upstream call for all `coin_ids`, body returned untouched
    async fn simple_price(&self, coin_ids: &[String]) -> Result<Value>;
}

/// Chain-keyed token address USD price provider.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SpotPriceProvider: Send + Sync {
    /// one upstream call for all `tokens` on `chain_id`, body returned untouched
    async fn spot_price(&self, chain_id: &str, tokens: &[String]) -> Result<Value>;
}

#[derive(Clone)]
pub struct Service<Aggregate, Spot> {
    pub aggregate: Aggregate,
    pub spot: Spot,
    pub networks: NetworkTable,
}

impl<Aggregate, Spot> Service<Aggregate, Spot>
where
    Aggregate: AggregatePriceProvider,
{
    pub async fn relay_aggregate_price(&self, coin_ids: &[String]) -> Result<Value> {
        if coin_ids.is_empty() {
            return Err(Error::InvalidRequest(String::from(
                "Invalid coin IDs provided",
            )));
        }
        tracing::debug!("relaying aggregate price for {} coin ids", coin_ids.len());
        self.aggregate.simple_price(coin_ids).await
    }
}

impl<Aggregate, Spot> Service<Aggregate, Spot>
where
    Spot: SpotPriceProvider,
{
    pub async fn relay_spot_price(
        &self,
        network: Option<&str>,
        tokens: &[String],
    ) -> Result<Value> {
        if tokens.is_empty() {
            return Err(Error::InvalidRequest(String::from(
                "Tokens array is required",
            )));
        }
        let network = network.unwrap_or(DEFAULT_NETWORK);
        let chain_id = self
            .networks
            .chain_id(network)
            .ok_or_else(|| Error::UnsupportedNetwork(network.to_owned()))?;
        tracing::debug!(
            "relaying spot price for {} tokens on {} (chain {})",
            tokens.len(),
            network,
            chain_id
        );
        self.spot.spot_price(chain_id, tokens).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use serde_json::json;

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn service(
        aggregate: MockAggregatePriceProvider,
        spot: MockSpotPriceProvider,
    ) -> Service<MockAggregatePriceProvider, MockSpotPriceProvider> {
        Service {
            aggregate,
            spot,
            networks: NetworkTable::default(),
        }
    }

    #[tokio::test]
    async fn aggregate_single_upstream_call_with_all_ids() {
        let mut aggregate = MockAggregatePriceProvider::new();
        aggregate
            .expect_simple_price()
            .withf(|coin_ids| coin_ids.join(",") == "tron,ethereum")
            .times(1)
            .returning(|_| Ok(json!({"tron": {"usd": 0.25}, "ethereum": {"usd": 3000.0}})));
        let relay = service(aggregate, MockSpotPriceProvider::new());

        let body = relay
            .relay_aggregate_price(&ids(&["tron", "ethereum"]))
            .await
            .unwrap();
        assert_eq!(body["tron"]["usd"], json!(0.25));
        assert_eq!(body["ethereum"]["usd"], json!(3000.0));
    }

    #[tokio::test]
    async fn aggregate_empty_ids_never_reaches_upstream() {
        let mut aggregate = MockAggregatePriceProvider::new();
        aggregate.expect_simple_price().never();
        let relay = service(aggregate, MockSpotPriceProvider::new());

        let err = relay.relay_aggregate_price(&[]).await.unwrap_err();
        assert!(matches!(err, Error::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn aggregate_upstream_failure_propagates() {
        let mut aggregate = MockAggregatePriceProvider::new();
        aggregate
            .expect_simple_price()
            .returning(|_| Err(Error::AggregateUpstream(StatusCode::TOO_MANY_REQUESTS)));
        let relay = service(aggregate, MockSpotPriceProvider::new());

        let err = relay
            .relay_aggregate_price(&ids(&["tron"]))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::AggregateUpstream(StatusCode::TOO_MANY_REQUESTS)
        ));
    }

    #[tokio::test]
    async fn spot_defaults_to_ethereum() {
        let mut spot = MockSpotPriceProvider::new();
        spot.expect_spot_price()
            .withf(|chain_id, tokens| chain_id.to_string() == "1" && tokens.len() == 1)
            .times(1)
            .returning(|_, _| Ok(json!({"0xeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeee": "3012.5"})));
        let relay = service(MockAggregatePriceProvider::new(), spot);

        let tokens = ids(&["0xeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeee"]);
        let body = relay.relay_spot_price(None, &tokens).await.unwrap();
        assert_eq!(
            body["0xeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeee"],
            json!("3012.5")
        );
    }

    #[tokio::test]
    async fn spot_resolves_network_case_insensitively() {
        let mut spot = MockSpotPriceProvider::new();
        spot.expect_spot_price()
            .withf(|chain_id, _| chain_id.to_string() == "42161")
            .times(1)
            .returning(|_, _| Ok(json!({})));
        let relay = service(MockAggregatePriceProvider::new(), spot);

        let tokens = ids(&["0x82af49447d8a07e3bd95bd0d56f35241523fbab1"]);
        relay
            .relay_spot_price(Some("ArBiTrUm"), &tokens)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn spot_unsupported_network_never_reaches_upstream() {
        let mut spot = MockSpotPriceProvider::new();
        spot.expect_spot_price().never();
        let relay = service(MockAggregatePriceProvider::new(), spot);

        let err = relay
            .relay_spot_price(Some("Tron"), &ids(&["0xabc"]))
            .await
            .unwrap_err();
        match err {
            Error::UnsupportedNetwork(network) => assert_eq!(network, "Tron"),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[tokio::test]
    async fn spot_empty_tokens_checked_before_network() {
        let mut spot = MockSpotPriceProvider::new();
        spot.expect_spot_price().never();
        let relay = service(MockAggregatePriceProvider::new(), spot);

        let err = relay
            .relay_spot_price(Some("nowhere"), &[])
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn spot_upstream_status_propagates() {
        let mut spot = MockSpotPriceProvider::new();
        spot.expect_spot_price()
            .returning(|_, _| Err(Error::SpotUpstream(StatusCode::UNAUTHORIZED)));
        let relay = service(MockAggregatePriceProvider::new(), spot);

        let err = relay
            .relay_spot_price(Some("polygon"), &ids(&["0xabc"]))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::SpotUpstream(StatusCode::UNAUTHORIZED)));
    }
}
