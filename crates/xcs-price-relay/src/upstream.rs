// ----- standard library imports
// ----- extra library imports
use async_trait::async_trait;
use reqwest::Url;
use serde_json::Value;
// ----- local imports
use crate::error::{Error, Result};
use crate::service::{AggregatePriceProvider, SpotPriceProvider};

// ----- end imports

pub const DEFAULT_AGGREGATE_BASE_URL: &str = "https://api.coingecko.com/api/v3/";
pub const DEFAULT_SPOT_BASE_URL: &str = "https://api.1inch.dev/";
const QUOTE_CURRENCY: &str = "USD";

fn default_aggregate_base_url() -> Url {
    Url::parse(DEFAULT_AGGREGATE_BASE_URL).expect("default aggregate url")
}

fn default_spot_base_url() -> Url {
    Url::parse(DEFAULT_SPOT_BASE_URL).expect("default spot url")
}

#[derive(Clone, Debug, serde::Deserialize)]
pub struct AggregateUpstreamConfig {
    #[serde(default = "default_aggregate_base_url")]
    pub base_url: Url,
}

impl Default for AggregateUpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_aggregate_base_url(),
        }
    }
}

#[derive(Clone, serde::Deserialize)]
pub struct SpotUpstreamConfig {
    #[serde(default = "default_spot_base_url")]
    pub base_url: Url,
    #[serde(default)]
    pub api_key: String,
}

impl Default for SpotUpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_spot_base_url(),
            api_key: String::new(),
        }
    }
}

impl std::fmt::Debug for SpotUpstreamConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let api_key = if self.api_key.is_empty() {
            "<unset>"
        } else {
            "<redacted>"
        };
        f.debug_struct("SpotUpstreamConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &api_key)
            .finish()
    }
}

/// coin-id keyed USD prices, `simple/price` flavour
#[derive(Debug, Clone)]
pub struct CoinGeckoClient {
    cl: reqwest::Client,
    base: Url,
}

impl CoinGeckoClient {
    pub fn new(cfg: AggregateUpstreamConfig) -> Self {
        Self {
            cl: reqwest::Client::new(),
            base: cfg.base_url,
        }
    }
}

#[async_trait]
impl AggregatePriceProvider for CoinGeckoClient {
    async fn simple_price(&self, coin_ids: &[String]) -> Result<Value> {
        let mut url = self.base.join("simple/price")?;
        url.query_pairs_mut()
            .append_pair("ids", &coin_ids.join(","))
            .append_pair("vs_currencies", "usd");
        tracing::debug!("GET {}", url);

        let res = self
            .cl
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(Error::AggregateRequest)?;
        if !res.status().is_success() {
            return Err(Error::AggregateUpstream(res.status()));
        }
        res.json().await.map_err(Error::AggregateRequest)
    }
}

/// chain-keyed token address USD prices, `price/v1.1` flavour
#[derive(Clone)]
pub struct OneInchClient {
    cl: reqwest::Client,
    base: Url,
    api_key: String,
}

impl OneInchClient {
    pub fn new(cfg: SpotUpstreamConfig) -> Self {
        let SpotUpstreamConfig { base_url, api_key } = cfg;
        if api_key.is_empty() {
            tracing::warn!("spot upstream api key is not set, requests will be rejected upstream");
        }
        Self {
            cl: reqwest::Client::new(),
            base: base_url,
            api_key,
        }
    }
}

#[derive(Debug, serde::Serialize)]
struct SpotUpstreamRequest<'a> {
    tokens: &'a [String],
    currency: &'static str,
}

#[async_trait]
impl SpotPriceProvider for OneInchClient {
    async fn spot_price(&self, chain_id: &str, tokens: &[String]) -> Result<Value> {
        let url = self.base.join(&format!("price/v1.1/{chain_id}"))?;
        let request = SpotUpstreamRequest {
            tokens,
            currency: QUOTE_CURRENCY,
        };
        tracing::debug!("POST {} with {} tokens", url, tokens.len());

        let res = self
            .cl
            .post(url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(Error::SpotRequest)?;
        let status = res.status();
        if !status.is_success() {
            let text = res.text().await.unwrap_or_default();
            tracing::error!("1inch API error {}: {}", status, text);
            return Err(Error::SpotUpstream(status));
        }
        let body: Value = res.json().await.map_err(Error::SpotRequest)?;
        tracing::debug!("1inch API response: {}", body);
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::{Json, Path, Query, State};
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::{get, post};
    use axum::Router;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    type Seen = Arc<Mutex<Vec<String>>>;

    fn fake_upstream(router: Router) -> axum_test::TestServer {
        let cfg = axum_test::TestServerConfig {
            transport: Some(axum_test::Transport::HttpRandomPort),
            ..Default::default()
        };
        axum_test::TestServer::new_with_config(router, cfg).expect("fake upstream")
    }

    async fn simple_price(
        State(seen): State<Seen>,
        headers: HeaderMap,
        Query(query): Query<HashMap<String, String>>,
    ) -> Json<Value> {
        let accept = headers
            .get("accept")
            .and_then(|h| h.to_str().ok())
            .unwrap_or_default()
            .to_owned();
        let mut seen = seen.lock().unwrap();
        seen.push(query.get("ids").cloned().unwrap_or_default());
        seen.push(query.get("vs_currencies").cloned().unwrap_or_default());
        seen.push(accept);
        Json(json!({"tron": {"usd": 0.2712}}))
    }

    async fn spot_price(
        State(seen): State<Seen>,
        Path(chain): Path<String>,
        headers: HeaderMap,
        Json(body): Json<Value>,
    ) -> (StatusCode, Json<Value>) {
        let auth = headers
            .get("authorization")
            .and_then(|h| h.to_str().ok())
            .unwrap_or_default()
            .to_owned();
        let mut seen = seen.lock().unwrap();
        seen.push(chain);
        seen.push(auth.clone());
        seen.push(body.to_string());
        if auth != "Bearer s3cret" {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({"description": "invalid api key"})),
            );
        }
        (
            StatusCode::OK,
            Json(json!({"0xc2132d05d31c914a87c6611c10748aeb04b58e8f": "0.9998"})),
        )
    }

    #[tokio::test]
    async fn coingecko_wire_format() {
        let seen = Seen::default();
        let router = Router::new()
            .route("/simple/price", get(simple_price))
            .with_state(seen.clone());
        let server = fake_upstream(router);
        let client = CoinGeckoClient::new(AggregateUpstreamConfig {
            base_url: server.server_address().expect("address"),
        });

        let ids = vec![String::from("tron"), String::from("ethereum")];
        let body = client.simple_price(&ids).await.unwrap();
        assert_eq!(body, json!({"tron": {"usd": 0.2712}}));

        let seen = seen.lock().unwrap();
        assert_eq!(
            *seen,
            vec![
                String::from("tron,ethereum"),
                String::from("usd"),
                String::from("application/json")
            ]
        );
    }

    #[tokio::test]
    async fn coingecko_non_2xx_is_upstream_error() {
        let router = Router::new().route(
            "/simple/price",
            get(|| async { (StatusCode::TOO_MANY_REQUESTS, "slow down") }),
        );
        let server = fake_upstream(router);
        let client = CoinGeckoClient::new(AggregateUpstreamConfig {
            base_url: server.server_address().expect("address"),
        });

        let err = client
            .simple_price(&[String::from("tron")])
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::AggregateUpstream(StatusCode::TOO_MANY_REQUESTS)
        ));
    }

    #[tokio::test]
    async fn oneinch_wire_format() {
        let seen = Seen::default();
        let router = Router::new()
            .route("/price/v1.1/{chain}", post(spot_price))
            .with_state(seen.clone());
        let server = fake_upstream(router);
        let client = OneInchClient::new(SpotUpstreamConfig {
            base_url: server.server_address().expect("address"),
            api_key: String::from("s3cret"),
        });

        let tokens = vec![String::from("0xc2132d05d31c914a87c6611c10748aeb04b58e8f")];
        let body = client.spot_price("137", &tokens).await.unwrap();
        assert_eq!(
            body["0xc2132d05d31c914a87c6611c10748aeb04b58e8f"],
            json!("0.9998")
        );

        let seen = seen.lock().unwrap();
        assert_eq!(seen[0], "137");
        assert_eq!(seen[1], "Bearer s3cret");
        let sent: Value = serde_json::from_str(&seen[2]).unwrap();
        assert_eq!(
            sent,
            json!({
                "tokens": ["0xc2132d05d31c914a87c6611c10748aeb04b58e8f"],
                "currency": "USD"
            })
        );
    }

    #[tokio::test]
    async fn oneinch_forwards_upstream_status() {
        let seen = Seen::default();
        let router = Router::new()
            .route("/price/v1.1/{chain}", post(spot_price))
            .with_state(seen);
        let server = fake_upstream(router);
        let client = OneInchClient::new(SpotUpstreamConfig {
            base_url: server.server_address().expect("address"),
            api_key: String::from("wrong"),
        });

        let err = client
            .spot_price("1", &[String::from("0xabc")])
            .await
            .unwrap_err();
        assert!(matches!(err, Error::SpotUpstream(StatusCode::UNAUTHORIZED)));
        assert_eq!(err.to_string(), "1inch API error: 401");
    }

    #[test]
    fn spot_config_debug_hides_key() {
        let cfg = SpotUpstreamConfig {
            api_key: String::from("s3cret"),
            ..Default::default()
        };
        let printed = format!("{cfg:?}");
        assert!(!printed.contains("s3cret"));
        assert!(printed.contains("<redacted>"));
    }
}
