// ----- standard library imports
use std::collections::HashMap;
// ----- extra library imports
use axum::extract::FromRef;
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
// ----- local modules
mod error;
mod networks;
mod service;
mod upstream;
mod web;
// ----- local imports
pub use error::{Error, Result};
pub use networks::{NetworkTable, DEFAULT_NETWORK};
pub use service::{AggregatePriceProvider, Service, SpotPriceProvider};
pub use upstream::{AggregateUpstreamConfig, SpotUpstreamConfig};

// ----- end imports

pub type ProdAggregateProvider = upstream::CoinGeckoClient;
pub type ProdSpotProvider = upstream::OneInchClient;
pub type ProdRelayService = service::Service<ProdAggregateProvider, ProdSpotProvider>;

#[derive(Clone, Debug, Default, serde::Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    aggregate: AggregateUpstreamConfig,
    #[serde(default)]
    spot: SpotUpstreamConfig,
    /// replaces the built-in network -> chain id table when present
    #[serde(default)]
    networks: Option<HashMap<String, String>>,
}

#[derive(Clone, FromRef)]
pub struct AppController {
    relay: ProdRelayService,
}

impl AppController {
    pub fn new(cfg: AppConfig) -> Self {
        let AppConfig {
            aggregate,
            spot,
            networks,
        } = cfg;

        let networks = networks.map(NetworkTable::new).unwrap_or_default();
        tracing::info!("spot relay supports {} networks", networks.len());
        let relay = ProdRelayService {
            aggregate: ProdAggregateProvider::new(aggregate),
            spot: ProdSpotProvider::new(spot),
            networks,
        };
        Self { relay }
    }
}

pub fn routes(ctrl: AppController) -> Router {
    relay_routes::<_, ProdAggregateProvider, ProdSpotProvider>(ctrl)
}

fn relay_routes<Cntrlr, Aggregate, Spot>(ctrl: Cntrlr) -> Router
where
    Aggregate: service::AggregatePriceProvider + Clone + 'static,
    Spot: service::SpotPriceProvider + Clone + 'static,
    service::Service<Aggregate, Spot>: FromRef<Cntrlr>,
    Cntrlr: Send + Sync + Clone + 'static,
{
    let relay = Router::new()
        .route(
            "/api/coingecko-price",
            post(web::post_aggregate_price::<Aggregate, Spot>),
        )
        .route(
            "/api/spot-price",
            post(web::post_spot_price::<Aggregate, Spot>),
        )
        // browser front ends call the relay from another origin
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_headers(Any)
                .allow_methods(Any),
        )
        .with_state(ctrl);

    Router::new()
        .route("/health", get(web::health))
        .route("/api-docs/openapi.json", get(openapi_json))
        .merge(relay)
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[derive(utoipa::OpenApi)]
#[openapi(
    components(schemas(
        xcs_webapi::errors::ErrorResponse,
        xcs_webapi::prices::AggregatePriceRequest,
        xcs_webapi::prices::AggregatePriceResponse,
        xcs_webapi::prices::SpotPriceRequest,
        xcs_webapi::prices::SpotPriceResponse,
        xcs_webapi::prices::UsdPrice,
    ),),
    paths(
        crate::web::health,
        crate::web::post_aggregate_price,
        crate::web::post_spot_price,
    )
)]
struct ApiDoc;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils {
    use super::*;
    use async_trait::async_trait;
    use axum::http::StatusCode;
    use serde_json::{json, Value};

    /// In-memory upstream serving fixed prices for both relay endpoints.
    #[derive(Clone, Debug, Default)]
    pub struct StaticPrices {
        coins: HashMap<String, f64>,
        tokens: HashMap<String, String>,
        outage: Option<u16>,
    }

    impl StaticPrices {
        pub fn with_coin(mut self, coin_id: &str, usd: f64) -> Self {
            self.coins.insert(coin_id.to_owned(), usd);
            self
        }

        pub fn with_token(mut self, address: &str, usd: &str) -> Self {
            self.tokens.insert(address.to_lowercase(), usd.to_owned());
            self
        }

        /// every upstream call fails with `status`
        pub fn with_outage(mut self, status: u16) -> Self {
            self.outage = Some(status);
            self
        }

        fn outage_status(&self) -> Option<StatusCode> {
            self.outage
                .map(|code| StatusCode::from_u16(code).unwrap_or(StatusCode::BAD_GATEWAY))
        }
    }

    #[async_trait]
    impl AggregatePriceProvider for StaticPrices {
        async fn simple_price(&self, coin_ids: &[String]) -> Result<Value> {
            if let Some(status) = self.outage_status() {
                return Err(Error::AggregateUpstream(status));
            }
            let body: serde_json::Map<String, Value> = coin_ids
                .iter()
                .filter_map(|id| {
                    self.coins
                        .get(id)
                        .map(|usd| (id.clone(), json!({ "usd": usd })))
                })
                .collect();
            Ok(Value::Object(body))
        }
    }

    #[async_trait]
    impl SpotPriceProvider for StaticPrices {
        async fn spot_price(&self, _chain_id: &str, tokens: &[String]) -> Result<Value> {
            if let Some(status) = self.outage_status() {
                return Err(Error::SpotUpstream(status));
            }
            let body: serde_json::Map<String, Value> = tokens
                .iter()
                .filter_map(|token| {
                    self.tokens
                        .get(&token.to_lowercase())
                        .map(|usd| (token.clone(), json!(usd)))
                })
                .collect();
            Ok(Value::Object(body))
        }
    }

    type TestRelayService = service::Service<StaticPrices, StaticPrices>;

    #[derive(Clone, FromRef)]
    pub struct AppController {
        relay: TestRelayService,
    }

    impl AppController {
        pub fn new(prices: StaticPrices) -> Self {
            let relay = TestRelayService {
                aggregate: prices.clone(),
                spot: prices,
                networks: NetworkTable::default(),
            };
            Self { relay }
        }
    }

    pub fn build_test_server(prices: StaticPrices) -> axum_test::TestServer {
        let cfg = axum_test::TestServerConfig {
            transport: Some(axum_test::Transport::HttpRandomPort),
            ..Default::default()
        };
        let cntrl = AppController::new(prices);
        axum_test::TestServer::new_with_config(
            relay_routes::<_, StaticPrices, StaticPrices>(cntrl),
            cfg,
        )
        .expect("failed to start test server")
    }
}
