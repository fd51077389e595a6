// ----- standard library imports
use std::collections::HashMap;
// ----- extra library imports
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
// ----- local imports

// ----- end imports

///--------------------------- Aggregate (coin-id keyed) price relay
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, Default)]
pub struct AggregatePriceRequest {
    /// a missing list deserializes to empty and is rejected by the relay
    #[serde(rename = "coinIds", default)]
    pub coin_ids: Vec<String>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, Copy, Default, PartialEq)]
pub struct UsdPrice {
    #[serde(default)]
    pub usd: Option<f64>,
}

/// coin id -> USD price, as returned by the upstream aggregator
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct AggregatePriceResponse(pub HashMap<String, UsdPrice>);

impl AggregatePriceResponse {
    /// USD price of `coin_id`, if the upstream reported one.
    pub fn usd(&self, coin_id: &str) -> Option<f64> {
        self.0.get(coin_id).and_then(|price| price.usd)
    }
}

///--------------------------- Spot (token address keyed) price relay
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, Default)]
pub struct SpotPriceRequest {
    /// defaults to `ethereum` on the relay side
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,
    #[serde(default)]
    pub tokens: Vec<String>,
}

/// token address -> USD price as a decimal string
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct SpotPriceResponse(pub HashMap<String, String>);

impl SpotPriceResponse {
    pub fn price(&self, token: &str) -> Option<&str> {
        self.0.get(token).map(String::as_str)
    }
}
