// ----- standard library imports
// ----- extra library imports
use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use serde_json::Value;
use xcs_webapi::prices as web_prices;
// ----- local imports
use crate::error::{Error, Result};
use crate::service::{AggregatePriceProvider, Service, SpotPriceProvider};

// ----- end imports

#[utoipa::path(
    get,
    path = "/health",
    responses (
        (status = 200, description = "Successful response", content_type = "application/json"),
    )
)]
pub async fn health() -> Json<Value> {
    Json(serde_json::json!({ "status": "OK" }))
}

#[utoipa::path(
    post,
    path = "/api/coingecko-price",
    request_body(content = web_prices::AggregatePriceRequest, content_type = "application/json"),
    responses (
        (status = 200, description = "Successful response", body = web_prices::AggregatePriceResponse, content_type = "application/json"),
        (status = 400, description = "missing, malformed or empty coin ids", body = xcs_webapi::errors::ErrorResponse),
        (status = 500, description = "upstream failure", body = xcs_webapi::errors::ErrorResponse),
    )
)]
#[tracing::instrument(level = tracing::Level::DEBUG, skip(ctrl))]
pub async fn post_aggregate_price<Aggregate, Spot>(
    State(ctrl): State<Service<Aggregate, Spot>>,
    request: std::result::Result<Json<web_prices::AggregatePriceRequest>, JsonRejection>,
) -> Result<Json<Value>>
where
    Aggregate: AggregatePriceProvider,
{
    let Json(request) = request.map_err(|rejection| {
        tracing::debug!("rejected aggregate price body: {}", rejection);
        Error::InvalidRequest(String::from("Invalid coin IDs provided"))
    })?;
    let body = ctrl.relay_aggregate_price(&request.coin_ids).await?;
    Ok(Json(body))
}

#[utoipa::path(
    post,
    path = "/api/spot-price",
    request_body(content = web_prices::SpotPriceRequest, content_type = "application/json"),
    responses (
        (status = 200, description = "Successful response", body = web_prices::SpotPriceResponse, content_type = "application/json"),
        (status = 400, description = "missing tokens or unsupported network", body = xcs_webapi::errors::ErrorResponse),
        (status = 500, description = "internal failure", body = xcs_webapi::errors::ErrorResponse),
    )
)]
#[tracing::instrument(level = tracing::Level::DEBUG, skip(ctrl))]
pub async fn post_spot_price<Aggregate, Spot>(
    State(ctrl): State<Service<Aggregate, Spot>>,
    request: std::result::Result<Json<web_prices::SpotPriceRequest>, JsonRejection>,
) -> Result<Json<Value>>
where
    Spot: SpotPriceProvider,
{
    let Json(request) = request.map_err(|rejection| {
        tracing::debug!("rejected spot price body: {}", rejection);
        Error::InvalidRequest(String::from("Tokens array is required"))
    })?;
    let body = ctrl
        .relay_spot_price(request.network.as_deref(), &request.tokens)
        .await?;
    Ok(Json(body))
}
