// ----- standard library imports
// ----- extra library imports
use reqwest::StatusCode;
use xcs_price_relay::test_utils::{build_test_server, StaticPrices};
use xcs_price_relay_client::PriceRelayClient;
// ----- local imports

const WETH_POLYGON: &str = "0x7ceb23fd6bc0add59e62ac25578270cff1b9f619";

#[tokio::test]
async fn spot_price() {
    let server = build_test_server(StaticPrices::default().with_token(WETH_POLYGON, "3118.42"));
    let server_url = server.server_address().expect("address");
    let client = PriceRelayClient::new(server_url);

    let tokens = vec![String::from(WETH_POLYGON)];
    let response = client
        .spot_price(Some("polygon"), &tokens)
        .await
        .expect("prices");
    assert_eq!(response.price(WETH_POLYGON), Some("3118.42"));
}

#[tokio::test]
async fn spot_price_unknown_token_is_missing_from_response() {
    let server = build_test_server(StaticPrices::default());
    let server_url = server.server_address().expect("address");
    let client = PriceRelayClient::new(server_url);

    let tokens = vec![String::from(WETH_POLYGON)];
    let response = client.spot_price(None, &tokens).await.expect("prices");
    assert_eq!(response.price(WETH_POLYGON), None);
}

#[tokio::test]
async fn spot_price_unsupported_network() {
    let server = build_test_server(StaticPrices::default());
    let server_url = server.server_address().expect("address");
    let client = PriceRelayClient::new(server_url);

    let tokens = vec![String::from(WETH_POLYGON)];
    let err = client
        .spot_price(Some("dogechain"), &tokens)
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
    assert_eq!(
        err.to_string(),
        "Network dogechain is not supported by 1inch Spot Price API"
    );
}

#[tokio::test]
async fn spot_price_forwarded_upstream_status() {
    let server = build_test_server(StaticPrices::default().with_outage(401));
    let server_url = server.server_address().expect("address");
    let client = PriceRelayClient::new(server_url);

    let tokens = vec![String::from(WETH_POLYGON)];
    let err = client.spot_price(None, &tokens).await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
    assert_eq!(err.to_string(), "1inch API error: 401");
}
