// ----- standard library imports
// ----- extra library imports
use thiserror::Error;
use xcs_webapi::errors::ErrorResponse;
use xcs_webapi::prices as web_prices;
// ----- local modules
// ----- local imports
pub use reqwest::Url;

pub type Result<T> = std::result::Result<T, Error>;
#[derive(Debug, Error)]
pub enum Error {
    /// non-2xx reply, `message` is the relay's `{error}` text when it sent one
    #[error("{message}")]
    Relay {
        status: reqwest::StatusCode,
        message: String,
    },

    #[error("internal error {0}")]
    Reqwest(#[from] reqwest::Error),
}

impl Error {
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            Error::Relay { status, .. } => Some(*status),
            Error::Reqwest(e) => e.status(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PriceRelayClient {
    cl: reqwest::Client,
    base: reqwest::Url,
}

impl PriceRelayClient {
    pub fn new(base: reqwest::Url) -> Self {
        Self {
            cl: reqwest::Client::new(),
            base,
        }
    }

    pub async fn aggregate_price(
        &self,
        coin_ids: &[String],
    ) -> Result<web_prices::AggregatePriceResponse> {
        let url = self
            .base
            .join("/api/coingecko-price")
            .expect("aggregate price relative path");
        let request = web_prices::AggregatePriceRequest {
            coin_ids: coin_ids.to_vec(),
        };
        let res = self.cl.post(url).json(&request).send().await?;
        let res = check_status(res).await?;
        let prices = res.json::<web_prices::AggregatePriceResponse>().await?;
        Ok(prices)
    }

    pub async fn spot_price(
        &self,
        network: Option<&str>,
        tokens: &[String],
    ) -> Result<web_prices::SpotPriceResponse> {
        let url = self
            .base
            .join("/api/spot-price")
            .expect("spot price relative path");
        let request = web_prices::SpotPriceRequest {
            network: network.map(String::from),
            tokens: tokens.to_vec(),
        };
        let res = self.cl.post(url).json(&request).send().await?;
        let res = check_status(res).await?;
        let prices = res.json::<web_prices::SpotPriceResponse>().await?;
        Ok(prices)
    }
}

async fn check_status(res: reqwest::Response) -> Result<reqwest::Response> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }
    let message = match res.json::<ErrorResponse>().await {
        Ok(body) => body.error,
        Err(_) => status
            .canonical_reason()
            .unwrap_or("relay request failed")
            .to_owned(),
    };
    tracing::debug!("relay replied {}: {}", status, message);
    Err(Error::Relay { status, message })
}
