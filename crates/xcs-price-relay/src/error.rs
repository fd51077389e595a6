// ----- standard library imports
// ----- extra library imports
use axum::http::StatusCode;
use axum::Json;
use thiserror::Error;
use xcs_webapi::errors::ErrorResponse;
// ----- local imports

// ----- end imports

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    InvalidRequest(String),
    #[error("Network {0} is not supported by 1inch Spot Price API")]
    UnsupportedNetwork(String),

    // aggregate (coin-id) upstream
    #[error("CoinGecko API error: {0}")]
    AggregateUpstream(StatusCode),
    #[error("{0}")]
    AggregateRequest(reqwest::Error),

    // spot (token address) upstream
    #[error("1inch API error: {}", .0.as_u16())]
    SpotUpstream(StatusCode),
    #[error("spot upstream request failed: {0}")]
    SpotRequest(reqwest::Error),

    #[error("upstream url error: {0}")]
    Url(#[from] url::ParseError),
}

impl axum::response::IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        tracing::error!("Error: {}", self);
        let (status, message) = match self {
            Error::InvalidRequest(_) | Error::UnsupportedNetwork(_) => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }

            Error::AggregateUpstream(_) | Error::AggregateRequest(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }

            Error::SpotUpstream(status) => (status, self.to_string()),
            Error::SpotRequest(_) | Error::Url(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                String::from("Internal server error"),
            ),
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}
