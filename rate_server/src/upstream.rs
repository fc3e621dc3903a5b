//! Upstream rate provider access.
//!
//! One GET against the provider with a 200 ms total deadline covering
//! connect through body decode. Failures are classified so the handler can
//! map them onto the right HTTP status: request construction and response
//! decode problems are the server's fault (500), transport problems and
//! deadline overruns mean the provider was unreachable in time (504).

use std::time::Duration;

use axum::http::StatusCode;
use thiserror::Error;

use rate_common::rate::{ExchangeRate, UsdBrlQuote};

/// Total deadline for the upstream call.
pub const UPSTREAM_TIMEOUT: Duration = Duration::from_millis(200);

/// Classified upstream failure.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The request could not be constructed.
    #[error("failed to build upstream request: {0}")]
    Build(reqwest::Error),
    /// The provider could not be reached, or not within the deadline.
    #[error("upstream request failed: {0}")]
    Transport(reqwest::Error),
    /// The provider answered with a body that did not decode.
    #[error("failed to decode upstream response: {0}")]
    Decode(reqwest::Error),
}

impl FetchError {
    /// HTTP status to answer the caller with.
    pub fn status(&self) -> StatusCode {
        match self {
            FetchError::Build(_) | FetchError::Decode(_) => StatusCode::INTERNAL_SERVER_ERROR,
            FetchError::Transport(_) => StatusCode::GATEWAY_TIMEOUT,
        }
    }

    /// Plain-text body to answer the caller with.
    pub fn public_message(&self) -> &'static str {
        match self {
            FetchError::Build(_) => "Internal server error",
            FetchError::Transport(_) => "Failed to retrieve exchange rate",
            FetchError::Decode(_) => "Failed to parse exchange rate",
        }
    }
}

fn classify(err: reqwest::Error) -> FetchError {
    if err.is_builder() {
        FetchError::Build(err)
    } else if err.is_decode() {
        FetchError::Decode(err)
    } else {
        FetchError::Transport(err)
    }
}

/// Fetch the current USD-BRL rate from `url` under [`UPSTREAM_TIMEOUT`].
pub async fn fetch_usd_brl(http: &reqwest::Client, url: &str) -> Result<ExchangeRate, FetchError> {
    let response = http
        .get(url)
        .timeout(UPSTREAM_TIMEOUT)
        .send()
        .await
        .map_err(classify)?;
    let quote: UsdBrlQuote = response.json().await.map_err(classify)?;
    Ok(quote.usdbrl)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, routing::get};
    use std::time::Duration;
    use tokio::time::sleep;

    async fn spawn_stub(body: &'static str, delay: Duration) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = Router::new().route(
            "/json/last/USD-BRL",
            get(move || async move {
                sleep(delay).await;
                body
            }),
        );
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/json/last/USD-BRL", addr)
    }

    #[tokio::test]
    async fn returns_bid_from_valid_response() {
        let url = spawn_stub(r#"{"USDBRL":{"bid":"5.43"}}"#, Duration::ZERO).await;
        let rate = fetch_usd_brl(&reqwest::Client::new(), &url).await.unwrap();
        assert_eq!(rate.bid, "5.43");
    }

    #[tokio::test]
    async fn slow_provider_is_a_transport_error() {
        let url = spawn_stub(r#"{"USDBRL":{"bid":"5.43"}}"#, Duration::from_millis(500)).await;
        let err = fetch_usd_brl(&reqwest::Client::new(), &url)
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)));
        assert_eq!(err.status(), StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(err.public_message(), "Failed to retrieve exchange rate");
    }

    #[tokio::test]
    async fn unreachable_provider_is_a_transport_error() {
        // Bind then drop a listener so the port is very likely closed.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/json/last/USD-BRL", listener.local_addr().unwrap());
        drop(listener);

        let err = fetch_usd_brl(&reqwest::Client::new(), &url)
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)));
    }

    #[tokio::test]
    async fn garbage_body_is_a_decode_error() {
        let url = spawn_stub("not json at all", Duration::ZERO).await;
        let err = fetch_usd_brl(&reqwest::Client::new(), &url)
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.public_message(), "Failed to parse exchange rate");
    }
}
