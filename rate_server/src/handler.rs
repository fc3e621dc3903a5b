//! HTTP handler for the exchange rate endpoint.
//!
//! Each request runs two deadline-bound sub-operations off the same request
//! task: the upstream fetch (200 ms) and the storage write (10 ms). They are
//! separately cancelable, but both stop if the caller disconnects and the
//! request future is dropped. Upstream failures end the request with a
//! mapped status; storage failures are logged and swallowed so a storage
//! outage never degrades the read path.

use std::sync::Arc;
use std::time::Duration;

use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use log::{error, warn};
use tokio::{task, time};

use rate_common::Result;

use crate::store::RateStore;
use crate::upstream;

/// Deadline for the best-effort storage write.
pub const STORE_TIMEOUT: Duration = Duration::from_millis(10);

/// Shared per-process state handed to every request.
#[derive(Clone)]
pub struct AppState {
    /// Outbound HTTP client, reused across requests.
    pub http: reqwest::Client,
    /// Long-lived rate store, opened at startup.
    pub store: Arc<RateStore>,
    /// Upstream provider URL.
    pub upstream_url: String,
}

/// `GET /cotacao` — fetch the current USD-BRL rate, persist it best-effort,
/// and answer `{"bid": "<value>"}`.
pub async fn exchange_rate(State(state): State<AppState>) -> Response {
    let rate = match upstream::fetch_usd_brl(&state.http, &state.upstream_url).await {
        Ok(rate) => rate,
        Err(e) => {
            error!("upstream rate lookup failed: {}", e);
            return (e.status(), e.public_message()).into_response();
        }
    };

    if let Err(e) = persist_bid(Arc::clone(&state.store), rate.bid.clone()).await {
        warn!("failed to persist exchange rate: {}", e);
    }

    Json(rate).into_response()
}

/// Insert one bid under [`STORE_TIMEOUT`]. The insert itself is blocking, so
/// it runs on the blocking pool while this future enforces the deadline.
async fn persist_bid(store: Arc<RateStore>, bid: String) -> Result<()> {
    let insert = task::spawn_blocking(move || store.insert_bid(&bid));
    match time::timeout(STORE_TIMEOUT, insert).await {
        Ok(join) => join?,
        Err(elapsed) => Err(elapsed.into()),
    }
}
