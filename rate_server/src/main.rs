//! USD-BRL exchange rate HTTP server.
//!
//! This binary exposes a single endpoint, `GET /cotacao`, and wires together
//! three building blocks:
//!
//! - `upstream` — fetches the current quotation from the public rate API
//!   under a 200 ms deadline and classifies failures for status mapping.
//! - `store` — a long-lived SQLite connection owned by process state, opened
//!   at startup and closed at shutdown, recording every observed bid.
//! - `handler` — the request path: fetch, best-effort persist under a 10 ms
//!   deadline (failures logged and swallowed), answer `{"bid": "<value>"}`.
//!
//! Concurrency and shutdown:
//! - axum schedules each request on its own task; requests share no mutable
//!   state beyond the store, whose connection is guarded by a mutex.
//! - Ctrl+C triggers a graceful shutdown; the store is dropped after the
//!   server stops accepting requests.
#![warn(missing_docs)]
use std::sync::Arc;

use axum::{Router, routing::get};
use log::{info, warn};

use rate_common::Result;
use rate_common::net::{RATE_PATH, SERVER_PORT, UPSTREAM_URL, addr};

use crate::handler::AppState;
use crate::store::RateStore;

mod handler;
mod store;
mod upstream;

/// SQLite database file, relative to the working directory.
const DB_PATH: &str = "exchange_rates.db";

#[tokio::main]
async fn main() -> Result<()> {
    init_logger();

    let store = Arc::new(RateStore::open(DB_PATH)?);
    match store.recent(1) {
        Ok(records) => {
            if let Some(last) = records.first() {
                info!("Last persisted rate: bid {} at {}", last.bid, last.timestamp);
            }
        }
        Err(e) => warn!("Could not read back persisted rates: {}", e),
    }

    let state = AppState {
        http: reqwest::Client::new(),
        store: Arc::clone(&store),
        upstream_url: String::from(UPSTREAM_URL),
    };
    let app = Router::new()
        .route(RATE_PATH, get(handler::exchange_rate))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(addr("0.0.0.0", SERVER_PORT)).await?;
    info!("Server running on port :{}", SERVER_PORT);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped, closing exchange rate store");
    drop(store);
    Ok(())
}

/// Completes when Ctrl+C is received, ending request acceptance.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
    }
}

fn init_logger() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();
}
