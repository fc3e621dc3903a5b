//! Exchange rate payloads shared by client and server.
//!
//! The upstream rate API answers `GET .../json/last/USD-BRL` with a nested
//! object keyed by the currency pair; only the buy-side `bid` field is kept.
//! The server's own response body is a flat `{"bid": "<value>"}` object, which
//! is `ExchangeRate` serialized directly.
use serde::{Deserialize, Serialize};

/// A single USD-BRL quotation. The bid is the string the upstream API
/// returned, with no numeric validation applied.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExchangeRate {
    /// Buy-side quoted price as a decimal-valued string (e.g. `"5.43"`).
    pub bid: String,
}

/// Upstream API response envelope exposing `USDBRL.bid`.
#[derive(Debug, Deserialize)]
pub struct UsdBrlQuote {
    /// Quotation for the USD-BRL pair.
    #[serde(rename = "USDBRL")]
    pub usdbrl: ExchangeRate,
}
