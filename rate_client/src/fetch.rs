//! Fetching the quotation from the local rate server.
//!
//! One blocking GET with a 300 ms deadline covering connection through body
//! receipt. The body is parsed as a flat string-to-string object; the server
//! is trusted only to that extent, and a missing `bid` entry degrades to an
//! empty string rather than an error.
use std::collections::HashMap;
use std::time::Duration;

use rate_common::Result;

/// Deadline for the whole server call.
pub const REQUEST_TIMEOUT: Duration = Duration::from_millis(300);

/// GET `url` under [`REQUEST_TIMEOUT`] and return the full response body.
pub fn fetch_rate_body(url: &str) -> Result<String> {
    let client = reqwest::blocking::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()?;
    let body = client.get(url).send()?.text()?;
    Ok(body)
}

/// Extract the `bid` entry from a flat JSON string map. An absent key yields
/// an empty string, not an error.
pub fn parse_bid(body: &str) -> Result<String> {
    let fields: HashMap<String, String> = serde_json::from_str(body)?;
    Ok(fields.get("bid").cloned().unwrap_or_default())
}
