//!
//! Common types and utilities shared by the rate server and client.
//!
//! This crate aggregates:
//! - `error` — unified error type `RateError` used across the workspace.
//! - `result` — handy `Result<T, RateError>` alias.
//! - `rate` — exchange rate payloads exchanged with the upstream API and the client.
//! - `net` — networking constants and small helpers.
#![warn(missing_docs)]
pub mod error;
pub mod result;
pub mod rate;
pub mod net;

pub use error::RateError;
pub use rate::ExchangeRate;
pub use result::Result;
