//! Error types shared between client and server.
//!
//! The `RateError` enum unifies common failure cases for I/O, HTTP,
//! serialization, storage, and deadline handling, allowing both binaries to
//! propagate a single error type up to their top-level exit point.
use std::io;
use std::sync::PoisonError;

use thiserror::Error;

/// Unified error type shared by client and server.
#[derive(Error, Debug)]
pub enum RateError {
    /// I/O error originating from the standard library (sockets/files).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// HTTP request failure from `reqwest` (construction, transport, decode).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Failure while encoding/decoding JSON via serde_json.
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// SQLite failure from opening, schema creation, preparing, or executing.
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    /// A deadline-bound operation exceeded its deadline.
    #[error("Deadline exceeded: {0}")]
    Elapsed(#[from] tokio::time::error::Elapsed),

    /// A blocking task panicked or was cancelled before completing.
    #[error("Background task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    /// Generic formatting/validation error with a human-readable message.
    #[error("Format error: {0}")]
    Format(String),

    /// Error indicating a poisoned mutex/lock was encountered.
    #[error("Mutex Lock Poisoned: {0}")]
    MutexLock(String),
}

impl<T> From<PoisonError<T>> for RateError {
    fn from(err: PoisonError<T>) -> Self {
        RateError::MutexLock(err.to_string())
    }
}
