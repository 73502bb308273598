//! Core error types

use thiserror::Error;

/// Errors raised by store registries and cache stores.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store backend error: {0}")]
    Backend(String),

    #[error("Invalid entry URL: {0}")]
    InvalidUrl(String),

    #[error("Refusing to cache {url}: upstream returned status {status}")]
    UncacheableStatus { url: String, status: u16 },

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by the network fetch primitive.
///
/// Only transport-level problems are errors; an HTTP error status is an
/// ordinary response value.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Top-level error for strategy and lifecycle operations.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Background task failed: {0}")]
    Task(String),
}
