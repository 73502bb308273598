//! Stratus Caching Policies
//!
//! This crate provides the core building blocks of a request-interception
//! caching layer: five interchangeable strategies deciding how a request
//! is answered from a named cache store versus the network, and the
//! lifecycle routines that warm and evict versioned stores.

pub mod config;
pub mod context;
pub mod error;
pub mod fetch;
pub mod lifecycle;
pub mod message;
pub mod store;
pub mod strategy;

#[cfg(test)]
mod testing;

pub use config::{Environment, RuntimeConfig};
pub use context::{RequestContext, ResponseSlot};
pub use error::{CoreError, FetchError, StoreError};
pub use fetch::Fetcher;
pub use lifecycle::{ClearCacheConfig, ClearCacheOnUpdate, LifecycleHandler, PreCache};
pub use message::{ProxyRequest, ProxyResponse};
pub use store::{CacheStore, StoreRegistry};
pub use strategy::{
    CacheFirst, CacheOnly, NetworkFirst, NetworkOnly, StaleWhileRevalidate, Strategy, StrategyKind,
};
