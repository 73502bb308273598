//! Capability traits for host-provided cache storage

use crate::error::StoreError;
use crate::message::{ProxyRequest, ProxyResponse};
use async_trait::async_trait;
use std::sync::Arc;

/// Registry of named cache stores.
///
/// The store namespace is process-wide: any strategy or lifecycle handler
/// may open any store by identifier. Implementations must be cheap to
/// share; strategies clone `Arc` handles into spawned background work.
#[async_trait]
pub trait StoreRegistry: Send + Sync {
    /// Open a store, creating it if absent.
    async fn open(&self, name: &str) -> Result<Arc<dyn CacheStore>, StoreError>;

    /// Identifiers of every existing store.
    async fn keys(&self) -> Result<Vec<String>, StoreError>;

    /// Delete a store wholesale. Returns `false` when no such store exists.
    async fn delete(&self, name: &str) -> Result<bool, StoreError>;
}

/// One named store of response entries keyed by request URL.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Look up the entry for `request`. A miss is `Ok(None)`, never an
    /// error.
    async fn lookup(&self, request: &ProxyRequest) -> Result<Option<ProxyResponse>, StoreError>;

    /// Insert or overwrite the entry for `request`.
    async fn put(&self, request: &ProxyRequest, response: ProxyResponse) -> Result<(), StoreError>;

    /// Fetch every URL and insert the responses, all or nothing: any
    /// transport failure or non-2xx status fails the whole call with no
    /// entries written.
    async fn add_all(&self, urls: &[String]) -> Result<(), StoreError>;
}
