//! In-memory store registry

use async_trait::async_trait;
use futures::future::try_join_all;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use stratus_core::error::StoreError;
use stratus_core::fetch::Fetcher;
use stratus_core::message::{ProxyRequest, ProxyResponse};
use stratus_core::store::{CacheStore, StoreRegistry};
use tracing::debug;
use url::Url;

/// Registry of named in-memory stores.
///
/// Suitable for tests and for hosts without a persistent cache subsystem.
/// Stores are created on first open and live until deleted.
pub struct MemoryStores {
    fetcher: Arc<dyn Fetcher>,
    base: Url,
    stores: RwLock<HashMap<String, Arc<MemoryStore>>>,
}

impl MemoryStores {
    /// `fetcher` performs bulk-insert fetches; `base` resolves relative
    /// bulk-insert URLs.
    pub fn new(fetcher: Arc<dyn Fetcher>, base: Url) -> Self {
        Self {
            fetcher,
            base,
            stores: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl StoreRegistry for MemoryStores {
    async fn open(&self, name: &str) -> Result<Arc<dyn CacheStore>, StoreError> {
        let mut stores = self.stores.write();
        let store = stores.entry(name.to_string()).or_insert_with(|| {
            debug!("Creating in-memory store {}", name);
            Arc::new(MemoryStore::new(
                Arc::clone(&self.fetcher),
                self.base.clone(),
            ))
        });
        Ok(Arc::clone(store) as Arc<dyn CacheStore>)
    }

    async fn keys(&self) -> Result<Vec<String>, StoreError> {
        let mut keys: Vec<String> = self.stores.read().keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }

    async fn delete(&self, name: &str) -> Result<bool, StoreError> {
        let removed = self.stores.write().remove(name).is_some();
        if removed {
            debug!("Deleted in-memory store {}", name);
        }
        Ok(removed)
    }
}

/// One named store of responses keyed by full request URL.
pub struct MemoryStore {
    fetcher: Arc<dyn Fetcher>,
    base: Url,
    entries: RwLock<HashMap<String, ProxyResponse>>,
}

impl MemoryStore {
    fn new(fetcher: Arc<dyn Fetcher>, base: Url) -> Self {
        Self {
            fetcher,
            base,
            entries: RwLock::new(HashMap::new()),
        }
    }

    fn resolve(&self, url: &str) -> Result<Url, StoreError> {
        self.base
            .join(url)
            .map_err(|e| StoreError::InvalidUrl(format!("{}: {}", url, e)))
    }
}

#[async_trait]
impl CacheStore for MemoryStore {
    async fn lookup(&self, request: &ProxyRequest) -> Result<Option<ProxyResponse>, StoreError> {
        Ok(self.entries.read().get(request.entry_key()).cloned())
    }

    async fn put(&self, request: &ProxyRequest, response: ProxyResponse) -> Result<(), StoreError> {
        self.entries
            .write()
            .insert(request.entry_key().to_string(), response);
        Ok(())
    }

    async fn add_all(&self, urls: &[String]) -> Result<(), StoreError> {
        let requests: Vec<ProxyRequest> = urls
            .iter()
            .map(|url| self.resolve(url).map(ProxyRequest::get))
            .collect::<Result<_, _>>()?;

        // Fetch everything before writing anything, so one failure leaves
        // the store untouched.
        let fetches = requests.iter().map(|request| {
            let fetcher = Arc::clone(&self.fetcher);
            async move { fetcher.fetch(request).await }
        });
        let responses = try_join_all(fetches).await?;

        for (request, response) in requests.iter().zip(&responses) {
            if !response.is_ok() {
                return Err(StoreError::UncacheableStatus {
                    url: request.url.to_string(),
                    status: response.status.as_u16(),
                });
            }
        }

        let mut entries = self.entries.write();
        for (request, response) in requests.into_iter().zip(responses) {
            entries.insert(request.entry_key().to_string(), response);
        }
        Ok(())
    }
}
