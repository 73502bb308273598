//! Serve from the network, fall back to the cache store

use crate::config::RuntimeConfig;
use crate::context::RequestContext;
use crate::error::CoreError;
use crate::fetch::Fetcher;
use crate::store::StoreRegistry;
use crate::strategy::Strategy;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::warn;

/// Prefers a live response. A non-2xx answer falls back to the named
/// store; a 2xx answer is returned immediately while a copy is written
/// back off the response path.
pub struct NetworkFirst {
    stores: Arc<dyn StoreRegistry>,
    fetcher: Arc<dyn Fetcher>,
    store_name: String,
}

impl NetworkFirst {
    pub fn new(
        stores: Arc<dyn StoreRegistry>,
        fetcher: Arc<dyn Fetcher>,
        config: &RuntimeConfig,
        cache_key: Option<&str>,
    ) -> Self {
        Self {
            stores,
            fetcher,
            store_name: config.resolve_store(cache_key),
        }
    }
}

#[async_trait]
impl Strategy for NetworkFirst {
    async fn apply(&self, ctx: &mut RequestContext) -> Result<(), CoreError> {
        let response = self.fetcher.fetch(&ctx.request).await?;

        if !response.is_ok() {
            // Degraded upstream - serve whatever the store holds
            let store = self.stores.open(&self.store_name).await?;
            let cached = store.lookup(&ctx.request).await?;
            ctx.set_ready(cached);
            return Ok(());
        }

        // The caller gets the response now; the write lands in the
        // background with a log-only error sink.
        let stores = Arc::clone(&self.stores);
        let store_name = self.store_name.clone();
        let request = ctx.request.clone();
        let copy = response.clone();
        let handle = tokio::spawn(async move {
            match stores.open(&store_name).await {
                Ok(store) => {
                    if let Err(e) = store.put(&request, copy).await {
                        warn!("Background write to store {} failed: {}", store_name, e);
                    }
                }
                Err(e) => {
                    warn!(
                        "Failed to open store {} for a background write: {}",
                        store_name, e
                    );
                }
            }
        });
        ctx.spawn_background(handle);
        ctx.set_ready(Some(response));
        Ok(())
    }
}
