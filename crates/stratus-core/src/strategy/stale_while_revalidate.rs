//! Serve stale from the cache store while revalidating from the network

use crate::config::RuntimeConfig;
use crate::context::RequestContext;
use crate::error::CoreError;
use crate::fetch::Fetcher;
use crate::store::StoreRegistry;
use crate::strategy::Strategy;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::warn;

/// Answers from the named store when it can, and always refreshes the
/// entry from the network. A hit settles the slot immediately while the
/// revalidation runs in the background; a miss defers the slot to the
/// in-flight fetch.
pub struct StaleWhileRevalidate {
    stores: Arc<dyn StoreRegistry>,
    fetcher: Arc<dyn Fetcher>,
    store_name: String,
}

impl StaleWhileRevalidate {
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
impl Strategy for StaleWhileRevalidate {
    async fn apply(&self, ctx: &mut RequestContext) -> Result<(), CoreError> {
        let store = self.stores.open(&self.store_name).await?;
        let cached = store.lookup(&ctx.request).await?;

        let fetcher = Arc::clone(&self.fetcher);
        let request = ctx.request.clone();

        match cached {
            Some(response) => {
                // Serve stale now; refresh with a log-only error sink.
                let handle = tokio::spawn(async move {
                    match fetcher.fetch(&request).await {
                        Ok(fresh) if fresh.is_ok() => {
                            if let Err(e) = store.put(&request, fresh).await {
                                warn!("Revalidation write for {} failed: {}", request.url, e);
                            }
                        }
                        Ok(_) => {}
                        Err(e) => {
                            warn!("Revalidation fetch for {} failed: {}", request.url, e);
                        }
                    }
                });
                ctx.spawn_background(handle);
                ctx.set_ready(Some(response));
            }
            None => {
                // Nothing stale to serve - the slot resolves to the fetch,
                // after the entry has been written.
                let handle = tokio::spawn(async move {
                    let response = fetcher.fetch(&request).await?;
                    if response.is_ok() {
                        store.put(&request, response.clone()).await?;
                    }
                    Ok(Some(response))
                });
                ctx.set_deferred(handle);
            }
        }
        Ok(())
    }
}
