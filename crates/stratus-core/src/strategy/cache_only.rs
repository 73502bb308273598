//! Serve from the cache store and nowhere else

use crate::config::RuntimeConfig;
use crate::context::RequestContext;
use crate::error::CoreError;
use crate::store::StoreRegistry;
use crate::strategy::Strategy;
use async_trait::async_trait;
use std::sync::Arc;

/// Answers every request from the named store. The network is never
/// consulted; a miss surfaces as an absent response.
pub struct CacheOnly {
    stores: Arc<dyn StoreRegistry>,
    store_name: String,
}

impl CacheOnly {
    pub fn new(
        stores: Arc<dyn StoreRegistry>,
        config: &RuntimeConfig,
        cache_key: Option<&str>,
    ) -> Self {
        Self {
            stores,
            store_name: config.resolve_store(cache_key),
        }
    }
}

#[async_trait]
impl Strategy for CacheOnly {
    async fn apply(&self, ctx: &mut RequestContext) -> Result<(), CoreError> {
        let store = self.stores.open(&self.store_name).await?;

        // The lookup itself stays pending; the caller awaits it through
        // the slot.
        let request = ctx.request.clone();
        let handle = tokio::spawn(async move {
            let cached = store.lookup(&request).await?;
            Ok(cached)
        });
        ctx.set_deferred(handle);
        Ok(())
    }
}
