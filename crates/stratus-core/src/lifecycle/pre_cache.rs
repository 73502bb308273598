//! Bulk pre-population of a store at install time

use crate::config::{Environment, RuntimeConfig};
use crate::error::CoreError;
use crate::lifecycle::LifecycleHandler;
use crate::store::StoreRegistry;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

/// Warms the resolved store with a fixed URL manifest.
///
/// The bulk insert is all or nothing: one failed fetch fails the whole
/// routine and no partial result is guaranteed.
pub struct PreCache {
    stores: Arc<dyn StoreRegistry>,
    urls: Vec<String>,
    store_name: String,
    environment: Environment,
}

impl PreCache {
    pub fn new(
        stores: Arc<dyn StoreRegistry>,
        urls: Vec<String>,
        config: &RuntimeConfig,
        cache_key: Option<&str>,
    ) -> Self {
        Self {
            stores,
            urls,
            store_name: config.resolve_store(cache_key),
            environment: config.environment,
        }
    }
}

#[async_trait]
impl LifecycleHandler for PreCache {
    async fn run(&self) -> Result<(), CoreError> {
        let store = self.stores.open(&self.store_name).await?;
        store.add_all(&self.urls).await?;

        if self.environment.is_development() {
            info!(
                "Pre-cached {} entries into store {}: {:?}",
                self.urls.len(),
                self.store_name,
                self.urls
            );
        }
        Ok(())
    }
}
