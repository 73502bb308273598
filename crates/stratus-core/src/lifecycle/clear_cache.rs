//! Stale store eviction at activation time

use crate::config::{Environment, RuntimeConfig};
use crate::error::{CoreError, StoreError};
use crate::lifecycle::LifecycleHandler;
use crate::store::StoreRegistry;
use async_trait::async_trait;
use futures::future::join_all;
use std::sync::Arc;
use tracing::debug;

/// Options for [`ClearCacheOnUpdate`].
#[derive(Debug, Clone, Default)]
pub struct ClearCacheConfig {
    /// Store identifiers exempt from eviction. Defaults to the current
    /// version identifier.
    pub whitelist: Option<Vec<String>>,
    /// Compare identifiers case-insensitively. Defaults to `false`.
    pub ignore_case: bool,
}

/// Deletes every store whose identifier is not whitelisted.
///
/// Defaults are merged once at construction: the effective whitelist is
/// the current version, case-folded eagerly when `ignore_case` is set.
/// Deletions run concurrently; one failure rejects the whole sweep while
/// the other deletions still run to completion.
pub struct ClearCacheOnUpdate {
    stores: Arc<dyn StoreRegistry>,
    whitelist: Vec<String>,
    ignore_case: bool,
    environment: Environment,
}

impl ClearCacheOnUpdate {
    pub fn new(
        stores: Arc<dyn StoreRegistry>,
        config: &RuntimeConfig,
        options: ClearCacheConfig,
    ) -> Self {
        let mut whitelist = options
            .whitelist
            .unwrap_or_else(|| vec![config.version.clone()]);
        if options.ignore_case {
            whitelist = whitelist.iter().map(|w| w.to_lowercase()).collect();
        }
        Self {
            stores,
            whitelist,
            ignore_case: options.ignore_case,
            environment: config.environment,
        }
    }

    fn is_whitelisted(&self, key: &str) -> bool {
        if self.ignore_case {
            self.whitelist.contains(&key.to_lowercase())
        } else {
            self.whitelist.iter().any(|w| w == key)
        }
    }
}

#[async_trait]
impl LifecycleHandler for ClearCacheOnUpdate {
    async fn run(&self) -> Result<(), CoreError> {
        let keys = self.stores.keys().await?;
        let doomed: Vec<String> = keys
            .into_iter()
            .filter(|key| !self.is_whitelisted(key))
            .collect();

        // Deletes always receive the original identifier; folding is for
        // comparison only.
        let tasks: Vec<_> = doomed
            .into_iter()
            .map(|key| {
                let stores = Arc::clone(&self.stores);
                let environment = self.environment;
                tokio::spawn(async move {
                    stores.delete(&key).await?;

                    if environment.is_development() {
                        debug!("Removed stale cache store {}", key);
                    }
                    Ok::<(), StoreError>(())
                })
            })
            .collect();

        // Every delete runs to completion; the first failure rejects the
        // sweep and the siblings' results are dropped.
        let mut first_error: Option<CoreError> = None;
        for joined in join_all(tasks).await {
            let result = match joined {
                Ok(result) => result.map_err(CoreError::from),
                Err(e) => Err(CoreError::Task(e.to_string())),
            };
            if let Err(e) = result {
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
