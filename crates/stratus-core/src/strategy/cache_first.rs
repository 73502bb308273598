//! Serve from the cache store, fall back to the network

use crate::config::RuntimeConfig;
use crate::context::RequestContext;
use crate::error::CoreError;
use crate::fetch::Fetcher;
use crate::store::StoreRegistry;
use crate::strategy::Strategy;
use async_trait::async_trait;
use std::sync::Arc;

/// Prefers the named store. On a miss the response is fetched and, when
/// 2xx, written back before the outcome is assigned, so a following read
/// on the same key observes the entry.
pub struct CacheFirst {
    stores: Arc<dyn StoreRegistry>,
    fetcher: Arc<dyn Fetcher>,
    store_name: String,
}

impl CacheFirst {
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
impl Strategy for CacheFirst {
    async fn apply(&self, ctx: &mut RequestContext) -> Result<(), CoreError> {
        let store = self.stores.open(&self.store_name).await?;

        // Check cache first
        if let Some(cached) = store.lookup(&ctx.request).await? {
            ctx.set_ready(Some(cached));
            return Ok(());
        }

        // Cache miss - fetch from the network and keep ok responses
        let response = self.fetcher.fetch(&ctx.request).await?;
        if response.is_ok() {
            store.put(&ctx.request, response.clone()).await?;
        }
        ctx.set_ready(Some(response));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{
        MockFetcher, MockStore, MockStores, create_ok_response, create_status_response,
        create_test_config, create_test_request,
    };

    #[tokio::test]
    async fn test_serves_a_hit_without_fetching() {
        let stores = Arc::new(
            MockStores::new().with_store("1.0.0", MockStore::holding(create_ok_response("cached"))),
        );
        let fetcher = Arc::new(MockFetcher::unscripted());
        let strategy = CacheFirst::new(stores.clone(), fetcher.clone(), &create_test_config(), None);

        let mut ctx = RequestContext::new(create_test_request("https://app.example/a.css"));
        strategy.apply(&mut ctx).await.unwrap();

        assert!(ctx.is_resolved());
        let response = ctx.resolve_response().await.unwrap().unwrap();
        assert_eq!(response.body, "cached");
        assert_eq!(fetcher.call_count(), 0);
        assert_eq!(stores.opened_names(), vec!["1.0.0"]);
    }

    #[tokio::test]
    async fn test_caches_a_successful_fetch_on_a_miss() {
        let stores = Arc::new(MockStores::new());
        let fetcher = Arc::new(MockFetcher::respond_with(create_ok_response("fresh")));
        let strategy = CacheFirst::new(stores.clone(), fetcher.clone(), &create_test_config(), None);

        let mut ctx = RequestContext::new(create_test_request("https://app.example/a.css"));
        strategy.apply(&mut ctx).await.unwrap();

        let response = ctx.resolve_response().await.unwrap().unwrap();
        assert_eq!(response.body, "fresh");
        assert_eq!(fetcher.call_count(), 1);

        // Exactly one put, of an equal copy, before the outcome resolved
        let puts = stores.store("1.0.0").puts();
        assert_eq!(puts.len(), 1);
        assert_eq!(puts[0].0, "https://app.example/a.css");
        assert_eq!(puts[0].1, response);
    }

    #[tokio::test]
    async fn test_does_not_cache_a_failed_fetch() {
        let stores = Arc::new(MockStores::new());
        let fetcher = Arc::new(MockFetcher::respond_with(create_status_response(404)));
        let strategy = CacheFirst::new(stores.clone(), fetcher, &create_test_config(), None);

        let mut ctx = RequestContext::new(create_test_request("https://app.example/a.css"));
        strategy.apply(&mut ctx).await.unwrap();

        let response = ctx.resolve_response().await.unwrap().unwrap();
        assert!(!response.is_ok());
        assert_eq!(stores.store("1.0.0").put_count(), 0);
    }

    #[tokio::test]
    async fn test_a_failed_write_back_fails_the_strategy() {
        let stores =
            Arc::new(MockStores::new().with_store("1.0.0", MockStore::empty().with_failing_puts()));
        let fetcher = Arc::new(MockFetcher::respond_with(create_ok_response("fresh")));
        let strategy = CacheFirst::new(stores, fetcher, &create_test_config(), None);

        let mut ctx = RequestContext::new(create_test_request("https://app.example/a.css"));
        let result = strategy.apply(&mut ctx).await;
        assert!(matches!(result, Err(CoreError::Store(_))));
    }

    #[tokio::test]
    async fn test_opens_the_given_store_instead_of_the_version() {
        let stores = Arc::new(MockStores::new());
        let fetcher = Arc::new(MockFetcher::respond_with(create_ok_response("fresh")));
        let strategy = CacheFirst::new(
            stores.clone(),
            fetcher,
            &create_test_config(),
            Some("fonts"),
        );

        let mut ctx = RequestContext::new(create_test_request("https://app.example/a.woff2"));
        strategy.apply(&mut ctx).await.unwrap();

        assert_eq!(stores.opened_names(), vec!["fonts"]);
    }
}
