//! Fetches the same URL twice through a cache-first policy. The first
//! round hits the network and warms the in-memory store; the second is
//! answered from the store without a request.
//!
//! Run with: cargo run --example cache_first

use std::sync::Arc;
use std::time::Instant;

use stratus_core::config::{Environment, RuntimeConfig};
use stratus_core::context::RequestContext;
use stratus_core::message::ProxyRequest;
use stratus_core::strategy::{CacheFirst, Strategy};
use stratus_net::HttpFetcher;
use stratus_store::MemoryStores;
use url::Url;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let config = RuntimeConfig::new("1.0.0").with_environment(Environment::Development);
    let fetcher = Arc::new(HttpFetcher::new()?);
    let base = Url::parse("https://example.com/")?;
    let stores = Arc::new(MemoryStores::new(fetcher.clone(), base.clone()));

    let strategy = CacheFirst::new(stores, fetcher, &config, None);

    for round in 1..=2 {
        let started = Instant::now();
        let mut ctx = RequestContext::new(ProxyRequest::get(base.clone()));
        strategy.apply(&mut ctx).await?;
        let response = ctx.resolve_response().await?;
        ctx.settle_background().await;

        match response {
            Some(response) => println!(
                "round {}: {} ({} bytes) in {:?}",
                round,
                response.status,
                response.body.len(),
                started.elapsed()
            ),
            None => println!("round {}: no response", round),
        }
    }
    Ok(())
}
