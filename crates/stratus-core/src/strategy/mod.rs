//! Request interception strategies
//!
//! Five interchangeable policies deciding how a request is satisfied from
//! a named cache store versus the network. A strategy is built once with
//! its capabilities and store identifier, then applied per request.

mod cache_first;
mod cache_only;
mod network_first;
mod network_only;
mod stale_while_revalidate;

pub use cache_first::CacheFirst;
pub use cache_only::CacheOnly;
pub use network_first::NetworkFirst;
pub use network_only::NetworkOnly;
pub use stale_while_revalidate::StaleWhileRevalidate;

use crate::config::RuntimeConfig;
use crate::context::RequestContext;
use crate::error::CoreError;
use crate::fetch::Fetcher;
use crate::store::StoreRegistry;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// A request interception policy.
#[async_trait]
pub trait Strategy: Send + Sync {
    /// Decide the outcome for the context's request and assign it into
    /// the response slot. Failures the policy does not define as a valid
    /// outcome propagate to the caller.
    async fn apply(&self, ctx: &mut RequestContext) -> Result<(), CoreError>;
}

/// Error type for parsing a strategy name
#[derive(Debug, Clone)]
pub struct ParseStrategyError(String);

impl fmt::Display for ParseStrategyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid strategy: {}", self.0)
    }
}

impl std::error::Error for ParseStrategyError {}

/// The five interception strategies, selectable by configuration name.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
    /// Serve from the store only; never touch the network.
    CacheOnly,
    /// Fetch only; never touch a store.
    NetworkOnly,
    /// Serve from the store, fetching and caching on a miss.
    #[default]
    CacheFirst,
    /// Fetch, falling back to the store when the network answer is not ok.
    NetworkFirst,
    /// Serve stale from the store while refreshing it in the background.
    StaleWhileRevalidate,
}

impl StrategyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyKind::CacheOnly => "cache-only",
            StrategyKind::NetworkOnly => "network-only",
            StrategyKind::CacheFirst => "cache-first",
            StrategyKind::NetworkFirst => "network-first",
            StrategyKind::StaleWhileRevalidate => "stale-while-revalidate",
        }
    }

    /// Build the strategy this kind names. `NetworkOnly` ignores the
    /// store capabilities; the others resolve their store identifier
    /// once, here.
    pub fn build(
        &self,
        stores: Arc<dyn StoreRegistry>,
        fetcher: Arc<dyn Fetcher>,
        config: &RuntimeConfig,
        cache_key: Option<&str>,
    ) -> Box<dyn Strategy> {
        match self {
            StrategyKind::CacheOnly => Box::new(CacheOnly::new(stores, config, cache_key)),
            StrategyKind::NetworkOnly => Box::new(NetworkOnly::new(fetcher)),
            StrategyKind::CacheFirst => {
                Box::new(CacheFirst::new(stores, fetcher, config, cache_key))
            }
            StrategyKind::NetworkFirst => {
                Box::new(NetworkFirst::new(stores, fetcher, config, cache_key))
            }
            StrategyKind::StaleWhileRevalidate => {
                Box::new(StaleWhileRevalidate::new(stores, fetcher, config, cache_key))
            }
        }
    }
}

impl FromStr for StrategyKind {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cache-only" => Ok(StrategyKind::CacheOnly),
            "network-only" => Ok(StrategyKind::NetworkOnly),
            "cache-first" => Ok(StrategyKind::CacheFirst),
            "network-first" => Ok(StrategyKind::NetworkFirst),
            "stale-while-revalidate" => Ok(StrategyKind::StaleWhileRevalidate),
            _ => Err(ParseStrategyError(s.to_string())),
        }
    }
}
