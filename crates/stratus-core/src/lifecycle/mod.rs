//! Cache lifecycle routines
//!
//! Handlers invoked once per lifecycle event: warming a store when a new
//! version installs, and evicting stale version stores when it activates.

mod clear_cache;
mod pre_cache;

pub use clear_cache::{ClearCacheConfig, ClearCacheOnUpdate};
pub use pre_cache::PreCache;

use crate::error::CoreError;
use async_trait::async_trait;

/// A routine run once by the host at a lifecycle event, with no request
/// context.
#[async_trait]
pub trait LifecycleHandler: Send + Sync {
    /// Execute the routine to completion.
    async fn run(&self) -> Result<(), CoreError>;
}
