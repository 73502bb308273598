//! Serve from the network and nowhere else

use crate::context::RequestContext;
use crate::error::CoreError;
use crate::fetch::Fetcher;
use crate::strategy::Strategy;
use async_trait::async_trait;
use std::sync::Arc;

/// Forwards every request to the network. No store is ever opened and
/// nothing is written back; transport failures surface when the slot is
/// resolved.
pub struct NetworkOnly {
    fetcher: Arc<dyn Fetcher>,
}

impl NetworkOnly {
    pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
        Self { fetcher }
    }
}

#[async_trait]
impl Strategy for NetworkOnly {
    async fn apply(&self, ctx: &mut RequestContext) -> Result<(), CoreError> {
        let fetcher = Arc::clone(&self.fetcher);
        let request = ctx.request.clone();
        let handle = tokio::spawn(async move {
            let response = fetcher.fetch(&request).await?;
            Ok(Some(response))
        });
        ctx.set_deferred(handle);
        Ok(())
    }
}
