//! The network fetch primitive strategies delegate to

use crate::error::FetchError;
use crate::message::{ProxyRequest, ProxyResponse};
use async_trait::async_trait;

/// One network round trip.
///
/// Transport-level failure (connection refused, timeout) is `Err`; an HTTP
/// error status is an ordinary `Ok` response with `is_ok() == false`.
/// Every strategy branch depends on that distinction. No retries, no
/// backoff: those belong to the network layer behind this trait.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, request: &ProxyRequest) -> Result<ProxyResponse, FetchError>;
}
