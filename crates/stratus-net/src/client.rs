//! HTTP fetcher over reqwest

use async_trait::async_trait;
use std::time::Duration;
use stratus_core::error::FetchError;
use stratus_core::fetch::Fetcher;
use stratus_core::message::{ProxyRequest, ProxyResponse};
use tracing::debug;

/// Configuration for [`HttpFetcher`].
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// User agent sent with every request.
    pub user_agent: String,
    /// Total per-request timeout.
    pub timeout: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("stratus/{}", env!("CARGO_PKG_VERSION")),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Network fetch primitive backed by a pooled reqwest client.
///
/// Transport failures map to [`FetchError::Transport`]; HTTP error
/// statuses pass through as ordinary responses for the strategies to
/// branch on.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, FetchError> {
        Self::with_config(FetchConfig::default())
    }

    pub fn with_config(config: FetchConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent)
            .timeout(config.timeout)
            .build()
            .map_err(|e| FetchError::Transport(format!("failed to build client: {}", e)))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, request: &ProxyRequest) -> Result<ProxyResponse, FetchError> {
        debug!("Fetching {} {}", request.method, request.url);

        let mut builder = self
            .client
            .request(request.method.clone(), request.url.clone());
        for (name, value) in request.headers.iter() {
            builder = builder.header(name, value);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| FetchError::Transport(format!("network error: {}", e)))?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::Transport(format!("failed to read body: {}", e)))?;

        Ok(ProxyResponse {
            status,
            headers,
            body,
        })
    }
}
