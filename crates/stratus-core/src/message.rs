//! HTTP request and response values

use bytes::Bytes;
use http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode};
use url::Url;

/// An intercepted outgoing request.
///
/// The full URL string is the entry key within a cache store: two requests
/// for the same URL share an entry regardless of headers.
#[derive(Debug, Clone, PartialEq)]
pub struct ProxyRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
}

impl ProxyRequest {
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: HeaderMap::new(),
        }
    }

    /// Shorthand for the common GET interception case.
    pub fn get(url: Url) -> Self {
        Self::new(Method::GET, url)
    }

    /// The key this request occupies within a cache store.
    pub fn entry_key(&self) -> &str {
        self.url.as_str()
    }
}

/// A response, served from a store or fetched from the network.
///
/// Cloning is cheap: the body is refcounted. Strategies clone before a
/// cache write so the caller still receives the original.
#[derive(Debug, Clone, PartialEq)]
pub struct ProxyResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl ProxyResponse {
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: Bytes::new(),
        }
    }

    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Whether the response counts as a cacheable success (2xx).
    pub fn is_ok(&self) -> bool {
        self.status.is_success()
    }
}
