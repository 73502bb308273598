//! Scripted in-memory doubles shared by strategy and lifecycle tests.

use crate::config::{Environment, RuntimeConfig};
use crate::error::{FetchError, StoreError};
use crate::fetch::Fetcher;
use crate::message::{ProxyRequest, ProxyResponse};
use crate::store::{CacheStore, StoreRegistry};
use async_trait::async_trait;
use http::StatusCode;
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use url::Url;

pub(crate) fn create_test_config() -> RuntimeConfig {
    RuntimeConfig::new("1.0.0")
}

pub(crate) fn create_dev_config() -> RuntimeConfig {
    RuntimeConfig::new("1.0.0").with_environment(Environment::Development)
}

pub(crate) fn create_test_request(url: &str) -> ProxyRequest {
    ProxyRequest::get(Url::parse(url).unwrap())
}

pub(crate) fn create_ok_response(body: &str) -> ProxyResponse {
    ProxyResponse::new(StatusCode::OK).with_body(body.as_bytes().to_vec())
}

pub(crate) fn create_status_response(status: u16) -> ProxyResponse {
    ProxyResponse::new(StatusCode::from_u16(status).unwrap())
}

/// Recording store double with scripted lookup content.
pub(crate) struct MockStore {
    entry: Mutex<Option<ProxyResponse>>,
    fail_puts: bool,
    fail_bulk: bool,
    lookups: Mutex<usize>,
    puts: Mutex<Vec<(String, ProxyResponse)>>,
    bulk_inserts: Mutex<Vec<Vec<String>>>,
}

impl MockStore {
    pub(crate) fn empty() -> Self {
        Self {
            entry: Mutex::new(None),
            fail_puts: false,
            fail_bulk: false,
            lookups: Mutex::new(0),
            puts: Mutex::new(Vec::new()),
            bulk_inserts: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn holding(response: ProxyResponse) -> Self {
        let store = Self::empty();
        *store.entry.lock() = Some(response);
        store
    }

    pub(crate) fn with_failing_puts(mut self) -> Self {
        self.fail_puts = true;
        self
    }

    pub(crate) fn with_failing_bulk_insert(mut self) -> Self {
        self.fail_bulk = true;
        self
    }

    pub(crate) fn lookup_count(&self) -> usize {
        *self.lookups.lock()
    }

    pub(crate) fn put_count(&self) -> usize {
        self.puts.lock().len()
    }

    pub(crate) fn puts(&self) -> Vec<(String, ProxyResponse)> {
        self.puts.lock().clone()
    }

    pub(crate) fn bulk_inserts(&self) -> Vec<Vec<String>> {
        self.bulk_inserts.lock().clone()
    }
}

#[async_trait]
impl CacheStore for MockStore {
    async fn lookup(&self, _request: &ProxyRequest) -> Result<Option<ProxyResponse>, StoreError> {
        *self.lookups.lock() += 1;
        Ok(self.entry.lock().clone())
    }

    async fn put(&self, request: &ProxyRequest, response: ProxyResponse) -> Result<(), StoreError> {
        if self.fail_puts {
            return Err(StoreError::Backend("scripted put failure".to_string()));
        }
        self.puts
            .lock()
            .push((request.entry_key().to_string(), response));
        Ok(())
    }

    async fn add_all(&self, urls: &[String]) -> Result<(), StoreError> {
        if self.fail_bulk {
            return Err(StoreError::Backend(
                "scripted bulk insert failure".to_string(),
            ));
        }
        self.bulk_inserts.lock().push(urls.to_vec());
        Ok(())
    }
}

/// Recording registry double. Stores are created on demand; `keys` returns
/// only the scripted identifier list.
pub(crate) struct MockStores {
    stores: Mutex<HashMap<String, Arc<MockStore>>>,
    all_keys: Mutex<Vec<String>>,
    fail_deletes: Vec<String>,
    opened: Mutex<Vec<String>>,
    deleted: Mutex<Vec<String>>,
}

impl MockStores {
    pub(crate) fn new() -> Self {
        Self {
            stores: Mutex::new(HashMap::new()),
            all_keys: Mutex::new(Vec::new()),
            fail_deletes: Vec::new(),
            opened: Mutex::new(Vec::new()),
            deleted: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn with_store(self, name: &str, store: MockStore) -> Self {
        self.stores.lock().insert(name.to_string(), Arc::new(store));
        self.all_keys.lock().push(name.to_string());
        self
    }

    pub(crate) fn with_keys(self, keys: &[&str]) -> Self {
        self.all_keys
            .lock()
            .extend(keys.iter().map(|k| k.to_string()));
        self
    }

    pub(crate) fn with_failing_delete(mut self, name: &str) -> Self {
        self.fail_deletes.push(name.to_string());
        self
    }

    /// The store registered or created under `name`. Panics when the name
    /// was never opened or seeded.
    pub(crate) fn store(&self, name: &str) -> Arc<MockStore> {
        self.stores.lock().get(name).cloned().unwrap()
    }

    pub(crate) fn opened_names(&self) -> Vec<String> {
        self.opened.lock().clone()
    }

    pub(crate) fn deleted_names(&self) -> Vec<String> {
        self.deleted.lock().clone()
    }
}

#[async_trait]
impl StoreRegistry for MockStores {
    async fn open(&self, name: &str) -> Result<Arc<dyn CacheStore>, StoreError> {
        self.opened.lock().push(name.to_string());
        let store = Arc::clone(
            self.stores
                .lock()
                .entry(name.to_string())
                .or_insert_with(|| Arc::new(MockStore::empty())),
        );
        Ok(store)
    }

    async fn keys(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.all_keys.lock().clone())
    }

    async fn delete(&self, name: &str) -> Result<bool, StoreError> {
        if self.fail_deletes.iter().any(|f| f == name) {
            return Err(StoreError::Backend(format!(
                "scripted delete failure for {}",
                name
            )));
        }
        self.deleted.lock().push(name.to_string());
        self.stores.lock().remove(name);
        Ok(true)
    }
}

/// Recording fetcher double replaying a scripted outcome per call.
pub(crate) struct MockFetcher {
    script: Mutex<VecDeque<Result<ProxyResponse, FetchError>>>,
    calls: Mutex<Vec<String>>,
}

impl MockFetcher {
    /// A fetcher with nothing scripted; any call reports a transport error.
    pub(crate) fn unscripted() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn respond_with(response: ProxyResponse) -> Self {
        let fetcher = Self::unscripted();
        fetcher.script.lock().push_back(Ok(response));
        fetcher
    }

    pub(crate) fn failing(message: &str) -> Self {
        let fetcher = Self::unscripted();
        fetcher
            .script
            .lock()
            .push_back(Err(FetchError::Transport(message.to_string())));
        fetcher
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    pub(crate) fn requested_urls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl Fetcher for MockFetcher {
    async fn fetch(&self, request: &ProxyRequest) -> Result<ProxyResponse, FetchError> {
        self.calls.lock().push(request.url.to_string());
        match self.script.lock().pop_front() {
            Some(outcome) => outcome,
            None => Err(FetchError::Transport(
                "no scripted response left".to_string(),
            )),
        }
    }
}
