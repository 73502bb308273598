//! Per-request interception context

use crate::error::CoreError;
use crate::message::{ProxyRequest, ProxyResponse};
use tokio::task::JoinHandle;
use tracing::warn;

/// The outcome a strategy assigned for a request.
///
/// Downstream consumers branch on whether the outcome is already settled,
/// so the slot keeps the distinction instead of eagerly awaiting.
#[derive(Debug)]
pub enum ResponseSlot {
    /// No handler has produced anything yet.
    Unset,
    /// A settled outcome. `None` means the strategy finished without a
    /// response, e.g. a cache-only miss.
    Ready(Option<ProxyResponse>),
    /// A still-pending outcome running on its own task.
    Deferred(JoinHandle<Result<Option<ProxyResponse>, CoreError>>),
}

/// Mutable state threaded through strategies for a single request.
///
/// The host pipeline creates one context per intercepted request, invokes
/// a strategy against it, resolves the slot once and settles any
/// registered background work before the request counts as fully
/// processed. Contexts are never shared across requests.
#[derive(Debug)]
pub struct RequestContext {
    pub request: ProxyRequest,
    slot: ResponseSlot,
    background: Vec<JoinHandle<()>>,
}

impl RequestContext {
    pub fn new(request: ProxyRequest) -> Self {
        Self {
            request,
            slot: ResponseSlot::Unset,
            background: Vec::new(),
        }
    }

    /// Assign a settled outcome. A later handler overwrites an earlier one.
    pub fn set_ready(&mut self, response: Option<ProxyResponse>) {
        self.slot = ResponseSlot::Ready(response);
    }

    /// Assign a pending outcome.
    pub fn set_deferred(&mut self, handle: JoinHandle<Result<Option<ProxyResponse>, CoreError>>) {
        self.slot = ResponseSlot::Deferred(handle);
    }

    /// Whether the slot holds a settled outcome.
    pub fn is_resolved(&self) -> bool {
        matches!(self.slot, ResponseSlot::Ready(_))
    }

    /// Whether the slot holds a pending outcome.
    pub fn is_pending(&self) -> bool {
        matches!(self.slot, ResponseSlot::Deferred(_))
    }

    /// Take the slot and produce the final outcome, awaiting a deferred
    /// one. An unset slot resolves to `Ok(None)`.
    pub async fn resolve_response(&mut self) -> Result<Option<ProxyResponse>, CoreError> {
        match std::mem::replace(&mut self.slot, ResponseSlot::Unset) {
            ResponseSlot::Unset => Ok(None),
            ResponseSlot::Ready(response) => Ok(response),
            ResponseSlot::Deferred(handle) => match handle.await {
                Ok(result) => result,
                Err(e) => Err(CoreError::Task(e.to_string())),
            },
        }
    }

    /// Register fire-and-forget work tied to this request, typically a
    /// background cache write or revalidation.
    pub fn spawn_background(&mut self, handle: JoinHandle<()>) {
        self.background.push(handle);
    }

    /// Number of background tasks not yet settled.
    pub fn pending_background(&self) -> usize {
        self.background.len()
    }

    /// Await every registered background task. Background failures must
    /// never affect the response path, so a panicked task is logged and
    /// swallowed.
    pub async fn settle_background(&mut self) {
        for handle in self.background.drain(..) {
            if let Err(e) = handle.await {
                warn!("Background task for {} failed: {}", self.request.url, e);
            }
        }
    }
}
