//! Lazy, shared store connection.
//!
//! The first caller of [`ConnectionManager::ensure_ready`] starts a connect attempt;
//! callers arriving while it is in flight await the same attempt and receive its
//! outcome, success or failure. A failed attempt leaves the manager retryable by a
//! later call, a successful one is kept for the process lifetime until
//! [`StoreLifecycle::shutdown`] runs.

use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::{BoxFuture, FutureExt, Shared};
use tokio::sync::{Mutex, OnceCell};
use tracing::{error, info};

use common::{AppError, AppResult};

/// Lifecycle of the shared store handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ConnectionState {
    Uninitialized = 0,
    Connecting = 1,
    Ready = 2,
    /// Last attempt failed; the next caller retries
    Failed = 3,
    /// Shut down; no further attempts are made
    Closed = 4,
}

impl ConnectionState {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => ConnectionState::Uninitialized,
            1 => ConnectionState::Connecting,
            2 => ConnectionState::Ready,
            3 => ConnectionState::Failed,
            _ => ConnectionState::Closed,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionState::Uninitialized => "uninitialized",
            ConnectionState::Connecting => "connecting",
            ConnectionState::Ready => "ready",
            ConnectionState::Failed => "failed",
            ConnectionState::Closed => "closed",
        }
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Establishes the underlying store connection.
#[async_trait]
pub trait Connector: Send + Sync + 'static {
    /// Shared handle given to every caller once connected.
    type Handle: Clone + Send + Sync + 'static;

    /// Perform one connect attempt.
    async fn connect(&self) -> AppResult<Self::Handle>;

    /// Release the handle at shutdown.
    async fn disconnect(&self, handle: Self::Handle) {
        drop(handle);
    }
}

/// Object-safe view of the lifecycle for the HTTP layer.
#[async_trait]
pub trait StoreLifecycle: Send + Sync {
    /// Connect if needed; returns once the store is usable.
    async fn ready(&self) -> AppResult<()>;

    fn state(&self) -> ConnectionState;

    /// Tear the handle down. Later readiness checks fail.
    async fn shutdown(&self);
}

/// One connect attempt, awaited by every caller that joined it.
type Attempt<H> = Shared<BoxFuture<'static, AppResult<H>>>;

/// Owns the single store handle shared by all requests.
pub struct ConnectionManager<C: Connector> {
    connector: Arc<C>,
    handle: OnceCell<C::Handle>,
    /// Attempt in flight, if any. Also serializes publishing the handle against shutdown.
    attempt: Mutex<Option<Attempt<C::Handle>>>,
    state: Arc<AtomicU8>,
}

impl<C: Connector> ConnectionManager<C> {
    /// Create a manager. Nothing is connected until the first `ensure_ready`.
    pub fn new(connector: C) -> Self {
        Self {
            connector: Arc::new(connector),
            handle: OnceCell::new(),
            attempt: Mutex::new(None),
            state: Arc::new(AtomicU8::new(ConnectionState::Uninitialized as u8)),
        }
    }

    /// Return the shared handle, connecting on first need.
    pub async fn ensure_ready(&self) -> AppResult<C::Handle> {
        self.reject_if_closed()?;
        if let Some(handle) = self.handle.get() {
            return Ok(handle.clone());
        }

        let attempt = {
            let mut slot = self.attempt.lock().await;
            self.reject_if_closed()?;
            if let Some(handle) = self.handle.get() {
                return Ok(handle.clone());
            }
            slot.get_or_insert_with(|| self.start_attempt()).clone()
        };

        let outcome = attempt.clone().await;

        // The first caller back from an attempt retires it and publishes its handle.
        let mut slot = self.attempt.lock().await;
        let owner = slot.as_ref().is_some_and(|pending| pending.ptr_eq(&attempt));
        if owner {
            *slot = None;
        }

        let handle = outcome?;
        if self.current() == ConnectionState::Closed {
            if owner {
                self.connector.disconnect(handle).await;
                info!("Released connection established after shutdown");
            }
            return Err(closed());
        }
        if owner {
            let _ = self.handle.set(handle.clone());
        }
        Ok(handle)
    }

    fn start_attempt(&self) -> Attempt<C::Handle> {
        let connector = Arc::clone(&self.connector);
        let state = Arc::clone(&self.state);

        async move {
            transition(&state, ConnectionState::Connecting);
            info!("Connecting to document store");

            match connector.connect().await {
                Ok(handle) => {
                    transition(&state, ConnectionState::Ready);
                    info!("Document store connection ready");
                    Ok(handle)
                }
                Err(e) => {
                    transition(&state, ConnectionState::Failed);
                    error!(error = ?e, "Document store connection attempt failed");
                    Err(e)
                }
            }
        }
        .boxed()
        .shared()
    }

    fn current(&self) -> ConnectionState {
        ConnectionState::from_u8(self.state.load(Ordering::Acquire))
    }

    fn reject_if_closed(&self) -> AppResult<()> {
        if self.current() == ConnectionState::Closed {
            return Err(closed());
        }
        Ok(())
    }
}

/// Move to `next` unless already closed.
fn transition(state: &AtomicU8, next: ConnectionState) {
    let _ = state.fetch_update(Ordering::AcqRel, Ordering::Acquire, |current| {
        (current != ConnectionState::Closed as u8).then_some(next as u8)
    });
}

fn closed() -> AppError {
    AppError::connection("store connection has been shut down")
}

#[async_trait]
impl<C: Connector> StoreLifecycle for ConnectionManager<C> {
    async fn ready(&self) -> AppResult<()> {
        self.ensure_ready().await.map(|_| ())
    }

    fn state(&self) -> ConnectionState {
        self.current()
    }

    async fn shutdown(&self) {
        let previous = self
            .state
            .swap(ConnectionState::Closed as u8, Ordering::AcqRel);
        if previous == ConnectionState::Closed as u8 {
            return;
        }

        // An attempt finishing now either publishes before this lock or sees `Closed`.
        let _slot = self.attempt.lock().await;
        if let Some(handle) = self.handle.get() {
            self.connector.disconnect(handle.clone()).await;
        }
        info!("Document store connection closed");
    }
}
