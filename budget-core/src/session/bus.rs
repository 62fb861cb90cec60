//! Session signal bus
//!
//! A broadcast of "the session is gone" events. Anything holding a clone can
//! force a logout; anything subscribed hears about it.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use super::CredentialStore;
use crate::domain::result::Result;

const CHANNEL_CAPACITY: usize = 16;

/// Emitted once per invalidation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionInvalidated;

#[derive(Clone)]
pub struct SessionBus {
    tx: broadcast::Sender<SessionInvalidated>,
    credentials: Arc<CredentialStore>,
}

impl SessionBus {
    pub fn new(credentials: Arc<CredentialStore>) -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx, credentials }
    }

    /// Publish an invalidation; returns how many subscribers received it
    pub fn emit_invalidated(&self) -> usize {
        self.tx.send(SessionInvalidated).unwrap_or(0)
    }

    /// Receiver for every emission after this call (no replay)
    pub fn subscribe(&self) -> broadcast::Receiver<SessionInvalidated> {
        self.tx.subscribe()
    }

    /// Run `handler` on every future invalidation
    ///
    /// Must be called inside a tokio runtime. The task ends when every
    /// `SessionBus` clone has been dropped.
    pub fn on_invalidated<F, Fut>(&self, mut handler: F) -> JoinHandle<()>
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let mut rx = self.subscribe();
        tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(SessionInvalidated) => handler().await,
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::debug!(skipped, "session listener lagged");
                        handler().await;
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        })
    }

    /// Clear persisted credentials, then notify subscribers
    ///
    /// Subscribers therefore always observe an already-empty store.
    pub fn trigger_logout(&self) -> Result<()> {
        let cleared = self.credentials.clear();
        let receivers = self.emit_invalidated();
        tracing::info!(receivers, "session invalidated");
        cleared
    }
}
