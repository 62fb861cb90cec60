//! Shared screen state types

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

use crate::domain::result::Error;

pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_millis(3000);

/// State of a screen backed by one remote fetch
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureState<T> {
    Loading,
    Success(T),
    Error(String),
}

impl<T> FeatureState<T> {
    /// True once a successful payload is on screen; later fetches then
    /// refresh silently instead of going back to `Loading`
    pub fn has_payload(&self) -> bool {
        matches!(self, FeatureState::Success(_))
    }

    pub fn payload(&self) -> Option<&T> {
        match self {
            FeatureState::Success(payload) => Some(payload),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FeatureState::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, FeatureState::Loading)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToastKind {
    Success,
    Error,
    Warning,
    #[default]
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ToastState {
    pub visible: bool,
    pub message: String,
    pub kind: ToastKind,
}

/// Publishes toasts and hides each one after a fixed duration
///
/// A newer toast cancels the pending dismissal of an older one. Outside a
/// tokio runtime, or with a zero duration, toasts stay up until `hide`.
pub struct Toaster {
    tx: Arc<watch::Sender<ToastState>>,
    generation: Arc<AtomicU64>,
    duration: Duration,
}

impl Toaster {
    pub fn new(duration: Duration) -> Self {
        let (tx, _) = watch::channel(ToastState::default());
        Self {
            tx: Arc::new(tx),
            generation: Arc::new(AtomicU64::new(0)),
            duration,
        }
    }

    pub fn show(&self, message: impl Into<String>, kind: ToastKind) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.tx.send_replace(ToastState {
            visible: true,
            message: message.into(),
            kind,
        });

        if self.duration.is_zero() {
            return;
        }
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            return;
        };
        let tx = Arc::clone(&self.tx);
        let current = Arc::clone(&self.generation);
        let duration = self.duration;
        handle.spawn(async move {
            tokio::time::sleep(duration).await;
            if current.load(Ordering::SeqCst) == generation {
                tx.send_modify(|toast| toast.visible = false);
            }
        });
    }

    pub fn success(&self, message: impl Into<String>) {
        self.show(message, ToastKind::Success);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.show(message, ToastKind::Error);
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.show(message, ToastKind::Warning);
    }

    pub fn hide(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.tx.send_modify(|toast| toast.visible = false);
    }

    pub fn current(&self) -> ToastState {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ToastState> {
        self.tx.subscribe()
    }
}

impl Default for Toaster {
    fn default() -> Self {
        Self::new(DEFAULT_TOAST_DURATION)
    }
}

/// Message for an error state, with `fallback` for errors that carry none
pub(crate) fn error_message(error: &Error, fallback: &str) -> String {
    let message = error.to_string();
    if message.trim().is_empty() {
        fallback.to_string()
    } else {
        message
    }
}
