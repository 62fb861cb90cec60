//! Income and expense screen state

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::watch;

use super::state::{error_message, FeatureState, ToastState, Toaster};
use crate::domain::validation::parse_new_transaction;
use crate::domain::{Transaction, TransactionKind};
use crate::ports::DownloadNotifier;
use crate::repositories::TransactionRepository;
use crate::session::CredentialStore;

pub type TransactionListState = FeatureState<Vec<Transaction>>;

pub struct TransactionController {
    repository: Arc<TransactionRepository>,
    credentials: Arc<CredentialStore>,
    notifier: Arc<dyn DownloadNotifier>,
    state: watch::Sender<TransactionListState>,
    add_state: watch::Sender<Option<bool>>,
    toaster: Toaster,
}

impl TransactionController {
    pub fn new(
        repository: Arc<TransactionRepository>,
        credentials: Arc<CredentialStore>,
        notifier: Arc<dyn DownloadNotifier>,
        toaster: Toaster,
    ) -> Self {
        let (state, _) = watch::channel(FeatureState::Loading);
        let (add_state, _) = watch::channel(None);
        Self {
            repository,
            credentials,
            notifier,
            state,
            add_state,
            toaster,
        }
    }

    pub fn kind(&self) -> TransactionKind {
        self.repository.kind()
    }

    pub fn state(&self) -> TransactionListState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<TransactionListState> {
        self.state.subscribe()
    }

    /// `Some(true)` after a successful add, `Some(false)` after a failed one
    pub fn add_state(&self) -> Option<bool> {
        *self.add_state.borrow()
    }

    pub fn toast(&self) -> ToastState {
        self.toaster.current()
    }

    pub fn subscribe_toast(&self) -> watch::Receiver<ToastState> {
        self.toaster.subscribe()
    }

    pub fn hide_toast(&self) {
        self.toaster.hide();
    }

    pub fn reset_add_state(&self) {
        self.add_state.send_replace(None);
    }

    /// Reload the list; stays silent when a list is already shown
    pub async fn fetch(&self) {
        if !self.state.borrow().has_payload() {
            self.state.send_replace(FeatureState::Loading);
        }

        let next = match self.repository.all().await {
            Ok(items) => FeatureState::Success(items),
            Err(e) => FeatureState::Error(error_message(&e, "Error")),
        };
        self.state.send_replace(next);
    }

    /// Validate the form fields and add the transaction; returns whether it
    /// was accepted
    pub async fn add(&self, label: &str, amount: &str, date: &str, icon_url: &str) -> bool {
        let title = self.kind().title();

        let request = match parse_new_transaction(label, amount, date, icon_url) {
            Ok(request) => request,
            Err(e) => {
                self.add_state.send_replace(Some(false));
                self.toaster.warning(e.to_string());
                return false;
            }
        };

        match self.repository.add(&request).await {
            Ok(_) => {
                self.add_state.send_replace(Some(true));
                self.toaster.success(format!("{} Added Successfully!", title));
                self.fetch().await;
                true
            }
            Err(e) => {
                tracing::debug!(kind = %self.kind(), "add failed: {}", e);
                self.add_state.send_replace(Some(false));
                self.toaster.error(format!("Failed to Add {}", title));
                false
            }
        }
    }

    pub async fn delete(&self, id: &str) -> bool {
        let title = self.kind().title();

        match self.repository.delete(id).await {
            Ok(_) => {
                self.toaster.success(format!("{} Deleted Successfully!", title));
                self.fetch().await;
                true
            }
            Err(e) => {
                tracing::debug!(kind = %self.kind(), id, "delete failed: {}", e);
                self.toaster.error(format!("Failed to Delete {}", title));
                false
            }
        }
    }

    /// Download the report; returns where it was saved
    pub async fn download_report(&self) -> Option<PathBuf> {
        match self.repository.download_report().await {
            Ok(path) => {
                self.toaster.success("Downloaded Successfully!");
                if self.notifications_enabled() {
                    let title = format!("{} Report", self.kind().title());
                    self.notifier
                        .download_complete(&title, &path.display().to_string());
                }
                Some(path)
            }
            Err(e) => {
                tracing::debug!(kind = %self.kind(), "download failed: {}", e);
                self.toaster.error("Download Failed");
                None
            }
        }
    }

    fn notifications_enabled(&self) -> bool {
        self.credentials.notification_preference().unwrap_or_else(|e| {
            tracing::warn!("Failed to read notification preference: {}", e);
            true
        })
    }
}
