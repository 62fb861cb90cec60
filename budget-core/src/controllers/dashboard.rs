//! Dashboard screen state

use std::sync::Arc;

use tokio::sync::watch;

use super::state::{error_message, FeatureState};
use crate::domain::{DashboardSnapshot, UserProfile};
use crate::repositories::DashboardRepository;

pub type DashboardState = FeatureState<DashboardSnapshot>;

pub struct DashboardController {
    repository: Arc<DashboardRepository>,
    state: watch::Sender<DashboardState>,
    user: watch::Sender<Option<UserProfile>>,
    refreshing: watch::Sender<bool>,
}

impl DashboardController {
    pub fn new(repository: Arc<DashboardRepository>) -> Self {
        let (state, _) = watch::channel(FeatureState::Loading);
        let (user, _) = watch::channel(None);
        let (refreshing, _) = watch::channel(false);
        Self {
            repository,
            state,
            user,
            refreshing,
        }
    }

    pub fn state(&self) -> DashboardState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<DashboardState> {
        self.state.subscribe()
    }

    pub fn user(&self) -> Option<UserProfile> {
        self.user.borrow().clone()
    }

    pub fn is_refreshing(&self) -> bool {
        *self.refreshing.borrow()
    }

    pub fn subscribe_refreshing(&self) -> watch::Receiver<bool> {
        self.refreshing.subscribe()
    }

    pub async fn fetch_dashboard_data(&self) {
        if !self.is_refreshing() && !self.state.borrow().has_payload() {
            self.state.send_replace(FeatureState::Loading);
        }

        let next = match self.repository.dashboard().await {
            Ok(snapshot) => FeatureState::Success(snapshot),
            Err(e) => FeatureState::Error(error_message(&e, "Error loading data")),
        };
        self.state.send_replace(next);
    }

    /// Failures leave the previous user in place
    pub async fn fetch_user_info(&self) {
        match self.repository.user_info().await {
            Ok(profile) => {
                self.user.send_replace(Some(profile));
            }
            Err(e) => tracing::debug!("Failed to fetch user info for dashboard: {}", e),
        }
    }

    /// Initial load: dashboard and user concurrently
    pub async fn load(&self) {
        tokio::join!(self.fetch_dashboard_data(), self.fetch_user_info());
    }

    /// Pull-to-refresh; the flag drops only after both fetches finished
    pub async fn refresh(&self) {
        self.refreshing.send_replace(true);
        tokio::join!(self.fetch_dashboard_data(), self.fetch_user_info());
        self.refreshing.send_replace(false);
    }
}
