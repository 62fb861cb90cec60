use std::sync::Arc;

use crate::api::ApiClient;
use crate::domain::result::Result;
use crate::domain::{DashboardSnapshot, UserProfile};

/// Read-only access to the dashboard aggregate and the signed-in user
pub struct DashboardRepository {
    api: Arc<ApiClient>,
}

impl DashboardRepository {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    pub async fn dashboard(&self) -> Result<DashboardSnapshot> {
        self.api.dashboard().await
    }

    pub async fn user_info(&self) -> Result<UserProfile> {
        self.api.user_info().await
    }
}
