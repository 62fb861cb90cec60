//! Profile repository

use std::path::Path;
use std::sync::Arc;

use super::{encode_image_data_url, resolve_image_url};
use crate::api::dto::UpdateProfileRequest;
use crate::api::ApiClient;
use crate::domain::result::Result;
use crate::domain::{CachedProfile, UserProfile};
use crate::session::CredentialStore;

const FAILED_TO_FETCH_PROFILE: &str = "Failed to fetch profile";

/// Fields the user can edit on their profile
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub full_name: String,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub profile_image_url: Option<String>,
}

pub struct ProfileRepository {
    api: Arc<ApiClient>,
    credentials: Arc<CredentialStore>,
    base_url: String,
}

impl ProfileRepository {
    pub fn new(api: Arc<ApiClient>, credentials: Arc<CredentialStore>, base_url: &str) -> Self {
        Self {
            api,
            credentials,
            base_url: base_url.to_string(),
        }
    }

    /// Fetch the profile and refresh the cached copy
    pub async fn user_info(&self) -> Result<UserProfile> {
        let profile = self
            .api
            .user_info()
            .await
            .map_err(|e| e.with_fallback(FAILED_TO_FETCH_PROFILE))?;
        self.store(profile)
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<UserProfile> {
        let request = UpdateProfileRequest {
            full_name: &update.full_name,
            phone_number: update.phone_number.as_deref(),
            address: update.address.as_deref(),
            profile_image_url: update.profile_image_url.as_deref(),
        };
        let profile = self.api.update_profile(&request).await?;
        self.store(profile)
    }

    /// Returns the server's confirmation message
    pub async fn change_password(&self, old_password: &str, new_password: &str) -> Result<String> {
        self.api.change_password(old_password, new_password).await
    }

    /// Upload a new profile image; returns its resolved URL
    ///
    /// Only the cached image is rewritten; cached name and email stay as
    /// they were.
    pub async fn upload_profile_image(&self, path: &Path) -> Result<String> {
        let data_url = encode_image_data_url(path)?;
        let raw = self.api.upload_image(&data_url).await?;
        let url = resolve_image_url(Some(&raw), &self.base_url).unwrap_or_default();

        self.credentials.save_user_image(&url)?;
        Ok(url)
    }

    /// The locally cached profile, image URL normalized
    pub fn cached_profile(&self) -> Result<CachedProfile> {
        let mut cached = self.credentials.cached_profile()?;
        cached.image_url = resolve_image_url(cached.image_url.as_deref(), &self.base_url);
        Ok(cached)
    }

    fn store(&self, mut profile: UserProfile) -> Result<UserProfile> {
        profile.profile_image_url =
            resolve_image_url(profile.profile_image_url.as_deref(), &self.base_url);
        self.credentials.save_user(
            &profile.full_name,
            &profile.email,
            profile.profile_image_url.as_deref(),
        )?;
        Ok(profile)
    }
}
