//! Profile screen state

use std::path::Path;
use std::sync::Arc;

use tokio::sync::watch;

use super::state::{error_message, ToastState, Toaster};
use crate::domain::result::Result;
use crate::domain::validation::validate_password_change;
use crate::domain::{CachedProfile, UserProfile};
use crate::repositories::{ProfileRepository, ProfileUpdate};
use crate::session::CredentialStore;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ProfileState {
    #[default]
    Idle,
    Loading,
    Success(String),
    Error(String),
}

/// What the profile screen shows; missing phone/address are empty strings
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProfileData {
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub address: String,
    pub profile_image_url: Option<String>,
}

impl From<UserProfile> for ProfileData {
    fn from(profile: UserProfile) -> Self {
        Self {
            full_name: profile.full_name,
            email: profile.email,
            phone_number: profile.phone_number.unwrap_or_default(),
            address: profile.address.unwrap_or_default(),
            profile_image_url: profile.profile_image_url,
        }
    }
}

impl From<CachedProfile> for ProfileData {
    fn from(cached: CachedProfile) -> Self {
        Self {
            full_name: cached.name,
            email: cached.email,
            profile_image_url: cached.image_url,
            ..Default::default()
        }
    }
}

pub struct ProfileController {
    repository: Arc<ProfileRepository>,
    credentials: Arc<CredentialStore>,
    state: watch::Sender<ProfileState>,
    data: watch::Sender<ProfileData>,
    uploading_image: watch::Sender<bool>,
    notification_enabled: watch::Sender<bool>,
    toaster: Toaster,
}

impl ProfileController {
    pub fn new(
        repository: Arc<ProfileRepository>,
        credentials: Arc<CredentialStore>,
        toaster: Toaster,
    ) -> Self {
        let enabled = credentials.notification_preference().unwrap_or_else(|e| {
            tracing::warn!("Failed to read notification preference: {}", e);
            true
        });
        let (state, _) = watch::channel(ProfileState::Idle);
        let (data, _) = watch::channel(ProfileData::default());
        let (uploading_image, _) = watch::channel(false);
        let (notification_enabled, _) = watch::channel(enabled);

        Self {
            repository,
            credentials,
            state,
            data,
            uploading_image,
            notification_enabled,
            toaster,
        }
    }

    pub fn state(&self) -> ProfileState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ProfileState> {
        self.state.subscribe()
    }

    pub fn profile_data(&self) -> ProfileData {
        self.data.borrow().clone()
    }

    pub fn subscribe_profile_data(&self) -> watch::Receiver<ProfileData> {
        self.data.subscribe()
    }

    pub fn uploading_image(&self) -> bool {
        *self.uploading_image.borrow()
    }

    pub fn notification_enabled(&self) -> bool {
        *self.notification_enabled.borrow()
    }

    pub fn toast(&self) -> ToastState {
        self.toaster.current()
    }

    pub fn hide_toast(&self) {
        self.toaster.hide();
    }

    pub fn reset_state(&self) {
        self.state.send_replace(ProfileState::Idle);
    }

    /// Load from the server, or from the local cache when that fails
    ///
    /// Returns false when the cache was used. The cache has no phone or
    /// address, so that data is not a complete profile.
    pub async fn load_profile(&self) -> bool {
        match self.repository.user_info().await {
            Ok(profile) => {
                self.data.send_replace(profile.into());
                true
            }
            Err(e) => {
                tracing::debug!("Profile fetch failed, using cached profile: {}", e);
                match self.repository.cached_profile() {
                    Ok(cached) => {
                        self.data.send_replace(cached.into());
                    }
                    Err(e) => tracing::warn!("Failed to read cached profile: {}", e),
                }
                false
            }
        }
    }

    pub async fn refresh_profile(&self) -> bool {
        self.load_profile().await
    }

    pub fn toggle_notification(&self, enabled: bool) -> Result<()> {
        self.notification_enabled.send_replace(enabled);
        self.credentials.save_notification_preference(enabled)
    }

    /// Save name, phone and address
    ///
    /// Blank phone or address are sent as null. The image URL sent along is
    /// whatever this controller last knew about.
    pub async fn update_profile(&self, full_name: &str, phone_number: &str, address: &str) -> bool {
        self.state.send_replace(ProfileState::Loading);

        let update = ProfileUpdate {
            full_name: full_name.trim().to_string(),
            phone_number: non_blank(phone_number),
            address: non_blank(address),
            profile_image_url: self.data.borrow().profile_image_url.clone(),
        };

        match self.repository.update_profile(&update).await {
            Ok(profile) => {
                self.data.send_replace(profile.into());
                self.succeed("Profile updated successfully");
                true
            }
            Err(e) => {
                self.fail(error_message(&e, "Failed to update profile"));
                false
            }
        }
    }

    pub async fn upload_image(&self, path: &Path) -> bool {
        self.uploading_image.send_replace(true);
        let result = self.repository.upload_profile_image(path).await;
        self.uploading_image.send_replace(false);

        match result {
            Ok(url) => {
                self.data
                    .send_modify(|data| data.profile_image_url = Some(url).filter(|u| !u.is_empty()));
                self.toaster.success("Image uploaded successfully");
                true
            }
            Err(e) => {
                tracing::debug!("Profile image upload failed: {}", e);
                self.fail("Failed to upload image".to_string());
                false
            }
        }
    }

    pub async fn change_password(&self, old_password: &str, new_password: &str) -> bool {
        if let Err(e) = validate_password_change(old_password, new_password) {
            self.fail(e.to_string());
            return false;
        }

        self.state.send_replace(ProfileState::Loading);
        match self
            .repository
            .change_password(old_password, new_password)
            .await
        {
            Ok(_) => {
                self.succeed("Password changed successfully");
                true
            }
            Err(e) => {
                self.fail(error_message(&e, "Failed to change password"));
                false
            }
        }
    }

    fn succeed(&self, message: &str) {
        self.state.send_replace(ProfileState::Success(message.to_string()));
        self.toaster.success(message);
    }

    fn fail(&self, message: String) {
        self.toaster.error(message.clone());
        self.state.send_replace(ProfileState::Error(message));
    }
}

fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}
