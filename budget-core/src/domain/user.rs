//! User profile models

use serde::{Deserialize, Serialize};

/// Profile of the authenticated user as served by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub profile_image_url: Option<String>,
}

/// Locally cached display fields, available before any network fetch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedProfile {
    pub name: String,
    pub email: String,
    pub image_url: Option<String>,
}

impl From<&UserProfile> for CachedProfile {
    fn from(profile: &UserProfile) -> Self {
        Self {
            name: profile.full_name.clone(),
            email: profile.email.clone(),
            image_url: profile.profile_image_url.clone(),
        }
    }
}
