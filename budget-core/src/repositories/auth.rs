//! Authentication repository

use std::path::Path;
use std::sync::Arc;

use super::encode_image_data_url;
use crate::api::dto::{LoginResponse, RegisterRequest, RegisterResponse};
use crate::api::ApiClient;
use crate::domain::result::Result;
use crate::session::credentials::DEFAULT_USER_NAME;
use crate::session::CredentialStore;

pub struct AuthRepository {
    api: Arc<ApiClient>,
    credentials: Arc<CredentialStore>,
}

impl AuthRepository {
    pub fn new(api: Arc<ApiClient>, credentials: Arc<CredentialStore>) -> Self {
        Self { api, credentials }
    }

    /// Log in and persist the session
    ///
    /// Token, cached user and remember flag are written in that order. The
    /// flag is always written so a previous "remember me" never leaks into
    /// a session that did not ask for it.
    pub async fn login(&self, email: &str, password: &str, remember_me: bool) -> Result<LoginResponse> {
        let res = self.api.login(email, password).await?;

        self.credentials.save_token(&res.token)?;
        let name = non_blank(&res.user.full_name).unwrap_or(DEFAULT_USER_NAME);
        let user_email = non_blank(&res.user.email).unwrap_or(email);
        self.credentials
            .save_user(name, user_email, res.user.profile_image_url.as_deref())?;
        self.credentials.set_remember_me(remember_me)?;

        tracing::info!(remember_me, "logged in");
        Ok(res)
    }

    /// Register a new account, uploading the profile image first if given
    ///
    /// A failed image read or upload is not fatal; the account is created
    /// without an image.
    pub async fn sign_up(
        &self,
        full_name: &str,
        email: &str,
        password: &str,
        image: Option<&Path>,
    ) -> Result<RegisterResponse> {
        let image_url = match image {
            Some(path) => self.upload_image(path).await.unwrap_or_else(|e| {
                tracing::warn!("Profile image upload failed, registering without it: {}", e);
                String::new()
            }),
            None => String::new(),
        };

        self.api
            .register(&RegisterRequest {
                full_name,
                email,
                password,
                profile_image: &image_url,
            })
            .await
    }

    async fn upload_image(&self, path: &Path) -> Result<String> {
        let data_url = encode_image_data_url(path)?;
        self.api.upload_image(&data_url).await
    }
}

fn non_blank(s: &str) -> Option<&str> {
    Some(s).filter(|s| !s.trim().is_empty())
}
