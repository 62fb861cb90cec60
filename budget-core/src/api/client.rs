//! Typed API client
//!
//! One method per endpoint. Every call goes through the [`RequestPipeline`],
//! and every non-2xx response is folded into [`Error`] here.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::dto::*;
use crate::domain::result::{Error, Result};
use crate::domain::{DashboardSnapshot, NewTransaction, Transaction, TransactionKind, UserProfile};
use crate::ports::{HttpRequest, HttpResponse};
use crate::session::RequestPipeline;

/// Endpoint paths, relative to the API host
pub mod paths {
    use crate::domain::TransactionKind;

    pub const LOGIN: &str = "/api/v1/auth/login";
    pub const REGISTER: &str = "/api/v1/auth/register";
    pub const UPLOAD_IMAGE: &str = "/api/v1/auth/upload-image";
    pub const USER_INFO: &str = "/api/v1/auth/getUser";
    pub const DASHBOARD: &str = "/api/v1/dashboard";
    pub const UPDATE_PROFILE: &str = "/api/v1/profile/update";
    pub const CHANGE_PASSWORD: &str = "/api/v1/profile/change-password";

    pub fn list(kind: TransactionKind) -> String {
        format!("/api/v1/{}/get", kind.as_str())
    }

    pub fn add(kind: TransactionKind) -> String {
        format!("/api/v1/{}/add", kind.as_str())
    }

    pub fn delete(kind: TransactionKind, id: &str) -> String {
        format!("/api/v1/{}/{}", kind.as_str(), id)
    }

    pub fn download(kind: TransactionKind) -> String {
        format!("/api/v1/{}/downloadexcel", kind.as_str())
    }
}

/// Messages used when the server rejects a call without saying why
pub mod fallback {
    use crate::domain::TransactionKind;

    pub const LOGIN: &str = "Login Failed";
    pub const REGISTER: &str = "Unknown error occurred";
    pub const UPLOAD_IMAGE: &str = "Failed to upload image";
    pub const DASHBOARD: &str = "Failed to load dashboard";
    pub const USER_INFO: &str = "Failed to fetch user info";
    pub const UPDATE_PROFILE: &str = "Failed to update profile";
    pub const CHANGE_PASSWORD: &str = "Failed to change password";
    pub const DOWNLOAD: &str = "Download failed";

    pub fn list(kind: TransactionKind) -> String {
        format!("Failed to fetch {}", kind.as_str())
    }

    pub fn add(kind: TransactionKind) -> String {
        format!("Failed to add {}", kind.as_str())
    }

    pub fn delete(kind: TransactionKind) -> String {
        format!("Failed to delete {}", kind.as_str())
    }
}

pub struct ApiClient {
    pipeline: Arc<RequestPipeline>,
}

impl ApiClient {
    pub fn new(pipeline: Arc<RequestPipeline>) -> Self {
        Self { pipeline }
    }

    // -- auth ---------------------------------------------------------------

    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse> {
        let body = to_body(&LoginRequest { email, password })?;
        self.call(HttpRequest::post(paths::LOGIN, body), fallback::LOGIN)
            .await
    }

    pub async fn register(&self, request: &RegisterRequest<'_>) -> Result<RegisterResponse> {
        let body = to_body(request)?;
        self.call(HttpRequest::post(paths::REGISTER, body), fallback::REGISTER)
            .await
    }

    /// Upload a `data:` URL image; returns the hosted URL as given by the server
    pub async fn upload_image(&self, data_url: &str) -> Result<String> {
        let body = to_body(&ImageUploadRequest { image: data_url })?;
        let res: ImageUploadResponse = self
            .call(HttpRequest::post(paths::UPLOAD_IMAGE, body), fallback::UPLOAD_IMAGE)
            .await?;
        Ok(res.image_url)
    }

    pub async fn user_info(&self) -> Result<UserProfile> {
        let res: ProfileResponse = self
            .call(HttpRequest::get(paths::USER_INFO), fallback::USER_INFO)
            .await?;
        Ok(res.into())
    }

    // -- dashboard ----------------------------------------------------------

    pub async fn dashboard(&self) -> Result<DashboardSnapshot> {
        let res: DashboardResponse = self
            .call(HttpRequest::get(paths::DASHBOARD), fallback::DASHBOARD)
            .await?;
        Ok(res.into())
    }

    // -- income / expense ---------------------------------------------------

    pub async fn transactions(&self, kind: TransactionKind) -> Result<Vec<Transaction>> {
        let list: TransactionList = self
            .call(HttpRequest::get(paths::list(kind)), &fallback::list(kind))
            .await?;
        Ok(list.into_transactions(kind))
    }

    pub async fn add_transaction(
        &self,
        kind: TransactionKind,
        request: &NewTransaction,
    ) -> Result<AddTransactionResponse> {
        let body = add_transaction_body(kind, request);
        self.call(HttpRequest::post(paths::add(kind), body), &fallback::add(kind))
            .await
    }

    pub async fn delete_transaction(&self, kind: TransactionKind, id: &str) -> Result<DeleteResponse> {
        self.call(
            HttpRequest::delete(paths::delete(kind, id)),
            &fallback::delete(kind),
        )
        .await
    }

    /// Raw spreadsheet bytes of the report
    pub async fn download_report(&self, kind: TransactionKind) -> Result<Vec<u8>> {
        let res = self
            .pipeline
            .execute(HttpRequest::get(paths::download(kind)))
            .await?;
        if !res.is_success() {
            return Err(reject(&res, fallback::DOWNLOAD));
        }
        Ok(res.body)
    }

    // -- profile ------------------------------------------------------------

    pub async fn update_profile(&self, request: &UpdateProfileRequest<'_>) -> Result<UserProfile> {
        let body = to_body(request)?;
        let res: ProfileResponse = self
            .call(HttpRequest::put(paths::UPDATE_PROFILE, body), fallback::UPDATE_PROFILE)
            .await?;
        Ok(res.into())
    }

    pub async fn change_password(&self, old_password: &str, new_password: &str) -> Result<String> {
        let body = to_body(&ChangePasswordRequest {
            old_password,
            new_password,
        })?;
        let res: ChangePasswordResponse = self
            .call(
                HttpRequest::put(paths::CHANGE_PASSWORD, body),
                fallback::CHANGE_PASSWORD,
            )
            .await?;
        Ok(res.message)
    }

    async fn call<T: DeserializeOwned>(&self, request: HttpRequest, fallback: &str) -> Result<T> {
        let path = request.path.clone();
        let res = self.pipeline.execute(request).await?;
        if !res.is_success() {
            return Err(reject(&res, fallback));
        }
        res.json().map_err(|e| {
            tracing::debug!(path = %path, error = %e, "undecodable response body");
            Error::malformed(fallback)
        })
    }
}

fn to_body<T: Serialize>(value: &T) -> Result<serde_json::Value> {
    Ok(serde_json::to_value(value)?)
}

/// Fold a non-2xx response into an error
fn reject(res: &HttpResponse, fallback: &str) -> Error {
    let message = res.error_message();
    if res.is_unauthorized() {
        return Error::Unauthorized(message.unwrap_or_else(|| fallback.to_string()));
    }
    match message {
        Some(message) => Error::api(res.status, message),
        None => Error::malformed(fallback),
    }
}
