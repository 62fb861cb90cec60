//! Login, sign-up and session status

use std::path::Path;
use std::sync::Arc;

use tokio::sync::watch;

use super::state::{error_message, ToastState, Toaster};
use crate::domain::validation::{validate_credentials, validate_sign_up};
use crate::repositories::AuthRepository;
use crate::session::credentials::{DEFAULT_USER_EMAIL, DEFAULT_USER_NAME};
use crate::session::CredentialStore;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthState {
    #[default]
    Idle,
    Loading,
    LoginSuccess,
    SignUpSuccess,
    Authenticated,
    Error(String),
}

pub struct AuthController {
    repository: Arc<AuthRepository>,
    credentials: Arc<CredentialStore>,
    state: watch::Sender<AuthState>,
    toaster: Toaster,
}

impl AuthController {
    pub fn new(
        repository: Arc<AuthRepository>,
        credentials: Arc<CredentialStore>,
        toaster: Toaster,
    ) -> Self {
        let (state, _) = watch::channel(AuthState::Idle);
        Self {
            repository,
            credentials,
            state,
            toaster,
        }
    }

    pub fn state(&self) -> AuthState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    pub fn toast(&self) -> ToastState {
        self.toaster.current()
    }

    pub fn hide_toast(&self) {
        self.toaster.hide();
    }

    /// Decide whether a stored session may be resumed
    ///
    /// A session that was not remembered is wiped here, so it never outlives
    /// the process that created it.
    pub fn check_auth_status(&self) {
        let session = match self.credentials.session() {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!("Failed to read stored session: {}", e);
                self.state.send_replace(AuthState::Idle);
                return;
            }
        };

        if session.is_restorable() {
            self.state.send_replace(AuthState::Authenticated);
            return;
        }
        if !session.remember_me {
            if let Err(e) = self.credentials.clear() {
                tracing::warn!("Failed to clear unremembered session: {}", e);
            }
        }
        self.state.send_replace(AuthState::Idle);
    }

    pub async fn login(&self, email: &str, password: &str, remember_me: bool) {
        if let Err(e) = validate_credentials(email, password) {
            self.state.send_replace(AuthState::Error(e.to_string()));
            return;
        }

        self.state.send_replace(AuthState::Loading);
        let next = match self.repository.login(email.trim(), password, remember_me).await {
            Ok(_) => AuthState::LoginSuccess,
            Err(e) => AuthState::Error(error_message(&e, "Login Failed")),
        };
        self.state.send_replace(next);
    }

    pub async fn sign_up(&self, full_name: &str, email: &str, password: &str, image: Option<&Path>) {
        if let Err(e) = validate_sign_up(full_name, email, password) {
            self.state.send_replace(AuthState::Error(e.to_string()));
            return;
        }

        self.state.send_replace(AuthState::Loading);
        let next = match self
            .repository
            .sign_up(full_name.trim(), email.trim(), password, image)
            .await
        {
            Ok(_) => AuthState::SignUpSuccess,
            Err(e) => AuthState::Error(error_message(&e, "Signup Failed")),
        };
        self.state.send_replace(next);
    }

    pub fn logout(&self) {
        if let Err(e) = self.credentials.clear() {
            tracing::warn!("Failed to clear credentials on logout: {}", e);
        }
        tracing::info!("logged out");
        self.state.send_replace(AuthState::Idle);
        self.toaster.success("Logged out successfully!");
    }

    /// Back to `Idle` once a one-shot success has been handled
    pub fn reset_state(&self) {
        self.state.send_replace(AuthState::Idle);
    }

    pub fn user_name(&self) -> String {
        self.credentials
            .user_name()
            .unwrap_or_else(|_| DEFAULT_USER_NAME.to_string())
    }

    pub fn user_email(&self) -> String {
        self.credentials
            .user_email()
            .unwrap_or_else(|_| DEFAULT_USER_EMAIL.to_string())
    }
}
