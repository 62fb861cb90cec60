//! Budget Core - session, API and screen state for the Budget Tracker client
//!
//! This crate follows a hexagonal architecture:
//!
//! - **domain**: Core entities (Transaction, DashboardSnapshot, UserProfile...)
//! - **ports**: Traits for external dependencies (HttpTransport, KeyValueStore)
//! - **adapters**: Concrete implementations (reqwest, JSON preference file)
//! - **session**: Credential store, session bus and request pipeline
//! - **api**: Typed client for the REST API
//! - **repositories**: API calls plus their local side effects
//! - **controllers**: Per-screen state machines

pub mod adapters;
pub mod api;
pub mod config;
pub mod controllers;
pub mod domain;
pub mod ports;
pub mod repositories;
pub mod session;

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use adapters::downloads::DownloadsFolder;
use adapters::http::ReqwestTransport;
use adapters::prefs::JsonFilePreferences;
use api::ApiClient;
use config::Config;
use controllers::*;
use ports::{DownloadNotifier, HttpTransport, KeyValueStore};
use repositories::*;
use session::{CredentialStore, RequestPipeline, SessionBus};

// Re-export commonly used types at crate root
pub use domain::result::{Error, Result as CoreResult};
pub use domain::{
    CachedProfile, DashboardSnapshot, NewTransaction, Session, Transaction, TransactionKind,
    UserProfile,
};

/// Main context for Budget Tracker operations
///
/// Owns the shared session services and repositories. Controllers are cheap
/// to create and are built on demand, one per screen.
pub struct BudgetContext {
    pub config: Config,
    pub credentials: Arc<CredentialStore>,
    pub bus: SessionBus,
    pub auth_repository: Arc<AuthRepository>,
    pub dashboard_repository: Arc<DashboardRepository>,
    pub income_repository: Arc<TransactionRepository>,
    pub expense_repository: Arc<TransactionRepository>,
    pub profile_repository: Arc<ProfileRepository>,
    notifier: Arc<dyn DownloadNotifier>,
}

impl BudgetContext {
    /// Create a context backed by the data directory and the live API
    pub fn new(data_dir: &Path, notifier: Arc<dyn DownloadNotifier>) -> Result<Self> {
        let config = Config::load(data_dir)?;
        let store = Arc::new(JsonFilePreferences::open(data_dir)?);
        let transport = Arc::new(ReqwestTransport::new(&config.base_url)?);

        Ok(Self::with_parts(config, store, transport, notifier))
    }

    /// Assemble a context from explicit parts
    pub fn with_parts(
        config: Config,
        store: Arc<dyn KeyValueStore>,
        transport: Arc<dyn HttpTransport>,
        notifier: Arc<dyn DownloadNotifier>,
    ) -> Self {
        let credentials = Arc::new(CredentialStore::new(store));
        let bus = SessionBus::new(Arc::clone(&credentials));
        let pipeline = Arc::new(RequestPipeline::new(
            transport,
            Arc::clone(&credentials),
            bus.clone(),
        ));
        let api = Arc::new(ApiClient::new(pipeline));
        let downloads = DownloadsFolder::new(config.downloads_dir.clone());

        let auth_repository = Arc::new(AuthRepository::new(
            Arc::clone(&api),
            Arc::clone(&credentials),
        ));
        let dashboard_repository = Arc::new(DashboardRepository::new(Arc::clone(&api)));
        let income_repository = Arc::new(TransactionRepository::new(
            TransactionKind::Income,
            Arc::clone(&api),
            downloads.clone(),
        ));
        let expense_repository = Arc::new(TransactionRepository::new(
            TransactionKind::Expense,
            Arc::clone(&api),
            downloads,
        ));
        let profile_repository = Arc::new(ProfileRepository::new(
            api,
            Arc::clone(&credentials),
            &config.base_url,
        ));

        Self {
            config,
            credentials,
            bus,
            auth_repository,
            dashboard_repository,
            income_repository,
            expense_repository,
            profile_repository,
            notifier,
        }
    }

    fn toaster(&self) -> Toaster {
        Toaster::new(self.config.toast_duration)
    }

    pub fn auth_controller(&self) -> AuthController {
        AuthController::new(
            Arc::clone(&self.auth_repository),
            Arc::clone(&self.credentials),
            self.toaster(),
        )
    }

    pub fn dashboard_controller(&self) -> DashboardController {
        DashboardController::new(Arc::clone(&self.dashboard_repository))
    }

    pub fn transaction_controller(&self, kind: TransactionKind) -> TransactionController {
        let repository = match kind {
            TransactionKind::Income => &self.income_repository,
            TransactionKind::Expense => &self.expense_repository,
        };
        TransactionController::new(
            Arc::clone(repository),
            Arc::clone(&self.credentials),
            Arc::clone(&self.notifier),
            self.toaster(),
        )
    }

    pub fn profile_controller(&self) -> ProfileController {
        ProfileController::new(
            Arc::clone(&self.profile_repository),
            Arc::clone(&self.credentials),
            self.toaster(),
        )
    }

    pub fn navigation_controller(&self) -> NavigationController {
        NavigationController::new(self.bus.clone())
    }
}
