//! Feature state controllers
//!
//! Each controller owns the state of one screen, published on `watch`
//! channels, and orchestrates the repository calls behind it.

mod auth;
mod dashboard;
mod navigation;
mod profile;
pub mod state;
mod transactions;

pub use auth::{AuthController, AuthState};
pub use dashboard::{DashboardController, DashboardState};
pub use navigation::{NavigationController, Route};
pub use profile::{ProfileController, ProfileData, ProfileState};
pub use state::{FeatureState, ToastKind, ToastState, Toaster};
pub use transactions::{TransactionController, TransactionListState};
