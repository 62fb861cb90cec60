//! Root navigation state

use std::fmt;
use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::session::SessionBus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Splash,
    Login,
    SignUp,
    Dashboard,
    Income,
    Expense,
    Profile,
    EditProfile,
    AddIncome,
    AddExpense,
}

impl Route {
    pub fn as_str(&self) -> &'static str {
        match self {
            Route::Splash => "splash",
            Route::Login => "login",
            Route::SignUp => "signup",
            Route::Dashboard => "dashboard",
            Route::Income => "income",
            Route::Expense => "expense",
            Route::Profile => "profile",
            Route::EditProfile => "edit_profile",
            Route::AddIncome => "add_income",
            Route::AddExpense => "add_expense",
        }
    }

    /// Screens reachable without a session
    pub fn is_public(&self) -> bool {
        matches!(self, Route::Splash | Route::Login | Route::SignUp)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub struct NavigationController {
    route: Arc<watch::Sender<Route>>,
    bus: SessionBus,
}

impl NavigationController {
    pub fn new(bus: SessionBus) -> Self {
        let (route, _) = watch::channel(Route::Splash);
        Self {
            route: Arc::new(route),
            bus,
        }
    }

    pub fn current(&self) -> Route {
        *self.route.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<Route> {
        self.route.subscribe()
    }

    pub fn navigate(&self, route: Route) {
        tracing::debug!(from = %self.current(), to = %route, "navigate");
        self.route.send_replace(route);
    }

    /// Send the user back to login on every session invalidation
    ///
    /// Must be called inside a tokio runtime.
    pub fn start_session_watch(&self) -> JoinHandle<()> {
        let route = Arc::clone(&self.route);
        self.bus.on_invalidated(move || {
            let route = Arc::clone(&route);
            async move {
                route.send_replace(Route::Login);
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::prefs::MemoryPreferences;
    use crate::session::CredentialStore;

    #[tokio::test]
    async fn test_invalidation_forces_login() {
        let creds = Arc::new(CredentialStore::new(Arc::new(MemoryPreferences::new())));
        let bus = SessionBus::new(creds);
        let nav = NavigationController::new(bus.clone());
        let mut rx = nav.subscribe();
        let _watch = nav.start_session_watch();

        nav.navigate(Route::Income);
        let _ = rx.borrow_and_update();

        bus.trigger_logout().unwrap();
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), Route::Login);
    }

    #[test]
    fn test_public_routes() {
        assert!(Route::Login.is_public());
        assert!(!Route::AddExpense.is_public());
    }
}
