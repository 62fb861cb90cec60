//! CLI command implementations

pub mod auth;
pub mod config;
pub mod dashboard;
pub mod icons;
pub mod profile;
pub mod transactions;

use std::future::Future;
use std::io::BufRead;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use dialoguer::Password;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use budget_core::adapters::notifier::LogNotifier;
use budget_core::controllers::{AuthState, NavigationController, Route};
use budget_core::ports::DownloadNotifier;
use budget_core::session::SessionInvalidated;
use budget_core::BudgetContext;

use crate::output;

/// Get the data directory from environment or default
pub fn get_data_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("BUDGET_DIR") {
        return Ok(PathBuf::from(dir));
    }
    let home = dirs::home_dir().context("Could not find home directory")?;
    Ok(home.join(".budget-tracker"))
}

/// Get or create the core context
pub fn get_context() -> Result<BudgetContext> {
    let data_dir = get_data_dir()?;
    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("Failed to create data directory: {:?}", data_dir))?;
    tracing::debug!(data_dir = %data_dir.display(), "opening context");

    // Keep piped output clean; notifications then only reach the log
    let notifier: Arc<dyn DownloadNotifier> = if atty::is(atty::Stream::Stdout) {
        Arc::new(TerminalNotifier)
    } else {
        Arc::new(LogNotifier)
    };
    BudgetContext::new(&data_dir, notifier).context("Failed to initialize budget tracker")
}

/// Prints download completions to the terminal
pub struct TerminalNotifier;

impl DownloadNotifier for TerminalNotifier {
    fn download_complete(&self, title: &str, location: &str) {
        output::info(&format!("{} saved to {}", title, location));
    }
}

/// A CLI run: the context plus the root navigation state
///
/// Starting an app applies the stored-session rule (un-remembered sessions
/// are dropped) and routes to the dashboard or the login screen.
pub struct App {
    pub ctx: BudgetContext,
    pub nav: NavigationController,
    invalidated: broadcast::Receiver<SessionInvalidated>,
    _session_watch: JoinHandle<()>,
}

impl App {
    pub fn start() -> Result<Self> {
        let ctx = get_context()?;
        let nav = ctx.navigation_controller();
        let session_watch = nav.start_session_watch();
        let invalidated = ctx.bus.subscribe();

        let auth = ctx.auth_controller();
        auth.check_auth_status();
        nav.navigate(if auth.state() == AuthState::Authenticated {
            Route::Dashboard
        } else {
            Route::Login
        });

        Ok(Self {
            ctx,
            nav,
            invalidated,
            _session_watch: session_watch,
        })
    }

    pub fn is_authenticated(&self) -> bool {
        !self.nav.current().is_public()
    }

    /// Fail early when there is no session to use
    pub fn require_session(&self) -> Result<()> {
        if !self.is_authenticated() {
            anyhow::bail!("Not logged in. Run `bt login --remember <email>` first.");
        }
        Ok(())
    }

    /// Report a session the server rejected while the command ran
    pub fn finish(&mut self) -> Result<()> {
        let expired = !matches!(
            self.invalidated.try_recv(),
            Err(broadcast::error::TryRecvError::Empty)
        );
        if expired {
            anyhow::bail!("Session expired. Please log in again.");
        }
        Ok(())
    }
}

/// Run `fut` with a spinner on stderr (when it is a terminal)
pub async fn with_spinner<F: Future>(message: &str, fut: F) -> F::Output {
    let spinner = if atty::is(atty::Stream::Stderr) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(80));
        pb
    } else {
        ProgressBar::hidden()
    };

    let result = fut.await;
    spinner.finish_and_clear();
    result
}

/// Get a password from the flag, an interactive prompt, or one line of stdin
pub fn get_password_or_prompt(flag: Option<String>, prompt: &str) -> Result<String> {
    if let Some(p) = flag {
        return Ok(p);
    }

    if atty::is(atty::Stream::Stdin) {
        let p = Password::new().with_prompt(prompt).interact()?;
        return Ok(p);
    }

    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read password from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
