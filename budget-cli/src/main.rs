//! Budget Tracker CLI - your budget in the terminal

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::{auth, config, dashboard, icons, profile, transactions};
use budget_core::TransactionKind;

/// Budget Tracker - income and expenses from your terminal
#[derive(Parser)]
#[command(name = "bt", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in to your account
    Login {
        /// Account email
        email: String,
        /// Password (prompted when omitted)
        #[arg(short, long, env = "BUDGET_PASSWORD", hide_env_values = true)]
        password: Option<String>,
        /// Keep the session for later commands
        #[arg(long)]
        remember: bool,
    },

    /// Create a new account
    Signup {
        /// Full name
        #[arg(long)]
        name: String,
        /// Account email
        #[arg(long)]
        email: String,
        /// Password (prompted when omitted)
        #[arg(short, long, env = "BUDGET_PASSWORD", hide_env_values = true)]
        password: Option<String>,
        /// Profile image to upload
        #[arg(long)]
        image: Option<PathBuf>,
    },

    /// Log out and forget stored credentials
    Logout,

    /// Show session status
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show balance, totals and recent activity
    Dashboard {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage income
    Income {
        #[command(subcommand)]
        command: transactions::TransactionCommands,
    },

    /// Manage expenses
    Expense {
        #[command(subcommand)]
        command: transactions::TransactionCommands,
    },

    /// View and edit your profile
    Profile {
        #[command(subcommand)]
        command: profile::ProfileCommands,
    },

    /// Browse transaction icons
    Icons {
        /// Only show categories matching this keyword
        #[arg(long, short)]
        search: Option<String>,
    },

    /// Show or change client settings
    Config {
        #[command(subcommand)]
        command: Option<config::ConfigCommands>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    let result = run(cli).await;

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr, filtered by BUDGET_LOG (default: warnings only)
fn init_logging() {
    let filter = EnvFilter::try_from_env("BUDGET_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Login { email, password, remember } => auth::login(&email, password, remember).await,
        Commands::Signup { name, email, password, image } => {
            auth::signup(&name, &email, password, image.as_deref()).await
        }
        Commands::Logout => auth::logout(),
        Commands::Status { json } => auth::status(json),
        Commands::Dashboard { json } => dashboard::run(json).await,
        Commands::Income { command } => transactions::run(TransactionKind::Income, command).await,
        Commands::Expense { command } => transactions::run(TransactionKind::Expense, command).await,
        Commands::Profile { command } => profile::run(command).await,
        Commands::Icons { search } => icons::run(search.as_deref()),
        Commands::Config { command } => config::run(command),
    }
}
