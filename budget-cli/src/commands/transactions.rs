//! Income and expense commands

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use dialoguer::Confirm;
use rust_decimal::Decimal;

use budget_core::controllers::{FeatureState, TransactionController};
use budget_core::domain::icons;
use budget_core::TransactionKind;

use super::{with_spinner, App};
use crate::output::{self, format_money};

#[derive(Subcommand)]
pub enum TransactionCommands {
    /// List all entries
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add an entry
    Add {
        /// Source (income) or category (expense)
        label: String,
        /// Amount, e.g. 1500 or 249.99
        amount: String,
        /// Date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,
        /// Icon URL (see `bt icons`)
        #[arg(long)]
        icon: Option<String>,
    },
    /// Delete an entry by ID
    Delete {
        id: String,
        /// Skip confirmation
        #[arg(long, short)]
        force: bool,
    },
    /// Download the spreadsheet report
    Report,
}

pub async fn run(kind: TransactionKind, command: TransactionCommands) -> Result<()> {
    let mut app = App::start()?;
    app.require_session()?;
    let controller = app.ctx.transaction_controller(kind);

    let result = match command {
        TransactionCommands::List { json } => list(&controller, json).await,
        TransactionCommands::Add {
            label,
            amount,
            date,
            icon,
        } => {
            let date = date.unwrap_or_else(|| chrono::Local::now().date_naive().to_string());
            let icon = icon.unwrap_or_else(icons::default_icon);
            let ok = with_spinner(
                &format!("Adding {}...", kind),
                controller.add(&label, &amount, &date, &icon),
            )
            .await;
            report_toast(&controller, ok)
        }
        TransactionCommands::Delete { id, force } => {
            if !force && !confirm_delete(kind, &id)? {
                println!("Cancelled");
                return Ok(());
            }
            let ok = with_spinner(&format!("Deleting {}...", kind), controller.delete(&id)).await;
            report_toast(&controller, ok)
        }
        TransactionCommands::Report => {
            let saved = with_spinner("Downloading report...", controller.download_report()).await;
            report_toast(&controller, saved.is_some())
        }
    };

    app.finish()?;
    result
}

async fn list(controller: &TransactionController, json: bool) -> Result<()> {
    with_spinner("Loading...", controller.fetch()).await;

    let items = match controller.state() {
        FeatureState::Success(items) => items,
        FeatureState::Error(message) => anyhow::bail!(message),
        FeatureState::Loading => anyhow::bail!("List did not finish loading"),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }

    let title = controller.kind().title();
    if items.is_empty() {
        println!("{}", format!("No {} yet", controller.kind()).dimmed());
        return Ok(());
    }

    println!("{}", output::transaction_table(&items, false));
    let total: Decimal = items.iter().map(|t| t.amount).sum();
    println!("{} {}: {} ({} entries)", "Total".bold(), title, format_money(total), items.len());
    Ok(())
}

/// Print a success toast, or turn a failure toast into the command error
fn report_toast(controller: &TransactionController, ok: bool) -> Result<()> {
    let toast = controller.toast();
    if !ok {
        anyhow::bail!(toast.message);
    }
    output::toast(&toast);
    Ok(())
}

fn confirm_delete(kind: TransactionKind, id: &str) -> Result<bool> {
    if !atty::is(atty::Stream::Stdin) {
        anyhow::bail!("Refusing to delete without confirmation; pass --force");
    }
    Ok(Confirm::new()
        .with_prompt(format!("Delete {} {}?", kind, id))
        .default(false)
        .interact()?)
}
