//! Dashboard command - balance, totals and recent activity

use anyhow::Result;
use colored::Colorize;

use budget_core::controllers::FeatureState;
use budget_core::domain::ChartWindow;

use super::{with_spinner, App};
use crate::output::{self, format_money};

pub async fn run(json: bool) -> Result<()> {
    let mut app = App::start()?;
    app.require_session()?;
    let dashboard = app.ctx.dashboard_controller();

    with_spinner("Loading dashboard...", dashboard.load()).await;
    app.finish()?;

    let snapshot = match dashboard.state() {
        FeatureState::Success(snapshot) => snapshot,
        FeatureState::Error(message) => anyhow::bail!(message),
        FeatureState::Loading => anyhow::bail!("Dashboard did not finish loading"),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    let greeting = match dashboard.user() {
        Some(user) if !user.full_name.is_empty() => format!("Hello, {}", user.full_name),
        _ => "Hello".to_string(),
    };
    println!("{}", greeting.bold());
    println!();

    let mut table = output::create_table();
    table.add_row(vec!["Total Balance".to_string(), format_money(snapshot.total_balance)]);
    table.add_row(vec!["Total Income".to_string(), format_money(snapshot.total_income)]);
    table.add_row(vec!["Total Expense".to_string(), format_money(snapshot.total_expense)]);
    if let Some(rate) = snapshot.savings_rate() {
        table.add_row(vec!["Savings Rate".to_string(), format!("{}%", rate)]);
    }
    println!("{}", table);
    println!();

    print_window("Last 30 days expenses", snapshot.last_30_days_expense.as_ref());
    print_window("Last 60 days income", snapshot.last_60_days_income.as_ref());

    println!("{}", "Recent Transactions".bold());
    if snapshot.recent_transactions.is_empty() {
        println!("{}", "No transactions yet".dimmed());
    } else {
        println!("{}", output::transaction_table(&snapshot.recent_transactions, true));
    }

    Ok(())
}

fn print_window(title: &str, window: Option<&ChartWindow>) {
    if let Some(window) = window {
        println!(
            "{}: {} across {} transaction(s)",
            title,
            format_money(window.total),
            window.transactions.len()
        );
    }
}
