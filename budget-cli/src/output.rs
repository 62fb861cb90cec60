//! Output formatting utilities

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, ContentArrangement, Table};
use rust_decimal::Decimal;

use budget_core::controllers::{ToastKind, ToastState};
use budget_core::Transaction;

/// Print a success message
pub fn success(msg: &str) {
    println!("{}", msg.green());
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{}", msg.red());
}

/// Print a warning message
pub fn warning(msg: &str) {
    println!("{}", msg.yellow());
}

/// Print an info message
pub fn info(msg: &str) {
    println!("{}", msg.cyan());
}

/// Print a controller toast, if one is showing
pub fn toast(toast: &ToastState) {
    if !toast.visible {
        return;
    }
    match toast.kind {
        ToastKind::Success => success(&toast.message),
        ToastKind::Error => error(&toast.message),
        ToastKind::Warning => warning(&toast.message),
        ToastKind::Info => info(&toast.message),
    }
}

/// Create a styled table
pub fn create_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// `₹1,234.50`
pub fn format_money(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let text = format!("{:.2}", rounded.abs());
    let (whole, frac) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::new();
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}₹{}.{}", if negative { "-" } else { "" }, grouped, frac)
}

/// Table of transactions, newest first as served
pub fn transaction_table(items: &[Transaction], with_kind: bool) -> Table {
    let mut table = create_table();
    let mut header = vec!["ID", "Date", "Label", "Amount"];
    if with_kind {
        header.insert(1, "Type");
    }
    table.set_header(header);

    for tx in items {
        let amount = match tx.kind {
            budget_core::TransactionKind::Income => format!("+{}", format_money(tx.amount)).green(),
            budget_core::TransactionKind::Expense => format!("-{}", format_money(tx.amount)).red(),
        };
        let mut row = vec![
            Cell::new(&tx.id),
            Cell::new(tx.short_date()),
            Cell::new(&tx.label),
            Cell::new(amount.to_string()),
        ];
        if with_kind {
            row.insert(1, Cell::new(tx.kind.title()));
        }
        table.add_row(row);
    }
    table
}
