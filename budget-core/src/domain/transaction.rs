//! Transaction domain model

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Which ledger a transaction belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    /// Wire / path segment name ("income", "expense")
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }

    /// Capitalized name for user-facing messages
    pub fn title(&self) -> &'static str {
        match self {
            TransactionKind::Income => "Income",
            TransactionKind::Expense => "Expense",
        }
    }

    /// Name of the JSON field that carries the label
    pub fn label_field(&self) -> &'static str {
        match self {
            TransactionKind::Income => "source",
            TransactionKind::Expense => "category",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(TransactionKind::Income),
            "expense" => Ok(TransactionKind::Expense),
            other => Err(format!("unknown transaction type '{}'", other)),
        }
    }
}

/// A single income or expense entry as returned by the server
///
/// Transactions are never edited locally. A list is replaced wholesale on
/// every fetch and entries are addressed by `id` for deletion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub user_id: String,
    pub kind: TransactionKind,
    /// Category for expenses, source for income
    pub label: String,
    pub icon_url: Option<String>,
    pub amount: Decimal,
    /// ISO-8601 date or timestamp, as sent by the server
    pub date: String,
}

impl Transaction {
    /// Calendar date of the transaction, if the server date is parseable
    pub fn calendar_date(&self) -> Option<NaiveDate> {
        let day = self.date.get(..10)?;
        NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
    }

    /// "dd MMM" label used in lists and charts, falling back to the raw
    /// prefix when the date can't be parsed
    pub fn short_date(&self) -> String {
        match self.calendar_date() {
            Some(date) => date.format("%d %b").to_string(),
            None => self.date.chars().take(5).collect(),
        }
    }
}

/// Input for adding a transaction
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub label: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub icon_url: String,
}
