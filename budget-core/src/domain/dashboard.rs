//! Dashboard aggregate

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Transaction;

/// Totals plus recent activity, as computed by the server
///
/// Always replaced as a whole on fetch; never merged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub total_balance: Decimal,
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub recent_transactions: Vec<Transaction>,
    pub last_30_days_expense: Option<ChartWindow>,
    pub last_60_days_income: Option<ChartWindow>,
}

/// A trailing window of transactions with its total
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartWindow {
    pub total: Decimal,
    pub transactions: Vec<Transaction>,
}

impl DashboardSnapshot {
    /// Share of income left after expenses, in percent (None without income)
    pub fn savings_rate(&self) -> Option<Decimal> {
        if self.total_income <= Decimal::ZERO {
            return None;
        }
        let saved = self.total_income - self.total_expense;
        Some((saved * Decimal::ONE_HUNDRED / self.total_income).round_dp(1))
    }
}
