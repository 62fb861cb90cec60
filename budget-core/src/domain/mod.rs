//! Core domain entities
//!
//! Plain data structures plus the validation rules that apply to them.
//! No I/O happens here.

mod dashboard;
pub mod icons;
pub mod result;
mod session;
mod transaction;
mod user;
pub mod validation;

pub use dashboard::{ChartWindow, DashboardSnapshot};
pub use session::Session;
pub use transaction::{NewTransaction, Transaction, TransactionKind};
pub use user::{CachedProfile, UserProfile};
