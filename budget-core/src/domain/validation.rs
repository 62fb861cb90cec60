//! Form validation rules applied before any request is sent

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use rust_decimal::Decimal;

use super::result::{Error, Result};
use super::NewTransaction;

/// Minimum length for a new password
pub const MIN_PASSWORD_LEN: usize = 6;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}$").expect("valid email pattern")
});

pub fn validate_email(email: &str) -> Result<()> {
    if email.trim().is_empty() {
        return Err(Error::validation("Please enter your email"));
    }
    if !EMAIL_RE.is_match(email.trim()) {
        return Err(Error::validation("Please enter a valid email address"));
    }
    Ok(())
}

pub fn validate_credentials(email: &str, password: &str) -> Result<()> {
    validate_email(email)?;
    if password.trim().is_empty() {
        return Err(Error::validation("Please enter your password"));
    }
    Ok(())
}

pub fn validate_sign_up(full_name: &str, email: &str, password: &str) -> Result<()> {
    if full_name.trim().is_empty() {
        return Err(Error::validation("Please enter your full name"));
    }
    validate_credentials(email, password)
}

pub fn validate_password_change(old_password: &str, new_password: &str) -> Result<()> {
    if old_password.trim().is_empty() {
        return Err(Error::validation("Please enter old password"));
    }
    if new_password.trim().is_empty() {
        return Err(Error::validation("Please enter new password"));
    }
    if new_password.chars().count() < MIN_PASSWORD_LEN {
        return Err(Error::validation(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    Ok(())
}

/// Parse and check the raw fields of the add-transaction form
pub fn parse_new_transaction(
    label: &str,
    amount: &str,
    date: &str,
    icon_url: &str,
) -> Result<NewTransaction> {
    let label = label.trim();
    if label.is_empty() {
        return Err(Error::validation("Please enter a name"));
    }

    let amount: Decimal = amount
        .trim()
        .parse()
        .map_err(|_| Error::validation("Please enter a valid amount"))?;
    if amount <= Decimal::ZERO {
        return Err(Error::validation("Amount must be greater than zero"));
    }

    let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|_| Error::validation("Date must be in YYYY-MM-DD format"))?;

    Ok(NewTransaction {
        label: label.to_string(),
        amount,
        date,
        icon_url: icon_url.to_string(),
    })
}
