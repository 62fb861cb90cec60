//! Wire types for the Budget Tracker REST API
//!
//! Field names follow the server's camelCase JSON. Response types are lenient
//! about optional fields; conversions into domain types live here too.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use crate::domain::{
    ChartWindow, DashboardSnapshot, NewTransaction, Transaction, TransactionKind, UserProfile,
};

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserDto,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub profile_image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest<'a> {
    pub full_name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    /// Uploaded image URL, or empty when there is none
    pub profile_image: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterResponse {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub success: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImageUploadRequest<'a> {
    /// `data:<mime>;base64,<payload>`
    pub image: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageUploadResponse {
    pub image_url: String,
}

// ---------------------------------------------------------------------------
// Transactions and dashboard
// ---------------------------------------------------------------------------

/// Transaction as sent by the server
///
/// `category` is set for expenses and `source` for income. `type` is only
/// present on mixed lists such as the dashboard's recent activity.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDto {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(deserialize_with = "deserialize_amount")]
    pub amount: Decimal,
    #[serde(default)]
    pub date: String,
}

impl TransactionDto {
    /// Convert into a domain transaction
    ///
    /// The kind comes from the wire `type` when it parses, else from
    /// `fallback` (the list the entry came from), else from which label field
    /// is set.
    pub fn into_transaction(self, fallback: Option<TransactionKind>) -> Transaction {
        let kind = self
            .kind
            .as_deref()
            .and_then(|k| k.parse::<TransactionKind>().ok())
            .or(fallback)
            .unwrap_or(if self.source.is_some() {
                TransactionKind::Income
            } else {
                TransactionKind::Expense
            });

        let label = match kind {
            TransactionKind::Income => self.source.or(self.category),
            TransactionKind::Expense => self.category.or(self.source),
        }
        .unwrap_or_default();

        Transaction {
            id: self.id,
            user_id: self.user_id,
            kind,
            label,
            icon_url: self.icon.filter(|i| !i.trim().is_empty()),
            amount: self.amount,
            date: self.date,
        }
    }
}

/// Body of a list endpoint
///
/// Income comes back as a bare array, expenses wrapped in `{ "expense": [...] }`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TransactionList {
    Bare(Vec<TransactionDto>),
    Wrapped {
        #[serde(alias = "income")]
        expense: Vec<TransactionDto>,
    },
}

impl TransactionList {
    pub fn into_transactions(self, kind: TransactionKind) -> Vec<Transaction> {
        let items = match self {
            TransactionList::Bare(items) => items,
            TransactionList::Wrapped { expense } => expense,
        };
        items
            .into_iter()
            .map(|dto| dto.into_transaction(Some(kind)))
            .collect()
    }
}

/// Body of `POST /income/add` and `POST /expense/add`
///
/// The label goes under `source` for income and `category` for expenses, and
/// the amount is sent as a string.
pub fn add_transaction_body(kind: TransactionKind, request: &NewTransaction) -> JsonValue {
    let mut body = Map::new();
    body.insert(
        kind.label_field().to_string(),
        JsonValue::String(request.label.clone()),
    );
    body.insert(
        "amount".to_string(),
        JsonValue::String(request.amount.normalize().to_string()),
    );
    body.insert(
        "date".to_string(),
        JsonValue::String(request.date.format("%Y-%m-%d").to_string()),
    );
    body.insert("icon".to_string(), JsonValue::String(request.icon_url.clone()));
    JsonValue::Object(body)
}

/// Response of an add call; only the id is of interest
#[derive(Debug, Clone, Deserialize)]
pub struct AddTransactionResponse {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeleteResponse {
    #[serde(default)]
    pub message: String,
    #[serde(default = "default_true")]
    pub success: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChartWindowDto {
    #[serde(deserialize_with = "deserialize_amount")]
    pub total: Decimal,
    #[serde(default)]
    pub transactions: Vec<TransactionDto>,
}

impl ChartWindowDto {
    fn into_window(self, kind: TransactionKind) -> ChartWindow {
        ChartWindow {
            total: self.total,
            transactions: self
                .transactions
                .into_iter()
                .map(|t| t.into_transaction(Some(kind)))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    #[serde(deserialize_with = "deserialize_amount")]
    pub total_balance: Decimal,
    #[serde(deserialize_with = "deserialize_amount")]
    pub total_income: Decimal,
    #[serde(deserialize_with = "deserialize_amount")]
    pub total_expense: Decimal,
    #[serde(default)]
    pub recent_transactions: Vec<TransactionDto>,
    #[serde(default, rename = "last30DaysExpense")]
    pub last_30_days_expense: Option<ChartWindowDto>,
    #[serde(default, rename = "last60DaysIncome")]
    pub last_60_days_income: Option<ChartWindowDto>,
}

impl From<DashboardResponse> for DashboardSnapshot {
    fn from(res: DashboardResponse) -> Self {
        DashboardSnapshot {
            total_balance: res.total_balance,
            total_income: res.total_income,
            total_expense: res.total_expense,
            recent_transactions: res
                .recent_transactions
                .into_iter()
                .map(|t| t.into_transaction(None))
                .collect(),
            last_30_days_expense: res
                .last_30_days_expense
                .map(|w| w.into_window(TransactionKind::Expense)),
            last_60_days_income: res
                .last_60_days_income
                .map(|w| w.into_window(TransactionKind::Income)),
        }
    }
}

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest<'a> {
    pub full_name: &'a str,
    pub phone_number: Option<&'a str>,
    pub address: Option<&'a str>,
    pub profile_image_url: Option<&'a str>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub profile_image_url: Option<String>,
}

impl From<ProfileResponse> for UserProfile {
    fn from(res: ProfileResponse) -> Self {
        UserProfile {
            id: res.id,
            full_name: res.full_name,
            email: res.email,
            phone_number: res.phone_number,
            address: res.address,
            profile_image_url: res.profile_image_url,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest<'a> {
    pub old_password: &'a str,
    pub new_password: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChangePasswordResponse {
    #[serde(default)]
    pub message: String,
}

/// Deserialize an amount that can be a JSON number or a string
fn deserialize_amount<'de, D>(deserializer: D) -> std::result::Result<Decimal, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;
    let value: JsonValue = Deserialize::deserialize(deserializer)?;
    match value {
        JsonValue::Number(n) => {
            let s = n.to_string();
            s.parse::<Decimal>()
                .or_else(|_| Decimal::from_scientific(&s))
                .ok()
                .or_else(|| n.as_f64().and_then(Decimal::from_f64))
                .ok_or_else(|| D::Error::custom(format!("invalid amount: {}", s)))
        }
        JsonValue::String(s) => s
            .trim()
            .parse::<Decimal>()
            .map_err(|e| D::Error::custom(format!("invalid amount: {}", e))),
        JsonValue::Null => Ok(Decimal::ZERO),
        _ => Err(D::Error::custom("expected number or string for amount")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_amount_accepts_numbers_and_strings() {
        let dto: TransactionDto = serde_json::from_value(json!({
            "_id": "1", "userId": "u", "source": "Salary", "amount": 1250.5, "date": "2024-03-01"
        }))
        .unwrap();
        assert_eq!(dto.amount, dec("1250.5"));

        let dto: TransactionDto = serde_json::from_value(json!({
            "_id": "2", "category": "Food", "amount": "42.10", "date": "2024-03-01"
        }))
        .unwrap();
        assert_eq!(dto.amount, dec("42.10"));

        let bad = serde_json::from_value::<TransactionDto>(json!({
            "_id": "3", "amount": "lots", "date": "2024-03-01"
        }));
        assert!(bad.is_err());
    }

    #[test]
    fn test_kind_inference() {
        let typed: TransactionDto = serde_json::from_value(json!({
            "_id": "1", "type": "expense", "category": "Rent", "amount": 10, "date": "2024-03-01"
        }))
        .unwrap();
        let tx = typed.into_transaction(Some(TransactionKind::Income));
        assert_eq!(tx.kind, TransactionKind::Expense);
        assert_eq!(tx.label, "Rent");

        let untyped: TransactionDto = serde_json::from_value(json!({
            "_id": "2", "source": "Freelance", "amount": 10, "date": "2024-03-01"
        }))
        .unwrap();
        let tx = untyped.into_transaction(None);
        assert_eq!(tx.kind, TransactionKind::Income);
        assert_eq!(tx.label, "Freelance");
        assert_eq!(tx.icon_url, None);
    }

    #[test]
    fn test_list_shapes() {
        let bare: TransactionList = serde_json::from_value(json!([
            { "_id": "1", "source": "Salary", "amount": 100, "date": "2024-03-01" }
        ]))
        .unwrap();
        let items = bare.into_transactions(TransactionKind::Income);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].kind, TransactionKind::Income);

        let wrapped: TransactionList = serde_json::from_value(json!({
            "expense": [
                { "_id": "1", "category": "Food", "amount": 5, "date": "2024-03-01" },
                { "_id": "2", "category": "Fuel", "amount": 7, "date": "2024-03-02" }
            ]
        }))
        .unwrap();
        let items = wrapped.into_transactions(TransactionKind::Expense);
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].label, "Fuel");
    }

    #[test]
    fn test_add_body_uses_kind_specific_label_field() {
        let request = NewTransaction {
            label: "Groceries".to_string(),
            amount: dec("12.50"),
            date: NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
            icon_url: "https://cdn/1f6d2.png".to_string(),
        };

        let body = add_transaction_body(TransactionKind::Expense, &request);
        assert_eq!(
            body,
            json!({
                "category": "Groceries",
                "amount": "12.5",
                "date": "2024-05-02",
                "icon": "https://cdn/1f6d2.png"
            })
        );

        let body = add_transaction_body(TransactionKind::Income, &request);
        assert_eq!(body["source"], "Groceries");
        assert!(body.get("category").is_none());
    }

    #[test]
    fn test_dashboard_conversion() {
        let res: DashboardResponse = serde_json::from_value(json!({
            "totalBalance": 700,
            "totalIncome": 1000,
            "totalExpense": "300",
            "recentTransactions": [
                { "_id": "a", "type": "income", "source": "Salary", "amount": 1000, "date": "2024-03-01" },
                { "_id": "b", "type": "expense", "category": "Rent", "amount": 300, "date": "2024-03-02" }
            ],
            "last30DaysExpense": { "total": 300, "transactions": [
                { "_id": "b", "category": "Rent", "amount": 300, "date": "2024-03-02" }
            ]},
            "last60DaysIncome": null
        }))
        .unwrap();

        let snapshot = DashboardSnapshot::from(res);
        assert_eq!(snapshot.total_balance, dec("700"));
        assert_eq!(snapshot.total_expense, dec("300"));
        assert_eq!(snapshot.recent_transactions[0].kind, TransactionKind::Income);
        assert_eq!(snapshot.recent_transactions[1].kind, TransactionKind::Expense);
        let window = snapshot.last_30_days_expense.unwrap();
        assert_eq!(window.transactions[0].kind, TransactionKind::Expense);
        assert!(snapshot.last_60_days_income.is_none());
    }

    #[test]
    fn test_update_profile_sends_nulls() {
        let body = serde_json::to_value(UpdateProfileRequest {
            full_name: "Ada",
            phone_number: None,
            address: Some("1 Main St"),
            profile_image_url: None,
        })
        .unwrap();
        assert_eq!(
            body,
            json!({
                "fullName": "Ada",
                "phoneNumber": null,
                "address": "1 Main St",
                "profileImageUrl": null
            })
        );
    }
}
