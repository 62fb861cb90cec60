//! Integration tests for the session layer and screen controllers
//!
//! Each test runs the real reqwest transport against a wiremock server and
//! keeps preferences in a temp data directory.
//!
//! Run with: cargo test --test session_flow_tests -- --nocapture

use std::future::Future;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::json;
use tempfile::TempDir;
use tokio::sync::watch;
use wiremock::matchers::{body_json, body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use budget_core::adapters::http::ReqwestTransport;
use budget_core::adapters::prefs::JsonFilePreferences;
use budget_core::config::Config;
use budget_core::controllers::{AuthState, FeatureState, ProfileState, Route, ToastKind};
use budget_core::ports::DownloadNotifier;
use budget_core::{BudgetContext, TransactionKind};

// ============================================================================
// Test Helpers
// ============================================================================

#[derive(Default)]
struct RecordingNotifier {
    calls: Mutex<Vec<(String, String)>>,
}

impl DownloadNotifier for RecordingNotifier {
    fn download_complete(&self, title: &str, location: &str) {
        self.calls
            .lock()
            .unwrap()
            .push((title.to_string(), location.to_string()));
    }
}

/// Build a context the way the CLI does, pointed at the mock server
fn context(data_dir: &Path, server: &MockServer, notifier: Arc<RecordingNotifier>) -> BudgetContext {
    let config = Config::new(&server.uri(), data_dir.join("downloads"));
    let store = Arc::new(JsonFilePreferences::open(data_dir).expect("open preferences"));
    let transport =
        Arc::new(ReqwestTransport::new(&config.base_url).expect("create transport"));
    BudgetContext::with_parts(config, store, transport, notifier)
}

fn login_body(token: &str) -> serde_json::Value {
    json!({
        "token": token,
        "user": {
            "_id": "u1",
            "fullName": "Ada Lovelace",
            "email": "ada@example.com",
            "profileImageUrl": "http://cdn.example.com/ada.png"
        }
    })
}

async fn mount_login(server: &MockServer, token: &str) {
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(login_body(token)))
        .mount(server)
        .await;
}

fn income_list() -> serde_json::Value {
    json!([
        {
            "_id": "inc-1",
            "userId": "u1",
            "icon": "https://cdn.example.com/1f4b0.png",
            "source": "Salary",
            "amount": 1500,
            "date": "2024-03-01T00:00:00.000Z"
        }
    ])
}

/// Run `fut` to completion, collecting every value published on `rx` meanwhile
async fn record_changes<T: Clone, F: Future>(
    rx: &mut watch::Receiver<T>,
    fut: F,
) -> (F::Output, Vec<T>) {
    let mut seen = Vec::new();
    tokio::pin!(fut);
    loop {
        tokio::select! {
            out = &mut fut => {
                if rx.has_changed().unwrap_or(false) {
                    seen.push(rx.borrow_and_update().clone());
                }
                return (out, seen);
            }
            changed = rx.changed() => {
                if changed.is_err() {
                    return (fut.await, seen);
                }
                seen.push(rx.borrow_and_update().clone());
            }
        }
    }
}

fn dashboard_body() -> serde_json::Value {
    json!({
        "totalBalance": 1200,
        "totalIncome": 1500,
        "totalExpense": 300,
        "recentTransactions": [],
        "last30DaysExpense": null,
        "last60DaysIncome": null
    })
}

// ============================================================================
// Request pipeline
// ============================================================================

#[tokio::test]
async fn test_bearer_header_follows_stored_token() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let ctx = context(dir.path(), &server, Arc::default());

    Mock::given(method("GET"))
        .and(path("/api/v1/income/get"))
        .respond_with(ResponseTemplate::new(200).set_body_json(income_list()))
        .mount(&server)
        .await;

    let income = ctx.transaction_controller(TransactionKind::Income);
    income.fetch().await;

    ctx.credentials.save_token("tok-123").unwrap();
    income.fetch().await;

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    assert!(requests[0].headers.get("authorization").is_none());
    assert_eq!(
        requests[1].headers.get("authorization").unwrap(),
        "Bearer tok-123"
    );
}

#[tokio::test]
async fn test_unauthorized_clears_store_then_signals_once() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let ctx = context(dir.path(), &server, Arc::default());

    Mock::given(method("GET"))
        .and(path("/api/v1/expense/get"))
        .and(header("Authorization", "Bearer stale"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "message": "Token expired" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    ctx.credentials.save_token("stale").unwrap();
    ctx.credentials.set_remember_me(true).unwrap();

    let creds = Arc::clone(&ctx.credentials);
    let observed = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::clone(&observed);
    let _listener = ctx.bus.on_invalidated(move || {
        let creds = Arc::clone(&creds);
        let seen = Arc::clone(&seen);
        async move {
            seen.lock().unwrap().push(creds.session().unwrap());
        }
    });

    let nav = ctx.navigation_controller();
    nav.navigate(Route::Expense);
    let _session_watch = nav.start_session_watch();
    let mut route = nav.subscribe();

    let expense = ctx.transaction_controller(TransactionKind::Expense);
    expense.fetch().await;

    assert_eq!(expense.state(), FeatureState::Error("Token expired".to_string()));

    route.wait_for(|r| *r == Route::Login).await.unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;

    let observed = observed.lock().unwrap();
    assert_eq!(observed.len(), 1, "exactly one invalidation");
    assert_eq!(observed[0].token, None, "store cleared before the event");
    assert!(!observed[0].remember_me);
}

// ============================================================================
// Auth
// ============================================================================

#[tokio::test]
async fn test_unremembered_session_does_not_survive_restart() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    mount_login(&server, "tok-1").await;

    {
        let ctx = context(dir.path(), &server, Arc::default());
        let auth = ctx.auth_controller();
        auth.login("ada@example.com", "secret1", false).await;
        assert_eq!(auth.state(), AuthState::LoginSuccess);
        assert_eq!(ctx.credentials.token().unwrap().as_deref(), Some("tok-1"));
    }

    let restarted = context(dir.path(), &server, Arc::default());
    let auth = restarted.auth_controller();
    auth.check_auth_status();

    assert_eq!(auth.state(), AuthState::Idle);
    assert_eq!(restarted.credentials.token().unwrap(), None);
    assert_eq!(auth.user_name(), "User");
}

#[tokio::test]
async fn test_remembered_session_survives_restart() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    mount_login(&server, "tok-2").await;

    {
        let ctx = context(dir.path(), &server, Arc::default());
        ctx.auth_controller()
            .login("ada@example.com", "secret1", true)
            .await;
    }

    let restarted = context(dir.path(), &server, Arc::default());
    let auth = restarted.auth_controller();
    auth.check_auth_status();

    assert_eq!(auth.state(), AuthState::Authenticated);
    assert_eq!(auth.user_name(), "Ada Lovelace");
    assert_eq!(auth.user_email(), "ada@example.com");
}

#[tokio::test]
async fn test_login_failure_uses_server_message() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let ctx = context(dir.path(), &server, Arc::default());

    Mock::given(method("POST"))
        .and(path("/api/v1/auth/login"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "message": "Invalid credentials" })),
        )
        .mount(&server)
        .await;

    let auth = ctx.auth_controller();
    auth.login("ada@example.com", "wrong-pass", true).await;

    assert_eq!(auth.state(), AuthState::Error("Invalid credentials".to_string()));
    assert_eq!(ctx.credentials.token().unwrap(), None);
}

#[tokio::test]
async fn test_login_rejects_bad_email_without_network() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let ctx = context(dir.path(), &server, Arc::default());

    let auth = ctx.auth_controller();
    auth.login("not-an-email", "secret1", false).await;

    assert!(matches!(auth.state(), AuthState::Error(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_sign_up_continues_when_image_upload_fails() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let ctx = context(dir.path(), &server, Arc::default());

    let image = dir.path().join("avatar.png");
    std::fs::write(&image, b"\x89PNG fake").unwrap();

    Mock::given(method("POST"))
        .and(path("/api/v1/auth/upload-image"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/register"))
        .and(body_json(json!({
            "fullName": "Ada Lovelace",
            "email": "ada@example.com",
            "password": "secret1",
            "profileImage": ""
        })))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({ "message": "User registered", "success": true })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let auth = ctx.auth_controller();
    auth.sign_up("Ada Lovelace", "ada@example.com", "secret1", Some(&image))
        .await;

    assert_eq!(auth.state(), AuthState::SignUpSuccess);
    auth.reset_state();
    assert_eq!(auth.state(), AuthState::Idle);
}

#[tokio::test]
async fn test_logout_clears_and_toasts() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let ctx = context(dir.path(), &server, Arc::default());
    mount_login(&server, "tok-3").await;

    let auth = ctx.auth_controller();
    auth.login("ada@example.com", "secret1", true).await;
    auth.logout();

    assert_eq!(auth.state(), AuthState::Idle);
    assert_eq!(ctx.credentials.token().unwrap(), None);
    let toast = auth.toast();
    assert!(toast.visible);
    assert_eq!(toast.kind, ToastKind::Success);
    assert_eq!(toast.message, "Logged out successfully!");
}

// ============================================================================
// Income / expense
// ============================================================================

#[tokio::test]
async fn test_deleting_missing_transaction_keeps_list() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let ctx = context(dir.path(), &server, Arc::default());

    Mock::given(method("GET"))
        .and(path("/api/v1/income/get"))
        .respond_with(ResponseTemplate::new(200).set_body_json(income_list()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/income/missing-id"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "message": "Income not found" })),
        )
        .mount(&server)
        .await;

    let income = ctx.transaction_controller(TransactionKind::Income);
    income.fetch().await;
    let before = income.state();
    assert!(before.has_payload());

    assert!(!income.delete("missing-id").await);

    assert_eq!(income.state(), before);
    let toast = income.toast();
    assert_eq!(toast.kind, ToastKind::Error);
    assert_eq!(toast.message, "Failed to Delete Income");
}

#[tokio::test]
async fn test_add_posts_form_and_refetches() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let ctx = context(dir.path(), &server, Arc::default());

    Mock::given(method("POST"))
        .and(path("/api/v1/expense/add"))
        .and(body_partial_json(json!({
            "category": "Groceries",
            "amount": "42.5",
            "date": "2024-03-05"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "_id": "exp-9", "category": "Groceries", "amount": 42.5, "date": "2024-03-05"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/expense/get"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "expense": [
                { "_id": "exp-9", "userId": "u1", "category": "Groceries", "amount": "42.50", "date": "2024-03-05" }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let expense = ctx.transaction_controller(TransactionKind::Expense);
    assert!(expense.add(" Groceries ", "42.50", "2024-03-05", "https://cdn/icon.png").await);

    assert_eq!(expense.add_state(), Some(true));
    assert_eq!(expense.toast().message, "Expense Added Successfully!");
    let state = expense.state();
    let items = state.payload().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].label, "Groceries");
    assert_eq!(items[0].kind, TransactionKind::Expense);

    expense.reset_add_state();
    assert_eq!(expense.add_state(), None);
}

#[tokio::test]
async fn test_add_with_invalid_amount_never_hits_server() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let ctx = context(dir.path(), &server, Arc::default());

    let income = ctx.transaction_controller(TransactionKind::Income);
    assert!(!income.add("Salary", "-5", "2024-03-05", "").await);

    assert_eq!(income.add_state(), Some(false));
    assert_eq!(income.toast().kind, ToastKind::Warning);
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_download_report_saves_file_and_notifies() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let notifier = Arc::new(RecordingNotifier::default());
    let ctx = context(dir.path(), &server, Arc::clone(&notifier));

    Mock::given(method("GET"))
        .and(path("/api/v1/income/downloadexcel"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"PK\x03\x04xlsx".to_vec()))
        .mount(&server)
        .await;

    let income = ctx.transaction_controller(TransactionKind::Income);
    let saved = income.download_report().await.expect("report saved");

    assert!(saved.starts_with(dir.path().join("downloads")));
    let name = saved.file_name().unwrap().to_str().unwrap();
    assert!(name.starts_with("Income_Report_") && name.ends_with(".xlsx"));
    assert_eq!(std::fs::read(&saved).unwrap(), b"PK\x03\x04xlsx");
    assert_eq!(income.toast().message, "Downloaded Successfully!");

    let calls = notifier.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "Income Report");
}

#[tokio::test]
async fn test_download_respects_notification_preference() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let notifier = Arc::new(RecordingNotifier::default());
    let ctx = context(dir.path(), &server, Arc::clone(&notifier));

    Mock::given(method("GET"))
        .and(path("/api/v1/expense/downloadexcel"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"xlsx".to_vec()))
        .mount(&server)
        .await;

    ctx.profile_controller().toggle_notification(false).unwrap();
    let expense = ctx.transaction_controller(TransactionKind::Expense);
    assert!(expense.download_report().await.is_some());

    assert!(notifier.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_failed_download_only_toasts() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let notifier = Arc::new(RecordingNotifier::default());
    let ctx = context(dir.path(), &server, Arc::clone(&notifier));

    Mock::given(method("GET"))
        .and(path("/api/v1/expense/downloadexcel"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let expense = ctx.transaction_controller(TransactionKind::Expense);
    assert!(expense.download_report().await.is_none());

    let toast = expense.toast();
    assert_eq!(toast.kind, ToastKind::Error);
    assert_eq!(toast.message, "Download Failed");
    assert!(notifier.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_refetch_with_list_shown_never_goes_back_to_loading() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let ctx = context(dir.path(), &server, Arc::default());

    Mock::given(method("GET"))
        .and(path("/api/v1/income/get"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(income_list())
                .set_delay(Duration::from_millis(200)),
        )
        .expect(2)
        .mount(&server)
        .await;

    let income = ctx.transaction_controller(TransactionKind::Income);
    income.fetch().await;
    assert!(income.state().has_payload());

    let mut rx = income.subscribe();
    let _ = rx.borrow_and_update();
    let in_flight = async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        income.state()
    };
    let (((), mid), seen) =
        record_changes(&mut rx, async { tokio::join!(income.fetch(), in_flight) }).await;

    assert!(mid.has_payload(), "old list stays up while refetching");
    assert!(!seen.iter().any(FeatureState::is_loading), "saw {:?}", seen);
    assert!(income.state().has_payload());
}

#[tokio::test]
async fn test_report_save_failure_reads_failed_to_create_file() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    // A plain file where the downloads folder should be
    std::fs::write(dir.path().join("downloads"), b"").unwrap();
    let ctx = context(dir.path(), &server, Arc::default());

    Mock::given(method("GET"))
        .and(path("/api/v1/expense/downloadexcel"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"PK\x03\x04".to_vec()))
        .mount(&server)
        .await;

    let err = ctx.expense_repository.download_report().await.unwrap_err();
    assert_eq!(err.to_string(), "Failed to create file");
}

// ============================================================================
// Dashboard
// ============================================================================

#[tokio::test]
async fn test_refresh_flag_clears_after_both_fetches() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let ctx = context(dir.path(), &server, Arc::default());

    Mock::given(method("GET"))
        .and(path("/api/v1/dashboard"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({
                    "totalBalance": 1200,
                    "totalIncome": 1500,
                    "totalExpense": 300,
                    "recentTransactions": [],
                    "last30DaysExpense": null,
                    "last60DaysIncome": null
                }))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/auth/getUser"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let dashboard = ctx.dashboard_controller();
    let mut refreshing = dashboard.subscribe_refreshing();

    let watcher = async {
        refreshing.wait_for(|r| *r).await.unwrap();
        refreshing.wait_for(|r| !*r).await.unwrap();
        dashboard.state()
    };
    let ((), state_when_cleared) = tokio::join!(dashboard.refresh(), watcher);

    assert!(state_when_cleared.has_payload(), "dashboard done before flag cleared");
    assert!(!dashboard.is_refreshing());
    assert_eq!(dashboard.user(), None);
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_refresh_flag_waits_for_slow_user_when_dashboard_fails() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let ctx = context(dir.path(), &server, Arc::default());

    Mock::given(method("GET"))
        .and(path("/api/v1/dashboard"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/auth/getUser"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "_id": "u1", "fullName": "Ada", "email": "ada@example.com" }))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&server)
        .await;

    let dashboard = ctx.dashboard_controller();
    let mut refreshing = dashboard.subscribe_refreshing();

    let watcher = async {
        refreshing.wait_for(|r| *r).await.unwrap();
        refreshing.wait_for(|r| !*r).await.unwrap();
        (dashboard.state(), dashboard.user())
    };
    let ((), (state_when_cleared, user_when_cleared)) = tokio::join!(dashboard.refresh(), watcher);

    assert_eq!(
        state_when_cleared,
        FeatureState::Error("Failed to load dashboard".to_string())
    );
    assert_eq!(user_when_cleared.unwrap().full_name, "Ada", "user fetch done before flag cleared");
    assert!(!dashboard.is_refreshing());
}

#[tokio::test]
async fn test_dashboard_refetch_with_payload_never_goes_back_to_loading() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let ctx = context(dir.path(), &server, Arc::default());

    Mock::given(method("GET"))
        .and(path("/api/v1/dashboard"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(dashboard_body())
                .set_delay(Duration::from_millis(200)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/auth/getUser"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let dashboard = ctx.dashboard_controller();
    dashboard.load().await;
    assert!(dashboard.state().has_payload());

    let mut rx = dashboard.subscribe();
    let _ = rx.borrow_and_update();
    let in_flight = async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        dashboard.state()
    };
    let (((), mid), seen) = record_changes(&mut rx, async {
        tokio::join!(dashboard.fetch_dashboard_data(), in_flight)
    })
    .await;

    assert!(mid.has_payload(), "snapshot stays up while refetching");
    assert!(!seen.iter().any(FeatureState::is_loading), "saw {:?}", seen);
    assert!(dashboard.state().has_payload());
}

#[tokio::test]
async fn test_dashboard_error_state() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let ctx = context(dir.path(), &server, Arc::default());

    Mock::given(method("GET"))
        .and(path("/api/v1/dashboard"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad gateway"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/auth/getUser"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_id": "u1", "fullName": "Ada", "email": "ada@example.com"
        })))
        .mount(&server)
        .await;

    let dashboard = ctx.dashboard_controller();
    dashboard.load().await;

    assert_eq!(
        dashboard.state(),
        FeatureState::Error("Failed to load dashboard".to_string())
    );
    assert_eq!(dashboard.user().unwrap().full_name, "Ada");
}

// ============================================================================
// Profile
// ============================================================================

#[tokio::test]
async fn test_profile_falls_back_to_cache_with_https_image() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let ctx = context(dir.path(), &server, Arc::default());

    Mock::given(method("GET"))
        .and(path("/api/v1/auth/getUser"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    ctx.credentials
        .save_user("A", "a@x.com", Some("http://img"))
        .unwrap();

    let profile = ctx.profile_controller();
    assert!(!profile.load_profile().await, "served from cache");

    let data = profile.profile_data();
    assert_eq!(data.full_name, "A");
    assert_eq!(data.email, "a@x.com");
    assert_eq!(data.profile_image_url.as_deref(), Some("https://img"));
}

#[tokio::test]
async fn test_profile_fetch_resolves_relative_image_and_caches() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let ctx = context(dir.path(), &server, Arc::default());

    Mock::given(method("GET"))
        .and(path("/api/v1/auth/getUser"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_id": "u1",
            "fullName": "Ada Lovelace",
            "email": "ada@example.com",
            "phoneNumber": null,
            "address": "12 Analytical St",
            "profileImageUrl": "/uploads/ada.png"
        })))
        .mount(&server)
        .await;

    let profile = ctx.profile_controller();
    assert!(profile.load_profile().await);

    let expected = format!("{}/uploads/ada.png", server.uri());
    let data = profile.profile_data();
    assert_eq!(data.profile_image_url.as_deref(), Some(expected.as_str()));
    assert_eq!(data.phone_number, "");
    assert_eq!(data.address, "12 Analytical St");
    assert_eq!(
        ctx.credentials.user_image().unwrap().as_deref(),
        Some(expected.as_str())
    );
}

#[tokio::test]
async fn test_update_profile_sends_last_known_image() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let ctx = context(dir.path(), &server, Arc::default());

    Mock::given(method("GET"))
        .and(path("/api/v1/auth/getUser"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_id": "u1",
            "fullName": "Ada",
            "email": "ada@example.com",
            "profileImageUrl": "https://cdn.example.com/ada.png"
        })))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/v1/profile/update"))
        .and(body_json(json!({
            "fullName": "Ada Lovelace",
            "phoneNumber": null,
            "address": "London",
            "profileImageUrl": "https://cdn.example.com/ada.png"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_id": "u1",
            "fullName": "Ada Lovelace",
            "email": "ada@example.com",
            "address": "London",
            "profileImageUrl": "https://cdn.example.com/ada.png"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let profile = ctx.profile_controller();
    profile.load_profile().await;
    assert!(profile.update_profile("Ada Lovelace", "  ", "London").await);

    assert_eq!(
        profile.state(),
        ProfileState::Success("Profile updated successfully".to_string())
    );
    assert_eq!(ctx.credentials.user_name().unwrap(), "Ada Lovelace");
}

#[tokio::test]
async fn test_upload_image_only_rewrites_cached_image() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let ctx = context(dir.path(), &server, Arc::default());

    Mock::given(method("POST"))
        .and(path("/api/v1/auth/upload-image"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "imageUrl": "http://cdn.example.com/new.jpg" })),
        )
        .mount(&server)
        .await;

    ctx.credentials
        .save_user("Ada", "ada@example.com", Some("https://cdn.example.com/old.jpg"))
        .unwrap();
    let image = dir.path().join("new.jpg");
    std::fs::write(&image, b"jpeg bytes").unwrap();

    let profile = ctx.profile_controller();
    assert!(profile.upload_image(&image).await);

    assert!(!profile.uploading_image());
    assert_eq!(
        profile.profile_data().profile_image_url.as_deref(),
        Some("https://cdn.example.com/new.jpg")
    );
    let cached = ctx.profile_repository.cached_profile().unwrap();
    assert_eq!(cached.name, "Ada");
    assert_eq!(cached.image_url.as_deref(), Some("https://cdn.example.com/new.jpg"));
}

#[tokio::test]
async fn test_change_password_validation_is_local() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let ctx = context(dir.path(), &server, Arc::default());

    let profile = ctx.profile_controller();
    assert!(!profile.change_password("old-secret", "short").await);

    assert_eq!(
        profile.state(),
        ProfileState::Error("Password must be at least 6 characters".to_string())
    );
    assert_eq!(profile.toast().kind, ToastKind::Error);
    assert!(server.received_requests().await.unwrap().is_empty());
}
