//! End-to-end tests of the dashctl binary against a mocked API.

mod common;

use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{run_cli, run_cli_success, store_credentials, stored_credentials};

fn api_url(server: &MockServer) -> String {
    format!("{}/api", server.uri())
}

fn user_json() -> serde_json::Value {
    json!({
        "id": 1,
        "username": "admin",
        "email": "admin@example.com",
        "first_name": "Ahmed",
        "last_name": "Hassan",
        "avatar_url": null,
        "role": "admin"
    })
}

#[tokio::test]
async fn test_login_persists_tokens() {
    let server = MockServer::start().await;
    let data = TempDir::new().unwrap();

    Mock::given(method("POST"))
        .and(path("/api/auth/login/"))
        .and(body_json(json!({"email": "admin@example.com", "password": "admin123"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "تم تسجيل الدخول بنجاح",
            "user": user_json(),
            "tokens": {"access": "access-1", "refresh": "refresh-1"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let stdout = run_cli_success(
        &[
            "auth",
            "login",
            "--email",
            "admin@example.com",
            "--password",
            "admin123",
        ],
        &api_url(&server),
        data.path(),
    )
    .await;

    assert!(stdout.contains("Logged in successfully"));
    assert!(stdout.contains("Ahmed Hassan"));

    let stored = stored_credentials(data.path());
    assert_eq!(stored.get("access_token").map(String::as_str), Some("access-1"));
    assert_eq!(stored.get("refresh_token").map(String::as_str), Some("refresh-1"));

    let status = run_cli_success(&["auth", "status"], &api_url(&server), data.path()).await;
    assert!(status.contains("Access token: stored"));
    assert!(status.contains("Refresh token: stored"));
}

#[tokio::test]
async fn test_failed_login_reports_server_detail() {
    let server = MockServer::start().await;
    let data = TempDir::new().unwrap();

    Mock::given(method("POST"))
        .and(path("/api/auth/login/"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"detail": "بيانات الدخول غير صحيحة"})),
        )
        .mount(&server)
        .await;

    let output = run_cli(
        &["auth", "login", "--email", "a@b.c", "--password", "nope"],
        &api_url(&server),
        data.path(),
    )
    .await;

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to login"));
    assert!(stderr.contains("بيانات الدخول غير صحيحة"));
    assert!(stored_credentials(data.path()).is_empty());
}

#[tokio::test]
async fn test_logout_clears_tokens_when_server_fails() {
    let server = MockServer::start().await;
    let data = TempDir::new().unwrap();
    store_credentials(data.path(), "access-1", "refresh-1");

    Mock::given(method("POST"))
        .and(path("/api/auth/logout/"))
        .and(body_json(json!({"refresh": "refresh-1"})))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let output = run_cli(&["auth", "logout"], &api_url(&server), data.path()).await;

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Server was not notified"));
    assert!(stored_credentials(data.path()).is_empty());

    let status = run_cli_success(&["auth", "status"], &api_url(&server), data.path()).await;
    assert!(status.contains("Access token: none"));
}

#[tokio::test]
async fn test_whoami_without_session_fails() {
    let server = MockServer::start().await;
    let data = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/api/auth/me/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json()))
        .expect(0)
        .mount(&server)
        .await;

    let output = run_cli(&["auth", "whoami"], &api_url(&server), data.path()).await;

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("No active session"));
}

#[tokio::test]
async fn test_expired_token_is_refreshed_and_persisted() {
    let server = MockServer::start().await;
    let data = TempDir::new().unwrap();
    store_credentials(data.path(), "stale", "refresh-1");

    Mock::given(method("GET"))
        .and(path("/api/tasks/"))
        .and(header("authorization", "Bearer stale"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "detail": "Given token not valid for any token type"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/auth/token/refresh/"))
        .and(body_json(json!({"refresh": "refresh-1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access": "fresh"})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/tasks/"))
        .and(header("authorization", "Bearer fresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 7,
            "title": "مراجعة التقرير",
            "priority": "high",
            "due_date": "2026-01-13",
            "completed": false,
            "created_at": "2026-01-10T08:30:00Z",
            "updated_at": "2026-01-10T08:30:00Z"
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let stdout = run_cli_success(&["tasks", "list", "--json"], &api_url(&server), data.path()).await;

    let task: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(task["id"], 7);
    assert_eq!(task["priority"], "high");

    let stored = stored_credentials(data.path());
    assert_eq!(stored.get("access_token").map(String::as_str), Some("fresh"));
    assert_eq!(stored.get("refresh_token").map(String::as_str), Some("refresh-1"));
}

#[tokio::test]
async fn test_seed_prints_server_message() {
    let server = MockServer::start().await;
    let data = TempDir::new().unwrap();

    Mock::given(method("POST"))
        .and(path("/api/seed/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"message": "تم إنشاء البيانات التجريبية بنجاح"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let stdout = run_cli_success(&["seed"], &api_url(&server), data.path()).await;
    assert!(stdout.contains("تم إنشاء البيانات التجريبية بنجاح"));
}

#[tokio::test]
async fn test_invalid_api_url_is_rejected() {
    let data = TempDir::new().unwrap();

    let output = run_cli(&["auth", "status"], "ftp://example.com/api", data.path()).await;

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid API URL"));
}

#[tokio::test]
async fn test_version_reports_crate_version() {
    let data = TempDir::new().unwrap();

    let stdout = run_cli_success(&["--version"], "http://localhost:8000/api", data.path()).await;

    assert!(stdout.starts_with("dashctl "));
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}
