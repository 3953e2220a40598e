use axum::http::{StatusCode, header};
use serde_json::{Value, json};

use crate::helpers::{session_cookie, set_cookies, spawn_app};

// ── POST /auth/login ──────────────────────────────────────────────────────────

#[tokio::test]
async fn should_sign_in_set_cookies_and_create_profile() {
    let app = spawn_app().await;
    let user_id = app.provider.add_user("pat@example.com", "hunter2", None);

    let response = app
        .server
        .post("/auth/login")
        .json(&json!({
            "email": "pat@example.com",
            "password": "hunter2",
            "redirected_from": "/dashboard",
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["user"]["email"], "pat@example.com");
    assert_eq!(body["user"]["role"], "customer");
    assert_eq!(body["redirect_to"], "/dashboard");

    let headers = response.headers();
    let cookies = set_cookies(&headers);
    assert!(
        cookies
            .iter()
            .any(|c| c.starts_with("tavola_access_token=") && c.contains("HttpOnly")),
        "expected an HttpOnly access-token cookie, got {cookies:?}"
    );
    assert!(
        cookies
            .iter()
            .any(|c| c.starts_with("tavola_refresh_token=") && c.contains("Path=/auth")),
        "expected a refresh-token cookie scoped to /auth, got {cookies:?}"
    );

    // First sign-in upserted the profile row.
    assert!(app.profiles.has_profile(user_id));
}

#[tokio::test]
async fn should_reject_wrong_password_with_generic_message() {
    let app = spawn_app().await;
    app.provider.add_user("pat@example.com", "hunter2", None);

    let response = app
        .server
        .post("/auth/login")
        .json(&json!({
            "email": "pat@example.com",
            "password": "wrong",
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["kind"], "INVALID_CREDENTIALS");
    assert_eq!(body["message"], "invalid email or password");
}

#[tokio::test]
async fn should_fall_back_to_home_for_unsafe_redirected_from() {
    let app = spawn_app().await;
    app.provider.add_user("pat@example.com", "hunter2", None);

    let response = app
        .server
        .post("/auth/login")
        .json(&json!({
            "email": "pat@example.com",
            "password": "hunter2",
            "redirected_from": "https://evil.example/phish",
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["redirect_to"], "/");
}

// ── POST /auth/register ───────────────────────────────────────────────────────

#[tokio::test]
async fn should_register_a_new_principal() {
    let app = spawn_app().await;

    let response = app
        .server
        .post("/auth/register")
        .json(&json!({
            "email": "new@example.com",
            "password": "hunter2",
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    assert_eq!(app.provider.user_count(), 1);
}

// ── POST /auth/logout ─────────────────────────────────────────────────────────

#[tokio::test]
async fn should_clear_both_cookies_on_logout() {
    let app = spawn_app().await;
    let user_id = app.provider.add_user("pat@example.com", "hunter2", None);
    let (access, refresh) = app.provider.issue_session(user_id);

    let response = app
        .server
        .post("/auth/logout")
        .add_header(header::COOKIE, session_cookie(&access, &refresh))
        .await;

    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

    let headers = response.headers();
    let cookies = set_cookies(&headers);
    let cleared = |name: &str| {
        cookies
            .iter()
            .any(|c| c.starts_with(&format!("{name}=")) && c.contains("Max-Age=0"))
    };
    assert!(cleared("tavola_access_token"), "got {cookies:?}");
    assert!(cleared("tavola_refresh_token"), "got {cookies:?}");
}

// ── GET /auth/callback ────────────────────────────────────────────────────────

#[tokio::test]
async fn should_exchange_callback_code_and_redirect_to_next() {
    let app = spawn_app().await;
    let user_id = app.provider.add_user("pat@example.com", "hunter2", None);
    app.provider.add_code("code-123", user_id);

    let response = app
        .server
        .get("/auth/callback")
        .add_query_param("code", "code-123")
        .add_query_param("next", "/dashboard")
        .await;

    assert_eq!(response.status_code(), StatusCode::FOUND);
    let headers = response.headers();
    assert_eq!(
        headers.get(header::LOCATION).unwrap().to_str().unwrap(),
        "/dashboard"
    );
    let cookies = set_cookies(&headers);
    assert!(
        cookies.iter().any(|c| c.starts_with("tavola_access_token=")),
        "expected session cookies on callback, got {cookies:?}"
    );
    assert!(app.profiles.has_profile(user_id));
}

#[tokio::test]
async fn should_reject_callback_with_absolute_next() {
    let app = spawn_app().await;
    let user_id = app.provider.add_user("pat@example.com", "hunter2", None);
    app.provider.add_code("code-123", user_id);

    let response = app
        .server
        .get("/auth/callback")
        .add_query_param("code", "code-123")
        .add_query_param("next", "https://evil.example")
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["kind"], "INVALID_REDIRECT");
}

#[tokio::test]
async fn should_reject_unknown_callback_code() {
    let app = spawn_app().await;

    let response = app
        .server
        .get("/auth/callback")
        .add_query_param("code", "never-issued")
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["kind"], "INVALID_GRANT");
}

// ── GET /auth/confirm ─────────────────────────────────────────────────────────

#[tokio::test]
async fn should_confirm_otp_and_establish_session() {
    let app = spawn_app().await;
    let user_id = app.provider.add_user("pat@example.com", "hunter2", None);
    app.provider.add_code("otp-hash-1", user_id);

    let response = app
        .server
        .get("/auth/confirm")
        .add_query_param("token_hash", "otp-hash-1")
        .add_query_param("type", "email")
        .await;

    assert_eq!(response.status_code(), StatusCode::FOUND);
    let headers = response.headers();
    assert_eq!(
        headers.get(header::LOCATION).unwrap().to_str().unwrap(),
        "/"
    );
    assert!(app.profiles.has_profile(user_id));
}

// ── GET /auth/session ─────────────────────────────────────────────────────────

#[tokio::test]
async fn should_return_raw_session_pair() {
    let app = spawn_app().await;
    let user_id = app.provider.add_user("pat@example.com", "hunter2", None);
    let (access, refresh) = app.provider.issue_session(user_id);

    let response = app
        .server
        .get("/auth/session")
        .add_header(header::COOKIE, session_cookie(&access, &refresh))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["access_token"], access.as_str());
    assert_eq!(body["refresh_token"], refresh.as_str());
    assert!(body["expires_at"].as_u64().unwrap() > 0);

    // Introspection is read-only: no cookie writes on this path.
    let headers = response.headers();
    assert!(set_cookies(&headers).is_empty());
}

#[tokio::test]
async fn should_answer_401_without_session_cookies() {
    let app = spawn_app().await;

    let response = app.server.get("/auth/session").await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["kind"], "SESSION_EXPIRED");
}
