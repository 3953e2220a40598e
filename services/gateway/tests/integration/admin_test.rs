use axum::http::{StatusCode, header};
use serde_json::Value;
use uuid::Uuid;

use tavola_domain::role::Role;

use crate::helpers::{session_cookie, spawn_app};

#[tokio::test]
async fn should_let_platform_admin_look_up_principals() {
    let app = spawn_app().await;
    let admin_id = app
        .provider
        .add_user("root@example.com", "hunter2", Some(Role::PlatformAdmin));
    app.profiles.set_profile(admin_id, "root", 4);
    let target_id = app
        .provider
        .add_user("pat@example.com", "hunter2", Some(Role::Customer));
    let (access, refresh) = app.provider.issue_session(admin_id);

    let response = app
        .server
        .get(&format!("/admin/users/{target_id}"))
        .add_header(header::COOKIE, session_cookie(&access, &refresh))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["email"], "pat@example.com");
    assert_eq!(body["metadata_role"], "customer");
}

#[tokio::test]
async fn should_answer_404_for_unknown_principal() {
    let app = spawn_app().await;
    let admin_id = app
        .provider
        .add_user("root@example.com", "hunter2", Some(Role::PlatformAdmin));
    app.profiles.set_profile(admin_id, "root", 4);
    let (access, refresh) = app.provider.issue_session(admin_id);

    let response = app
        .server
        .get(&format!("/admin/users/{}", Uuid::new_v4()))
        .add_header(header::COOKIE, session_cookie(&access, &refresh))
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["kind"], "USER_NOT_FOUND");
}

#[tokio::test]
async fn should_keep_non_admins_out_of_the_admin_lookup() {
    let app = spawn_app().await;
    let user_id = app.provider.add_user("pat@example.com", "hunter2", None);
    app.profiles.set_profile(user_id, "pat", 0);
    let (access, refresh) = app.provider.issue_session(user_id);

    let response = app
        .server
        .get(&format!("/admin/users/{}", Uuid::new_v4()))
        .add_header(header::COOKIE, session_cookie(&access, &refresh))
        .await;

    // The route guard bounces this before the handler ever runs.
    assert_eq!(response.status_code(), StatusCode::FOUND);
    let headers = response.headers();
    assert_eq!(
        headers.get(header::LOCATION).unwrap().to_str().unwrap(),
        "/unauthorized"
    );
}
