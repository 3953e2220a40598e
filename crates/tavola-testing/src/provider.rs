//! In-process stand-in for the hosted identity provider.
//!
//! Speaks just enough of the provider's HTTP contract for the gateway's
//! client to be exercised end to end: password/refresh/code grants, user
//! lookup, sign-up, sign-out, OTP verification, and the admin lookup.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::{Value, json};
use uuid::Uuid;

use tavola_auth_types::token::validate_access_token;
use tavola_domain::role::Role;

use crate::fixture::{future_exp, mint_access_token, past_exp};

/// A registered principal.
#[derive(Debug, Clone)]
pub struct ProviderUser {
    pub id: Uuid,
    pub email: String,
    pub password: String,
    pub role: Option<Role>,
}

#[derive(Default)]
struct Inner {
    users: Vec<ProviderUser>,
    /// refresh token → user
    refresh_tokens: HashMap<String, Uuid>,
    /// callback codes and OTP token hashes → user
    codes: HashMap<String, Uuid>,
}

#[derive(Clone)]
struct ProviderState {
    jwt_secret: String,
    inner: Arc<Mutex<Inner>>,
}

impl ProviderState {
    fn issue_session(&self, user: &ProviderUser) -> Value {
        let expires_at = future_exp();
        let access = mint_access_token(user.id, user.role, expires_at, &self.jwt_secret);
        let refresh = Uuid::new_v4().to_string();
        self.inner
            .lock()
            .unwrap()
            .refresh_tokens
            .insert(refresh.clone(), user.id);
        json!({
            "access_token": access,
            "refresh_token": refresh,
            "token_type": "bearer",
            "expires_at": expires_at,
        })
    }

    fn find_user(&self, id: Uuid) -> Option<ProviderUser> {
        self.inner
            .lock()
            .unwrap()
            .users
            .iter()
            .find(|u| u.id == id)
            .cloned()
    }
}

/// The spawned mock server. Dropping it stops the server task.
pub struct MockProvider {
    pub base_url: String,
    state: ProviderState,
    handle: tokio::task::JoinHandle<()>,
}

impl Drop for MockProvider {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

impl MockProvider {
    /// Bind an ephemeral port and start serving.
    pub async fn spawn(jwt_secret: &str) -> Self {
        let state = ProviderState {
            jwt_secret: jwt_secret.to_owned(),
            inner: Arc::new(Mutex::new(Inner::default())),
        };

        let router = Router::new()
            .route("/auth/v1/token", post(token_grant))
            .route("/auth/v1/signup", post(signup))
            .route("/auth/v1/logout", post(logout))
            .route("/auth/v1/user", get(current_user))
            .route("/auth/v1/verify", post(verify_otp))
            .route("/auth/v1/admin/users/{user_id}", get(admin_user))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind mock provider");
        let addr = listener.local_addr().expect("mock provider local addr");
        let handle = tokio::spawn(async move {
            axum::serve(listener, router)
                .await
                .expect("mock provider server error");
        });

        Self {
            base_url: format!("http://{addr}"),
            state,
            handle,
        }
    }

    /// Register a user, returning its id.
    pub fn add_user(&self, email: &str, password: &str, role: Option<Role>) -> Uuid {
        let id = Uuid::new_v4();
        self.state.inner.lock().unwrap().users.push(ProviderUser {
            id,
            email: email.to_owned(),
            password: password.to_owned(),
            role,
        });
        id
    }

    /// Issue a valid (access, refresh) pair for an existing user, as if they
    /// had signed in.
    pub fn issue_session(&self, user_id: Uuid) -> (String, String) {
        let user = self
            .state
            .find_user(user_id)
            .expect("issue_session: unknown user");
        let value = self.state.issue_session(&user);
        (
            value["access_token"].as_str().unwrap().to_owned(),
            value["refresh_token"].as_str().unwrap().to_owned(),
        )
    }

    /// Mint an already-expired access token for a user.
    pub fn issue_expired_access(&self, user_id: Uuid) -> String {
        let user = self
            .state
            .find_user(user_id)
            .expect("issue_expired_access: unknown user");
        mint_access_token(user.id, user.role, past_exp(), &self.state.jwt_secret)
    }

    /// Register a callback code / OTP token hash redeemable for a session.
    pub fn add_code(&self, code: &str, user_id: Uuid) {
        self.state
            .inner
            .lock()
            .unwrap()
            .codes
            .insert(code.to_owned(), user_id);
    }

    /// Invalidate every outstanding refresh token.
    pub fn revoke_refresh_tokens(&self) {
        self.state.inner.lock().unwrap().refresh_tokens.clear();
    }

    /// Number of registered users (sign-up assertions).
    pub fn user_count(&self) -> usize {
        self.state.inner.lock().unwrap().users.len()
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct GrantQuery {
    grant_type: String,
}

async fn token_grant(
    State(state): State<ProviderState>,
    Query(query): Query<GrantQuery>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    let user = match query.grant_type.as_str() {
        "password" => {
            let email = body["email"].as_str().unwrap_or_default();
            let password = body["password"].as_str().unwrap_or_default();
            state
                .inner
                .lock()
                .unwrap()
                .users
                .iter()
                .find(|u| u.email == email && u.password == password)
                .cloned()
        }
        "refresh_token" => {
            let token = body["refresh_token"].as_str().unwrap_or_default();
            let mut inner = state.inner.lock().unwrap();
            // Rotation: a used refresh token is gone.
            let user_id = inner.refresh_tokens.remove(token);
            user_id.and_then(|id| inner.users.iter().find(|u| u.id == id).cloned())
        }
        "pkce" => {
            let code = body["auth_code"].as_str().unwrap_or_default();
            let mut inner = state.inner.lock().unwrap();
            let user_id = inner.codes.remove(code);
            user_id.and_then(|id| inner.users.iter().find(|u| u.id == id).cloned())
        }
        _ => None,
    };

    match user {
        Some(user) => (StatusCode::OK, Json(state.issue_session(&user))).into_response(),
        None => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "invalid_grant" })),
        )
            .into_response(),
    }
}

async fn signup(State(state): State<ProviderState>, Json(body): Json<Value>) -> impl IntoResponse {
    let email = body["email"].as_str().unwrap_or_default().to_owned();
    let password = body["password"].as_str().unwrap_or_default().to_owned();
    if email.is_empty() || password.is_empty() {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "error": "invalid signup" })),
        )
            .into_response();
    }
    let id = Uuid::new_v4();
    state.inner.lock().unwrap().users.push(ProviderUser {
        id,
        email: email.clone(),
        password,
        role: None,
    });
    (StatusCode::OK, Json(json!({ "id": id, "email": email }))).into_response()
}

async fn logout() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn current_user(State(state): State<ProviderState>, headers: HeaderMap) -> impl IntoResponse {
    let token = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    let info = token.and_then(|t| validate_access_token(t, &state.jwt_secret).ok());
    let user = info.and_then(|i| state.find_user(i.user_id));

    match user {
        Some(user) => (StatusCode::OK, Json(user_body(&user))).into_response(),
        None => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "invalid token" })),
        )
            .into_response(),
    }
}

async fn verify_otp(
    State(state): State<ProviderState>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    let token_hash = body["token_hash"].as_str().unwrap_or_default();
    let user = {
        let mut inner = state.inner.lock().unwrap();
        let user_id = inner.codes.remove(token_hash);
        user_id.and_then(|id| inner.users.iter().find(|u| u.id == id).cloned())
    };
    match user {
        Some(user) => (StatusCode::OK, Json(state.issue_session(&user))).into_response(),
        None => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "otp_expired" })),
        )
            .into_response(),
    }
}

async fn admin_user(
    State(state): State<ProviderState>,
    Path(user_id): Path<Uuid>,
) -> impl IntoResponse {
    match state.find_user(user_id) {
        Some(user) => (StatusCode::OK, Json(user_body(&user))).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "user not found" })),
        )
            .into_response(),
    }
}

fn user_body(user: &ProviderUser) -> Value {
    json!({
        "id": user.id,
        "email": user.email,
        "user_metadata": { "role": user.role },
    })
}
