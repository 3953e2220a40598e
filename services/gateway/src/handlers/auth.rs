use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tavola_domain::role::Role;

use crate::domain::types::Profile;
use crate::error::GatewayError;
use crate::guard::middleware::redirect_found;
use crate::guard::policy;
use crate::session::store::{ReadOnlySessionStore, ResponseSessionStore, SessionStore};
use crate::state::AppState;

/// Sanitized view of the signed-in user returned by the auth endpoints.
#[derive(Serialize)]
pub struct SessionUser {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
    pub display_name: String,
}

impl SessionUser {
    fn new(email: String, profile: Profile) -> Self {
        Self {
            id: profile.user_id,
            email,
            role: profile.role,
            display_name: profile.display_name,
        }
    }
}

/// A `next`/`redirected_from` target must stay on this site: relative, and
/// not protocol-relative.
fn is_relative_path(path: &str) -> bool {
    path.starts_with('/') && !path.starts_with("//")
}

fn sanitize_next(next: Option<&str>) -> String {
    match next {
        Some(path) if is_relative_path(path) => path.to_owned(),
        Some(path) => {
            tracing::debug!(path, "discarding non-relative redirect target");
            policy::HOME_PATH.to_owned()
        }
        None => policy::HOME_PATH.to_owned(),
    }
}

// ── POST /auth/login ──────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    /// Where the login page should send the user afterward, as carried by the
    /// guard's `redirected_from` parameter.
    pub redirected_from: Option<String>,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub user: SessionUser,
    pub redirect_to: String,
}

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<LoginRequest>,
) -> Result<impl IntoResponse, GatewayError> {
    let session = state
        .establish_session()
        .sign_in(&body.email, &body.password)
        .await?;

    let mut store = ResponseSessionStore::new(jar, state.cookie_domain.clone());
    store.set_pair(&session.tokens);
    state
        .auth_feed
        .signed_in(session.principal.id, Some(session.profile.role));

    let body = LoginResponse {
        user: SessionUser::new(session.principal.email, session.profile),
        redirect_to: sanitize_next(body.redirected_from.as_deref()),
    };
    Ok((StatusCode::OK, store.into_jar(), Json(body)))
}

// ── POST /auth/register ───────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<impl IntoResponse, GatewayError> {
    state.register().execute(&body.email, &body.password).await?;
    let body = serde_json::json!({
        "message": "confirmation email sent",
    });
    Ok((StatusCode::CREATED, Json(body)))
}

// ── POST /auth/logout ─────────────────────────────────────────────────────────

pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<impl IntoResponse, GatewayError> {
    let mut store = ResponseSessionStore::new(jar, state.cookie_domain.clone());
    state.sign_out().execute(&mut store).await;
    state.auth_feed.signed_out();
    Ok((StatusCode::NO_CONTENT, store.into_jar()))
}

// ── GET /auth/callback ────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CallbackQuery {
    pub code: String,
    pub next: Option<String>,
}

pub async fn callback(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<CallbackQuery>,
) -> Result<impl IntoResponse, GatewayError> {
    if let Some(ref next) = query.next {
        if !is_relative_path(next) {
            return Err(GatewayError::InvalidRedirect);
        }
    }

    let session = state.establish_session().from_code(&query.code).await?;

    let mut store = ResponseSessionStore::new(jar, state.cookie_domain.clone());
    store.set_pair(&session.tokens);
    state
        .auth_feed
        .signed_in(session.principal.id, Some(session.profile.role));

    let target = sanitize_next(query.next.as_deref());
    Ok((store.into_jar(), redirect_found(&target)))
}

// ── GET /auth/confirm ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ConfirmQuery {
    pub token_hash: String,
    #[serde(rename = "type")]
    pub otp_type: String,
    pub next: Option<String>,
}

pub async fn confirm(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<ConfirmQuery>,
) -> Result<impl IntoResponse, GatewayError> {
    if let Some(ref next) = query.next {
        if !is_relative_path(next) {
            return Err(GatewayError::InvalidRedirect);
        }
    }

    let session = state
        .establish_session()
        .from_otp(&query.token_hash, &query.otp_type)
        .await?;

    let mut store = ResponseSessionStore::new(jar, state.cookie_domain.clone());
    store.set_pair(&session.tokens);
    state
        .auth_feed
        .signed_in(session.principal.id, Some(session.profile.role));

    let target = sanitize_next(query.next.as_deref());
    Ok((store.into_jar(), redirect_found(&target)))
}

// ── GET /auth/session ─────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct SessionResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: u64,
}

/// Raw session introspection. Uses the read-only store: this endpoint never
/// rotates tokens.
pub async fn session(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Json<SessionResponse>, GatewayError> {
    let store = ReadOnlySessionStore::from_jar(&jar);
    let tokens = state
        .session_resolver()
        .current_session(&store)
        .await
        .ok_or(GatewayError::SessionExpired)?;
    Ok(Json(SessionResponse {
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
        expires_at: tokens.expires_at,
    }))
}
