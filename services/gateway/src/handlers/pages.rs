//! Thin JSON stand-ins for the platform's public and gated pages. The page
//! content itself is presentation; these exist to anchor the route surface.

use axum::{Extension, Json, extract::{Query, State}};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::domain::types::CurrentUser;
use crate::state::AppState;

// ── GET / ────────────────────────────────────────────────────────────────────

pub async fn home() -> Json<Value> {
    Json(json!({
        "service": "tavola-gateway",
        "status": "ok",
    }))
}

// ── GET /login ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginPageQuery {
    pub redirected_from: Option<String>,
}

pub async fn login_page(Query(query): Query<LoginPageQuery>) -> Json<Value> {
    Json(json!({
        "kind": "SIGN_IN_REQUIRED",
        "message": "sign in to continue",
        "redirected_from": query.redirected_from,
    }))
}

// ── GET /unauthorized ────────────────────────────────────────────────────────

pub async fn unauthorized_page() -> Json<Value> {
    Json(json!({
        "kind": "INSUFFICIENT_ROLE",
        "message": "you do not have access to that page",
    }))
}

// ── GET /dashboard ───────────────────────────────────────────────────────────

pub async fn dashboard(
    Extension(user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> Json<Value> {
    let resolver = state.profile_resolver();
    // Page data degrades to safe defaults; a lookup failure here must not
    // take the page down.
    let display_name = match resolver.profile(user.id).await {
        Ok(Some(profile)) => profile.display_name,
        _ => user.email.clone(),
    };
    let restaurants: Vec<Value> = resolver
        .user_restaurants(user.id)
        .await
        .into_iter()
        .map(|m| {
            json!({
                "restaurant_id": m.restaurant_id,
                "name": m.name,
                "member_role": m.member_role,
            })
        })
        .collect();

    Json(json!({
        "display_name": display_name,
        "role": user.role,
        "restaurants": restaurants,
    }))
}

// ── GET /dashboard/settings ──────────────────────────────────────────────────

pub async fn dashboard_settings(Extension(user): Extension<CurrentUser>) -> Json<Value> {
    Json(json!({
        "area": "settings",
        "user_id": user.id,
        "role": user.role,
    }))
}
