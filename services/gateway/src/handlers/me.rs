use axum::{Extension, Json, extract::State};
use serde::Serialize;
use uuid::Uuid;

use tavola_domain::role::Role;

use crate::domain::types::CurrentUser;
use crate::error::GatewayError;
use crate::state::AppState;

// ── GET /me ──────────────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct MeResponse {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
    pub display_name: String,
    pub home_restaurant_id: Option<Uuid>,
}

pub async fn get_me(
    Extension(user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> Result<Json<MeResponse>, GatewayError> {
    let profile = state
        .profile_resolver()
        .profile(user.id)
        .await?
        .ok_or(GatewayError::ProfileNotFound)?;
    Ok(Json(MeResponse {
        id: user.id,
        email: user.email,
        role: profile.role,
        display_name: profile.display_name,
        home_restaurant_id: profile.home_restaurant_id,
    }))
}

// ── GET /me/restaurants ──────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct MembershipResponse {
    pub restaurant_id: Uuid,
    pub name: String,
    pub member_role: Role,
}

/// Membership list for the signed-in user. Empty on lookup failure — the
/// page layer never sees a membership error.
pub async fn my_restaurants(
    Extension(user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> Json<Vec<MembershipResponse>> {
    let memberships = state.profile_resolver().user_restaurants(user.id).await;
    Json(
        memberships
            .into_iter()
            .map(|m| MembershipResponse {
                restaurant_id: m.restaurant_id,
                name: m.name,
                member_role: m.member_role,
            })
            .collect(),
    )
}
