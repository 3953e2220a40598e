//! Internal surface used by the gateway: profile lookups and the
//! first-sign-in upsert. Guarded by the shared service key, not by user
//! identity — this is the privileged path that bypasses per-user scoping.

use axum::{
    Json,
    extract::{Path, Request, State},
    middleware::Next,
    response::Response,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tavola_auth_types::identity::X_TAVOLA_SERVICE_KEY;
use tavola_core::error::AppError;

use crate::domain::types::Profile;
use crate::error::ProfilesServiceError;
use crate::state::AppState;
use crate::usecase::profile::{EnsureProfileUseCase, GetProfileUseCase};
use crate::usecase::restaurant::ListUserRestaurantsUseCase;

/// Rejects internal calls without the shared service key.
pub async fn require_service_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let presented = request
        .headers()
        .get(X_TAVOLA_SERVICE_KEY)
        .and_then(|v| v.to_str().ok());
    if presented != Some(state.service_key.as_str()) {
        return Err(AppError::Unauthorized);
    }
    Ok(next.run(request).await)
}

/// Profile as the gateway consumes it: role as `u8` wire value.
#[derive(Serialize)]
pub struct InternalProfileResponse {
    pub user_id: Uuid,
    pub display_name: String,
    pub role: u8,
    pub home_restaurant_id: Option<Uuid>,
}

impl From<Profile> for InternalProfileResponse {
    fn from(p: Profile) -> Self {
        Self {
            user_id: p.user_id,
            display_name: p.display_name,
            role: p.role.as_u8(),
            home_restaurant_id: p.home_restaurant_id,
        }
    }
}

// ── GET /internal/profiles/{user_id} ─────────────────────────────────────────

pub async fn internal_get_profile(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<InternalProfileResponse>, ProfilesServiceError> {
    let usecase = GetProfileUseCase {
        repo: state.profile_repo(),
    };
    let profile = usecase.execute(user_id).await?;
    Ok(Json(profile.into()))
}

// ── PUT /internal/profiles/{user_id} ─────────────────────────────────────────

#[derive(Deserialize)]
pub struct EnsureProfileRequest {
    pub email: String,
}

pub async fn internal_ensure_profile(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(body): Json<EnsureProfileRequest>,
) -> Result<Json<InternalProfileResponse>, ProfilesServiceError> {
    let usecase = EnsureProfileUseCase {
        repo: state.profile_repo(),
    };
    let profile = usecase.execute(user_id, &body.email).await?;
    Ok(Json(profile.into()))
}

// ── GET /internal/profiles/{user_id}/restaurants ─────────────────────────────

#[derive(Serialize)]
pub struct InternalMembershipResponse {
    pub restaurant_id: Uuid,
    pub name: String,
    pub member_role: u8,
}

pub async fn internal_list_restaurants(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<InternalMembershipResponse>>, ProfilesServiceError> {
    let usecase = ListUserRestaurantsUseCase {
        repo: state.restaurant_repo(),
    };
    let memberships = usecase.execute(user_id).await?;
    Ok(Json(
        memberships
            .into_iter()
            .map(|(restaurant, member_role)| InternalMembershipResponse {
                restaurant_id: restaurant.id,
                name: restaurant.name,
                member_role: member_role.as_u8(),
            })
            .collect(),
    ))
}
