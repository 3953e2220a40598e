use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tavola_auth_types::identity::IdentityHeaders;
use tavola_domain::role::Role;

use crate::error::ProfilesServiceError;
use crate::state::AppState;
use crate::usecase::profile::{GetProfileUseCase, UpdateProfileInput, UpdateProfileUseCase};
use crate::usecase::restaurant::ListUserRestaurantsUseCase;

// ── GET /profiles/@me ────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct ProfileResponse {
    pub user_id: Uuid,
    pub display_name: String,
    pub role: Role,
    pub home_restaurant_id: Option<Uuid>,
    #[serde(serialize_with = "tavola_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "tavola_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

pub async fn get_me(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<Json<ProfileResponse>, ProfilesServiceError> {
    let usecase = GetProfileUseCase {
        repo: state.profile_repo(),
    };
    let profile = usecase.execute(identity.user_id).await?;
    Ok(Json(ProfileResponse {
        user_id: profile.user_id,
        display_name: profile.display_name,
        role: profile.role,
        home_restaurant_id: profile.home_restaurant_id,
        created_at: profile.created_at,
        updated_at: profile.updated_at,
    }))
}

// ── PATCH /profiles/@me ──────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateMeRequest {
    pub display_name: Option<String>,
    pub home_restaurant_id: Option<Uuid>,
}

pub async fn update_me(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Json(body): Json<UpdateMeRequest>,
) -> Result<StatusCode, ProfilesServiceError> {
    let usecase = UpdateProfileUseCase {
        profiles: state.profile_repo(),
        restaurants: state.restaurant_repo(),
    };
    usecase
        .execute(
            identity.user_id,
            UpdateProfileInput {
                display_name: body.display_name,
                home_restaurant_id: body.home_restaurant_id,
            },
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── GET /profiles/@me/restaurants ────────────────────────────────────────────

#[derive(Serialize)]
pub struct MembershipResponse {
    pub restaurant_id: Uuid,
    pub name: String,
    pub slug: String,
    pub member_role: Role,
}

pub async fn my_restaurants(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<Json<Vec<MembershipResponse>>, ProfilesServiceError> {
    let usecase = ListUserRestaurantsUseCase {
        repo: state.restaurant_repo(),
    };
    let memberships = usecase.execute(identity.user_id).await?;
    Ok(Json(
        memberships
            .into_iter()
            .map(|(restaurant, member_role)| MembershipResponse {
                restaurant_id: restaurant.id,
                name: restaurant.name,
                slug: restaurant.slug,
                member_role,
            })
            .collect(),
    ))
}
