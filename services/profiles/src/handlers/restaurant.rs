use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tavola_auth_types::identity::IdentityHeaders;
use tavola_domain::role::Role;

use crate::domain::types::Restaurant;
use crate::error::ProfilesServiceError;
use crate::state::AppState;
use crate::usecase::restaurant::{
    CreateRestaurantInput, CreateRestaurantUseCase, GetRestaurantUseCase,
};

#[derive(Serialize)]
pub struct RestaurantResponse {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    #[serde(serialize_with = "tavola_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Restaurant> for RestaurantResponse {
    fn from(r: Restaurant) -> Self {
        Self {
            id: r.id,
            name: r.name,
            slug: r.slug,
            created_at: r.created_at,
        }
    }
}

// ── POST /restaurants ────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateRestaurantRequest {
    pub name: String,
    pub slug: String,
    /// Profile that becomes the restaurant admin. Defaults to the caller.
    pub owner_id: Option<Uuid>,
}

pub async fn create_restaurant(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Json(body): Json<CreateRestaurantRequest>,
) -> Result<(StatusCode, Json<RestaurantResponse>), ProfilesServiceError> {
    if !identity.role.satisfies(Role::PlatformAdmin) {
        return Err(ProfilesServiceError::Forbidden);
    }
    let usecase = CreateRestaurantUseCase {
        repo: state.restaurant_repo(),
    };
    let restaurant = usecase
        .execute(CreateRestaurantInput {
            name: body.name,
            slug: body.slug,
            owner_id: body.owner_id.unwrap_or(identity.user_id),
        })
        .await?;
    Ok((StatusCode::CREATED, Json(restaurant.into())))
}

// ── GET /restaurants/{restaurant_id} ─────────────────────────────────────────

pub async fn get_restaurant(
    _identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(restaurant_id): Path<Uuid>,
) -> Result<Json<RestaurantResponse>, ProfilesServiceError> {
    let usecase = GetRestaurantUseCase {
        repo: state.restaurant_repo(),
    };
    let restaurant = usecase.execute(restaurant_id).await?;
    Ok(Json(restaurant.into()))
}
