use chrono::Utc;
use uuid::Uuid;

use tavola_domain::role::Role;

use crate::domain::repository::RestaurantRepository;
use crate::domain::types::{Membership, Restaurant, validate_name, validate_slug};
use crate::error::ProfilesServiceError;

// ── CreateRestaurant ─────────────────────────────────────────────────────────

pub struct CreateRestaurantInput {
    pub name: String,
    pub slug: String,
    pub owner_id: Uuid,
}

pub struct CreateRestaurantUseCase<R: RestaurantRepository> {
    pub repo: R,
}

impl<R: RestaurantRepository> CreateRestaurantUseCase<R> {
    /// Creates the restaurant and its owning membership in one transaction;
    /// the owner joins as restaurant admin.
    pub async fn execute(
        &self,
        input: CreateRestaurantInput,
    ) -> Result<Restaurant, ProfilesServiceError> {
        if !validate_name(&input.name) {
            return Err(ProfilesServiceError::InvalidDisplayName);
        }
        if !validate_slug(&input.slug) {
            return Err(ProfilesServiceError::InvalidSlug);
        }

        let now = Utc::now();
        let restaurant = Restaurant {
            id: Uuid::now_v7(),
            name: input.name,
            slug: input.slug,
            created_at: now,
        };
        let owner = Membership {
            restaurant_id: restaurant.id,
            user_id: input.owner_id,
            member_role: Role::RestaurantAdmin,
            created_at: now,
        };
        self.repo.create_with_owner(&restaurant, &owner).await?;
        Ok(restaurant)
    }
}

// ── GetRestaurant ────────────────────────────────────────────────────────────

pub struct GetRestaurantUseCase<R: RestaurantRepository> {
    pub repo: R,
}

impl<R: RestaurantRepository> GetRestaurantUseCase<R> {
    pub async fn execute(&self, id: Uuid) -> Result<Restaurant, ProfilesServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(ProfilesServiceError::RestaurantNotFound)
    }
}

// ── ListUserRestaurants ──────────────────────────────────────────────────────

pub struct ListUserRestaurantsUseCase<R: RestaurantRepository> {
    pub repo: R,
}

impl<R: RestaurantRepository> ListUserRestaurantsUseCase<R> {
    pub async fn execute(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<(Restaurant, Role)>, ProfilesServiceError> {
        self.repo.list_for_user(user_id).await
    }
}
