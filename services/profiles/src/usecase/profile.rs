use chrono::Utc;
use uuid::Uuid;

use tavola_domain::role::Role;

use crate::domain::repository::{ProfileRepository, RestaurantRepository};
use crate::domain::types::{Profile, default_display_name, validate_name};
use crate::error::ProfilesServiceError;

// ── GetProfile ───────────────────────────────────────────────────────────────

pub struct GetProfileUseCase<R: ProfileRepository> {
    pub repo: R,
}

impl<R: ProfileRepository> GetProfileUseCase<R> {
    pub async fn execute(&self, user_id: Uuid) -> Result<Profile, ProfilesServiceError> {
        self.repo
            .find_by_id(user_id)
            .await?
            .ok_or(ProfilesServiceError::ProfileNotFound)
    }
}

// ── EnsureProfile (first sign-in upsert) ─────────────────────────────────────

pub struct EnsureProfileUseCase<R: ProfileRepository> {
    pub repo: R,
}

impl<R: ProfileRepository> EnsureProfileUseCase<R> {
    /// Idempotent: an existing row is returned untouched; a missing one is
    /// created with the customer role and a display name derived from the
    /// sign-up email.
    pub async fn execute(
        &self,
        user_id: Uuid,
        email: &str,
    ) -> Result<Profile, ProfilesServiceError> {
        if let Some(existing) = self.repo.find_by_id(user_id).await? {
            return Ok(existing);
        }

        let now = Utc::now();
        let profile = Profile {
            user_id,
            display_name: default_display_name(email),
            role: Role::Customer,
            home_restaurant_id: None,
            created_at: now,
            updated_at: now,
        };
        self.repo.create(&profile).await?;
        Ok(profile)
    }
}

// ── UpdateProfile ────────────────────────────────────────────────────────────

pub struct UpdateProfileInput {
    pub display_name: Option<String>,
    pub home_restaurant_id: Option<Uuid>,
}

pub struct UpdateProfileUseCase<P: ProfileRepository, R: RestaurantRepository> {
    pub profiles: P,
    pub restaurants: R,
}

impl<P: ProfileRepository, R: RestaurantRepository> UpdateProfileUseCase<P, R> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        input: UpdateProfileInput,
    ) -> Result<(), ProfilesServiceError> {
        if input.display_name.is_none() && input.home_restaurant_id.is_none() {
            return Err(ProfilesServiceError::MissingData);
        }
        if let Some(ref name) = input.display_name {
            if !validate_name(name) {
                return Err(ProfilesServiceError::InvalidDisplayName);
            }
        }
        if let Some(restaurant_id) = input.home_restaurant_id {
            self.restaurants
                .find_by_id(restaurant_id)
                .await?
                .ok_or(ProfilesServiceError::RestaurantNotFound)?;
        }
        if self.profiles.find_by_id(user_id).await?.is_none() {
            return Err(ProfilesServiceError::ProfileNotFound);
        }
        self.profiles
            .update(
                user_id,
                input.display_name.as_deref(),
                input.home_restaurant_id,
            )
            .await
    }
}
