//! HTTP client for the profiles service internal surface.
//!
//! Uses the privileged service key, so it must only be constructed in server
//! binaries, like the service-role provider client.

use anyhow::anyhow;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use tavola_auth_types::identity::X_TAVOLA_SERVICE_KEY;
use tavola_domain::role::Role;

use crate::domain::ports::ProfilePort;
use crate::domain::types::{Profile, RestaurantMembership};
use crate::error::GatewayError;

#[derive(Clone)]
pub struct HttpProfileDirectory {
    http: reqwest::Client,
    base_url: String,
    service_key: String,
}

impl HttpProfileDirectory {
    pub fn new(http: reqwest::Client, base_url: &str, service_key: String) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_owned(),
            service_key,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl std::fmt::Debug for HttpProfileDirectory {
    // Never log key material.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpProfileDirectory")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl ProfilePort for HttpProfileDirectory {
    async fn find_profile(&self, user_id: Uuid) -> Result<Option<Profile>, GatewayError> {
        let resp = self
            .http
            .get(self.endpoint(&format!("/internal/profiles/{user_id}")))
            .header(X_TAVOLA_SERVICE_KEY, &self.service_key)
            .send()
            .await
            .map_err(|e| GatewayError::Internal(e.into()))?;

        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let resp = check_status(resp)?;
        let dto: ProfileDto = resp
            .json()
            .await
            .map_err(|e| GatewayError::Internal(e.into()))?;
        Ok(Some(dto.into_profile()?))
    }

    async fn list_memberships(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<RestaurantMembership>, GatewayError> {
        let resp = self
            .http
            .get(self.endpoint(&format!("/internal/profiles/{user_id}/restaurants")))
            .header(X_TAVOLA_SERVICE_KEY, &self.service_key)
            .send()
            .await
            .map_err(|e| GatewayError::Internal(e.into()))?;

        let resp = check_status(resp)?;
        let dtos: Vec<MembershipDto> = resp
            .json()
            .await
            .map_err(|e| GatewayError::Internal(e.into()))?;
        dtos.into_iter().map(MembershipDto::into_membership).collect()
    }

    async fn ensure_profile(&self, user_id: Uuid, email: &str) -> Result<Profile, GatewayError> {
        let resp = self
            .http
            .put(self.endpoint(&format!("/internal/profiles/{user_id}")))
            .header(X_TAVOLA_SERVICE_KEY, &self.service_key)
            .json(&json!({ "email": email }))
            .send()
            .await
            .map_err(|e| GatewayError::Internal(e.into()))?;

        let resp = check_status(resp)?;
        let dto: ProfileDto = resp
            .json()
            .await
            .map_err(|e| GatewayError::Internal(e.into()))?;
        dto.into_profile()
    }
}

fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, GatewayError> {
    let status = resp.status();
    if status.is_success() {
        Ok(resp)
    } else {
        Err(GatewayError::Internal(anyhow!(
            "profiles service returned {status}"
        )))
    }
}

// ── Wire DTOs ────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct ProfileDto {
    user_id: Uuid,
    display_name: String,
    role: u8,
    #[serde(default)]
    home_restaurant_id: Option<Uuid>,
}

impl ProfileDto {
    fn into_profile(self) -> Result<Profile, GatewayError> {
        let role = Role::from_u8(self.role)
            .ok_or_else(|| GatewayError::Internal(anyhow!("unknown role wire value {}", self.role)))?;
        Ok(Profile {
            user_id: self.user_id,
            display_name: self.display_name,
            role,
            home_restaurant_id: self.home_restaurant_id,
        })
    }
}

#[derive(Debug, Deserialize)]
struct MembershipDto {
    restaurant_id: Uuid,
    name: String,
    member_role: u8,
}

impl MembershipDto {
    fn into_membership(self) -> Result<RestaurantMembership, GatewayError> {
        let member_role = Role::from_u8(self.member_role).ok_or_else(|| {
            GatewayError::Internal(anyhow!("unknown role wire value {}", self.member_role))
        })?;
        Ok(RestaurantMembership {
            restaurant_id: self.restaurant_id,
            name: self.name,
            member_role,
        })
    }
}
