#![allow(async_fn_in_trait)]

use uuid::Uuid;

use crate::domain::types::{Principal, Profile, RestaurantMembership, SessionTokens};
use crate::error::GatewayError;

/// Port for the hosted identity provider.
///
/// `get_user` is a verified round trip: the provider validates the token and
/// returns the principal. A locally decoded token is never the source of
/// identity.
pub trait IdentityPort: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str)
    -> Result<SessionTokens, GatewayError>;

    /// Register a new principal. `email_redirect_to` is the absolute URL the
    /// confirmation email sends the user back to.
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        email_redirect_to: &str,
    ) -> Result<(), GatewayError>;

    async fn sign_out(&self, access_token: &str) -> Result<(), GatewayError>;

    /// Resolve the principal behind an access token. Returns
    /// [`GatewayError::SessionExpired`] for any 401-class provider answer.
    async fn get_user(&self, access_token: &str) -> Result<Principal, GatewayError>;

    /// Exchange a refresh token for a rotated pair.
    async fn refresh(&self, refresh_token: &str) -> Result<SessionTokens, GatewayError>;

    /// Exchange an auth-callback code for a session.
    async fn exchange_code(&self, code: &str) -> Result<SessionTokens, GatewayError>;

    /// Verify an emailed OTP token hash, returning a session.
    async fn verify_otp(
        &self,
        token_hash: &str,
        otp_type: &str,
    ) -> Result<SessionTokens, GatewayError>;

    /// Administrative principal lookup, bypassing user scoping. Only a
    /// service-role client is accepted by the provider here.
    async fn admin_get_user(&self, user_id: Uuid) -> Result<Principal, GatewayError>;
}

/// Port for the profiles service (application-owned rows).
pub trait ProfilePort: Send + Sync {
    async fn find_profile(&self, user_id: Uuid) -> Result<Option<Profile>, GatewayError>;

    /// Membership join for the given principal.
    async fn list_memberships(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<RestaurantMembership>, GatewayError>;

    /// Create the profile row on first sign-in if it does not exist yet.
    /// Idempotent; the row defaults to the customer role.
    async fn ensure_profile(&self, user_id: Uuid, email: &str) -> Result<Profile, GatewayError>;
}
