//! Session and profile resolution.
//!
//! Every resolution failure is logged and collapsed to `None` or an empty
//! collection — callers treat those uniformly as "unauthenticated" / "no
//! data" and never branch on the error subtype.

use uuid::Uuid;

use tavola_auth_types::token::{TokenError, validate_access_token};

use crate::domain::ports::{IdentityPort, ProfilePort};
use crate::domain::types::{Principal, Profile, RestaurantMembership, SessionTokens};
use crate::error::GatewayError;
use crate::session::store::SessionStore;

/// Resolves the current principal from the session cookies, refreshing the
/// token pair through the provider when needed.
pub struct SessionResolver<I: IdentityPort> {
    pub identity: I,
    /// Provider JWT secret, used only to classify a token as expired before
    /// deciding to refresh. Identity always comes from the provider round trip.
    pub jwt_secret: String,
}

impl<I: IdentityPort> SessionResolver<I> {
    /// Resolve the authenticated principal, or `None`.
    ///
    /// Rotated tokens are written through `store`; in a read-only store the
    /// write is discarded and the provider re-issues on the next request.
    pub async fn current_user<S: SessionStore>(&self, store: &mut S) -> Option<Principal> {
        let access = store.access_token()?;

        let locally_expired = matches!(
            validate_access_token(&access, &self.jwt_secret),
            Err(TokenError::Expired)
        );

        if !locally_expired {
            match self.identity.get_user(&access).await {
                Ok(principal) => return Some(principal),
                Err(GatewayError::SessionExpired) => {}
                Err(e) => {
                    tracing::warn!(error = %e, "user resolution failed");
                    return None;
                }
            }
        }

        self.refresh_and_retry(store).await
    }

    /// Resolve the raw token pair. Used only where the pair itself is needed.
    pub async fn current_session<S: SessionStore>(&self, store: &S) -> Option<SessionTokens> {
        let access_token = store.access_token()?;
        let refresh_token = store.refresh_token()?;
        let expires_at = validate_access_token(&access_token, &self.jwt_secret)
            .map(|info| info.expires_at)
            .unwrap_or(0);
        Some(SessionTokens {
            access_token,
            refresh_token,
            expires_at,
        })
    }

    async fn refresh_and_retry<S: SessionStore>(&self, store: &mut S) -> Option<Principal> {
        let refresh = store.refresh_token()?;

        let tokens = match self.identity.refresh(&refresh).await {
            Ok(tokens) => tokens,
            Err(e) => {
                tracing::debug!(error = %e, "token refresh failed");
                return None;
            }
        };
        store.set_pair(&tokens);

        match self.identity.get_user(&tokens.access_token).await {
            Ok(principal) => Some(principal),
            Err(e) => {
                tracing::warn!(error = %e, "user resolution failed after refresh");
                None
            }
        }
    }
}

/// Resolves application-owned rows for a principal.
pub struct ProfileResolver<P: ProfilePort> {
    pub profiles: P,
}

impl<P: ProfilePort> ProfileResolver<P> {
    /// Profile lookup. The error is surfaced so the route guard can apply its
    /// fail-closed policy; page-level callers collapse it themselves.
    pub async fn profile(&self, user_id: Uuid) -> Result<Option<Profile>, GatewayError> {
        self.profiles.find_profile(user_id).await
    }

    /// Membership join. Returns an empty collection on error or absence,
    /// never an error to the page layer.
    pub async fn user_restaurants(&self, user_id: Uuid) -> Vec<RestaurantMembership> {
        match self.profiles.list_memberships(user_id).await {
            Ok(memberships) => memberships,
            Err(e) => {
                tracing::warn!(error = %e, %user_id, "membership lookup failed");
                Vec::new()
            }
        }
    }
}
