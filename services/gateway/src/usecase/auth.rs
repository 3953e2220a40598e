//! Sign-in / sign-up / sign-out flows against the hosted provider.

use url::Url;

use crate::domain::ports::{IdentityPort, ProfilePort};
use crate::domain::types::{Principal, Profile, SessionTokens};
use crate::error::GatewayError;
use crate::session::store::SessionStore;

/// A freshly established session with its principal and profile row.
#[derive(Debug)]
pub struct EstablishedSession {
    pub tokens: SessionTokens,
    pub principal: Principal,
    pub profile: Profile,
}

/// Turns provider grants (password, callback code, OTP) into an established
/// session. Every grant path ends with the idempotent profile upsert, so a
/// first sign-in always leaves a profile row behind.
pub struct EstablishSessionUseCase<I: IdentityPort, P: ProfilePort> {
    pub identity: I,
    pub profiles: P,
}

impl<I: IdentityPort, P: ProfilePort> EstablishSessionUseCase<I, P> {
    pub async fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> Result<EstablishedSession, GatewayError> {
        let tokens = self.identity.sign_in(email, password).await?;
        self.establish(tokens).await
    }

    pub async fn from_code(&self, code: &str) -> Result<EstablishedSession, GatewayError> {
        let tokens = self.identity.exchange_code(code).await?;
        self.establish(tokens).await
    }

    pub async fn from_otp(
        &self,
        token_hash: &str,
        otp_type: &str,
    ) -> Result<EstablishedSession, GatewayError> {
        let tokens = self.identity.verify_otp(token_hash, otp_type).await?;
        self.establish(tokens).await
    }

    async fn establish(
        &self,
        tokens: SessionTokens,
    ) -> Result<EstablishedSession, GatewayError> {
        let principal = self.identity.get_user(&tokens.access_token).await?;
        let profile = self
            .profiles
            .ensure_profile(principal.id, &principal.email)
            .await?;
        Ok(EstablishedSession {
            tokens,
            principal,
            profile,
        })
    }
}

/// Sign-up via the provider; the confirmation email links back to the site's
/// confirm route.
pub struct RegisterUseCase<I: IdentityPort> {
    pub identity: I,
    pub site_url: String,
}

impl<I: IdentityPort> RegisterUseCase<I> {
    pub async fn execute(&self, email: &str, password: &str) -> Result<(), GatewayError> {
        let redirect_to = confirm_redirect_target(&self.site_url)?;
        self.identity
            .sign_up(email, password, redirect_to.as_str())
            .await
    }
}

/// Absolute URL the confirmation email sends the user back to.
fn confirm_redirect_target(site_url: &str) -> Result<Url, GatewayError> {
    Url::parse(site_url)
        .and_then(|u| u.join("/auth/confirm"))
        .map_err(|e| GatewayError::Internal(anyhow::anyhow!("invalid site url: {e}")))
}

/// Provider sign-out is best effort: the cookies are cleared either way, and
/// an unreachable provider must not keep the user signed in locally.
pub struct SignOutUseCase<I: IdentityPort> {
    pub identity: I,
}

impl<I: IdentityPort> SignOutUseCase<I> {
    pub async fn execute<S: SessionStore>(&self, store: &mut S) {
        if let Some(access) = store.access_token() {
            if let Err(e) = self.identity.sign_out(&access).await {
                tracing::warn!(error = %e, "provider sign-out failed");
            }
        }
        store.clear();
    }
}
