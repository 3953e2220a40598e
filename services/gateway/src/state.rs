use crate::infra::profiles::HttpProfileDirectory;
use crate::infra::provider::HttpIdentityProvider;
use crate::shell::AuthStateFeed;
use crate::usecase::auth::{EstablishSessionUseCase, RegisterUseCase, SignOutUseCase};
use crate::usecase::resolve::{ProfileResolver, SessionResolver};

/// Shared application state passed to every handler via axum `State`.
///
/// Clients are constructed once at startup; clones share the underlying
/// connection pool, so there is at most one client construction per process,
/// never per request.
#[derive(Clone)]
pub struct AppState {
    pub identity: HttpIdentityProvider,
    /// Service-role provider client for administrative lookups. Server-side
    /// only; never constructed anywhere a client bundle could reach.
    pub admin_identity: HttpIdentityProvider,
    pub profiles: HttpProfileDirectory,
    pub auth_feed: AuthStateFeed,
    pub jwt_secret: String,
    pub cookie_domain: String,
    pub site_url: String,
}

impl AppState {
    pub fn session_resolver(&self) -> SessionResolver<HttpIdentityProvider> {
        SessionResolver {
            identity: self.identity.clone(),
            jwt_secret: self.jwt_secret.clone(),
        }
    }

    pub fn profile_resolver(&self) -> ProfileResolver<HttpProfileDirectory> {
        ProfileResolver {
            profiles: self.profiles.clone(),
        }
    }

    pub fn establish_session(
        &self,
    ) -> EstablishSessionUseCase<HttpIdentityProvider, HttpProfileDirectory> {
        EstablishSessionUseCase {
            identity: self.identity.clone(),
            profiles: self.profiles.clone(),
        }
    }

    pub fn register(&self) -> RegisterUseCase<HttpIdentityProvider> {
        RegisterUseCase {
            identity: self.identity.clone(),
            site_url: self.site_url.clone(),
        }
    }

    pub fn sign_out(&self) -> SignOutUseCase<HttpIdentityProvider> {
        SignOutUseCase {
            identity: self.identity.clone(),
        }
    }
}
