//! Gateway-injected identity headers extractor.

use axum::extract::FromRequestParts;
use http::StatusCode;
use http::request::Parts;
use uuid::Uuid;

use tavola_domain::role::Role;

/// Header carrying the resolved principal id, set by the gateway.
pub const X_TAVOLA_USER_ID: &str = "x-tavola-user-id";

/// Header carrying the resolved role as `u8` wire value, set by the gateway.
pub const X_TAVOLA_USER_ROLE: &str = "x-tavola-user-role";

/// Header carrying the shared key on service-to-service internal calls.
pub const X_TAVOLA_SERVICE_KEY: &str = "x-tavola-service-key";

/// Identity injected by the gateway after the route guard authorized the
/// request.
///
/// Returns 401 if either header is absent or unparseable. Role enforcement
/// beyond the guard's route table (403) is done by handlers after extraction.
#[derive(Debug, Clone)]
pub struct IdentityHeaders {
    pub user_id: Uuid,
    pub role: Role,
}

impl<S> FromRequestParts<S> for IdentityHeaders
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    // axum-core 0.5 defines this as `fn -> impl Future + Send` (not `async fn`).
    // In Rust 1.82+ precise capturing, `async fn` captures lifetimes differently,
    // causing E0195. Fix: extract values synchronously, return a 'static async move block.
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let user_id = parts
            .headers
            .get(X_TAVOLA_USER_ID)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<Uuid>().ok());

        let role = parts
            .headers
            .get(X_TAVOLA_USER_ROLE)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<u8>().ok())
            .and_then(Role::from_u8);

        async move {
            let user_id = user_id.ok_or(StatusCode::UNAUTHORIZED)?;
            let role = role.ok_or(StatusCode::UNAUTHORIZED)?;
            Ok(Self { user_id, role })
        }
    }
}
