//! Route guard: classifies every request and redirects before any protected
//! handler runs.
//!
//! Per-request outcome, recomputed each time: public pass-through;
//! unauthenticated, redirected to login carrying the original path;
//! authenticated but unauthorized, redirected to the unauthorized page; or
//! authorized, forwarded with identity injected and rotated cookies
//! propagated.

use axum::{
    extract::{Request, State},
    http::{HeaderValue, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::CookieJar;

use tavola_auth_types::identity::{X_TAVOLA_USER_ID, X_TAVOLA_USER_ROLE};

use crate::domain::types::CurrentUser;
use crate::guard::policy;
use crate::session::store::ResponseSessionStore;
use crate::state::AppState;

pub async fn route_guard(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_owned();
    if policy::is_public(&path) {
        return next.run(request).await;
    }

    let mut store = ResponseSessionStore::new(jar, state.cookie_domain.clone());

    let Some(principal) = state.session_resolver().current_user(&mut store).await else {
        let location = policy::login_redirect(&path);
        return with_session_cookies(store, redirect_found(&location));
    };

    let profile = match state.profile_resolver().profile(principal.id).await {
        Ok(Some(profile)) => profile,
        Ok(None) => {
            // No profile row means no establishable role. When in doubt,
            // redirect home.
            tracing::debug!(user_id = %principal.id, "no profile row for principal");
            return with_session_cookies(store, redirect_found(policy::HOME_PATH));
        }
        Err(e) => {
            tracing::warn!(error = %e, "profile lookup failed during authorization");
            return with_session_cookies(store, redirect_found(policy::HOME_PATH));
        }
    };

    let required = policy::required_role(&path);
    if !profile.role.satisfies(required) {
        return with_session_cookies(store, redirect_found(policy::UNAUTHORIZED_PATH));
    }

    // Downstream handlers and services read identity from here, never from
    // the raw cookies.
    let headers = request.headers_mut();
    headers.insert(
        X_TAVOLA_USER_ID,
        HeaderValue::from_str(&principal.id.to_string()).unwrap(),
    );
    headers.insert(
        X_TAVOLA_USER_ROLE,
        HeaderValue::from_str(&profile.role.as_u8().to_string()).unwrap(),
    );
    request.extensions_mut().insert(CurrentUser {
        id: principal.id,
        email: principal.email,
        role: profile.role,
    });

    let response = next.run(request).await;
    with_session_cookies(store, response)
}

/// Plain `302 Found` with a `Location` header. The axum `Redirect` helpers
/// emit 303/307; the login flow expects 302.
pub fn redirect_found(location: &str) -> Response {
    let mut response = StatusCode::FOUND.into_response();
    let value = HeaderValue::from_str(location)
        .unwrap_or_else(|_| HeaderValue::from_static(policy::HOME_PATH));
    response.headers_mut().insert(header::LOCATION, value);
    response
}

/// Merge any cookies rotated during resolution onto the outgoing response.
fn with_session_cookies(store: ResponseSessionStore, response: Response) -> Response {
    (store.into_jar(), response).into_response()
}
