//! Static routing policy: the public allowlist and the route-to-role table.
//!
//! Matching is on whole path segments, never substrings, and the first table
//! entry that matches wins — keep entries ordered most-specific first.

use serde::Serialize;

use tavola_domain::role::Role;

/// Canonical login path. Every login redirect goes through this constant.
pub const LOGIN_PATH: &str = "/login";

/// Where authenticated-but-unauthorized requests land.
pub const UNAUTHORIZED_PATH: &str = "/unauthorized";

/// Fail-closed target for authorization lookups that cannot complete.
pub const HOME_PATH: &str = "/";

/// Query parameter carrying the originally requested path through the login
/// flow.
pub const REDIRECTED_FROM: &str = "redirected_from";

/// Paths that pass the guard untouched regardless of authentication state.
const PUBLIC_EXACT: &[&str] = &[
    "/",
    "/login",
    "/register",
    "/reset-password",
    "/unauthorized",
    "/healthz",
    "/readyz",
];

/// Path prefixes (whole segments) that are public: the auth flow itself.
const PUBLIC_PREFIXES: &[&str] = &["/auth"];

/// Minimum role per protected prefix, most specific first. Anything protected
/// and unlisted requires only an authenticated customer.
const ROUTE_ROLES: &[(&str, Role)] = &[
    ("/admin", Role::PlatformAdmin),
    ("/dashboard/settings", Role::RestaurantAdmin),
    ("/dashboard", Role::Customer),
    ("/staff", Role::RestaurantStaff),
    ("/courier", Role::Courier),
];

/// Whether `prefix` matches `path` on a whole segment boundary.
fn matches_segment_prefix(path: &str, prefix: &str) -> bool {
    path == prefix
        || path
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with('/'))
}

pub fn is_public(path: &str) -> bool {
    PUBLIC_EXACT.contains(&path)
        || PUBLIC_PREFIXES
            .iter()
            .any(|p| matches_segment_prefix(path, p))
}

pub fn required_role(path: &str) -> Role {
    ROUTE_ROLES
        .iter()
        .find(|(prefix, _)| matches_segment_prefix(path, prefix))
        .map(|&(_, role)| role)
        .unwrap_or(Role::Customer)
}

#[derive(Serialize)]
struct LoginRedirect<'a> {
    redirected_from: &'a str,
}

/// Login location carrying the original path, e.g.
/// `/login?redirected_from=%2Fdashboard`.
pub fn login_redirect(from: &str) -> String {
    match serde_qs::to_string(&LoginRedirect {
        redirected_from: from,
    }) {
        Ok(query) => format!("{LOGIN_PATH}?{query}"),
        Err(_) => LOGIN_PATH.to_owned(),
    }
}
