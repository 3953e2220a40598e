//! Cookie builders for the session token pair.
//!
//! The tokens are provider-issued and opaque to us; attributes pass through
//! unmodified except for Max-Age zeroing on removal.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

/// Cookie name for the access token.
pub const TAVOLA_ACCESS_TOKEN: &str = "tavola_access_token";

/// Cookie name for the refresh token.
pub const TAVOLA_REFRESH_TOKEN: &str = "tavola_refresh_token";

/// Cookie Max-Age for both tokens in seconds (7 days). Token lifetime itself
/// is managed by the identity provider.
pub const SESSION_COOKIE_MAX_AGE: u64 = 604800;

/// Set the access-token cookie on the jar.
///
/// ```
/// use axum_extra::extract::cookie::CookieJar;
/// use tavola_auth_types::cookie::{set_access_token_cookie, TAVOLA_ACCESS_TOKEN};
///
/// let jar = CookieJar::new();
/// let jar = set_access_token_cookie(jar, "token_value".to_string(), "example.com".to_string());
/// let cookie = jar.get(TAVOLA_ACCESS_TOKEN).unwrap();
/// assert_eq!(cookie.path(), Some("/"));
/// assert_eq!(cookie.domain(), Some("example.com"));
/// assert_eq!(cookie.max_age(), Some(time::Duration::seconds(604800)));
/// assert!(cookie.http_only().unwrap_or(false));
/// assert!(cookie.secure().unwrap_or(false));
/// ```
pub fn set_access_token_cookie(jar: CookieJar, value: String, domain: String) -> CookieJar {
    let cookie = Cookie::build((TAVOLA_ACCESS_TOKEN, value))
        .path("/")
        .domain(domain)
        .max_age(Duration::seconds(SESSION_COOKIE_MAX_AGE as i64))
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .build();
    jar.add(cookie)
}

/// Set the refresh-token cookie on the jar. Scoped to `/auth` — only the
/// session endpoints ever read it.
///
/// ```
/// use axum_extra::extract::cookie::CookieJar;
/// use tavola_auth_types::cookie::{set_refresh_token_cookie, TAVOLA_REFRESH_TOKEN};
///
/// let jar = CookieJar::new();
/// let jar = set_refresh_token_cookie(jar, "refresh_value".to_string(), "example.com".to_string());
/// let cookie = jar.get(TAVOLA_REFRESH_TOKEN).unwrap();
/// assert_eq!(cookie.path(), Some("/auth"));
/// assert_eq!(cookie.max_age(), Some(time::Duration::seconds(604800)));
/// ```
pub fn set_refresh_token_cookie(jar: CookieJar, value: String, domain: String) -> CookieJar {
    let cookie = Cookie::build((TAVOLA_REFRESH_TOKEN, value))
        .path("/auth")
        .domain(domain)
        .max_age(Duration::seconds(SESSION_COOKIE_MAX_AGE as i64))
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .build();
    jar.add(cookie)
}

/// Clear both token cookies by setting Max-Age to 0.
///
/// ```
/// use axum_extra::extract::cookie::CookieJar;
/// use tavola_auth_types::cookie::{
///     clear_session_cookies, set_access_token_cookie, set_refresh_token_cookie,
///     TAVOLA_ACCESS_TOKEN, TAVOLA_REFRESH_TOKEN,
/// };
///
/// let jar = CookieJar::new();
/// let jar = set_access_token_cookie(jar, "a".to_string(), "example.com".to_string());
/// let jar = set_refresh_token_cookie(jar, "r".to_string(), "example.com".to_string());
/// let jar = clear_session_cookies(jar, "example.com".to_string());
/// let access = jar.get(TAVOLA_ACCESS_TOKEN).unwrap();
/// let refresh = jar.get(TAVOLA_REFRESH_TOKEN).unwrap();
/// assert_eq!(access.max_age(), Some(time::Duration::ZERO));
/// assert_eq!(refresh.max_age(), Some(time::Duration::ZERO));
/// ```
pub fn clear_session_cookies(jar: CookieJar, domain: String) -> CookieJar {
    let access = Cookie::build((TAVOLA_ACCESS_TOKEN, ""))
        .path("/")
        .domain(domain.clone())
        .max_age(Duration::ZERO)
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .build();
    let refresh = Cookie::build((TAVOLA_REFRESH_TOKEN, ""))
        .path("/auth")
        .domain(domain)
        .max_age(Duration::ZERO)
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .build();
    jar.add(access).add(refresh)
}
