//! Per-request bridge between the session cookies and the identity client.
//!
//! One trait, two capabilities: [`ResponseSessionStore`] mirrors writes onto
//! the outgoing response so the browser receives rotated tokens;
//! [`ReadOnlySessionStore`] serves contexts that must not write — its writes
//! are discarded and logged, never surfaced. A discarded or failed write is
//! not fatal: the provider re-issues tokens on the next request.

use std::collections::HashMap;

use axum_extra::extract::cookie::CookieJar;

use tavola_auth_types::cookie::{
    TAVOLA_ACCESS_TOKEN, TAVOLA_REFRESH_TOKEN, clear_session_cookies, set_access_token_cookie,
    set_refresh_token_cookie,
};

use crate::domain::types::SessionTokens;

/// Cookie access used by the resolver and the auth handlers.
pub trait SessionStore {
    /// Read a cookie value from the incoming request.
    fn get(&self, name: &str) -> Option<String>;

    /// Mirror a rotated token pair onto both session cookies.
    fn set_pair(&mut self, tokens: &SessionTokens);

    /// Remove both session cookies (Max-Age zeroed).
    fn clear(&mut self);

    fn access_token(&self) -> Option<String> {
        self.get(TAVOLA_ACCESS_TOKEN)
    }

    fn refresh_token(&self) -> Option<String> {
        self.get(TAVOLA_REFRESH_TOKEN)
    }
}

// ── Write-through store (middleware, route handlers) ─────────────────────────

/// Session store whose writes land on the outgoing response.
#[derive(Debug)]
pub struct ResponseSessionStore {
    jar: CookieJar,
    domain: String,
}

impl ResponseSessionStore {
    pub fn new(jar: CookieJar, domain: String) -> Self {
        Self { jar, domain }
    }

    /// Consume the store, yielding the jar to merge into the response.
    pub fn into_jar(self) -> CookieJar {
        self.jar
    }
}

impl SessionStore for ResponseSessionStore {
    fn get(&self, name: &str) -> Option<String> {
        self.jar.get(name).map(|c| c.value().to_owned())
    }

    fn set_pair(&mut self, tokens: &SessionTokens) {
        let jar = std::mem::replace(&mut self.jar, CookieJar::new());
        let jar = set_access_token_cookie(jar, tokens.access_token.clone(), self.domain.clone());
        self.jar = set_refresh_token_cookie(jar, tokens.refresh_token.clone(), self.domain.clone());
    }

    fn clear(&mut self) {
        let jar = std::mem::replace(&mut self.jar, CookieJar::new());
        self.jar = clear_session_cookies(jar, self.domain.clone());
    }
}

// ── Read-only store (render/introspection contexts) ──────────────────────────

/// Session store for contexts that may not write cookies. Writes are
/// swallowed and logged at debug level.
#[derive(Debug)]
pub struct ReadOnlySessionStore {
    cookies: HashMap<String, String>,
}

impl ReadOnlySessionStore {
    pub fn from_jar(jar: &CookieJar) -> Self {
        let cookies = jar
            .iter()
            .map(|c| (c.name().to_owned(), c.value().to_owned()))
            .collect();
        Self { cookies }
    }
}

impl SessionStore for ReadOnlySessionStore {
    fn get(&self, name: &str) -> Option<String> {
        self.cookies.get(name).cloned()
    }

    fn set_pair(&mut self, _tokens: &SessionTokens) {
        tracing::debug!("session cookie write discarded in read-only context");
    }

    fn clear(&mut self) {
        tracing::debug!("session cookie removal discarded in read-only context");
    }
}
