//! Mock identity-header helpers for integration tests.
//!
//! Services behind the gateway receive `x-tavola-user-id` +
//! `x-tavola-user-role` headers injected by the route guard. In tests,
//! `MockAuth` injects these headers directly so no gateway or token is needed.

use axum::http::{HeaderMap, HeaderName, HeaderValue};
use uuid::Uuid;

use tavola_auth_types::identity::{X_TAVOLA_USER_ID, X_TAVOLA_USER_ROLE};
use tavola_domain::role::Role;

/// Configurable identity injected into test requests.
pub struct MockAuth {
    pub user_id: Uuid,
    pub role: Role,
}

impl MockAuth {
    pub fn new(user_id: Uuid, role: Role) -> Self {
        Self { user_id, role }
    }

    /// Return headers as if the gateway injected them.
    pub fn headers(&self) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(
            HeaderName::from_static(X_TAVOLA_USER_ID),
            HeaderValue::from_str(&self.user_id.to_string()).unwrap(),
        );
        map.insert(
            HeaderName::from_static(X_TAVOLA_USER_ROLE),
            HeaderValue::from_str(&self.role.as_u8().to_string()).unwrap(),
        );
        map
    }
}
