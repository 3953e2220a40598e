use uuid::Uuid;

use tavola_domain::role::Role;

/// The authenticated identity as returned by the hosted provider.
///
/// Owned by the provider; the gateway never mutates it except through
/// sign-up/sign-in calls. `metadata_role` is the provider's ad-hoc metadata
/// field — authorization decisions use the profile row, not this.
#[derive(Debug, Clone)]
pub struct Principal {
    pub id: Uuid,
    pub email: String,
    pub metadata_role: Option<Role>,
}

/// Provider-issued opaque token pair. Lifetime is managed entirely by the
/// provider; the gateway only relays the pair between cookies and calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionTokens {
    pub access_token: String,
    pub refresh_token: String,
    /// Access-token expiry, seconds since UNIX epoch.
    pub expires_at: u64,
}

/// Application-owned row extending a principal, fetched from the profiles
/// service on every protected request.
#[derive(Debug, Clone)]
pub struct Profile {
    pub user_id: Uuid,
    pub display_name: String,
    pub role: Role,
    pub home_restaurant_id: Option<Uuid>,
}

/// A restaurant the user belongs to, from the membership join.
#[derive(Debug, Clone)]
pub struct RestaurantMembership {
    pub restaurant_id: Uuid,
    pub name: String,
    pub member_role: Role,
}

/// Identity the route guard injects into authorized requests.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
}
