use chrono::{DateTime, Utc};
use uuid::Uuid;

use tavola_domain::order::OrderStatus;
use tavola_domain::role::Role;

/// Profile row owned by this service, keyed by principal id.
#[derive(Debug, Clone)]
pub struct Profile {
    pub user_id: Uuid,
    pub display_name: String,
    pub role: Role,
    pub home_restaurant_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct Restaurant {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub created_at: DateTime<Utc>,
}

/// Membership linking a profile to a restaurant.
#[derive(Debug, Clone)]
pub struct Membership {
    pub restaurant_id: Uuid,
    pub user_id: Uuid,
    pub member_role: Role,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct Order {
    pub id: Uuid,
    pub restaurant_id: Uuid,
    pub placed_by: Uuid,
    pub status: OrderStatus,
    pub total_cents: i64,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Display and restaurant names: 1–64 chars, no leading/trailing whitespace.
pub fn validate_name(name: &str) -> bool {
    !name.is_empty() && name.len() <= 64 && name.trim() == name
}

/// Slugs: 1–48 chars of lowercase ASCII alphanumerics and hyphens, no
/// leading/trailing hyphen.
pub fn validate_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug.len() <= 48
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        && !slug.starts_with('-')
        && !slug.ends_with('-')
}

/// Default display name for a freshly created profile: the local part of the
/// sign-up email, or the whole address if it has no `@`.
pub fn default_display_name(email: &str) -> String {
    let local = email.split('@').next().unwrap_or(email);
    if local.is_empty() {
        email.to_owned()
    } else {
        local.to_owned()
    }
}
