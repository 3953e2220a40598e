//! Role hierarchy used for every authorization comparison.

use serde::{Deserialize, Serialize};

/// Permission level of a profile.
///
/// Wire format: `u8` (0 = Customer .. 4 = PlatformAdmin). The order is a
/// total order: a higher role satisfies every requirement a lower one does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Customer = 0,
    Courier = 1,
    RestaurantStaff = 2,
    RestaurantAdmin = 3,
    PlatformAdmin = 4,
}

impl Role {
    /// Convert from `u8` wire value. Returns `None` for unknown values.
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Self::Customer),
            1 => Some(Self::Courier),
            2 => Some(Self::RestaurantStaff),
            3 => Some(Self::RestaurantAdmin),
            4 => Some(Self::PlatformAdmin),
            _ => None,
        }
    }

    /// Convert to `u8` wire value.
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Whether this role meets `required`. All role checks go through here;
    /// roles are never compared as strings.
    pub fn satisfies(self, required: Role) -> bool {
        self >= required
    }
}

impl std::str::FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(Self::Customer),
            "courier" => Ok(Self::Courier),
            "restaurant_staff" => Ok(Self::RestaurantStaff),
            "restaurant_admin" => Ok(Self::RestaurantAdmin),
            "platform_admin" => Ok(Self::PlatformAdmin),
            _ => Err(UnknownRole),
        }
    }
}

/// Returned when a role string does not name a known role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unknown role")]
pub struct UnknownRole;

impl PartialOrd for Role {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Role {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.as_u8().cmp(&other.as_u8())
    }
}
