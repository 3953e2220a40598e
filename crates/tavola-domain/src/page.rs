//! List pagination parameters.

use serde::{Deserialize, Serialize};

/// Pagination for list endpoints: `per_page` 1–50 (default 20), `page` ≥ 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageQuery {
    #[serde(default = "default_per_page")]
    pub per_page: u32,
    #[serde(default = "default_page")]
    pub page: u32,
}

fn default_per_page() -> u32 {
    20
}

fn default_page() -> u32 {
    1
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            per_page: default_per_page(),
            page: default_page(),
        }
    }
}

impl PageQuery {
    /// Normalize to the valid range. Call after deserializing query params.
    pub fn clamped(self) -> Self {
        Self {
            per_page: self.per_page.clamp(1, 50),
            page: self.page.max(1),
        }
    }

    /// Row offset for the current page.
    pub fn offset(self) -> u64 {
        let p = self.clamped();
        u64::from(p.per_page) * u64::from(p.page - 1)
    }
}
