//! Order lifecycle types for the POS flow.

use serde::{Deserialize, Serialize};

/// Lifecycle state of an order.
///
/// Wire format: `u8`. Forward transitions only:
/// `Received → Preparing → Ready → Completed`. `Cancelled` is reachable
/// from `Received` and `Preparing`; `Completed` and `Cancelled` are final.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Received = 0,
    Preparing = 1,
    Ready = 2,
    Completed = 3,
    Cancelled = 4,
}

impl OrderStatus {
    /// Convert from `u8` wire value. Returns `None` for unknown values.
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Self::Received),
            1 => Some(Self::Preparing),
            2 => Some(Self::Ready),
            3 => Some(Self::Completed),
            4 => Some(Self::Cancelled),
            _ => None,
        }
    }

    /// Convert to `u8` wire value.
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Whether an order in this state may move to `next`.
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, next),
            (Received, Preparing)
                | (Preparing, Ready)
                | (Ready, Completed)
                | (Received, Cancelled)
                | (Preparing, Cancelled)
        )
    }

    /// Final states accept no further transitions.
    pub fn is_final(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}
