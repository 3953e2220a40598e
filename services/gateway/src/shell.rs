//! Auth-state feed: publish/subscribe for the resolved identity.
//!
//! Subscribers get state changes without polling and unsubscribe by dropping
//! the receiver; a publisher outliving its subscribers (or the reverse) is
//! fine in either order.

use std::sync::Arc;

use tokio::sync::watch;
use uuid::Uuid;

use tavola_domain::role::Role;

/// The currently resolved identity, as seen by subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    SignedOut,
    SignedIn { user_id: Uuid, role: Option<Role> },
}

#[derive(Clone)]
pub struct AuthStateFeed {
    tx: Arc<watch::Sender<AuthState>>,
}

impl AuthStateFeed {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(AuthState::SignedOut);
        Self { tx: Arc::new(tx) }
    }

    /// Subscribe to state changes. Dropping the receiver unsubscribes.
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.tx.subscribe()
    }

    /// Publish a state. Subscribers are only woken when the state actually
    /// changed.
    pub fn publish(&self, state: AuthState) {
        self.tx.send_if_modified(|current| {
            if *current == state {
                false
            } else {
                *current = state;
                true
            }
        });
    }

    pub fn signed_in(&self, user_id: Uuid, role: Option<Role>) {
        self.publish(AuthState::SignedIn { user_id, role });
    }

    pub fn signed_out(&self) {
        self.publish(AuthState::SignedOut);
    }

    pub fn current(&self) -> AuthState {
        self.tx.borrow().clone()
    }
}

impl Default for AuthStateFeed {
    fn default() -> Self {
        Self::new()
    }
}

/// Gate that passes only states whose role satisfies `required`.
///
/// A signed-out state or a missing role never passes — consumers treat an
/// unresolved role as "no access".
#[derive(Debug, Clone, Copy)]
pub struct RoleGate {
    pub required: Role,
}

impl RoleGate {
    pub fn allows(&self, state: &AuthState) -> bool {
        match state {
            AuthState::SignedIn {
                role: Some(role), ..
            } => role.satisfies(self.required),
            _ => false,
        }
    }
}
