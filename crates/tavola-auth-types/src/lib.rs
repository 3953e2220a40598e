//! Auth types shared across Tavola services.
//!
//! Provides the session-cookie builders, access-token claims parsing, and the
//! `IdentityHeaders` extractor for gateway-injected identity.

pub mod cookie;
pub mod identity;
pub mod token;
