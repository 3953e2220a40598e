//! Token and identity fixtures shared by service test suites.

use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

use tavola_auth_types::token::JwtClaims;
use tavola_domain::role::Role;

/// JWT secret every test suite signs with.
pub const TEST_JWT_SECRET: &str = "test-jwt-secret-for-unit-tests-only";

/// A stable principal id for fixtures that need a known user.
pub fn test_user_id() -> Uuid {
    Uuid::parse_str("00000000-0000-0000-0000-000000000001").unwrap()
}

/// Mint an access token the way the provider would.
pub fn mint_access_token(user_id: Uuid, role: Option<Role>, exp: u64, secret: &str) -> String {
    let claims = JwtClaims {
        sub: user_id.to_string(),
        role: role.map(Role::as_u8),
        exp,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("failed to encode test token")
}

/// An expiry comfortably in the future (1 hour).
pub fn future_exp() -> u64 {
    now_secs() + 3600
}

/// An expiry comfortably in the past.
pub fn past_exp() -> u64 {
    1_000_000
}

fn now_secs() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("system clock before UNIX epoch")
        .as_secs()
}
