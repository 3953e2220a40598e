//! Access-token claims parsing.
//!
//! The identity provider issues and signs the tokens; we decode them only to
//! classify a token as expired before deciding to refresh. Identity itself is
//! never trusted from a local decode — the resolver's provider round trip is
//! authoritative.

use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tavola_domain::role::Role;

/// Identity carried by a decoded access token.
#[derive(Debug, Clone)]
pub struct TokenInfo {
    pub user_id: Uuid,
    pub role: Option<Role>,
    pub expires_at: u64,
}

/// Errors returned by [`validate_access_token`].
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("invalid signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("malformed token")]
    Malformed,
}

/// JWT claims payload as issued by the identity provider.
///
/// `role` is the provider's ad-hoc metadata role as `u8` wire value; it may be
/// absent on principals that predate role assignment.
#[derive(Debug, Serialize, Deserialize)]
pub struct JwtClaims {
    /// User ID (UUID string).
    pub sub: String,
    /// Role as `u8` wire value, if assigned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<u8>,
    /// Expiration timestamp (seconds since UNIX epoch).
    pub exp: u64,
}

/// Decode and validate an access-token cookie value, returning parsed identity.
///
/// Validation: HS256, exp checked, required claims `exp` + `sub`.
/// Default leeway = 60s tolerates clock skew against the provider.
pub fn validate_access_token(cookie_value: &str, secret: &str) -> Result<TokenInfo, TokenError> {
    let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.validate_exp = true;
    validation.required_spec_claims.clear();
    validation.set_required_spec_claims(&["exp", "sub"]);

    let data = decode::<JwtClaims>(
        cookie_value,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidSignature
        | jsonwebtoken::errors::ErrorKind::InvalidEcdsaKey
        | jsonwebtoken::errors::ErrorKind::InvalidRsaKey(_) => TokenError::InvalidSignature,
        _ => TokenError::Malformed,
    })?;

    let user_id = data
        .claims
        .sub
        .parse::<Uuid>()
        .map_err(|_| TokenError::Malformed)?;

    Ok(TokenInfo {
        user_id,
        role: data.claims.role.and_then(Role::from_u8),
        expires_at: data.claims.exp,
    })
}
