//! HTTP client for the hosted identity provider.

use anyhow::anyhow;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::domain::ports::IdentityPort;
use crate::domain::types::{Principal, SessionTokens};
use crate::error::GatewayError;

/// Credential level a provider client is bound to.
///
/// `Anon` is the public key for user-scoped calls honoring row-level
/// authorization. `ServiceRole` bypasses it for administrative calls and must
/// only ever be constructed in server binaries — keeping it out of delivered
/// client artifacts is deployment discipline, not a runtime check.
#[derive(Clone)]
pub enum ApiCredentials {
    Anon(String),
    ServiceRole(String),
}

impl ApiCredentials {
    pub fn key(&self) -> &str {
        match self {
            Self::Anon(k) | Self::ServiceRole(k) => k,
        }
    }
}

impl std::fmt::Debug for ApiCredentials {
    // Never log key material.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Anon(_) => f.write_str("ApiCredentials::Anon(..)"),
            Self::ServiceRole(_) => f.write_str("ApiCredentials::ServiceRole(..)"),
        }
    }
}

/// Provider client bound to a fixed project endpoint and one credential level.
///
/// Pure constructor — no I/O happens until a port method is called.
#[derive(Debug, Clone)]
pub struct HttpIdentityProvider {
    http: reqwest::Client,
    base_url: String,
    credentials: ApiCredentials,
}

impl HttpIdentityProvider {
    pub fn new(http: reqwest::Client, base_url: &str, credentials: ApiCredentials) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_owned(),
            credentials,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Token-grant call shared by the password, refresh, and code flows.
    async fn token_grant(
        &self,
        grant_type: &str,
        body: serde_json::Value,
        denied: fn() -> GatewayError,
    ) -> Result<SessionTokens, GatewayError> {
        let resp = self
            .http
            .post(self.endpoint("/auth/v1/token"))
            .query(&[("grant_type", grant_type)])
            .header("apikey", self.credentials.key())
            .json(&body)
            .send()
            .await
            .map_err(|e| GatewayError::Provider(e.into()))?;

        let resp = check_status(resp, denied)?;
        let token: TokenResponse = resp
            .json()
            .await
            .map_err(|e| GatewayError::Provider(e.into()))?;
        Ok(token.into_tokens())
    }
}

impl IdentityPort for HttpIdentityProvider {
    async fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> Result<SessionTokens, GatewayError> {
        self.token_grant(
            "password",
            json!({ "email": email, "password": password }),
            || GatewayError::InvalidCredentials,
        )
        .await
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        email_redirect_to: &str,
    ) -> Result<(), GatewayError> {
        let resp = self
            .http
            .post(self.endpoint("/auth/v1/signup"))
            .query(&[("redirect_to", email_redirect_to)])
            .header("apikey", self.credentials.key())
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|e| GatewayError::Provider(e.into()))?;

        check_status(resp, || GatewayError::SignupRejected)?;
        Ok(())
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), GatewayError> {
        let resp = self
            .http
            .post(self.endpoint("/auth/v1/logout"))
            .header("apikey", self.credentials.key())
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| GatewayError::Provider(e.into()))?;

        check_status(resp, || GatewayError::SessionExpired)?;
        Ok(())
    }

    async fn get_user(&self, access_token: &str) -> Result<Principal, GatewayError> {
        let resp = self
            .http
            .get(self.endpoint("/auth/v1/user"))
            .header("apikey", self.credentials.key())
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| GatewayError::Provider(e.into()))?;

        let resp = check_status(resp, || GatewayError::SessionExpired)?;
        let user: UserResponse = resp
            .json()
            .await
            .map_err(|e| GatewayError::Provider(e.into()))?;
        Ok(user.into_principal())
    }

    async fn refresh(&self, refresh_token: &str) -> Result<SessionTokens, GatewayError> {
        self.token_grant(
            "refresh_token",
            json!({ "refresh_token": refresh_token }),
            || GatewayError::SessionExpired,
        )
        .await
    }

    async fn exchange_code(&self, code: &str) -> Result<SessionTokens, GatewayError> {
        self.token_grant("pkce", json!({ "auth_code": code }), || {
            GatewayError::InvalidGrant
        })
        .await
    }

    async fn verify_otp(
        &self,
        token_hash: &str,
        otp_type: &str,
    ) -> Result<SessionTokens, GatewayError> {
        let resp = self
            .http
            .post(self.endpoint("/auth/v1/verify"))
            .header("apikey", self.credentials.key())
            .json(&json!({ "token_hash": token_hash, "type": otp_type }))
            .send()
            .await
            .map_err(|e| GatewayError::Provider(e.into()))?;

        let resp = check_status(resp, || GatewayError::InvalidGrant)?;
        let token: TokenResponse = resp
            .json()
            .await
            .map_err(|e| GatewayError::Provider(e.into()))?;
        Ok(token.into_tokens())
    }

    async fn admin_get_user(&self, user_id: Uuid) -> Result<Principal, GatewayError> {
        let resp = self
            .http
            .get(self.endpoint(&format!("/auth/v1/admin/users/{user_id}")))
            .header("apikey", self.credentials.key())
            .bearer_auth(self.credentials.key())
            .send()
            .await
            .map_err(|e| GatewayError::Provider(e.into()))?;

        if resp.status() == StatusCode::NOT_FOUND {
            return Err(GatewayError::UserNotFound);
        }
        let resp = check_status(resp, || GatewayError::SessionExpired)?;
        let user: UserResponse = resp
            .json()
            .await
            .map_err(|e| GatewayError::Provider(e.into()))?;
        Ok(user.into_principal())
    }
}

/// Map provider status codes: 2xx passes, 4xx becomes the caller's denial
/// error, anything else is a provider failure.
fn check_status(
    resp: reqwest::Response,
    denied: fn() -> GatewayError,
) -> Result<reqwest::Response, GatewayError> {
    let status = resp.status();
    if status.is_success() {
        Ok(resp)
    } else if status == StatusCode::BAD_REQUEST
        || status == StatusCode::UNAUTHORIZED
        || status == StatusCode::FORBIDDEN
        || status == StatusCode::UNPROCESSABLE_ENTITY
    {
        Err(denied())
    } else {
        Err(GatewayError::Provider(anyhow!(
            "provider returned {status}"
        )))
    }
}

// ── Wire DTOs ────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    #[serde(default)]
    expires_at: Option<u64>,
    #[serde(default)]
    expires_in: Option<u64>,
}

impl TokenResponse {
    fn into_tokens(self) -> SessionTokens {
        let expires_at = self.expires_at.unwrap_or_else(|| {
            let now = std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0);
            now + self.expires_in.unwrap_or(0)
        });
        SessionTokens {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at,
        }
    }
}

#[derive(Debug, Deserialize)]
struct UserResponse {
    id: Uuid,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    user_metadata: Option<UserMetadata>,
}

#[derive(Debug, Deserialize)]
struct UserMetadata {
    #[serde(default)]
    role: Option<String>,
}

impl UserResponse {
    fn into_principal(self) -> Principal {
        let metadata_role = self
            .user_metadata
            .and_then(|m| m.role)
            .and_then(|r| r.parse().ok());
        Principal {
            id: self.id,
            email: self.email.unwrap_or_default(),
            metadata_role,
        }
    }
}
