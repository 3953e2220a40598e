use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Gateway error variants.
///
/// Provider failures never cross a handler boundary as raw errors: they are
/// mapped here and serialized as a generic `{kind, message}` body.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("session expired")]
    SessionExpired,
    #[error("sign-in link is invalid or expired")]
    InvalidGrant,
    #[error("sign-up rejected")]
    SignupRejected,
    #[error("invalid redirect target")]
    InvalidRedirect,
    #[error("user not found")]
    UserNotFound,
    #[error("profile not found")]
    ProfileNotFound,
    #[error("identity provider unavailable")]
    Provider(#[source] anyhow::Error),
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl GatewayError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::SessionExpired => "SESSION_EXPIRED",
            Self::InvalidGrant => "INVALID_GRANT",
            Self::SignupRejected => "SIGNUP_REJECTED",
            Self::InvalidRedirect => "INVALID_REDIRECT",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::ProfileNotFound => "PROFILE_NOT_FOUND",
            Self::Provider(_) => "PROVIDER_UNAVAILABLE",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::InvalidCredentials | Self::SessionExpired | Self::InvalidGrant => {
                StatusCode::UNAUTHORIZED
            }
            Self::SignupRejected => StatusCode::UNPROCESSABLE_ENTITY,
            Self::InvalidRedirect => StatusCode::BAD_REQUEST,
            Self::UserNotFound | Self::ProfileNotFound => StatusCode::NOT_FOUND,
            Self::Provider(_) => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Log 5xx only — tower-http TraceLayer already records method/uri/status for all
        // requests. 4xx are expected client errors; logging them here would be noise.
        match &self {
            Self::Provider(e) => {
                tracing::error!(error = %e, kind = "PROVIDER_UNAVAILABLE", "provider error");
            }
            Self::Internal(e) => {
                tracing::error!(error = %e, kind = "INTERNAL", "internal error");
            }
            _ => {}
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
