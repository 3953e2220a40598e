use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Profiles service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum ProfilesServiceError {
    #[error("profile not found")]
    ProfileNotFound,
    #[error("restaurant not found")]
    RestaurantNotFound,
    #[error("order not found")]
    OrderNotFound,
    #[error("restaurant already exists")]
    RestaurantExists,
    #[error("not a member of this restaurant")]
    NotAMember,
    #[error("invalid status change")]
    InvalidStatusChange,
    #[error("invalid display name")]
    InvalidDisplayName,
    #[error("invalid slug")]
    InvalidSlug,
    #[error("invalid order")]
    InvalidOrder,
    #[error("missing data")]
    MissingData,
    #[error("forbidden")]
    Forbidden,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl ProfilesServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ProfileNotFound => "PROFILE_NOT_FOUND",
            Self::RestaurantNotFound => "RESTAURANT_NOT_FOUND",
            Self::OrderNotFound => "ORDER_NOT_FOUND",
            Self::RestaurantExists => "RESTAURANT_EXISTS",
            Self::NotAMember => "NOT_A_MEMBER",
            Self::InvalidStatusChange => "INVALID_STATUS_CHANGE",
            Self::InvalidDisplayName => "INVALID_DISPLAY_NAME",
            Self::InvalidSlug => "INVALID_SLUG",
            Self::InvalidOrder => "INVALID_ORDER",
            Self::MissingData => "MISSING_DATA",
            Self::Forbidden => "FORBIDDEN",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for ProfilesServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::ProfileNotFound | Self::RestaurantNotFound | Self::OrderNotFound => {
                StatusCode::NOT_FOUND
            }
            Self::RestaurantExists | Self::InvalidStatusChange => StatusCode::CONFLICT,
            Self::InvalidDisplayName
            | Self::InvalidSlug
            | Self::InvalidOrder
            | Self::MissingData => StatusCode::BAD_REQUEST,
            Self::NotAMember | Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Log 500s only — tower-http TraceLayer already records method/uri/status for all
        // requests. 4xx are expected client errors; logging them here would be noise.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
