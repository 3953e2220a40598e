use axum::{Extension, Json, extract::{Path, State}};
use serde::Serialize;
use uuid::Uuid;

use tavola_domain::role::Role;

use crate::domain::ports::IdentityPort;
use crate::domain::types::CurrentUser;
use crate::error::GatewayError;
use crate::state::AppState;

// ── GET /admin ───────────────────────────────────────────────────────────────

pub async fn admin_home(Extension(user): Extension<CurrentUser>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "area": "admin",
        "user_id": user.id,
    }))
}

// ── GET /admin/users/{user_id} ───────────────────────────────────────────────

#[derive(Serialize)]
pub struct AdminUserResponse {
    pub id: Uuid,
    pub email: String,
    pub metadata_role: Option<Role>,
}

/// Principal lookup through the service-role client — the one call path that
/// bypasses user scoping. The route table already requires a platform admin.
pub async fn admin_get_user(
    Extension(_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<AdminUserResponse>, GatewayError> {
    let principal = state.admin_identity.admin_get_user(user_id).await?;
    Ok(Json(AdminUserResponse {
        id: principal.id,
        email: principal.email,
        metadata_role: principal.metadata_role,
    }))
}
