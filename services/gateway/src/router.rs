use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use tavola_core::health::{healthz, readyz};
use tavola_core::middleware::request_id_layer;

use crate::guard::middleware::route_guard;
use crate::handlers::{
    admin::{admin_get_user, admin_home},
    auth::{callback, confirm, login, logout, register, session},
    me::{get_me, my_restaurants},
    pages::{dashboard, dashboard_settings, home, login_page, unauthorized_page},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Public pages
        .route("/", get(home))
        .route("/login", get(login_page))
        .route("/unauthorized", get(unauthorized_page))
        // Auth flow
        .route("/auth/login", post(login))
        .route("/auth/register", post(register))
        .route("/auth/logout", post(logout))
        .route("/auth/callback", get(callback))
        .route("/auth/confirm", get(confirm))
        .route("/auth/session", get(session))
        // Signed-in surface
        .route("/me", get(get_me))
        .route("/me/restaurants", get(my_restaurants))
        .route("/dashboard", get(dashboard))
        .route("/dashboard/settings", get(dashboard_settings))
        // Platform administration
        .route("/admin", get(admin_home))
        .route("/admin/users/{user_id}", get(admin_get_user))
        // The guard wraps everything above, including unmatched paths.
        .layer(middleware::from_fn_with_state(state.clone(), route_guard))
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
