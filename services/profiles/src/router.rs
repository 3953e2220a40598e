use axum::{
    Router, middleware,
    routing::{get, patch, post},
};
use tower_http::trace::TraceLayer;

use tavola_core::health::{healthz, readyz};
use tavola_core::middleware::request_id_layer;

use crate::handlers::{
    internal::{
        internal_ensure_profile, internal_get_profile, internal_list_restaurants,
        require_service_key,
    },
    order::{list_orders, place_order, update_order_status},
    profile::{get_me, my_restaurants, update_me},
    restaurant::{create_restaurant, get_restaurant},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let internal = Router::new()
        .route(
            "/internal/profiles/{user_id}",
            get(internal_get_profile).put(internal_ensure_profile),
        )
        .route(
            "/internal/profiles/{user_id}/restaurants",
            get(internal_list_restaurants),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_service_key,
        ));

    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Profiles
        .route("/profiles/@me", get(get_me))
        .route("/profiles/@me", patch(update_me))
        .route("/profiles/@me/restaurants", get(my_restaurants))
        // Restaurants
        .route("/restaurants", post(create_restaurant))
        .route("/restaurants/{restaurant_id}", get(get_restaurant))
        // Orders
        .route("/restaurants/{restaurant_id}/orders", post(place_order))
        .route("/restaurants/{restaurant_id}/orders", get(list_orders))
        .route("/orders/{order_id}/status", patch(update_order_status))
        // Internal surface (service key)
        .merge(internal)
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
