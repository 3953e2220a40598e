use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tavola_auth_types::identity::IdentityHeaders;
use tavola_domain::order::OrderStatus;
use tavola_domain::page::PageQuery;
use tavola_domain::role::Role;

use crate::domain::types::Order;
use crate::error::ProfilesServiceError;
use crate::state::AppState;
use crate::usecase::order::{
    ListOrdersUseCase, PlaceOrderInput, PlaceOrderUseCase, Requester, UpdateOrderStatusUseCase,
};

#[derive(Serialize)]
pub struct OrderResponse {
    pub id: Uuid,
    pub restaurant_id: Uuid,
    pub placed_by: Uuid,
    pub status: OrderStatus,
    pub total_cents: i64,
    pub note: Option<String>,
    #[serde(serialize_with = "tavola_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "tavola_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Order> for OrderResponse {
    fn from(o: Order) -> Self {
        Self {
            id: o.id,
            restaurant_id: o.restaurant_id,
            placed_by: o.placed_by,
            status: o.status,
            total_cents: o.total_cents,
            note: o.note,
            created_at: o.created_at,
            updated_at: o.updated_at,
        }
    }
}

// ── POST /restaurants/{restaurant_id}/orders ─────────────────────────────────

#[derive(Deserialize)]
pub struct PlaceOrderRequest {
    pub total_cents: i64,
    pub note: Option<String>,
}

pub async fn place_order(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(restaurant_id): Path<Uuid>,
    Json(body): Json<PlaceOrderRequest>,
) -> Result<(StatusCode, Json<OrderResponse>), ProfilesServiceError> {
    let usecase = PlaceOrderUseCase {
        restaurants: state.restaurant_repo(),
        orders: state.order_repo(),
    };
    let order = usecase
        .execute(PlaceOrderInput {
            restaurant_id,
            placed_by: identity.user_id,
            total_cents: body.total_cents,
            note: body.note,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(order.into())))
}

// ── GET /restaurants/{restaurant_id}/orders ──────────────────────────────────

pub async fn list_orders(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(restaurant_id): Path<Uuid>,
    Query(page): Query<PageQuery>,
) -> Result<Json<Vec<OrderResponse>>, ProfilesServiceError> {
    if !identity.role.satisfies(Role::RestaurantStaff) {
        return Err(ProfilesServiceError::Forbidden);
    }
    let usecase = ListOrdersUseCase {
        restaurants: state.restaurant_repo(),
        orders: state.order_repo(),
    };
    let orders = usecase
        .execute(
            restaurant_id,
            Requester {
                user_id: identity.user_id,
                role: identity.role,
            },
            page,
        )
        .await?;
    Ok(Json(orders.into_iter().map(Into::into).collect()))
}

// ── PATCH /orders/{order_id}/status ──────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateOrderStatusRequest {
    pub status: OrderStatus,
}

pub async fn update_order_status(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
    Json(body): Json<UpdateOrderStatusRequest>,
) -> Result<StatusCode, ProfilesServiceError> {
    if !identity.role.satisfies(Role::RestaurantStaff) {
        return Err(ProfilesServiceError::Forbidden);
    }
    let usecase = UpdateOrderStatusUseCase {
        restaurants: state.restaurant_repo(),
        orders: state.order_repo(),
    };
    usecase
        .execute(
            order_id,
            body.status,
            Requester {
                user_id: identity.user_id,
                role: identity.role,
            },
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
