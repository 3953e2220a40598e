use chrono::Utc;
use uuid::Uuid;

use tavola_domain::order::OrderStatus;
use tavola_domain::page::PageQuery;
use tavola_domain::role::Role;

use crate::domain::repository::{OrderRepository, RestaurantRepository};
use crate::domain::types::Order;
use crate::error::ProfilesServiceError;

/// Longest accepted order note.
const MAX_NOTE_LEN: usize = 256;

/// Who is asking. Platform admins may act on any restaurant; everyone else
/// must hold a membership there.
#[derive(Debug, Clone, Copy)]
pub struct Requester {
    pub user_id: Uuid,
    pub role: Role,
}

async fn authorize_member<R: RestaurantRepository>(
    restaurants: &R,
    restaurant_id: Uuid,
    requester: Requester,
) -> Result<(), ProfilesServiceError> {
    if requester.role.satisfies(Role::PlatformAdmin) {
        return Ok(());
    }
    restaurants
        .member_role(restaurant_id, requester.user_id)
        .await?
        .map(|_| ())
        .ok_or(ProfilesServiceError::NotAMember)
}

// ── PlaceOrder ───────────────────────────────────────────────────────────────

pub struct PlaceOrderInput {
    pub restaurant_id: Uuid,
    pub placed_by: Uuid,
    pub total_cents: i64,
    pub note: Option<String>,
}

pub struct PlaceOrderUseCase<R: RestaurantRepository, O: OrderRepository> {
    pub restaurants: R,
    pub orders: O,
}

impl<R: RestaurantRepository, O: OrderRepository> PlaceOrderUseCase<R, O> {
    pub async fn execute(&self, input: PlaceOrderInput) -> Result<Order, ProfilesServiceError> {
        if input.total_cents <= 0 {
            return Err(ProfilesServiceError::InvalidOrder);
        }
        if input.note.as_deref().is_some_and(|n| n.len() > MAX_NOTE_LEN) {
            return Err(ProfilesServiceError::InvalidOrder);
        }
        self.restaurants
            .find_by_id(input.restaurant_id)
            .await?
            .ok_or(ProfilesServiceError::RestaurantNotFound)?;

        let now = Utc::now();
        let order = Order {
            id: Uuid::now_v7(),
            restaurant_id: input.restaurant_id,
            placed_by: input.placed_by,
            status: OrderStatus::Received,
            total_cents: input.total_cents,
            note: input.note,
            created_at: now,
            updated_at: now,
        };
        self.orders.create(&order).await?;
        Ok(order)
    }
}

// ── ListOrders ───────────────────────────────────────────────────────────────

pub struct ListOrdersUseCase<R: RestaurantRepository, O: OrderRepository> {
    pub restaurants: R,
    pub orders: O,
}

impl<R: RestaurantRepository, O: OrderRepository> ListOrdersUseCase<R, O> {
    pub async fn execute(
        &self,
        restaurant_id: Uuid,
        requester: Requester,
        page: PageQuery,
    ) -> Result<Vec<Order>, ProfilesServiceError> {
        self.restaurants
            .find_by_id(restaurant_id)
            .await?
            .ok_or(ProfilesServiceError::RestaurantNotFound)?;
        authorize_member(&self.restaurants, restaurant_id, requester).await?;
        self.orders.list_for_restaurant(restaurant_id, page).await
    }
}

// ── UpdateOrderStatus ────────────────────────────────────────────────────────

pub struct UpdateOrderStatusUseCase<R: RestaurantRepository, O: OrderRepository> {
    pub restaurants: R,
    pub orders: O,
}

impl<R: RestaurantRepository, O: OrderRepository> UpdateOrderStatusUseCase<R, O> {
    pub async fn execute(
        &self,
        order_id: Uuid,
        next: OrderStatus,
        requester: Requester,
    ) -> Result<(), ProfilesServiceError> {
        let order = self
            .orders
            .find_by_id(order_id)
            .await?
            .ok_or(ProfilesServiceError::OrderNotFound)?;

        authorize_member(&self.restaurants, order.restaurant_id, requester).await?;

        if !order.status.can_transition_to(next) {
            return Err(ProfilesServiceError::InvalidStatusChange);
        }
        self.orders.update_status(order_id, next).await
    }
}
