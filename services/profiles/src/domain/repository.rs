#![allow(async_fn_in_trait)]

use uuid::Uuid;

use tavola_domain::order::OrderStatus;
use tavola_domain::page::PageQuery;
use tavola_domain::role::Role;

use crate::domain::types::{Membership, Order, Profile, Restaurant};
use crate::error::ProfilesServiceError;

/// Repository for profile rows.
pub trait ProfileRepository: Send + Sync {
    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<Profile>, ProfilesServiceError>;

    /// Insert a profile. Inserting an existing `user_id` is a no-op.
    async fn create(&self, profile: &Profile) -> Result<(), ProfilesServiceError>;

    async fn update(
        &self,
        user_id: Uuid,
        display_name: Option<&str>,
        home_restaurant_id: Option<Uuid>,
    ) -> Result<(), ProfilesServiceError>;
}

/// Repository for restaurants and memberships.
pub trait RestaurantRepository: Send + Sync {
    /// Insert a restaurant and its owning membership atomically (same
    /// transaction).
    async fn create_with_owner(
        &self,
        restaurant: &Restaurant,
        owner: &Membership,
    ) -> Result<(), ProfilesServiceError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Restaurant>, ProfilesServiceError>;

    /// Membership join: every restaurant the user belongs to, with the member
    /// role.
    async fn list_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<(Restaurant, Role)>, ProfilesServiceError>;

    /// The user's member role at a restaurant, if any.
    async fn member_role(
        &self,
        restaurant_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Role>, ProfilesServiceError>;
}

/// Repository for orders.
pub trait OrderRepository: Send + Sync {
    async fn create(&self, order: &Order) -> Result<(), ProfilesServiceError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, ProfilesServiceError>;

    /// Orders for a restaurant, newest first.
    async fn list_for_restaurant(
        &self,
        restaurant_id: Uuid,
        page: PageQuery,
    ) -> Result<Vec<Order>, ProfilesServiceError>;

    async fn update_status(
        &self,
        id: Uuid,
        status: OrderStatus,
    ) -> Result<(), ProfilesServiceError>;
}
