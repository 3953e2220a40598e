use std::sync::{Arc, Mutex};

use chrono::Utc;
use uuid::Uuid;

use tavola_domain::order::OrderStatus;
use tavola_domain::page::PageQuery;
use tavola_domain::role::Role;
use tavola_profiles::domain::repository::{
    OrderRepository, ProfileRepository, RestaurantRepository,
};
use tavola_profiles::domain::types::{Membership, Order, Profile, Restaurant};
use tavola_profiles::error::ProfilesServiceError;

// ── MockProfileRepo ──────────────────────────────────────────────────────────

pub struct MockProfileRepo {
    pub profiles: Arc<Mutex<Vec<Profile>>>,
}

impl MockProfileRepo {
    pub fn new(profiles: Vec<Profile>) -> Self {
        Self {
            profiles: Arc::new(Mutex::new(profiles)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }
}

impl ProfileRepository for MockProfileRepo {
    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<Profile>, ProfilesServiceError> {
        Ok(self
            .profiles
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.user_id == user_id)
            .cloned())
    }

    async fn create(&self, profile: &Profile) -> Result<(), ProfilesServiceError> {
        let mut profiles = self.profiles.lock().unwrap();
        if !profiles.iter().any(|p| p.user_id == profile.user_id) {
            profiles.push(profile.clone());
        }
        Ok(())
    }

    async fn update(
        &self,
        user_id: Uuid,
        display_name: Option<&str>,
        home_restaurant_id: Option<Uuid>,
    ) -> Result<(), ProfilesServiceError> {
        let mut profiles = self.profiles.lock().unwrap();
        if let Some(profile) = profiles.iter_mut().find(|p| p.user_id == user_id) {
            if let Some(name) = display_name {
                profile.display_name = name.to_owned();
            }
            if let Some(restaurant_id) = home_restaurant_id {
                profile.home_restaurant_id = Some(restaurant_id);
            }
            profile.updated_at = Utc::now();
        }
        Ok(())
    }
}

// ── MockRestaurantRepo ───────────────────────────────────────────────────────

pub struct MockRestaurantRepo {
    pub restaurants: Arc<Mutex<Vec<Restaurant>>>,
    pub memberships: Arc<Mutex<Vec<Membership>>>,
}

impl MockRestaurantRepo {
    pub fn new(restaurants: Vec<Restaurant>, memberships: Vec<Membership>) -> Self {
        Self {
            restaurants: Arc::new(Mutex::new(restaurants)),
            memberships: Arc::new(Mutex::new(memberships)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![], vec![])
    }
}

impl RestaurantRepository for MockRestaurantRepo {
    async fn create_with_owner(
        &self,
        restaurant: &Restaurant,
        owner: &Membership,
    ) -> Result<(), ProfilesServiceError> {
        let mut restaurants = self.restaurants.lock().unwrap();
        if restaurants
            .iter()
            .any(|r| r.name == restaurant.name || r.slug == restaurant.slug)
        {
            return Err(ProfilesServiceError::RestaurantExists);
        }
        restaurants.push(restaurant.clone());
        self.memberships.lock().unwrap().push(owner.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Restaurant>, ProfilesServiceError> {
        Ok(self
            .restaurants
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }

    async fn list_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<(Restaurant, Role)>, ProfilesServiceError> {
        let restaurants = self.restaurants.lock().unwrap();
        Ok(self
            .memberships
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.user_id == user_id)
            .filter_map(|m| {
                restaurants
                    .iter()
                    .find(|r| r.id == m.restaurant_id)
                    .map(|r| (r.clone(), m.member_role))
            })
            .collect())
    }

    async fn member_role(
        &self,
        restaurant_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Role>, ProfilesServiceError> {
        Ok(self
            .memberships
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.restaurant_id == restaurant_id && m.user_id == user_id)
            .map(|m| m.member_role))
    }
}

// ── MockOrderRepo ────────────────────────────────────────────────────────────

pub struct MockOrderRepo {
    pub orders: Arc<Mutex<Vec<Order>>>,
}

impl MockOrderRepo {
    pub fn new(orders: Vec<Order>) -> Self {
        Self {
            orders: Arc::new(Mutex::new(orders)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    /// Shared handle for post-execution inspection.
    pub fn orders_handle(&self) -> Arc<Mutex<Vec<Order>>> {
        Arc::clone(&self.orders)
    }
}

impl OrderRepository for MockOrderRepo {
    async fn create(&self, order: &Order) -> Result<(), ProfilesServiceError> {
        self.orders.lock().unwrap().push(order.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, ProfilesServiceError> {
        Ok(self
            .orders
            .lock()
            .unwrap()
            .iter()
            .find(|o| o.id == id)
            .cloned())
    }

    async fn list_for_restaurant(
        &self,
        restaurant_id: Uuid,
        page: PageQuery,
    ) -> Result<Vec<Order>, ProfilesServiceError> {
        let page = page.clamped();
        let mut orders: Vec<Order> = self
            .orders
            .lock()
            .unwrap()
            .iter()
            .filter(|o| o.restaurant_id == restaurant_id)
            .cloned()
            .collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.per_page as usize)
            .collect())
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: OrderStatus,
    ) -> Result<(), ProfilesServiceError> {
        let mut orders = self.orders.lock().unwrap();
        if let Some(order) = orders.iter_mut().find(|o| o.id == id) {
            order.status = status;
            order.updated_at = Utc::now();
        }
        Ok(())
    }
}

// ── Fixtures ─────────────────────────────────────────────────────────────────

pub fn test_profile(user_id: Uuid, role: Role) -> Profile {
    let now = Utc::now();
    Profile {
        user_id,
        display_name: "pat".to_owned(),
        role,
        home_restaurant_id: None,
        created_at: now,
        updated_at: now,
    }
}

pub fn test_restaurant() -> Restaurant {
    Restaurant {
        id: Uuid::now_v7(),
        name: "Trattoria da Pat".to_owned(),
        slug: "trattoria-da-pat".to_owned(),
        created_at: Utc::now(),
    }
}

pub fn test_membership(restaurant_id: Uuid, user_id: Uuid, role: Role) -> Membership {
    Membership {
        restaurant_id,
        user_id,
        member_role: role,
        created_at: Utc::now(),
    }
}

pub fn test_order(restaurant_id: Uuid, placed_by: Uuid, status: OrderStatus) -> Order {
    let now = Utc::now();
    Order {
        id: Uuid::now_v7(),
        restaurant_id,
        placed_by,
        status,
        total_cents: 2450,
        note: None,
        created_at: now,
        updated_at: now,
    }
}
