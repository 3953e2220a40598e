use sea_orm::DatabaseConnection;

use crate::infra::db::{DbOrderRepository, DbProfileRepository, DbRestaurantRepository};

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub service_key: String,
}

impl AppState {
    pub fn profile_repo(&self) -> DbProfileRepository {
        DbProfileRepository {
            db: self.db.clone(),
        }
    }

    pub fn restaurant_repo(&self) -> DbRestaurantRepository {
        DbRestaurantRepository {
            db: self.db.clone(),
        }
    }

    pub fn order_repo(&self) -> DbOrderRepository {
        DbOrderRepository {
            db: self.db.clone(),
        }
    }
}
