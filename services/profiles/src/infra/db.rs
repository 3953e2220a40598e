use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, QueryFilter, QueryOrder, QuerySelect, SqlErr, TransactionTrait,
    sea_query::OnConflict,
};
use uuid::Uuid;

use tavola_domain::order::OrderStatus;
use tavola_domain::page::PageQuery;
use tavola_domain::role::Role;
use tavola_profiles_schema::{orders, profiles, restaurant_members, restaurants};

use crate::domain::repository::{OrderRepository, ProfileRepository, RestaurantRepository};
use crate::domain::types::{Membership, Order, Profile, Restaurant};
use crate::error::ProfilesServiceError;

fn role_from_wire(value: i16) -> Result<Role, ProfilesServiceError> {
    u8::try_from(value)
        .ok()
        .and_then(Role::from_u8)
        .ok_or_else(|| {
            ProfilesServiceError::Internal(anyhow::anyhow!("unknown role wire value {value}"))
        })
}

fn status_from_wire(value: i16) -> Result<OrderStatus, ProfilesServiceError> {
    u8::try_from(value)
        .ok()
        .and_then(OrderStatus::from_u8)
        .ok_or_else(|| {
            ProfilesServiceError::Internal(anyhow::anyhow!("unknown status wire value {value}"))
        })
}

// ── Profile repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbProfileRepository {
    pub db: DatabaseConnection,
}

impl ProfileRepository for DbProfileRepository {
    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<Profile>, ProfilesServiceError> {
        let model = profiles::Entity::find_by_id(user_id)
            .one(&self.db)
            .await
            .context("find profile by id")?;
        model.map(profile_from_model).transpose()
    }

    async fn create(&self, profile: &Profile) -> Result<(), ProfilesServiceError> {
        let model = profiles::ActiveModel {
            user_id: Set(profile.user_id),
            display_name: Set(profile.display_name.clone()),
            role: Set(i16::from(profile.role.as_u8())),
            home_restaurant_id: Set(profile.home_restaurant_id),
            created_at: Set(profile.created_at),
            updated_at: Set(profile.updated_at),
        };
        // Concurrent first sign-ins race on the same principal id; losing the
        // race is fine, the row already exists.
        profiles::Entity::insert(model)
            .on_conflict(
                OnConflict::column(profiles::Column::UserId)
                    .do_nothing()
                    .to_owned(),
            )
            .do_nothing()
            .exec(&self.db)
            .await
            .context("create profile")?;
        Ok(())
    }

    async fn update(
        &self,
        user_id: Uuid,
        display_name: Option<&str>,
        home_restaurant_id: Option<Uuid>,
    ) -> Result<(), ProfilesServiceError> {
        let mut am = profiles::ActiveModel {
            user_id: Set(user_id),
            ..Default::default()
        };
        if let Some(name) = display_name {
            am.display_name = Set(name.to_owned());
        }
        if let Some(restaurant_id) = home_restaurant_id {
            am.home_restaurant_id = Set(Some(restaurant_id));
        }
        am.updated_at = Set(Utc::now());
        am.update(&self.db).await.context("update profile")?;
        Ok(())
    }
}

fn profile_from_model(model: profiles::Model) -> Result<Profile, ProfilesServiceError> {
    Ok(Profile {
        user_id: model.user_id,
        display_name: model.display_name,
        role: role_from_wire(model.role)?,
        home_restaurant_id: model.home_restaurant_id,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

// ── Restaurant repository ────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbRestaurantRepository {
    pub db: DatabaseConnection,
}

impl RestaurantRepository for DbRestaurantRepository {
    async fn create_with_owner(
        &self,
        restaurant: &Restaurant,
        owner: &Membership,
    ) -> Result<(), ProfilesServiceError> {
        let result = self
            .db
            .transaction::<_, (), sea_orm::DbErr>(|txn| {
                let restaurant = restaurant.clone();
                let owner = owner.clone();
                Box::pin(async move {
                    insert_restaurant(txn, &restaurant).await?;
                    insert_membership(txn, &owner).await?;
                    Ok(())
                })
            })
            .await;

        match result {
            Ok(()) => Ok(()),
            Err(sea_orm::TransactionError::Transaction(e))
                if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) =>
            {
                Err(ProfilesServiceError::RestaurantExists)
            }
            Err(e) => Err(anyhow::Error::new(e)
                .context("create restaurant with owner")
                .into()),
        }
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Restaurant>, ProfilesServiceError> {
        let model = restaurants::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find restaurant by id")?;
        Ok(model.map(restaurant_from_model))
    }

    async fn list_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<(Restaurant, Role)>, ProfilesServiceError> {
        let rows = restaurant_members::Entity::find()
            .filter(restaurant_members::Column::UserId.eq(user_id))
            .find_also_related(restaurants::Entity)
            .all(&self.db)
            .await
            .context("list restaurants for user")?;

        rows.into_iter()
            .filter_map(|(member, restaurant)| restaurant.map(|r| (member, r)))
            .map(|(member, restaurant)| {
                Ok((
                    restaurant_from_model(restaurant),
                    role_from_wire(member.member_role)?,
                ))
            })
            .collect()
    }

    async fn member_role(
        &self,
        restaurant_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Role>, ProfilesServiceError> {
        let model = restaurant_members::Entity::find_by_id((restaurant_id, user_id))
            .one(&self.db)
            .await
            .context("find membership")?;
        model.map(|m| role_from_wire(m.member_role)).transpose()
    }
}

async fn insert_restaurant(
    txn: &DatabaseTransaction,
    restaurant: &Restaurant,
) -> Result<(), sea_orm::DbErr> {
    restaurants::ActiveModel {
        id: Set(restaurant.id),
        name: Set(restaurant.name.clone()),
        slug: Set(restaurant.slug.clone()),
        created_at: Set(restaurant.created_at),
    }
    .insert(txn)
    .await?;
    Ok(())
}

async fn insert_membership(
    txn: &DatabaseTransaction,
    membership: &Membership,
) -> Result<(), sea_orm::DbErr> {
    restaurant_members::ActiveModel {
        restaurant_id: Set(membership.restaurant_id),
        user_id: Set(membership.user_id),
        member_role: Set(i16::from(membership.member_role.as_u8())),
        created_at: Set(membership.created_at),
    }
    .insert(txn)
    .await?;
    Ok(())
}

fn restaurant_from_model(model: restaurants::Model) -> Restaurant {
    Restaurant {
        id: model.id,
        name: model.name,
        slug: model.slug,
        created_at: model.created_at,
    }
}

// ── Order repository ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbOrderRepository {
    pub db: DatabaseConnection,
}

impl OrderRepository for DbOrderRepository {
    async fn create(&self, order: &Order) -> Result<(), ProfilesServiceError> {
        orders::ActiveModel {
            id: Set(order.id),
            restaurant_id: Set(order.restaurant_id),
            placed_by: Set(order.placed_by),
            status: Set(i16::from(order.status.as_u8())),
            total_cents: Set(order.total_cents),
            note: Set(order.note.clone()),
            created_at: Set(order.created_at),
            updated_at: Set(order.updated_at),
        }
        .insert(&self.db)
        .await
        .context("create order")?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, ProfilesServiceError> {
        let model = orders::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find order by id")?;
        model.map(order_from_model).transpose()
    }

    async fn list_for_restaurant(
        &self,
        restaurant_id: Uuid,
        page: PageQuery,
    ) -> Result<Vec<Order>, ProfilesServiceError> {
        let page = page.clamped();
        let models = orders::Entity::find()
            .filter(orders::Column::RestaurantId.eq(restaurant_id))
            .order_by_desc(orders::Column::CreatedAt)
            .limit(u64::from(page.per_page))
            .offset(page.offset())
            .all(&self.db)
            .await
            .context("list orders for restaurant")?;
        models.into_iter().map(order_from_model).collect()
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: OrderStatus,
    ) -> Result<(), ProfilesServiceError> {
        orders::ActiveModel {
            id: Set(id),
            status: Set(i16::from(status.as_u8())),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("update order status")?;
        Ok(())
    }
}

fn order_from_model(model: orders::Model) -> Result<Order, ProfilesServiceError> {
    Ok(Order {
        id: model.id,
        restaurant_id: model.restaurant_id,
        placed_by: model.placed_by,
        status: status_from_wire(model.status)?,
        total_cents: model.total_cents,
        note: model.note,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}
