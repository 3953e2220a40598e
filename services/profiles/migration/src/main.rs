use sea_orm_migration::prelude::*;

mod m20260401_000001_create_profiles;
mod m20260401_000002_create_restaurants;
mod m20260401_000003_create_restaurant_members;
mod m20260401_000004_create_orders;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260401_000001_create_profiles::Migration),
            Box::new(m20260401_000002_create_restaurants::Migration),
            Box::new(m20260401_000003_create_restaurant_members::Migration),
            Box::new(m20260401_000004_create_orders::Migration),
        ]
    }
}

#[tokio::main]
async fn main() {
    cli::run_cli(Migrator).await;
}
