use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RestaurantMembers::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(RestaurantMembers::RestaurantId).uuid().not_null())
                    .col(ColumnDef::new(RestaurantMembers::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(RestaurantMembers::MemberRole)
                            .small_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RestaurantMembers::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(RestaurantMembers::RestaurantId)
                            .col(RestaurantMembers::UserId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(RestaurantMembers::Table, RestaurantMembers::RestaurantId)
                            .to(Restaurants::Table, Restaurants::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(RestaurantMembers::Table, RestaurantMembers::UserId)
                            .to(Profiles::Table, Profiles::UserId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(RestaurantMembers::Table)
                    .col(RestaurantMembers::UserId)
                    .name("idx_restaurant_members_user_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RestaurantMembers::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum RestaurantMembers {
    Table,
    RestaurantId,
    UserId,
    MemberRole,
    CreatedAt,
}

#[derive(Iden)]
enum Restaurants {
    Table,
    Id,
}

#[derive(Iden)]
enum Profiles {
    Table,
    UserId,
}
