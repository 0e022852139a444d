use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Users: role powers the trainer directory listing
        manager
            .create_index(
                Index::create()
                    .name("idx_user_role")
                    .table(User::Table)
                    .col(User::Role)
                    .to_owned(),
            )
            .await?;

        // Users: zip code for location-based filtering
        manager
            .create_index(
                Index::create()
                    .name("idx_user_zip")
                    .table(User::Table)
                    .col(User::ZipCode)
                    .to_owned(),
            )
            .await?;

        // Composite role + zip for filtered directory queries
        manager
            .create_index(
                Index::create()
                    .name("idx_user_role_zip")
                    .table(User::Table)
                    .col(User::Role)
                    .col(User::ZipCode)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_user_role").table(User::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_user_zip").table(User::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_user_role_zip").table(User::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum User { Table, Role, ZipCode }
