//! Create `owner_profile` table, one-to-one with `user`.
//!
//! `location` and `dogs` are JSONB sub-documents; dog entries carry their
//! own ids so list position never acts as identity.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(OwnerProfile::Table)
                    .if_not_exists()
                    .col(uuid(OwnerProfile::Id).primary_key())
                    .col(uuid(OwnerProfile::UserId).unique_key().not_null())
                    .col(json_binary(OwnerProfile::Location).not_null())
                    .col(json_binary(OwnerProfile::Dogs).not_null())
                    .col(timestamp_with_time_zone(OwnerProfile::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(OwnerProfile::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_owner_profile_user")
                            .from(OwnerProfile::Table, OwnerProfile::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(OwnerProfile::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum OwnerProfile { Table, Id, UserId, Location, Dogs, CreatedAt, UpdatedAt }

#[derive(DeriveIden)]
enum User { Table, Id }
