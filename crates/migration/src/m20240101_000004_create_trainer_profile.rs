//! Create `trainer_profile` table, one-to-one with `user`.
//!
//! Business info, services, location, ratings and portfolio are JSONB
//! sub-documents. Ratings are read-only through the profile update path.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TrainerProfile::Table)
                    .if_not_exists()
                    .col(uuid(TrainerProfile::Id).primary_key())
                    .col(uuid(TrainerProfile::UserId).unique_key().not_null())
                    .col(json_binary(TrainerProfile::BusinessInfo).not_null())
                    .col(json_binary(TrainerProfile::Services).not_null())
                    .col(json_binary(TrainerProfile::Location).not_null())
                    .col(json_binary(TrainerProfile::Ratings).not_null())
                    .col(json_binary(TrainerProfile::Portfolio).not_null())
                    .col(boolean(TrainerProfile::IsVerified).not_null().default(false))
                    .col(timestamp_with_time_zone(TrainerProfile::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(TrainerProfile::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_trainer_profile_user")
                            .from(TrainerProfile::Table, TrainerProfile::UserId)
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
            .drop_table(Table::drop().table(TrainerProfile::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum TrainerProfile {
    Table,
    Id,
    UserId,
    BusinessInfo,
    Services,
    Location,
    Ratings,
    Portfolio,
    IsVerified,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum User { Table, Id }
