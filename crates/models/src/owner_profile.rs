use sea_orm::entity::prelude::*;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, FromJsonQueryResult, QueryFilter, Set};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::user;

/// Owner location sub-document. Every field backfills to an empty string so
/// reads never surface a missing object.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
#[serde(rename_all = "camelCase", default)]
pub struct OwnerLocation {
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DogSize {
    #[default]
    Small,
    Medium,
    Large,
}

/// One dog in an owner's list. The id is assigned at append time and stays
/// stable for the entry's lifetime; list position is never identity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
#[serde(rename_all = "camelCase")]
pub struct DogEntry {
    pub id: Uuid,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub breed: String,
    #[serde(default)]
    pub age: u32,
    #[serde(default)]
    pub size: DogSize,
    #[serde(default)]
    pub photos: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct DogList(pub Vec<DogEntry>);

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "owner_profile")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    #[sea_orm(column_type = "JsonBinary")]
    pub location: OwnerLocation,
    #[sea_orm(column_type = "JsonBinary")]
    pub dogs: DogList,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { User }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::User => Entity::belongs_to(user::Entity)
                .from(Column::UserId)
                .to(user::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Empty profile row created at signup so dog mutations always have a
/// document to append into.
pub async fn create_empty(db: &DatabaseConnection, user_id: Uuid) -> Result<Model, crate::errors::ModelError> {
    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        location: Set(OwnerLocation::default()),
        dogs: Set(DogList::default()),
        created_at: Set(now),
        updated_at: Set(now),
    };
    am.insert(db).await.map_err(|e| crate::errors::ModelError::Db(e.to_string()))
}

pub async fn find_by_user_id(db: &DatabaseConnection, user_id: Uuid) -> Result<Option<Model>, crate::errors::ModelError> {
    Entity::find()
        .filter(Column::UserId.eq(user_id))
        .one(db)
        .await
        .map_err(|e| crate::errors::ModelError::Db(e.to_string()))
}

/// Upsert keyed by user_id. A submitted location replaces the stored one
/// wholesale; `None` leaves it untouched (or empty on first insert).
pub async fn upsert_location(
    db: &DatabaseConnection,
    user_id: Uuid,
    location: Option<OwnerLocation>,
) -> Result<Model, crate::errors::ModelError> {
    let now = Utc::now().into();
    if let Some(existing) = find_by_user_id(db, user_id).await? {
        let mut am: ActiveModel = existing.into();
        if let Some(location) = location {
            am.location = Set(location);
        }
        am.updated_at = Set(now);
        am.update(db).await.map_err(|e| crate::errors::ModelError::Db(e.to_string()))
    } else {
        let am = ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            location: Set(location.unwrap_or_default()),
            dogs: Set(DogList::default()),
            created_at: Set(now),
            updated_at: Set(now),
        };
        am.insert(db).await.map_err(|e| crate::errors::ModelError::Db(e.to_string()))
    }
}

/// Replace the whole dogs list. Returns `None` when the owner row is absent;
/// dog mutations never create the row.
pub async fn save_dogs(
    db: &DatabaseConnection,
    user_id: Uuid,
    dogs: Vec<DogEntry>,
) -> Result<Option<Model>, crate::errors::ModelError> {
    let Some(existing) = find_by_user_id(db, user_id).await? else {
        return Ok(None);
    };
    let mut am: ActiveModel = existing.into();
    am.dogs = Set(DogList(dogs));
    am.updated_at = Set(Utc::now().into());
    let updated = am.update(db).await.map_err(|e| crate::errors::ModelError::Db(e.to_string()))?;
    Ok(Some(updated))
}
