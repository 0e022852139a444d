use sea_orm::entity::prelude::*;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, FromJsonQueryResult, QueryFilter, Set};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::user;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
#[serde(rename_all = "camelCase", default)]
pub struct Certification {
    pub name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
#[serde(rename_all = "camelCase", default)]
pub struct BusinessInfo {
    pub years_of_experience: u32,
    pub certifications: Vec<Certification>,
}

/// A single offered service. `type` doubles as the vocabulary that
/// portfolio specializations must match against.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, FromJsonQueryResult)]
#[serde(rename_all = "camelCase", default)]
pub struct ServiceOffering {
    #[serde(rename = "type")]
    pub service_type: String,
    pub description: String,
    pub duration: u32,
    pub price: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct ServiceList(pub Vec<ServiceOffering>);

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
#[serde(rename_all = "camelCase", default)]
pub struct TrainerLocation {
    pub address: String,
    pub city: String,
    pub state: String,
}

/// Aggregated review scores; maintained outside the profile update path and
/// preserved verbatim across upserts.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, FromJsonQueryResult)]
#[serde(rename_all = "camelCase", default)]
pub struct Ratings {
    pub average_rating: f64,
    pub total_reviews: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
#[serde(rename_all = "camelCase", default)]
pub struct Portfolio {
    pub bio: String,
    pub specializations: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "trainer_profile")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    #[sea_orm(column_type = "JsonBinary")]
    pub business_info: BusinessInfo,
    #[sea_orm(column_type = "JsonBinary")]
    pub services: ServiceList,
    #[sea_orm(column_type = "JsonBinary")]
    pub location: TrainerLocation,
    #[sea_orm(column_type = "JsonBinary")]
    pub ratings: Ratings,
    #[sea_orm(column_type = "JsonBinary")]
    pub portfolio: Portfolio,
    pub is_verified: bool,
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

pub async fn create_empty(db: &DatabaseConnection, user_id: Uuid) -> Result<Model, crate::errors::ModelError> {
    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        business_info: Set(BusinessInfo::default()),
        services: Set(ServiceList::default()),
        location: Set(TrainerLocation::default()),
        ratings: Set(Ratings::default()),
        portfolio: Set(Portfolio::default()),
        is_verified: Set(false),
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

/// Upsert keyed by user_id replacing the writable sub-documents; ratings
/// and verification status survive untouched.
pub async fn upsert_details(
    db: &DatabaseConnection,
    user_id: Uuid,
    business_info: BusinessInfo,
    services: ServiceList,
    location: TrainerLocation,
    portfolio: Portfolio,
) -> Result<Model, crate::errors::ModelError> {
    let now = Utc::now().into();
    if let Some(existing) = find_by_user_id(db, user_id).await? {
        let mut am: ActiveModel = existing.into();
        am.business_info = Set(business_info);
        am.services = Set(services);
        am.location = Set(location);
        am.portfolio = Set(portfolio);
        am.updated_at = Set(now);
        am.update(db).await.map_err(|e| crate::errors::ModelError::Db(e.to_string()))
    } else {
        let am = ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            business_info: Set(business_info),
            services: Set(services),
            location: Set(location),
            ratings: Set(Ratings::default()),
            portfolio: Set(portfolio),
            is_verified: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
        };
        am.insert(db).await.map_err(|e| crate::errors::ModelError::Db(e.to_string()))
    }
}

/// Fetch profiles for a set of users in one query; used by the directory
/// to left-join trainers to their profiles in memory.
pub async fn find_by_user_ids(
    db: &DatabaseConnection,
    user_ids: &[Uuid],
) -> Result<Vec<Model>, crate::errors::ModelError> {
    if user_ids.is_empty() {
        return Ok(Vec::new());
    }
    Entity::find()
        .filter(Column::UserId.is_in(user_ids.iter().copied()))
        .all(db)
        .await
        .map_err(|e| crate::errors::ModelError::Db(e.to_string()))
}
