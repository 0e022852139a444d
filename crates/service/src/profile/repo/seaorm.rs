use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use uuid::Uuid;

use models::owner_profile::{DogEntry, OwnerLocation};
use models::trainer_profile::{BusinessInfo, Portfolio, ServiceList, TrainerLocation};

use crate::errors::ServiceError;
use crate::profile::repository::ProfileRepository;

pub struct SeaOrmProfileRepository {
    pub db: DatabaseConnection,
}

#[async_trait::async_trait]
impl ProfileRepository for SeaOrmProfileRepository {
    async fn find_user(&self, user_id: Uuid) -> Result<Option<models::user::Model>, ServiceError> {
        models::user::Entity::find_by_id(user_id)
            .one(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn update_user_contact(
        &self,
        user_id: Uuid,
        update: models::user::ContactUpdate,
    ) -> Result<Option<models::user::Model>, ServiceError> {
        let updated = models::user::update_contact(&self.db, user_id, update).await?;
        Ok(updated)
    }

    async fn set_profile_photo(&self, user_id: Uuid, url: &str) -> Result<Option<models::user::Model>, ServiceError> {
        let updated = models::user::set_profile_photo(&self.db, user_id, url).await?;
        Ok(updated)
    }

    async fn find_owner(&self, user_id: Uuid) -> Result<Option<models::owner_profile::Model>, ServiceError> {
        let found = models::owner_profile::find_by_user_id(&self.db, user_id).await?;
        Ok(found)
    }

    async fn upsert_owner_location(
        &self,
        user_id: Uuid,
        location: Option<OwnerLocation>,
    ) -> Result<models::owner_profile::Model, ServiceError> {
        let saved = models::owner_profile::upsert_location(&self.db, user_id, location).await?;
        Ok(saved)
    }

    async fn save_dogs(&self, user_id: Uuid, dogs: Vec<DogEntry>) -> Result<Option<models::owner_profile::Model>, ServiceError> {
        let saved = models::owner_profile::save_dogs(&self.db, user_id, dogs).await?;
        Ok(saved)
    }

    async fn find_trainer(&self, user_id: Uuid) -> Result<Option<models::trainer_profile::Model>, ServiceError> {
        let found = models::trainer_profile::find_by_user_id(&self.db, user_id).await?;
        Ok(found)
    }

    async fn upsert_trainer_details(
        &self,
        user_id: Uuid,
        business_info: BusinessInfo,
        services: ServiceList,
        location: TrainerLocation,
        portfolio: Portfolio,
    ) -> Result<models::trainer_profile::Model, ServiceError> {
        let saved = models::trainer_profile::upsert_details(&self.db, user_id, business_info, services, location, portfolio).await?;
        Ok(saved)
    }

    async fn list_trainer_users(&self) -> Result<Vec<models::user::Model>, ServiceError> {
        models::user::Entity::find()
            .filter(models::user::Column::Role.eq(models::user::ROLE_TRAINER))
            .all(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn find_trainer_profiles(&self, user_ids: &[Uuid]) -> Result<Vec<models::trainer_profile::Model>, ServiceError> {
        let found = models::trainer_profile::find_by_user_ids(&self.db, user_ids).await?;
        Ok(found)
    }
}
