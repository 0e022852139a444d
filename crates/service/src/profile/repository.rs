use async_trait::async_trait;
use uuid::Uuid;

use models::owner_profile::{DogEntry, OwnerLocation};
use models::trainer_profile::{BusinessInfo, Portfolio, ServiceList, TrainerLocation};

use crate::errors::ServiceError;

/// Repository abstraction over the user row and both role-profile rows.
/// Shared by the profile aggregation, dog mutation and directory services.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn find_user(&self, user_id: Uuid) -> Result<Option<models::user::Model>, ServiceError>;

    /// Applies the submitted contact fields; `None` when the user row is
    /// absent. User existence is a precondition here, never an upsert.
    async fn update_user_contact(
        &self,
        user_id: Uuid,
        update: models::user::ContactUpdate,
    ) -> Result<Option<models::user::Model>, ServiceError>;

    async fn set_profile_photo(&self, user_id: Uuid, url: &str) -> Result<Option<models::user::Model>, ServiceError>;

    async fn find_owner(&self, user_id: Uuid) -> Result<Option<models::owner_profile::Model>, ServiceError>;

    /// Upsert keyed by user_id; a `None` location leaves the stored one
    /// untouched (empty on first insert).
    async fn upsert_owner_location(
        &self,
        user_id: Uuid,
        location: Option<OwnerLocation>,
    ) -> Result<models::owner_profile::Model, ServiceError>;

    /// Replace the owner's dog list; `None` when the owner row is absent.
    async fn save_dogs(&self, user_id: Uuid, dogs: Vec<DogEntry>) -> Result<Option<models::owner_profile::Model>, ServiceError>;

    async fn find_trainer(&self, user_id: Uuid) -> Result<Option<models::trainer_profile::Model>, ServiceError>;

    /// Upsert keyed by user_id replacing the writable sub-documents;
    /// ratings and verification status are preserved.
    async fn upsert_trainer_details(
        &self,
        user_id: Uuid,
        business_info: BusinessInfo,
        services: ServiceList,
        location: TrainerLocation,
        portfolio: Portfolio,
    ) -> Result<models::trainer_profile::Model, ServiceError>;

    async fn list_trainer_users(&self) -> Result<Vec<models::user::Model>, ServiceError>;

    async fn find_trainer_profiles(&self, user_ids: &[Uuid]) -> Result<Vec<models::trainer_profile::Model>, ServiceError>;
}
