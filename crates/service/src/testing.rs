//! In-memory collaborators for tests and doc examples: a repository
//! backing both the auth and profile ports, plus photo stores that
//! succeed deterministically or always fail.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use models::owner_profile::{self, DogEntry, DogList, OwnerLocation};
use models::trainer_profile::{self, BusinessInfo, Portfolio, Ratings, ServiceList, TrainerLocation};
use models::user;

use crate::auth::domain::Role;
use crate::auth::errors::AuthError;
use crate::auth::repository::{AuthRepository, Credentials};
use crate::errors::ServiceError;
use crate::profile::repository::ProfileRepository;
use crate::storage::{PhotoStore, StorageError};

fn empty_owner_profile(user_id: Uuid) -> owner_profile::Model {
    let now = Utc::now().into();
    owner_profile::Model {
        id: Uuid::new_v4(),
        user_id,
        location: OwnerLocation::default(),
        dogs: DogList::default(),
        created_at: now,
        updated_at: now,
    }
}

fn empty_trainer_profile(user_id: Uuid) -> trainer_profile::Model {
    let now = Utc::now().into();
    trainer_profile::Model {
        id: Uuid::new_v4(),
        user_id,
        business_info: BusinessInfo::default(),
        services: ServiceList::default(),
        location: TrainerLocation::default(),
        ratings: Ratings::default(),
        portfolio: Portfolio::default(),
        is_verified: false,
        created_at: now,
        updated_at: now,
    }
}

#[derive(Default)]
pub struct MemoryRepository {
    users: Mutex<HashMap<Uuid, user::Model>>,
    creds: Mutex<HashMap<Uuid, Credentials>>,
    owners: Mutex<HashMap<Uuid, owner_profile::Model>>,   // key: user_id
    trainers: Mutex<HashMap<Uuid, trainer_profile::Model>>, // key: user_id
}

impl MemoryRepository {
    /// Insert a user row with placeholder contact fields.
    pub fn seed_user(&self, role: &str) -> user::Model {
        let now = Utc::now().into();
        let id = Uuid::new_v4();
        let model = user::Model {
            id,
            email: format!("user-{}@example.com", id),
            role: role.to_string(),
            first_name: "Dana".into(),
            last_name: "Woof".into(),
            phone: "5551234567".into(),
            zip_code: "94107".into(),
            profile_photo: String::new(),
            created_at: now,
            updated_at: now,
        };
        self.users.lock().unwrap().insert(id, model.clone());
        model
    }

    pub fn seed_owner_with_profile(&self) -> user::Model {
        let u = self.seed_user(user::ROLE_OWNER);
        self.owners.lock().unwrap().insert(u.id, empty_owner_profile(u.id));
        u
    }

    pub fn seed_trainer_with_profile(&self) -> user::Model {
        let u = self.seed_user(user::ROLE_TRAINER);
        self.trainers.lock().unwrap().insert(u.id, empty_trainer_profile(u.id));
        u
    }

    pub fn set_trainer_ratings(&self, user_id: Uuid, average_rating: f64, total_reviews: u32) {
        if let Some(t) = self.trainers.lock().unwrap().get_mut(&user_id) {
            t.ratings = Ratings { average_rating, total_reviews };
        }
    }

    pub fn set_profile_photo_url(&self, user_id: Uuid, url: &str) {
        if let Some(u) = self.users.lock().unwrap().get_mut(&user_id) {
            u.profile_photo = url.to_string();
        }
    }
}

#[async_trait]
impl AuthRepository for MemoryRepository {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<user::Model>, AuthError> {
        let users = self.users.lock().unwrap();
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn create_user(&self, input: user::NewUser) -> Result<user::Model, AuthError> {
        user::validate_email(&input.email).map_err(|e| AuthError::Validation(e.to_string()))?;
        user::validate_role(&input.role).map_err(|e| AuthError::Validation(e.to_string()))?;
        user::validate_phone(&input.phone).map_err(|e| AuthError::Validation(e.to_string()))?;
        user::validate_zip_code(&input.zip_code).map_err(|e| AuthError::Validation(e.to_string()))?;
        let email = user::normalize_email(&input.email);
        let mut users = self.users.lock().unwrap();
        if users.values().any(|u| u.email == email) {
            return Err(AuthError::Conflict);
        }
        let now = Utc::now().into();
        let model = user::Model {
            id: Uuid::new_v4(),
            email,
            role: input.role,
            first_name: input.first_name,
            last_name: input.last_name,
            phone: input.phone,
            zip_code: input.zip_code,
            profile_photo: String::new(),
            created_at: now,
            updated_at: now,
        };
        users.insert(model.id, model.clone());
        Ok(model)
    }

    async fn get_credentials(&self, user_id: Uuid) -> Result<Option<Credentials>, AuthError> {
        let creds = self.creds.lock().unwrap();
        Ok(creds.get(&user_id).cloned())
    }

    async fn upsert_password(&self, user_id: Uuid, password_hash: String, password_algorithm: String) -> Result<Credentials, AuthError> {
        let mut creds = self.creds.lock().unwrap();
        let c = Credentials { user_id, password_hash, password_algorithm };
        creds.insert(user_id, c.clone());
        Ok(c)
    }

    async fn create_role_profile(&self, user_id: Uuid, role: Role) -> Result<(), AuthError> {
        match role {
            Role::Owner => {
                self.owners.lock().unwrap().insert(user_id, empty_owner_profile(user_id));
            }
            Role::Trainer => {
                self.trainers.lock().unwrap().insert(user_id, empty_trainer_profile(user_id));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl ProfileRepository for MemoryRepository {
    async fn find_user(&self, user_id: Uuid) -> Result<Option<user::Model>, ServiceError> {
        Ok(self.users.lock().unwrap().get(&user_id).cloned())
    }

    async fn update_user_contact(
        &self,
        user_id: Uuid,
        update: user::ContactUpdate,
    ) -> Result<Option<user::Model>, ServiceError> {
        if let Some(phone) = &update.phone {
            user::validate_phone(phone)?;
        }
        if let Some(zip) = &update.zip_code {
            user::validate_zip_code(zip)?;
        }
        let mut users = self.users.lock().unwrap();
        let Some(u) = users.get_mut(&user_id) else { return Ok(None) };
        if let Some(first_name) = update.first_name {
            u.first_name = first_name;
        }
        if let Some(last_name) = update.last_name {
            u.last_name = last_name;
        }
        if let Some(phone) = update.phone {
            u.phone = phone;
        }
        if let Some(zip_code) = update.zip_code {
            u.zip_code = zip_code;
        }
        u.updated_at = Utc::now().into();
        Ok(Some(u.clone()))
    }

    async fn set_profile_photo(&self, user_id: Uuid, url: &str) -> Result<Option<user::Model>, ServiceError> {
        let mut users = self.users.lock().unwrap();
        let Some(u) = users.get_mut(&user_id) else { return Ok(None) };
        u.profile_photo = url.to_string();
        u.updated_at = Utc::now().into();
        Ok(Some(u.clone()))
    }

    async fn find_owner(&self, user_id: Uuid) -> Result<Option<owner_profile::Model>, ServiceError> {
        Ok(self.owners.lock().unwrap().get(&user_id).cloned())
    }

    async fn upsert_owner_location(
        &self,
        user_id: Uuid,
        location: Option<OwnerLocation>,
    ) -> Result<owner_profile::Model, ServiceError> {
        let mut owners = self.owners.lock().unwrap();
        let entry = owners.entry(user_id).or_insert_with(|| empty_owner_profile(user_id));
        if let Some(location) = location {
            entry.location = location;
        }
        entry.updated_at = Utc::now().into();
        Ok(entry.clone())
    }

    async fn save_dogs(&self, user_id: Uuid, dogs: Vec<DogEntry>) -> Result<Option<owner_profile::Model>, ServiceError> {
        let mut owners = self.owners.lock().unwrap();
        let Some(entry) = owners.get_mut(&user_id) else { return Ok(None) };
        entry.dogs = DogList(dogs);
        entry.updated_at = Utc::now().into();
        Ok(Some(entry.clone()))
    }

    async fn find_trainer(&self, user_id: Uuid) -> Result<Option<trainer_profile::Model>, ServiceError> {
        Ok(self.trainers.lock().unwrap().get(&user_id).cloned())
    }

    async fn upsert_trainer_details(
        &self,
        user_id: Uuid,
        business_info: BusinessInfo,
        services: ServiceList,
        location: TrainerLocation,
        portfolio: Portfolio,
    ) -> Result<trainer_profile::Model, ServiceError> {
        let mut trainers = self.trainers.lock().unwrap();
        let entry = trainers.entry(user_id).or_insert_with(|| empty_trainer_profile(user_id));
        entry.business_info = business_info;
        entry.services = services;
        entry.location = location;
        entry.portfolio = portfolio;
        entry.updated_at = Utc::now().into();
        Ok(entry.clone())
    }

    async fn list_trainer_users(&self) -> Result<Vec<user::Model>, ServiceError> {
        let users = self.users.lock().unwrap();
        Ok(users.values().filter(|u| u.role == user::ROLE_TRAINER).cloned().collect())
    }

    async fn find_trainer_profiles(&self, user_ids: &[Uuid]) -> Result<Vec<trainer_profile::Model>, ServiceError> {
        let trainers = self.trainers.lock().unwrap();
        Ok(user_ids.iter().filter_map(|id| trainers.get(id).cloned()).collect())
    }
}

/// Photo store backed by a map; URLs are deterministic for assertions.
#[derive(Default)]
pub struct MemoryPhotoStore {
    photos: Mutex<HashMap<String, (Vec<u8>, String)>>,
}

impl MemoryPhotoStore {
    pub fn stored_keys(&self) -> Vec<String> {
        self.photos.lock().unwrap().keys().cloned().collect()
    }
}

#[async_trait]
impl PhotoStore for MemoryPhotoStore {
    async fn put_photo(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<String, StorageError> {
        self.photos.lock().unwrap().insert(key.to_string(), (bytes, content_type.to_string()));
        Ok(format!("https://photos.test/{}", key))
    }

    async fn signed_photo_url(&self, stored_url: &str, expires_in: Duration) -> Result<String, StorageError> {
        Ok(format!("{}?signed={}", stored_url, expires_in.as_secs()))
    }
}

/// Photo store whose every call fails; exercises fail-soft paths.
pub struct FailingPhotoStore;

#[async_trait]
impl PhotoStore for FailingPhotoStore {
    async fn put_photo(&self, _key: &str, _bytes: Vec<u8>, _content_type: &str) -> Result<String, StorageError> {
        Err(StorageError::Upload("store offline".into()))
    }

    async fn signed_photo_url(&self, _stored_url: &str, _expires_in: Duration) -> Result<String, StorageError> {
        Err(StorageError::Sign("store offline".into()))
    }
}
