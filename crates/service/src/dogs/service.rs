use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use models::owner_profile::{DogEntry, DogSize};

use crate::errors::ServiceError;
use crate::profile::repository::ProfileRepository;

/// Dog fields as submitted. On append, unset fields take schema defaults;
/// on update, only submitted fields overwrite.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DogPatch {
    pub name: Option<String>,
    pub breed: Option<String>,
    pub age: Option<u32>,
    pub size: Option<DogSize>,
    pub photos: Option<Vec<String>>,
}

/// Mutation service over an owner's dog list. Every operation is scoped to
/// the authenticated user's own row; there is no way to address another
/// owner's list. Concurrent mutations of the same list follow the store's
/// last-write-wins semantics.
pub struct DogService {
    repo: Arc<dyn ProfileRepository>,
}

impl DogService {
    pub fn new(repo: Arc<dyn ProfileRepository>) -> Self { Self { repo } }

    async fn load_dogs(&self, user_id: Uuid) -> Result<Vec<DogEntry>, ServiceError> {
        let owner = self.repo
            .find_owner(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("owner"))?;
        Ok(owner.dogs.0)
    }

    /// Append a new entry with a freshly assigned id. The owner row must
    /// already exist (it is created at signup).
    #[instrument(skip(self, data), fields(user_id = %user_id))]
    pub async fn add_dog(&self, user_id: Uuid, data: DogPatch) -> Result<DogEntry, ServiceError> {
        let mut dogs = self.load_dogs(user_id).await?;
        let entry = DogEntry {
            id: Uuid::new_v4(),
            name: data.name.unwrap_or_default(),
            breed: data.breed.unwrap_or_default(),
            age: data.age.unwrap_or(0),
            size: data.size.unwrap_or_default(),
            photos: data.photos.unwrap_or_default(),
        };
        dogs.push(entry);
        let saved = self.repo
            .save_dogs(user_id, dogs)
            .await?
            .ok_or_else(|| ServiceError::not_found("owner"))?;
        // append is the only insertion path, so the new entry is last
        let added = saved.dogs.0.last().cloned()
            .ok_or_else(|| ServiceError::Db("dog list empty after append".into()))?;
        info!(user_id = %user_id, dog_id = %added.id, "dog_added");
        Ok(added)
    }

    /// Shallow field-level merge over the entry with the given id.
    #[instrument(skip(self, patch), fields(user_id = %user_id, dog_id = %dog_id))]
    pub async fn update_dog(&self, user_id: Uuid, dog_id: Uuid, patch: DogPatch) -> Result<DogEntry, ServiceError> {
        let mut dogs = self.load_dogs(user_id).await?;
        let dog = dogs
            .iter_mut()
            .find(|d| d.id == dog_id)
            .ok_or_else(|| ServiceError::not_found("dog"))?;
        if let Some(name) = patch.name {
            dog.name = name;
        }
        if let Some(breed) = patch.breed {
            dog.breed = breed;
        }
        if let Some(age) = patch.age {
            dog.age = age;
        }
        if let Some(size) = patch.size {
            dog.size = size;
        }
        if let Some(photos) = patch.photos {
            dog.photos = photos;
        }
        let updated = dog.clone();
        self.repo
            .save_dogs(user_id, dogs)
            .await?
            .ok_or_else(|| ServiceError::not_found("owner"))?;
        info!(user_id = %user_id, dog_id = %dog_id, "dog_updated");
        Ok(updated)
    }

    /// Remove the entry with the given id. Deleting an id that is already
    /// absent succeeds without change.
    #[instrument(skip(self), fields(user_id = %user_id, dog_id = %dog_id))]
    pub async fn delete_dog(&self, user_id: Uuid, dog_id: Uuid) -> Result<(), ServiceError> {
        let mut dogs = self.load_dogs(user_id).await?;
        let before = dogs.len();
        dogs.retain(|d| d.id != dog_id);
        if dogs.len() == before {
            return Ok(());
        }
        self.repo
            .save_dogs(user_id, dogs)
            .await?
            .ok_or_else(|| ServiceError::not_found("owner"))?;
        info!(user_id = %user_id, dog_id = %dog_id, "dog_deleted");
        Ok(())
    }
}
