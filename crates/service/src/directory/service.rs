use std::collections::HashMap;
use std::sync::Arc;

use tracing::instrument;
use uuid::Uuid;

use crate::directory::domain::{TrainerDetail, TrainerSummary};
use crate::errors::ServiceError;
use crate::profile::repository::ProfileRepository;

/// Read-only directory of trainers for owners to browse. Listing order is
/// whatever the store returns, stable within a call.
pub struct DirectoryService {
    repo: Arc<dyn ProfileRepository>,
}

impl DirectoryService {
    pub fn new(repo: Arc<dyn ProfileRepository>) -> Self { Self { repo } }

    /// Every trainer user appears exactly once; trainers who have not
    /// completed profile setup fall back to empty defaults.
    #[instrument(skip(self))]
    pub async fn list_trainers(&self) -> Result<Vec<TrainerSummary>, ServiceError> {
        let users = self.repo.list_trainer_users().await?;
        let ids: Vec<Uuid> = users.iter().map(|u| u.id).collect();
        let profiles = self.repo.find_trainer_profiles(&ids).await?;
        let mut by_user: HashMap<Uuid, models::trainer_profile::Model> =
            profiles.into_iter().map(|p| (p.user_id, p)).collect();

        let summaries = users
            .into_iter()
            .map(|u| {
                let profile = by_user.remove(&u.id);
                match profile {
                    Some(p) => TrainerSummary {
                        id: u.id,
                        first_name: u.first_name,
                        last_name: u.last_name,
                        profile_photo: u.profile_photo,
                        specializations: p.portfolio.specializations,
                        average_rating: p.ratings.average_rating,
                        total_reviews: p.ratings.total_reviews,
                        location: p.location,
                    },
                    None => TrainerSummary {
                        id: u.id,
                        first_name: u.first_name,
                        last_name: u.last_name,
                        profile_photo: u.profile_photo,
                        specializations: Vec::new(),
                        average_rating: 0.0,
                        total_reviews: 0,
                        location: Default::default(),
                    },
                }
            })
            .collect();
        Ok(summaries)
    }

    /// Unlike the listing, the detail lookup requires a completed profile.
    #[instrument(skip(self), fields(trainer_id = %trainer_id))]
    pub async fn get_trainer_by_id(&self, trainer_id: &str) -> Result<TrainerDetail, ServiceError> {
        let id = Uuid::parse_str(trainer_id)
            .map_err(|_| ServiceError::Validation("invalid trainer id".into()))?;

        let user = self.repo
            .find_user(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("trainer"))?;
        if user.role != models::user::ROLE_TRAINER {
            return Err(ServiceError::not_found("trainer"));
        }
        let profile = self.repo
            .find_trainer(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("trainer profile"))?;

        Ok(TrainerDetail::from_parts(user, profile))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::testing::MemoryRepository;

    fn svc(repo: Arc<MemoryRepository>) -> DirectoryService {
        DirectoryService::new(repo)
    }

    #[tokio::test]
    async fn list_includes_trainers_without_profiles_at_defaults() {
        let repo = Arc::new(MemoryRepository::default());
        let with_profile = repo.seed_trainer_with_profile();
        repo.set_trainer_ratings(with_profile.id, 4.8, 21);
        let without_profile = repo.seed_user("trainer");
        repo.seed_owner_with_profile(); // owners never appear

        let list = svc(repo).list_trainers().await.unwrap();
        assert_eq!(list.len(), 2);

        let bare = list.iter().find(|t| t.id == without_profile.id).unwrap();
        assert!(bare.specializations.is_empty());
        assert_eq!(bare.average_rating, 0.0);
        assert_eq!(bare.total_reviews, 0);
        assert_eq!(bare.location.city, "");

        let full = list.iter().find(|t| t.id == with_profile.id).unwrap();
        assert_eq!(full.average_rating, 4.8);
        assert_eq!(full.total_reviews, 21);
    }

    #[tokio::test]
    async fn get_trainer_by_id_validates_the_identifier() {
        let repo = Arc::new(MemoryRepository::default());
        let err = svc(repo).get_trainer_by_id("definitely-not-a-uuid").await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn get_trainer_by_id_rejects_unknown_users_and_wrong_roles() {
        let repo = Arc::new(MemoryRepository::default());
        let owner = repo.seed_owner_with_profile();
        let incomplete = repo.seed_user("trainer");
        let svc = svc(repo);

        let err = svc.get_trainer_by_id(&Uuid::new_v4().to_string()).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));

        // well-formed id of an owner-role user is not-found, not forbidden
        let err = svc.get_trainer_by_id(&owner.id.to_string()).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));

        // trainer user without a completed profile is also not-found
        let err = svc.get_trainer_by_id(&incomplete.id.to_string()).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn get_trainer_by_id_returns_flattened_detail() {
        let repo = Arc::new(MemoryRepository::default());
        let user = repo.seed_trainer_with_profile();
        repo.set_trainer_ratings(user.id, 4.2, 7);
        let svc = svc(repo);

        let detail = svc.get_trainer_by_id(&user.id.to_string()).await.unwrap();
        assert_eq!(detail.id, user.id);
        assert_eq!(detail.email, user.email);
        assert_eq!(detail.average_rating, 4.2);
        assert_eq!(detail.total_reviews, 7);
        assert_eq!(detail.bio, "");
        assert!(detail.certifications.is_empty());
    }
}
