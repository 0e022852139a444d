use std::sync::Arc;
use std::time::Duration;

use tracing::{instrument, warn};
use uuid::Uuid;

use models::trainer_profile::{BusinessInfo, Certification, Portfolio, ServiceList, ServiceOffering};

use crate::errors::ServiceError;
use crate::profile::domain::{LocationPatch, OwnerProfilePatch, OwnerProfileView, TrainerProfilePatch, TrainerProfileView};
use crate::profile::repository::ProfileRepository;
use crate::storage::PhotoStore;

/// Portfolio specializations are capped, not rejected.
pub const MAX_SPECIALIZATIONS: usize = 3;

/// Intersect submitted specializations with the current service-type
/// vocabulary (case-insensitive, trimmed), preserving submission order,
/// then cap the result. Non-matching entries are dropped silently.
pub fn valid_specializations(submitted: &[String], services: &[ServiceOffering]) -> Vec<String> {
    let service_types: Vec<String> = services
        .iter()
        .map(|s| s.service_type.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect();
    let mut valid: Vec<String> = submitted
        .iter()
        .filter(|s| service_types.contains(&s.trim().to_lowercase()))
        .cloned()
        .collect();
    valid.truncate(MAX_SPECIALIZATIONS);
    valid
}

/// Aggregation service joining the user row with its role profile.
///
/// Profile updates touch two rows (user contact fields, then the profile
/// upsert) without a transaction; a failure between the two leaves the
/// contact change applied. Single-row writes follow the store's
/// last-write-wins semantics under concurrency.
pub struct ProfileService {
    repo: Arc<dyn ProfileRepository>,
    photos: Arc<dyn PhotoStore>,
    signed_url_ttl: Duration,
}

impl ProfileService {
    pub fn new(repo: Arc<dyn ProfileRepository>, photos: Arc<dyn PhotoStore>, signed_url_ttl: Duration) -> Self {
        Self { repo, photos, signed_url_ttl }
    }

    /// Swap the stored photo URL for a short-lived signed one; resolution
    /// failures degrade to an empty string rather than failing the read.
    async fn resolve_photo(&self, stored: &str) -> String {
        if stored.is_empty() {
            return String::new();
        }
        match self.photos.signed_photo_url(stored, self.signed_url_ttl).await {
            Ok(url) => url,
            Err(e) => {
                warn!(error = %e, "profile photo resolution failed");
                String::new()
            }
        }
    }

    async fn owner_view(&self, user: models::user::Model, owner: Option<models::owner_profile::Model>) -> OwnerProfileView {
        let profile_photo = self.resolve_photo(&user.profile_photo).await;
        let (location, dogs) = owner.map(|o| (o.location, o.dogs.0)).unwrap_or_default();
        OwnerProfileView {
            first_name: user.first_name,
            last_name: user.last_name,
            phone: user.phone,
            profile_photo,
            zip_code: user.zip_code,
            email: user.email,
            location,
            dogs,
        }
    }

    async fn trainer_view(&self, user: models::user::Model, trainer: Option<models::trainer_profile::Model>) -> TrainerProfileView {
        let profile_photo = self.resolve_photo(&user.profile_photo).await;
        let (business_info, services, location, portfolio) = trainer
            .map(|t| (t.business_info, t.services.0, t.location, t.portfolio))
            .unwrap_or_default();
        TrainerProfileView {
            first_name: user.first_name,
            last_name: user.last_name,
            phone: user.phone,
            profile_photo,
            zip_code: user.zip_code,
            email: user.email,
            business_info,
            services,
            location,
            portfolio,
        }
    }

    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn get_owner_profile(&self, user_id: Uuid) -> Result<OwnerProfileView, ServiceError> {
        let user = self.repo.find_user(user_id).await?.ok_or_else(|| ServiceError::not_found("user"))?;
        let owner = self.repo.find_owner(user_id).await?;
        Ok(self.owner_view(user, owner).await)
    }

    #[instrument(skip(self, patch), fields(user_id = %user_id))]
    pub async fn update_owner_profile(&self, user_id: Uuid, patch: OwnerProfilePatch) -> Result<OwnerProfileView, ServiceError> {
        let user = self.repo
            .update_user_contact(user_id, patch.contact_update())
            .await?
            .ok_or_else(|| ServiceError::not_found("user"))?;
        let location = patch.location.map(LocationPatch::into_owner_location);
        let owner = self.repo.upsert_owner_location(user_id, location).await?;
        Ok(self.owner_view(user, Some(owner)).await)
    }

    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn get_trainer_profile(&self, user_id: Uuid) -> Result<TrainerProfileView, ServiceError> {
        let user = self.repo.find_user(user_id).await?.ok_or_else(|| ServiceError::not_found("user"))?;
        let trainer = self.repo.find_trainer(user_id).await?;
        Ok(self.trainer_view(user, trainer).await)
    }

    #[instrument(skip(self, patch), fields(user_id = %user_id))]
    pub async fn update_trainer_profile(&self, user_id: Uuid, patch: TrainerProfilePatch) -> Result<TrainerProfileView, ServiceError> {
        let user = self.repo
            .update_user_contact(user_id, patch.contact_update())
            .await?
            .ok_or_else(|| ServiceError::not_found("user"))?;

        let certifications: Vec<Certification> = patch
            .certifications
            .unwrap_or_default()
            .into_iter()
            .map(|c| Certification { name: c.name.unwrap_or_default() })
            .collect();
        let services: Vec<ServiceOffering> = patch
            .services
            .unwrap_or_default()
            .into_iter()
            .map(|s| ServiceOffering {
                service_type: s.service_type.unwrap_or_default(),
                description: s.description.unwrap_or_default(),
                duration: s.duration.unwrap_or(0),
                price: s.price.unwrap_or(0.0),
            })
            .collect();
        let specializations = valid_specializations(&patch.specializations.unwrap_or_default(), &services);

        let business_info = BusinessInfo {
            years_of_experience: patch.years_of_experience.unwrap_or(0),
            certifications,
        };
        let location = patch.location.map(LocationPatch::into_trainer_location).unwrap_or_default();
        let portfolio = Portfolio { bio: patch.bio.unwrap_or_default(), specializations };

        let trainer = self.repo
            .upsert_trainer_details(user_id, business_info, ServiceList(services), location, portfolio)
            .await?;
        Ok(self.trainer_view(user, Some(trainer)).await)
    }

    /// Record a freshly uploaded photo URL on the user row.
    #[instrument(skip(self, url), fields(user_id = %user_id))]
    pub async fn set_profile_photo(&self, user_id: Uuid, url: &str) -> Result<crate::auth::domain::UserView, ServiceError> {
        let user = self.repo
            .set_profile_photo(user_id, url)
            .await?
            .ok_or_else(|| ServiceError::not_found("user"))?;
        Ok(user.into())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;
    use crate::profile::domain::{CertificationPatch, ServicePatch};
    use crate::testing::{FailingPhotoStore, MemoryPhotoStore, MemoryRepository};

    fn svc(repo: Arc<MemoryRepository>) -> ProfileService {
        ProfileService::new(repo, Arc::new(MemoryPhotoStore::default()), Duration::from_secs(3600))
    }

    fn service_patch(service_type: &str) -> ServicePatch {
        ServicePatch { service_type: Some(service_type.into()), ..ServicePatch::default() }
    }

    #[test]
    fn specializations_keep_first_three_matches_in_submission_order() {
        let services: Vec<ServiceOffering> = ["Obedience", "Agility", "Grooming", "Boarding"]
            .iter()
            .map(|t| ServiceOffering { service_type: t.to_string(), ..ServiceOffering::default() })
            .collect();
        let submitted: Vec<String> = ["agility", "Puppy School", "OBEDIENCE ", "boarding", "grooming"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let valid = valid_specializations(&submitted, &services);
        assert_eq!(valid, vec!["agility".to_string(), "OBEDIENCE ".to_string(), "boarding".to_string()]);
    }

    #[test]
    fn specializations_with_no_matches_are_dropped_not_rejected() {
        let services = vec![ServiceOffering { service_type: "Obedience".into(), ..ServiceOffering::default() }];
        let submitted = vec!["Surfing".to_string(), "Skydiving".to_string()];
        assert!(valid_specializations(&submitted, &services).is_empty());
    }

    #[tokio::test]
    async fn update_trainer_profile_truncates_specializations() {
        let repo = Arc::new(MemoryRepository::default());
        let user = repo.seed_user("trainer");
        let svc = svc(repo);

        let patch = TrainerProfilePatch {
            services: Some(vec![
                service_patch("Obedience"),
                service_patch("Agility"),
                service_patch("Grooming"),
                service_patch("Boarding"),
            ]),
            specializations: Some(vec![
                "Obedience".into(),
                "Herding".into(),
                "Agility".into(),
                "Grooming".into(),
                "Boarding".into(),
            ]),
            ..TrainerProfilePatch::default()
        };
        let view = svc.update_trainer_profile(user.id, patch).await.unwrap();
        assert_eq!(
            view.portfolio.specializations,
            vec!["Obedience".to_string(), "Agility".to_string(), "Grooming".to_string()]
        );
    }

    #[tokio::test]
    async fn update_trainer_profile_reformats_lists_with_defaults() {
        let repo = Arc::new(MemoryRepository::default());
        let user = repo.seed_user("trainer");
        let svc = svc(repo);

        let patch = TrainerProfilePatch {
            years_of_experience: Some(5),
            certifications: Some(vec![CertificationPatch { name: Some("CPDT-KA".into()) }, CertificationPatch { name: None }]),
            services: Some(vec![ServicePatch {
                service_type: Some("Obedience".into()),
                description: None,
                duration: None,
                price: None,
            }]),
            bio: Some("Twenty years with working dogs".into()),
            ..TrainerProfilePatch::default()
        };
        let view = svc.update_trainer_profile(user.id, patch).await.unwrap();
        assert_eq!(view.business_info.years_of_experience, 5);
        assert_eq!(view.business_info.certifications.len(), 2);
        assert_eq!(view.business_info.certifications[1].name, "");
        assert_eq!(view.services[0].duration, 0);
        assert_eq!(view.services[0].price, 0.0);
        assert_eq!(view.portfolio.bio, "Twenty years with working dogs");
        // location omitted resolves to the empty default, never null
        assert_eq!(view.location.city, "");
    }

    #[tokio::test]
    async fn update_trainer_profile_preserves_ratings() {
        let repo = Arc::new(MemoryRepository::default());
        let user = repo.seed_trainer_with_profile();
        repo.set_trainer_ratings(user.id, 4.5, 12);
        let svc = svc(repo.clone());

        let _ = svc.update_trainer_profile(user.id, TrainerProfilePatch::default()).await.unwrap();
        let stored = repo.find_trainer(user.id).await.unwrap().unwrap();
        assert_eq!(stored.ratings.average_rating, 4.5);
        assert_eq!(stored.ratings.total_reviews, 12);
    }

    #[tokio::test]
    async fn owner_view_backfills_defaults_when_profile_row_is_absent() {
        let repo = Arc::new(MemoryRepository::default());
        let user = repo.seed_user("owner");
        let svc = svc(repo);

        let view = svc.get_owner_profile(user.id).await.unwrap();
        assert_eq!(view.location.address, "");
        assert_eq!(view.location.zip_code, "");
        assert!(view.dogs.is_empty());
        assert_eq!(view.profile_photo, "");
        assert_eq!(view.email, user.email);
    }

    #[tokio::test]
    async fn update_owner_profile_replaces_location_with_empty_defaults() {
        let repo = Arc::new(MemoryRepository::default());
        let user = repo.seed_owner_with_profile();
        let svc = svc(repo.clone());

        let patch = OwnerProfilePatch {
            first_name: Some("Maya".into()),
            location: Some(LocationPatch { city: Some("Oakland".into()), ..LocationPatch::default() }),
            ..OwnerProfilePatch::default()
        };
        let view = svc.update_owner_profile(user.id, patch).await.unwrap();
        assert_eq!(view.first_name, "Maya");
        assert_eq!(view.location.city, "Oakland");
        assert_eq!(view.location.address, "");
        // omitted contact fields keep their prior values
        assert_eq!(view.last_name, user.last_name);

        // omitted location leaves the stored one untouched
        let view = svc.update_owner_profile(user.id, OwnerProfilePatch::default()).await.unwrap();
        assert_eq!(view.location.city, "Oakland");
    }

    #[tokio::test]
    async fn update_owner_profile_upserts_profile_but_requires_user() {
        let repo = Arc::new(MemoryRepository::default());
        let user = repo.seed_user("owner");
        let svc = svc(repo.clone());

        // no owner row yet: the update creates it
        assert!(repo.find_owner(user.id).await.unwrap().is_none());
        let patch = OwnerProfilePatch {
            location: Some(LocationPatch { state: Some("CA".into()), ..LocationPatch::default() }),
            ..OwnerProfilePatch::default()
        };
        let view = svc.update_owner_profile(user.id, patch).await.unwrap();
        assert_eq!(view.location.state, "CA");
        assert!(repo.find_owner(user.id).await.unwrap().is_some());

        // absent user is a hard not-found, not an upsert
        let err = svc.update_owner_profile(Uuid::new_v4(), OwnerProfilePatch::default()).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        let err = svc.get_owner_profile(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn profile_photo_resolves_to_signed_url() {
        let repo = Arc::new(MemoryRepository::default());
        let user = repo.seed_user("owner");
        repo.set_profile_photo_url(user.id, "https://photos.test/profile-photos/abc.jpg");
        let svc = svc(repo);

        let view = svc.get_owner_profile(user.id).await.unwrap();
        assert!(view.profile_photo.contains("signed"));
    }

    #[tokio::test]
    async fn profile_photo_resolution_fails_soft_to_empty() {
        let repo = Arc::new(MemoryRepository::default());
        let user = repo.seed_user("trainer");
        repo.set_profile_photo_url(user.id, "https://photos.test/profile-photos/abc.jpg");
        let svc = ProfileService::new(repo, Arc::new(FailingPhotoStore), Duration::from_secs(3600));

        let view = svc.get_trainer_profile(user.id).await.unwrap();
        assert_eq!(view.profile_photo, "");
    }
}
