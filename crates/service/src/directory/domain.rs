use serde::{Deserialize, Serialize};
use uuid::Uuid;

use models::trainer_profile::{Certification, Ratings, ServiceOffering, TrainerLocation};

/// Card shown in the directory listing. A trainer without a completed
/// profile still appears, with every profile-derived field at its default.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainerSummary {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub profile_photo: String,
    pub specializations: Vec<String>,
    pub average_rating: f64,
    pub total_reviews: u32,
    pub location: TrainerLocation,
}

/// Full trainer detail, flattened for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainerDetail {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub profile_photo: String,
    pub email: String,
    pub phone: String,
    pub location: TrainerLocation,
    pub bio: String,
    pub years_of_experience: u32,
    pub certifications: Vec<Certification>,
    pub services: Vec<ServiceOffering>,
    pub specializations: Vec<String>,
    pub average_rating: f64,
    pub total_reviews: u32,
}

impl TrainerDetail {
    pub fn from_parts(user: models::user::Model, profile: models::trainer_profile::Model) -> Self {
        let Ratings { average_rating, total_reviews } = profile.ratings;
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            profile_photo: user.profile_photo,
            email: user.email,
            phone: user.phone,
            location: profile.location,
            bio: profile.portfolio.bio,
            years_of_experience: profile.business_info.years_of_experience,
            certifications: profile.business_info.certifications,
            services: profile.services.0,
            specializations: profile.portfolio.specializations,
            average_rating,
            total_reviews,
        }
    }
}
