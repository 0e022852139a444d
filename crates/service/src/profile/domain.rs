use serde::{Deserialize, Serialize};

use models::owner_profile::{DogEntry, OwnerLocation};
use models::trainer_profile::{BusinessInfo, Portfolio, ServiceOffering, TrainerLocation};

/// Aggregated owner view: user contact fields plus the owner sub-document.
/// Every structured field is concrete; nothing is ever null or absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerProfileView {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub profile_photo: String,
    pub zip_code: String,
    pub email: String,
    pub location: OwnerLocation,
    pub dogs: Vec<DogEntry>,
}

/// Aggregated trainer view. Ratings are surfaced through the directory,
/// not through the trainer's own profile view.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainerProfileView {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub profile_photo: String,
    pub zip_code: String,
    pub email: String,
    pub business_info: BusinessInfo,
    pub services: Vec<ServiceOffering>,
    pub location: TrainerLocation,
    pub portfolio: Portfolio,
}

/// Location fields as submitted; a submitted object replaces the stored
/// one, each missing sub-field resolving to an empty string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LocationPatch {
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
}

impl LocationPatch {
    pub fn into_owner_location(self) -> OwnerLocation {
        OwnerLocation {
            address: self.address.unwrap_or_default(),
            city: self.city.unwrap_or_default(),
            state: self.state.unwrap_or_default(),
            zip_code: self.zip_code.unwrap_or_default(),
        }
    }

    pub fn into_trainer_location(self) -> TrainerLocation {
        TrainerLocation {
            address: self.address.unwrap_or_default(),
            city: self.city.unwrap_or_default(),
            state: self.state.unwrap_or_default(),
        }
    }
}

/// Owner profile update input: contact fields merge onto the user row,
/// the location sub-document is replaced when submitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OwnerProfilePatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub zip_code: Option<String>,
    pub location: Option<LocationPatch>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CertificationPatch {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServicePatch {
    #[serde(rename = "type")]
    pub service_type: Option<String>,
    pub description: Option<String>,
    pub duration: Option<u32>,
    pub price: Option<f64>,
}

/// Trainer profile update input. Submitted lists replace the stored ones
/// after reformatting; omitted lists reset to their empty defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrainerProfilePatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub zip_code: Option<String>,
    pub years_of_experience: Option<u32>,
    pub certifications: Option<Vec<CertificationPatch>>,
    pub services: Option<Vec<ServicePatch>>,
    pub bio: Option<String>,
    pub specializations: Option<Vec<String>>,
    pub location: Option<LocationPatch>,
}

impl OwnerProfilePatch {
    pub fn contact_update(&self) -> models::user::ContactUpdate {
        models::user::ContactUpdate {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            phone: self.phone.clone(),
            zip_code: self.zip_code.clone(),
        }
    }
}

impl TrainerProfilePatch {
    pub fn contact_update(&self) -> models::user::ContactUpdate {
        models::user::ContactUpdate {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            phone: self.phone.clone(),
            zip_code: self.zip_code.clone(),
        }
    }
}
