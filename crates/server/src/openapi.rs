use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub role: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub zip_code: String,
}

#[derive(Serialize, ToSchema)]
pub struct LoginRequest { pub email: String, pub password: String }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocationDoc {
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OwnerProfileUpdateRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub zip_code: Option<String>,
    pub location: Option<LocationDoc>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDoc {
    #[serde(rename = "type")]
    pub service_type: Option<String>,
    pub description: Option<String>,
    pub duration: Option<u32>,
    pub price: Option<f64>,
}

#[derive(Serialize, ToSchema)]
pub struct CertificationDoc { pub name: Option<String> }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrainerProfileUpdateRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub zip_code: Option<String>,
    pub years_of_experience: Option<u32>,
    pub certifications: Option<Vec<CertificationDoc>>,
    pub services: Option<Vec<ServiceDoc>>,
    pub bio: Option<String>,
    pub specializations: Option<Vec<String>>,
    pub location: Option<LocationDoc>,
}

#[derive(Serialize, ToSchema)]
pub struct DogRequest {
    pub name: Option<String>,
    pub breed: Option<String>,
    pub age: Option<u32>,
    pub size: Option<String>,
    pub photos: Option<Vec<String>>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::auth::signup,
        crate::routes::auth::login,
        crate::routes::auth::logout,
        crate::routes::auth::upload_photo,
        crate::routes::owner::get_profile,
        crate::routes::owner::update_profile,
        crate::routes::owner::add_dog,
        crate::routes::owner::update_dog,
        crate::routes::owner::delete_dog,
        crate::routes::owner::list_trainers,
        crate::routes::owner::get_trainer,
        crate::routes::trainer::get_profile,
        crate::routes::trainer::update_profile,
    ),
    components(
        schemas(
            HealthResponse,
            SignupRequest,
            LoginRequest,
            LocationDoc,
            OwnerProfileUpdateRequest,
            ServiceDoc,
            CertificationDoc,
            TrainerProfileUpdateRequest,
            DogRequest,
        )
    ),
    tags(
        (name = "health"),
        (name = "auth"),
        (name = "owner"),
        (name = "trainer"),
    )
)]
pub struct ApiDoc;
