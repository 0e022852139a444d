use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Serialize;
use uuid::Uuid;

use service::auth::domain::AuthIdentity;
use service::directory::domain::{TrainerDetail, TrainerSummary};
use service::dogs::DogPatch;
use service::profile::domain::{OwnerProfilePatch, OwnerProfileView};

use crate::errors::ApiError;
use crate::routes::auth::ServerState;

use models::owner_profile::DogEntry;

#[derive(Serialize)]
pub struct ProfileOutput<T> {
    pub profile: T,
}

#[derive(Serialize)]
pub struct DogOutput {
    pub message: String,
    pub dog: DogEntry,
}

#[utoipa::path(get, path = "/owner/profile", tag = "owner", responses((status = 200, description = "Aggregated owner profile"), (status = 404, description = "Not Found")))]
pub async fn get_profile(
    State(state): State<ServerState>,
    Extension(identity): Extension<AuthIdentity>,
) -> Result<Json<ProfileOutput<OwnerProfileView>>, ApiError> {
    let profile = state.profile_service.get_owner_profile(identity.user_id).await?;
    Ok(Json(ProfileOutput { profile }))
}

#[utoipa::path(put, path = "/owner/profile", tag = "owner", request_body = crate::openapi::OwnerProfileUpdateRequest, responses((status = 200, description = "Updated"), (status = 404, description = "Not Found")))]
pub async fn update_profile(
    State(state): State<ServerState>,
    Extension(identity): Extension<AuthIdentity>,
    Json(patch): Json<OwnerProfilePatch>,
) -> Result<Json<ProfileOutput<OwnerProfileView>>, ApiError> {
    let profile = state.profile_service.update_owner_profile(identity.user_id, patch).await?;
    Ok(Json(ProfileOutput { profile }))
}

#[utoipa::path(post, path = "/owner/dogs", tag = "owner", request_body = crate::openapi::DogRequest, responses((status = 201, description = "Dog added"), (status = 404, description = "Owner not found")))]
pub async fn add_dog(
    State(state): State<ServerState>,
    Extension(identity): Extension<AuthIdentity>,
    Json(data): Json<DogPatch>,
) -> Result<(StatusCode, Json<DogOutput>), ApiError> {
    let dog = state.dog_service.add_dog(identity.user_id, data).await?;
    Ok((
        StatusCode::CREATED,
        Json(DogOutput { message: "Dog added successfully".into(), dog }),
    ))
}

#[utoipa::path(put, path = "/owner/dogs/{dog_id}", tag = "owner", request_body = crate::openapi::DogRequest, params(("dog_id" = String, Path, description = "Dog entry id")), responses((status = 200, description = "Dog updated"), (status = 400, description = "Bad Request"), (status = 404, description = "Not Found")))]
pub async fn update_dog(
    State(state): State<ServerState>,
    Extension(identity): Extension<AuthIdentity>,
    Path(dog_id): Path<String>,
    Json(patch): Json<DogPatch>,
) -> Result<Json<DogOutput>, ApiError> {
    let dog_id = parse_dog_id(&dog_id)?;
    let dog = state.dog_service.update_dog(identity.user_id, dog_id, patch).await?;
    Ok(Json(DogOutput { message: "Dog updated successfully".into(), dog }))
}

#[utoipa::path(delete, path = "/owner/dogs/{dog_id}", tag = "owner", params(("dog_id" = String, Path, description = "Dog entry id")), responses((status = 200, description = "Dog deleted"), (status = 400, description = "Bad Request"), (status = 404, description = "Owner not found")))]
pub async fn delete_dog(
    State(state): State<ServerState>,
    Extension(identity): Extension<AuthIdentity>,
    Path(dog_id): Path<String>,
) -> Result<Json<super::auth::MessageOutput>, ApiError> {
    let dog_id = parse_dog_id(&dog_id)?;
    state.dog_service.delete_dog(identity.user_id, dog_id).await?;
    Ok(Json(super::auth::MessageOutput { message: "Dog deleted successfully".into() }))
}

fn parse_dog_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::BadRequest("Invalid dog id".into()))
}

#[utoipa::path(get, path = "/owner/trainers", tag = "owner", responses((status = 200, description = "All trainers")))]
pub async fn list_trainers(
    State(state): State<ServerState>,
    Extension(_identity): Extension<AuthIdentity>,
) -> Result<Json<Vec<TrainerSummary>>, ApiError> {
    let trainers = state.directory_service.list_trainers().await?;
    Ok(Json(trainers))
}

#[utoipa::path(get, path = "/owner/trainers/{trainer_id}", tag = "owner", params(("trainer_id" = String, Path, description = "Trainer user id")), responses((status = 200, description = "Trainer detail"), (status = 400, description = "Invalid id"), (status = 404, description = "Not Found")))]
pub async fn get_trainer(
    State(state): State<ServerState>,
    Extension(_identity): Extension<AuthIdentity>,
    Path(trainer_id): Path<String>,
) -> Result<Json<TrainerDetail>, ApiError> {
    let detail = state.directory_service.get_trainer_by_id(&trainer_id).await?;
    Ok(Json(detail))
}
