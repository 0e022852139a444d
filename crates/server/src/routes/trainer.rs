use axum::{extract::State, Extension, Json};

use service::auth::domain::AuthIdentity;
use service::profile::domain::{TrainerProfilePatch, TrainerProfileView};

use crate::errors::ApiError;
use crate::routes::auth::ServerState;

#[utoipa::path(get, path = "/trainer/profile", tag = "trainer", responses((status = 200, description = "Aggregated trainer profile"), (status = 404, description = "Not Found")))]
pub async fn get_profile(
    State(state): State<ServerState>,
    Extension(identity): Extension<AuthIdentity>,
) -> Result<Json<TrainerProfileView>, ApiError> {
    let profile = state.profile_service.get_trainer_profile(identity.user_id).await?;
    Ok(Json(profile))
}

#[utoipa::path(put, path = "/trainer/profile", tag = "trainer", request_body = crate::openapi::TrainerProfileUpdateRequest, responses((status = 200, description = "Updated"), (status = 404, description = "Not Found")))]
pub async fn update_profile(
    State(state): State<ServerState>,
    Extension(identity): Extension<AuthIdentity>,
    Json(patch): Json<TrainerProfilePatch>,
) -> Result<Json<TrainerProfileView>, ApiError> {
    let profile = state.profile_service.update_trainer_profile(identity.user_id, patch).await?;
    Ok(Json(profile))
}
