use axum::{
    extract::{Multipart, Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
    Extension, Json,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

use service::auth::domain::{AuthIdentity, LoginInput, SignupInput, UserView};
use service::auth::service::verify_token;
use service::auth::AuthService;
use service::directory::DirectoryService;
use service::dogs::DogService;
use service::profile::ProfileService;
use service::storage::PhotoStore;

use crate::errors::ApiError;

#[derive(Clone)]
pub struct ServerAuthConfig {
    pub jwt_secret: String,
}

#[derive(Clone)]
pub struct ServerState {
    pub auth_service: Arc<AuthService>,
    pub profile_service: Arc<ProfileService>,
    pub dog_service: Arc<DogService>,
    pub directory_service: Arc<DirectoryService>,
    pub photos: Arc<dyn PhotoStore>,
    pub auth: ServerAuthConfig,
    pub max_upload_bytes: usize,
}

#[derive(Serialize)]
pub struct SignupOutput { pub token: String }

#[derive(Serialize)]
pub struct LoginOutput {
    pub user: UserView,
    pub token: String,
    pub role: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct MessageOutput { pub message: String }

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadPhotoOutput {
    pub message: String,
    pub photo_url: String,
    pub user: UserView,
}

#[utoipa::path(post, path = "/auth/signup", tag = "auth", request_body = crate::openapi::SignupRequest, responses((status = 201, description = "Created"), (status = 400, description = "Bad Request")))]
pub async fn signup(
    State(state): State<ServerState>,
    Json(input): Json<SignupInput>,
) -> Result<(StatusCode, Json<SignupOutput>), ApiError> {
    let token = state.auth_service.signup(input).await?;
    Ok((StatusCode::CREATED, Json(SignupOutput { token })))
}

#[utoipa::path(post, path = "/auth/login", tag = "auth", request_body = crate::openapi::LoginRequest, responses((status = 200, description = "Logged In"), (status = 400, description = "Bad Request"), (status = 401, description = "Unauthorized")))]
pub async fn login(
    State(state): State<ServerState>,
    Json(input): Json<LoginInput>,
) -> Result<Json<LoginOutput>, ApiError> {
    let session = state.auth_service.login(input).await?;
    Ok(Json(LoginOutput {
        user: session.user,
        token: session.token,
        role: session.role,
        message: "Login successful".into(),
    }))
}

/// Stateless logout: nothing to invalidate server-side, but the event is
/// logged for audit. A bearer token, when present, only names the actor.
#[utoipa::path(post, path = "/auth/logout", tag = "auth", responses((status = 200, description = "Logged Out")))]
pub async fn logout(
    State(state): State<ServerState>,
    req: Request,
) -> Json<MessageOutput> {
    let actor = bearer_token(&req)
        .and_then(|token| verify_token(&state.auth.jwt_secret, token).ok());
    match actor {
        Some(identity) => info!(user_id = %identity.user_id, email = %identity.email, "user_logged_out"),
        None => info!("user_logged_out_anonymously"),
    }
    Json(MessageOutput { message: "Logged out successfully".into() })
}

#[utoipa::path(post, path = "/auth/upload-photo", tag = "auth", responses((status = 200, description = "Uploaded"), (status = 400, description = "Bad Request"), (status = 401, description = "Unauthorized"), (status = 404, description = "Not Found")))]
pub async fn upload_photo(
    State(state): State<ServerState>,
    Extension(identity): Extension<AuthIdentity>,
    mut multipart: Multipart,
) -> Result<Json<UploadPhotoOutput>, ApiError> {
    let mut uploaded: Option<(String, String, Vec<u8>)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("upload error: {}", e)))?
    {
        if field.file_name().is_none() && field.name() != Some("profilePhoto") {
            continue;
        }
        let file_name = field.file_name().unwrap_or("photo.jpg").to_string();
        let content_type = field.content_type().unwrap_or("").to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("upload error: {}", e)))?;
        uploaded = Some((file_name, content_type, bytes.to_vec()));
        break;
    }

    let Some((file_name, content_type, bytes)) = uploaded else {
        return Err(ApiError::BadRequest("No file uploaded".into()));
    };
    if !content_type.starts_with("image/") {
        return Err(ApiError::BadRequest("Only image files are allowed".into()));
    }
    if bytes.len() > state.max_upload_bytes {
        return Err(ApiError::BadRequest("File too large. Maximum size is 5MB.".into()));
    }

    let key = format!(
        "profile-photos/{}-{}-{}",
        identity.user_id,
        chrono::Utc::now().timestamp_millis(),
        file_name
    );
    let photo_url = state.photos.put_photo(&key, bytes, &content_type).await?;
    let user = state.profile_service.set_profile_photo(identity.user_id, &photo_url).await?;

    info!(user_id = %identity.user_id, key = %key, "profile_photo_uploaded");
    Ok(Json(UploadPhotoOutput {
        message: "Profile photo uploaded successfully".into(),
        photo_url,
        user,
    }))
}

fn bearer_token(req: &Request) -> Option<&str> {
    req.headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
}

/// Bearer gate for protected routes. Missing or malformed credentials are
/// 401; a token that fails signature or expiry checks is 403. On success
/// the decoded identity rides the request extensions and downstream
/// handlers trust it without re-validation.
pub async fn require_bearer_token(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let path = req.uri().path().to_string();

    let authz = req
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());
    let Some(header) = authz else {
        warn!(path = %path, "missing Authorization header");
        return Err(ApiError::Unauthorized("Access token required".into()));
    };
    let Some(token) = header.strip_prefix("Bearer ") else {
        warn!(path = %path, "invalid Authorization format (expect Bearer)");
        return Err(ApiError::Unauthorized("Access token required".into()));
    };

    match verify_token(&state.auth.jwt_secret, token) {
        Ok(identity) => {
            req.extensions_mut().insert(identity);
            Ok(next.run(req).await)
        }
        Err(e) => {
            warn!(path = %path, err = %e, "token validation failed");
            Err(ApiError::Forbidden("Invalid or expired token".into()))
        }
    }
}
