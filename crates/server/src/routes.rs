use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post, put},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;

pub mod auth;
pub mod owner;
pub mod trainer;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "Liveness")))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: public auth + health routes and the
/// bearer-gated owner/trainer surface.
pub fn build_router(cors: CorsLayer, state: auth::ServerState) -> Router {
    // Public routes (health + credential exchange)
    let public = Router::new()
        .route("/health", get(health))
        .route("/auth/signup", post(auth::signup))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout));

    // Protected routes behind the bearer gate
    let protected = Router::new()
        .route("/auth/upload-photo", post(auth::upload_photo))
        .route("/owner/profile", get(owner::get_profile).put(owner::update_profile))
        .route("/owner/dogs", post(owner::add_dog))
        .route("/owner/dogs/:dog_id", put(owner::update_dog).delete(owner::delete_dog))
        .route("/owner/trainers", get(owner::list_trainers))
        .route("/owner/trainers/:trainer_id", get(owner::get_trainer))
        .route("/trainer/profile", get(trainer::get_profile).put(trainer::update_profile))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_bearer_token,
        ));

    // transport limit sits above the upload cap; the handler enforces the
    // documented maximum
    let body_limit = DefaultBodyLimit::max(state.max_upload_bytes + 1024 * 1024);

    // Compose
    public
        .merge(protected)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", crate::openapi::ApiDoc::openapi()))
        .layer(body_limit)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，包含方法和路径等，日志级别为 INFO
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                // 响应返回时打点，包含状态码与耗时
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // 失败（5xx 等）时以 ERROR 记录
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                ),
        )
}
