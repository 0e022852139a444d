use std::{env, net::SocketAddr, sync::Arc, time::Duration};

use axum::Router;
use common::utils::logging::init_logging_default;
use dotenvy::dotenv;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::routes::{self, auth};
use service::auth::repo::seaorm::SeaOrmAuthRepository;
use service::auth::service::AuthConfig;
use service::auth::AuthService;
use service::directory::DirectoryService;
use service::dogs::DogService;
use service::profile::repo::seaorm::SeaOrmProfileRepository;
use service::profile::repository::ProfileRepository;
use service::profile::ProfileService;
use service::storage::{PhotoStore, S3PhotoStore};

/// Initialize logging via shared common utils
fn init_logging() {
    init_logging_default();
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load the app config, falling back to env-populated defaults when no
/// config.toml is present.
fn load_config() -> configs::AppConfig {
    match configs::load_default() {
        Ok(mut cfg) => {
            cfg.database.normalize_from_env();
            cfg.auth.normalize_from_env();
            cfg.storage.normalize_from_env();
            cfg
        }
        Err(_) => {
            let mut cfg = configs::AppConfig::default();
            cfg.database.normalize_from_env();
            cfg.auth.normalize_from_env();
            cfg.storage.normalize_from_env();
            cfg
        }
    }
}

/// Load host/port from configs or env vars, with sensible fallbacks
fn load_bind_addr(cfg: &configs::ServerConfig) -> anyhow::Result<SocketAddr> {
    let host = env::var("SERVER_HOST").unwrap_or_else(|_| cfg.host.clone());
    let port = env::var("SERVER_PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(cfg.port);
    Ok(format!("{}:{}", host, port).parse()?)
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    let cfg = load_config();

    // DB connection
    let db = if cfg.database.url.trim().is_empty() {
        models::db::connect().await?
    } else {
        models::db::connect_with(&cfg.database).await?
    };

    // JWT secret
    let jwt_secret = if cfg.auth.jwt_secret.trim().is_empty() {
        env::var("JWT_SECRET").unwrap_or_else(|_| "dev-secret-change-me".to_string())
    } else {
        cfg.auth.jwt_secret.clone()
    };

    // Object storage for profile photos
    let photos: Arc<dyn PhotoStore> = Arc::new(S3PhotoStore::from_config(&cfg.storage).await);

    let auth_repo = Arc::new(SeaOrmAuthRepository { db: db.clone() });
    let profile_repo: Arc<dyn ProfileRepository> = Arc::new(SeaOrmProfileRepository { db });

    let state = auth::ServerState {
        auth_service: Arc::new(AuthService::new(
            auth_repo,
            AuthConfig {
                jwt_secret: jwt_secret.clone(),
                token_ttl_days: cfg.auth.token_ttl_days,
                password_algorithm: "argon2".into(),
            },
        )),
        profile_service: Arc::new(ProfileService::new(
            Arc::clone(&profile_repo),
            Arc::clone(&photos),
            Duration::from_secs(cfg.storage.signed_url_ttl_secs),
        )),
        dog_service: Arc::new(DogService::new(Arc::clone(&profile_repo))),
        directory_service: Arc::new(DirectoryService::new(Arc::clone(&profile_repo))),
        photos,
        auth: auth::ServerAuthConfig { jwt_secret },
        max_upload_bytes: cfg.storage.max_upload_bytes,
    };

    // Build router
    let cors = build_cors();
    let app: Router = routes::build_router(cors, state);

    // Bind and serve
    let addr = load_bind_addr(&cfg.server)?;
    info!(%addr, "starting server crate");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
