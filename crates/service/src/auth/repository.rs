use async_trait::async_trait;
use uuid::Uuid;

use super::domain::Role;
use super::errors::AuthError;

/// Hashed credential material, separated from the user row.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub user_id: Uuid,
    pub password_hash: String,
    pub password_algorithm: String,
}

/// Repository abstraction for auth-related persistence.
#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<models::user::Model>, AuthError>;
    async fn create_user(&self, input: models::user::NewUser) -> Result<models::user::Model, AuthError>;

    async fn get_credentials(&self, user_id: Uuid) -> Result<Option<Credentials>, AuthError>;
    async fn upsert_password(&self, user_id: Uuid, password_hash: String, password_algorithm: String) -> Result<Credentials, AuthError>;

    /// Create the empty role-specific profile row at signup so later
    /// profile and dog operations have a document to mutate.
    async fn create_role_profile(&self, user_id: Uuid, role: Role) -> Result<(), AuthError>;
}
