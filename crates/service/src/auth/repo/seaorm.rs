use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use uuid::Uuid;

use crate::auth::domain::Role;
use crate::auth::errors::AuthError;
use crate::auth::repository::{AuthRepository, Credentials};

pub struct SeaOrmAuthRepository {
    pub db: DatabaseConnection,
}

#[async_trait::async_trait]
impl AuthRepository for SeaOrmAuthRepository {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<models::user::Model>, AuthError> {
        let res = models::user::Entity::find()
            .filter(models::user::Column::Email.eq(models::user::normalize_email(email)))
            .one(&self.db)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))?;
        Ok(res)
    }

    async fn create_user(&self, input: models::user::NewUser) -> Result<models::user::Model, AuthError> {
        models::user::create(&self.db, input)
            .await
            .map_err(|e| AuthError::Validation(e.to_string()))
    }

    async fn get_credentials(&self, user_id: Uuid) -> Result<Option<Credentials>, AuthError> {
        let res = models::user_credentials::find_by_user_id(&self.db, user_id)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))?;
        Ok(res.map(|c| Credentials {
            user_id: c.user_id,
            password_hash: c.password_hash,
            password_algorithm: c.password_algorithm,
        }))
    }

    async fn upsert_password(&self, user_id: Uuid, password_hash: String, password_algorithm: String) -> Result<Credentials, AuthError> {
        let c = models::user_credentials::upsert_password(&self.db, user_id, password_hash, &password_algorithm)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))?;
        Ok(Credentials {
            user_id: c.user_id,
            password_hash: c.password_hash,
            password_algorithm: c.password_algorithm,
        })
    }

    async fn create_role_profile(&self, user_id: Uuid, role: Role) -> Result<(), AuthError> {
        match role {
            Role::Owner => {
                models::owner_profile::create_empty(&self.db, user_id)
                    .await
                    .map_err(|e| AuthError::Repository(e.to_string()))?;
            }
            Role::Trainer => {
                models::trainer_profile::create_empty(&self.db, user_id)
                    .await
                    .map_err(|e| AuthError::Repository(e.to_string()))?;
            }
        }
        Ok(())
    }
}
