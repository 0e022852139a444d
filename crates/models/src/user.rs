use sea_orm::{entity::prelude::*, Set, DatabaseConnection};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors;

pub const ROLE_OWNER: &str = "owner";
pub const ROLE_TRAINER: &str = "trainer";

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub email: String,
    pub role: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub zip_code: String,
    pub profile_photo: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Lowercase + trim, applied before uniqueness checks and lookups.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub fn validate_email(email: &str) -> Result<(), errors::ModelError> {
    let email = email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(errors::ModelError::Validation("invalid email".into()));
    }
    Ok(())
}

pub fn validate_role(role: &str) -> Result<(), errors::ModelError> {
    if role != ROLE_OWNER && role != ROLE_TRAINER {
        return Err(errors::ModelError::Validation("role must be owner or trainer".into()));
    }
    Ok(())
}

pub fn validate_phone(phone: &str) -> Result<(), errors::ModelError> {
    if phone.len() != 10 || !phone.chars().all(|c| c.is_ascii_digit()) {
        return Err(errors::ModelError::Validation("phone must be 10 digits".into()));
    }
    Ok(())
}

pub fn validate_zip_code(zip: &str) -> Result<(), errors::ModelError> {
    if !(5..=6).contains(&zip.len()) || !zip.chars().all(|c| c.is_ascii_digit()) {
        return Err(errors::ModelError::Validation("zip code must be 5-6 digits".into()));
    }
    Ok(())
}

#[derive(Clone, Debug)]
pub struct NewUser {
    pub email: String,
    pub role: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub zip_code: String,
}

/// Contact fields writable through the profile update paths. Role and email
/// are immutable after signup.
#[derive(Clone, Debug, Default)]
pub struct ContactUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub zip_code: Option<String>,
}

pub async fn create(db: &DatabaseConnection, input: NewUser) -> Result<Model, errors::ModelError> {
    validate_email(&input.email)?;
    validate_role(&input.role)?;
    validate_phone(&input.phone)?;
    validate_zip_code(&input.zip_code)?;
    if input.first_name.trim().is_empty() || input.last_name.trim().is_empty() {
        return Err(errors::ModelError::Validation("first and last name required".into()));
    }
    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        email: Set(normalize_email(&input.email)),
        role: Set(input.role),
        first_name: Set(input.first_name.trim().to_string()),
        last_name: Set(input.last_name.trim().to_string()),
        phone: Set(input.phone),
        zip_code: Set(input.zip_code),
        profile_photo: Set(String::new()),
        created_at: Set(now),
        updated_at: Set(now),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// Applies only the submitted contact fields; returns `None` when no user
/// row exists (callers treat that as not-found, never as an upsert).
pub async fn update_contact(
    db: &DatabaseConnection,
    id: Uuid,
    update: ContactUpdate,
) -> Result<Option<Model>, errors::ModelError> {
    let found = Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))?;
    let Some(found) = found else { return Ok(None) };
    let mut am: ActiveModel = found.into();
    if let Some(first_name) = update.first_name {
        am.first_name = Set(first_name);
    }
    if let Some(last_name) = update.last_name {
        am.last_name = Set(last_name);
    }
    if let Some(phone) = update.phone {
        validate_phone(&phone)?;
        am.phone = Set(phone);
    }
    if let Some(zip_code) = update.zip_code {
        validate_zip_code(&zip_code)?;
        am.zip_code = Set(zip_code);
    }
    am.updated_at = Set(Utc::now().into());
    let updated = am.update(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))?;
    Ok(Some(updated))
}

pub async fn set_profile_photo(
    db: &DatabaseConnection,
    id: Uuid,
    url: &str,
) -> Result<Option<Model>, errors::ModelError> {
    let found = Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))?;
    let Some(found) = found else { return Ok(None) };
    let mut am: ActiveModel = found.into();
    am.profile_photo = Set(url.to_string());
    am.updated_at = Set(Utc::now().into());
    let updated = am.update(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))?;
    Ok(Some(updated))
}

pub async fn hard_delete(db: &DatabaseConnection, id: Uuid) -> Result<(), errors::ModelError> {
    Entity::delete_by_id(id).exec(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))?;
    Ok(())
}
