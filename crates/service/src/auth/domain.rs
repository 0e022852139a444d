use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Marketplace role, fixed at signup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Owner,
    Trainer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Owner => models::user::ROLE_OWNER,
            Role::Trainer => models::user::ROLE_TRAINER,
        }
    }

    pub fn parse(s: &str) -> Option<Role> {
        match s {
            models::user::ROLE_OWNER => Some(Role::Owner),
            models::user::ROLE_TRAINER => Some(Role::Trainer),
            _ => None,
        }
    }
}

/// Signup input. Fields default to empty so missing keys surface as
/// validation failures rather than deserialization rejections.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SignupInput {
    pub email: String,
    pub password: String,
    pub role: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub zip_code: String,
}

impl Default for SignupInput {
    fn default() -> Self {
        Self {
            email: String::new(),
            password: String::new(),
            role: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            phone: String::new(),
            zip_code: String::new(),
        }
    }
}

/// Login input
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Sanitized user view; never carries credential material.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: Uuid,
    pub email: String,
    pub role: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub zip_code: String,
    pub profile_photo: String,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
}

impl From<models::user::Model> for UserView {
    fn from(m: models::user::Model) -> Self {
        Self {
            id: m.id,
            email: m.email,
            role: m.role,
            first_name: m.first_name,
            last_name: m.last_name,
            phone: m.phone,
            zip_code: m.zip_code,
            profile_photo: m.profile_photo,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

/// Login result (session)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    pub user: UserView,
    pub token: String,
    pub role: String,
}

/// Bearer token payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: String,
    pub email: String,
    pub exp: usize,
}

/// Verified identity attached to a request after the bearer gate passes.
/// Downstream components trust these fields without re-validation.
#[derive(Debug, Clone)]
pub struct AuthIdentity {
    pub user_id: Uuid,
    pub role: String,
    pub email: String,
}
