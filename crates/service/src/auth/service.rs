use std::sync::Arc;

use argon2::{Argon2, password_hash::{PasswordHasher, PasswordVerifier, SaltString}, PasswordHash};
use jsonwebtoken::{encode, decode, Header as JwtHeader, EncodingKey, DecodingKey, Validation, Algorithm};
use rand::rngs::OsRng;
use tracing::{info, warn, instrument};
use uuid::Uuid;

use super::domain::{SignupInput, LoginInput, AuthSession, AuthIdentity, Claims, Role};
use super::errors::AuthError;
use super::repository::AuthRepository;

/// Auth service configuration
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl_days: i64,
    pub password_algorithm: String,
}

/// Auth business service independent of web framework
pub struct AuthService {
    repo: Arc<dyn AuthRepository>,
    cfg: AuthConfig,
}

impl AuthService {
    pub fn new(repo: Arc<dyn AuthRepository>, cfg: AuthConfig) -> Self { Self { repo, cfg } }

    /// Register a new user, hash the password, create the empty
    /// role-specific profile row, and issue a bearer token.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{AuthService, service::AuthConfig};
    /// use service::auth::domain::SignupInput;
    /// use service::testing::MemoryRepository;
    /// use std::sync::Arc;
    /// let repo = Arc::new(MemoryRepository::default());
    /// let svc = AuthService::new(repo, AuthConfig { jwt_secret: "secret".into(), token_ttl_days: 7, password_algorithm: "argon2".into() });
    /// let input = SignupInput {
    ///     email: "dana@example.com".into(), password: "pupper1".into(), role: "owner".into(),
    ///     first_name: "Dana".into(), last_name: "Woof".into(), phone: "5551234567".into(), zip_code: "94107".into(),
    /// };
    /// let token = tokio_test::block_on(svc.signup(input)).unwrap();
    /// assert!(!token.is_empty());
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email, role = %input.role))]
    pub async fn signup(&self, input: SignupInput) -> Result<String, AuthError> {
        if input.email.trim().is_empty() || input.password.is_empty() {
            return Err(AuthError::Validation("email and password are required".into()));
        }
        if input.password.len() < 6 {
            return Err(AuthError::Validation("password too short (>=6)".into()));
        }
        models::user::validate_email(&input.email).map_err(|e| AuthError::Validation(e.to_string()))?;
        let role = Role::parse(&input.role)
            .ok_or_else(|| AuthError::Validation("role must be owner or trainer".into()))?;
        models::user::validate_phone(&input.phone).map_err(|e| AuthError::Validation(e.to_string()))?;
        models::user::validate_zip_code(&input.zip_code).map_err(|e| AuthError::Validation(e.to_string()))?;

        let email = models::user::normalize_email(&input.email);
        if let Some(existing) = self.repo.find_user_by_email(&email).await? {
            warn!(email = %existing.email, "signup attempt for existing user");
            return Err(AuthError::Conflict);
        }

        let user = self.repo
            .create_user(models::user::NewUser {
                email,
                role: role.as_str().to_string(),
                first_name: input.first_name,
                last_name: input.last_name,
                phone: input.phone,
                zip_code: input.zip_code,
            })
            .await?;

        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(input.password.as_bytes(), &salt)
            .map_err(|e| AuthError::HashError(e.to_string()))?
            .to_string();
        let _cred = self.repo.upsert_password(user.id, hash, self.cfg.password_algorithm.clone()).await?;

        self.repo.create_role_profile(user.id, role).await?;

        info!(user_id = %user.id, email = %user.email, role = %user.role, "user_registered");
        self.issue_token(&user)
    }

    /// Authenticate a user and issue a fresh token.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{AuthService, service::AuthConfig};
    /// use service::auth::domain::{SignupInput, LoginInput};
    /// use service::testing::MemoryRepository;
    /// use std::sync::Arc;
    /// let repo = Arc::new(MemoryRepository::default());
    /// let svc = AuthService::new(repo, AuthConfig { jwt_secret: "secret".into(), token_ttl_days: 7, password_algorithm: "argon2".into() });
    /// let _ = tokio_test::block_on(svc.signup(SignupInput {
    ///     email: "t@example.com".into(), password: "Passw0rd".into(), role: "trainer".into(),
    ///     first_name: "Tess".into(), last_name: "Lead".into(), phone: "5550001111".into(), zip_code: "94110".into(),
    /// })).unwrap();
    /// let session = tokio_test::block_on(svc.login(LoginInput { email: "t@example.com".into(), password: "Passw0rd".into() })).unwrap();
    /// assert_eq!(session.role, "trainer");
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn login(&self, input: LoginInput) -> Result<AuthSession, AuthError> {
        if input.email.trim().is_empty() || input.password.trim().is_empty() {
            return Err(AuthError::Validation("email and password are required".into()));
        }
        let email = models::user::normalize_email(&input.email);

        let user = match self.repo.find_user_by_email(&email).await? {
            Some(user) => user,
            None => {
                warn!(email = %email, "login attempt with unknown email");
                return Err(AuthError::Unauthorized);
            }
        };

        let cred = self.repo
            .get_credentials(user.id)
            .await?
            .ok_or(AuthError::Unauthorized)?;

        let parsed = PasswordHash::new(&cred.password_hash).map_err(|e| AuthError::HashError(e.to_string()))?;
        if Argon2::default().verify_password(input.password.trim().as_bytes(), &parsed).is_err() {
            warn!(email = %email, "login attempt with invalid password");
            return Err(AuthError::Unauthorized);
        }

        let token = self.issue_token(&user)?;
        info!(user_id = %user.id, email = %user.email, "user_logged_in");
        Ok(AuthSession { role: user.role.clone(), user: user.into(), token })
    }

    fn issue_token(&self, user: &models::user::Model) -> Result<String, AuthError> {
        let exp = (chrono::Utc::now() + chrono::Duration::days(self.cfg.token_ttl_days)).timestamp() as usize;
        let claims = Claims {
            sub: user.id.to_string(),
            role: user.role.clone(),
            email: user.email.clone(),
            exp,
        };
        encode(&JwtHeader::default(), &claims, &EncodingKey::from_secret(self.cfg.jwt_secret.as_bytes()))
            .map_err(|e| AuthError::TokenError(e.to_string()))
    }
}

/// Verify a bearer token's signature and expiry, returning the identity it
/// carries. Signature and expiry failures are token errors; callers decide
/// the HTTP mapping.
pub fn verify_token(secret: &str, token: &str) -> Result<AuthIdentity, AuthError> {
    let key = DecodingKey::from_secret(secret.as_bytes());
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    let data = decode::<Claims>(token, &key, &validation)
        .map_err(|e| AuthError::TokenError(e.to_string()))?;
    let user_id = Uuid::parse_str(&data.claims.sub)
        .map_err(|e| AuthError::TokenError(e.to_string()))?;
    Ok(AuthIdentity { user_id, role: data.claims.role, email: data.claims.email })
}
