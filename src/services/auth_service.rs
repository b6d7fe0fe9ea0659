//! Authentication service: login and token verification.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::config::{Config, SECONDS_PER_HOUR};
use crate::domain::{Manager, ManagerResponse, Password};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// JWT claims payload
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i32,
    pub email: String,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}

/// Response returned after a successful login.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub manager: ManagerResponse,
    /// JWT access token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub token: String,
    /// Token lifetime in seconds
    #[schema(example = 86400)]
    pub expires_in: i64,
}

/// Authentication operations.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Login and return the manager with a fresh JWT.
    async fn login(&self, email: String, password: String) -> AppResult<LoginResponse>;

    /// Verify a JWT and extract its claims.
    fn verify_token(&self, token: &str) -> AppResult<Claims>;

    /// The manager record behind an authenticated request.
    async fn current_manager(&self, manager_id: i32) -> AppResult<ManagerResponse>;
}

fn generate_token(manager: &Manager, config: &Config) -> AppResult<(String, i64)> {
    let now = Utc::now();
    let expires_at = now + Duration::hours(config.jwt_expiration_hours);

    let claims = Claims {
        sub: manager.id,
        email: manager.email.clone(),
        role: manager.role.to_string(),
        exp: expires_at.timestamp(),
        iat: now.timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret_bytes()),
    )?;

    Ok((token, config.jwt_expiration_hours * SECONDS_PER_HOUR))
}

/// Concrete implementation backed by the manager repository.
pub struct Authenticator<U: UnitOfWork> {
    uow: Arc<U>,
    config: Config,
}

impl<U: UnitOfWork> Authenticator<U> {
    pub fn new(uow: Arc<U>, config: Config) -> Self {
        Self { uow, config }
    }
}

#[async_trait]
impl<U: UnitOfWork> AuthService for Authenticator<U> {
    async fn login(&self, email: String, password: String) -> AppResult<LoginResponse> {
        let manager = self.uow.managers().find_by_email(&email).await?;

        // SECURITY: verify against a dummy hash when the account does not
        // exist so response timing cannot enumerate valid emails.
        let dummy_hash =
            "$argon2id$v=19$m=19456,t=2,p=1$dummysalt123456$dummyhash1234567890123456789012";

        let password_hash = manager
            .as_ref()
            .map(|m| m.password_hash.clone())
            .unwrap_or_else(|| dummy_hash.to_string());
        let password_valid = Password::from_hash(password_hash).verify(&password);

        let Some(manager) = manager else {
            return Err(AppError::InvalidCredentials);
        };
        if !password_valid {
            return Err(AppError::InvalidCredentials);
        }

        let (token, expires_in) = generate_token(&manager, &self.config)?;
        tracing::info!(manager_id = manager.id, "Manager logged in");

        Ok(LoginResponse {
            manager: ManagerResponse::from(manager),
            token,
            expires_in,
        })
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret_bytes()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }

    async fn current_manager(&self, manager_id: i32) -> AppResult<ManagerResponse> {
        let manager = self
            .uow
            .managers()
            .find_by_id(manager_id)
            .await?
            .ok_or(AppError::Unauthorized)?;
        Ok(ManagerResponse::from(manager))
    }
}
