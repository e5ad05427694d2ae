//! Authentication service - login and token verification.
//!
//! Issues and verifies the bearer tokens the HTTP layer uses to decide
//! who is calling; the capability checks themselves live next to the
//! handlers.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{Config, SECONDS_PER_HOUR, TOKEN_TYPE_BEARER};
use crate::domain::{Password, User};
use crate::errors::{AppError, AppResult};
use crate::infra::UserRepository;

/// JWT claims payload
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub login: String,
    pub roles: Vec<String>,
    pub exp: i64,
    pub iat: i64,
}

/// Token response returned after successful authentication
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    /// JWT access token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
    /// Token type (always "Bearer")
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Token expiration time in seconds
    #[schema(example = 86400)]
    pub expires_in: i64,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Login and return JWT token
    async fn login(&self, login: String, pass: String) -> AppResult<TokenResponse>;

    /// Verify JWT token and extract claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;
}

/// Generate JWT token for a user
fn generate_token(user: &User, config: &Config) -> AppResult<TokenResponse> {
    let now = Utc::now();
    let expires_at = now + Duration::hours(config.jwt_expiration_hours);

    let claims = Claims {
        sub: user.id(),
        login: user.login().to_string(),
        roles: user.roles().to_vec(),
        exp: expires_at.timestamp(),
        iat: now.timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret_bytes()),
    )?;

    Ok(TokenResponse {
        access_token: token,
        token_type: TOKEN_TYPE_BEARER.to_string(),
        expires_in: config.jwt_expiration_hours * SECONDS_PER_HOUR,
    })
}

/// Concrete implementation of AuthService.
pub struct Authenticator {
    repo: Arc<dyn UserRepository>,
    config: Config,
}

impl Authenticator {
    /// Create new auth service instance
    pub fn new(repo: Arc<dyn UserRepository>, config: Config) -> Self {
        Self { repo, config }
    }
}

#[async_trait]
impl AuthService for Authenticator {
    async fn login(&self, login: String, pass: String) -> AppResult<TokenResponse> {
        let user = self.repo.find_by_login(&login).await?;

        // SECURITY: verify against a dummy hash when the login is unknown
        // so response timing does not enumerate valid logins.
        let dummy_hash =
            "$argon2id$v=19$m=19456,t=2,p=1$dummysalt123456$dummyhash1234567890123456789012";

        let stored_hash = user
            .as_ref()
            .map(|u| u.password_hash().to_string())
            .unwrap_or_else(|| dummy_hash.to_string());

        let password_valid = Password::from_hash(stored_hash).verify(&pass);

        match user {
            Some(user) if password_valid => generate_token(&user, &self.config),
            _ => Err(AppError::InvalidCredentials),
        }
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ROLE_ROOT, ROLE_USER};
    use crate::infra::MockUserRepository;
    use crate::services::PasswordProcessor;

    fn test_config() -> Config {
        Config::with_secret("test-secret-key-for-testing-only-32chars")
    }

    fn stored_user(login: &str, pass: &str) -> User {
        let mut user = User::new();
        user.set_login(login)
            .set_phone("+1000")
            .set_roles([ROLE_ROOT])
            .set_plain_password(Some(pass.to_string()));
        PasswordProcessor::new().process(&mut user).unwrap();
        user
    }

    #[tokio::test]
    async fn login_issues_verifiable_token_with_roles() {
        let user = stored_user("root", "rootpass");
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_login()
            .returning(move |_| Ok(Some(user.clone())));

        let auth = Authenticator::new(Arc::new(repo), test_config());
        let token = auth
            .login("root".into(), "rootpass".into())
            .await
            .unwrap();

        let claims = auth.verify_token(&token.access_token).unwrap();
        assert_eq!(claims.login, "root");
        assert!(claims.roles.iter().any(|r| r == ROLE_ROOT));
        assert!(claims.roles.iter().any(|r| r == ROLE_USER));
    }

    #[tokio::test]
    async fn login_rejects_wrong_password() {
        let user = stored_user("root", "rootpass");
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_login()
            .returning(move |_| Ok(Some(user.clone())));

        let auth = Authenticator::new(Arc::new(repo), test_config());
        let result = auth.login("root".into(), "wrong".into()).await;

        assert!(matches!(result.unwrap_err(), AppError::InvalidCredentials));
    }

    #[tokio::test]
    async fn login_rejects_unknown_login() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_login().returning(|_| Ok(None));

        let auth = Authenticator::new(Arc::new(repo), test_config());
        let result = auth.login("ghost".into(), "whatever".into()).await;

        assert!(matches!(result.unwrap_err(), AppError::InvalidCredentials));
    }
}
