use sqlx::PgPool;

use crate::error::{AppError, Result};
use crate::models::User;
use crate::repositories::UserRepository;
use crate::services::auth_service::{hash_password, verify_password, AuthService};

/// Fields needed to register a new user.
#[derive(Debug, Clone)]
pub struct RegisterUserRequest {
    pub username: String,
    pub password: String,
    pub full_name: String,
    pub email: String,
}

/// User registration, lookup, and login.
///
/// Owns an `AuthService` so `login` can mint a bearer token in the same
/// place it verifies the password, without exposing the token machinery
/// to callers that only need `find_by_id`/`find_by_username`.
#[derive(Clone)]
pub struct UserService {
    users: UserRepository,
    auth: AuthService,
}

impl UserService {
    pub fn new(pool: PgPool, token_secret: String, token_ttl_seconds: i64) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            auth: AuthService::new(pool, token_secret, token_ttl_seconds),
        }
    }

    pub async fn register(&self, request: RegisterUserRequest) -> Result<User> {
        if request.username.trim().is_empty() {
            return Err(AppError::Validation("username cannot be empty".to_string()));
        }
        if request.username.len() < 3 || request.username.len() > 32 {
            return Err(AppError::Validation(
                "username must be between 3 and 32 characters".to_string(),
            ));
        }
        if !request.username.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(AppError::Validation(
                "username must be alphanumeric".to_string(),
            ));
        }
        if !request.email.contains('@') {
            return Err(AppError::Validation("email is not valid".to_string()));
        }

        let hashed = hash_password(&request.password)?;

        self.users
            .create(&request.username, &request.email, &hashed, &request.full_name)
            .await
    }

    pub async fn find_by_id(&self, id: i64) -> Result<User> {
        self.users
            .get(id)
            .await?
            .ok_or_else(|| AppError::UserNotFound(id.to_string()))
    }

    pub async fn find_by_username(&self, username: &str) -> Result<User> {
        self.users
            .get_by_username(username)
            .await?
            .ok_or_else(|| AppError::UserNotFound(username.to_string()))
    }

    /// Verifies credentials and mints a bearer token. Blocked users are
    /// rejected even with a correct password.
    pub async fn login(&self, username: &str, password: &str) -> Result<(String, User)> {
        let user = self.find_by_username(username).await?;

        if !user.is_active() {
            return Err(AppError::Unauthorized);
        }

        if !verify_password(password, &user.hashed_password)? {
            return Err(AppError::IncorrectPassword);
        }

        let token = self.auth.mint_token(user.id).await?;
        Ok((token, user))
    }
}
