use sqlx::PgPool;

use crate::error::{AppError, Result};
use crate::models::{User, UserStatus};

#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        username: &str,
        email: &str,
        hashed_password: &str,
        full_name: &str,
    ) -> Result<User> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, hashed_password, status, full_name, created_at, updated_at)
            VALUES ($1, $2, $3, 'ACTIVE', $4, NOW(), NOW())
            RETURNING id, username, email, hashed_password, status, full_name, created_at, updated_at
            "#,
        )
        .bind(username)
        .bind(email)
        .bind(hashed_password)
        .bind(full_name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if AppError::is_unique_violation(&e) {
                AppError::UserAlreadyExist(username.to_string())
            } else {
                AppError::Database(e)
            }
        })
    }

    pub async fn get(&self, id: i64) -> Result<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, hashed_password, status, full_name, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    pub async fn get_by_username(&self, username: &str) -> Result<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, hashed_password, status, full_name, created_at, updated_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    pub async fn update_status(&self, id: i64, status: UserStatus) -> Result<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, username, email, hashed_password, status, full_name, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)
    }
}
