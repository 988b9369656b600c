use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use chrono::{Duration, Utc};
use rand::RngCore;
use sha2::{Digest, Sha256};
use sqlx::PgPool;

use crate::error::{AppError, Result};
use crate::repositories::AuthTokenRepository;

/// Hashes a plaintext password with bcrypt's default cost.
pub fn hash_password(password: &str) -> Result<String> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e)))
}

/// Verifies a plaintext password against a bcrypt hash.
pub fn verify_password(password: &str, hashed: &str) -> Result<bool> {
    bcrypt::verify(password, hashed).map_err(|e| AppError::Internal(anyhow::anyhow!(e)))
}

/// Salts the digest with the server-held secret so a leaked
/// `auth_tokens` table alone (without `token_secret`) can't be used to
/// precompute valid token hashes offline.
fn salted_hex(secret: &str, raw: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(secret.as_bytes());
    hasher.update(raw.as_bytes());
    hex::encode(hasher.finalize())
}

/// Mints and validates opaque bearer tokens. The raw token is returned to
/// the caller exactly once, at mint time; everywhere else only its salted
/// hash is known.
#[derive(Clone)]
pub struct AuthService {
    tokens: AuthTokenRepository,
    token_secret: String,
    ttl_seconds: i64,
}

impl AuthService {
    pub fn new(pool: PgPool, token_secret: String, ttl_seconds: i64) -> Self {
        Self {
            tokens: AuthTokenRepository::new(pool),
            token_secret,
            ttl_seconds,
        }
    }

    pub async fn mint_token(&self, user_id: i64) -> Result<String> {
        let mut bytes = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut bytes);
        let raw_token = URL_SAFE_NO_PAD.encode(bytes);

        let expires_at = Utc::now() + Duration::seconds(self.ttl_seconds);
        self.tokens
            .create(&salted_hex(&self.token_secret, &raw_token), user_id, expires_at)
            .await?;

        Ok(raw_token)
    }

    pub async fn validate_token(&self, raw_token: &str) -> Result<i64> {
        let record = self
            .tokens
            .get(&salted_hex(&self.token_secret, raw_token))
            .await?
            .ok_or(AppError::InvalidToken)?;

        if record.expires_at < Utc::now() {
            return Err(AppError::ExpiredToken);
        }

        Ok(record.user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_round_trip() {
        let hashed = hash_password("correct horse battery staple").unwrap();
        assert!(verify_password("correct horse battery staple", &hashed).unwrap());
        assert!(!verify_password("wrong password", &hashed).unwrap());
    }
}
