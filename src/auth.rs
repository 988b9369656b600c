//! Bearer-token extraction at the HTTP boundary.
//!
//! This is the only place a request's token is checked; every handler that
//! needs the caller's identity takes an [`AuthUser`] argument and trusts it
//! without re-validating (spec §6: "the core trusts the identity; it does
//! not re-verify tokens").

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::api::AppState;
use crate::error::AppError;

/// The caller identity yielded by a verified bearer token.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub user_id: i64,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .ok_or(AppError::MissingAuthHeader)?;
        let header = header
            .to_str()
            .map_err(|_| AppError::InvalidAuthHeaderFormat)?;

        let mut segments = header.splitn(2, ' ');
        let scheme = segments.next().unwrap_or("");
        let token = segments.next().ok_or(AppError::InvalidAuthHeaderFormat)?;

        if !scheme.eq_ignore_ascii_case("bearer") {
            return Err(AppError::UnsupportedAuth);
        }
        if token.trim().is_empty() {
            return Err(AppError::InvalidAuthHeaderFormat);
        }

        let user_id = state.auth_service.validate_token(token).await?;
        Ok(AuthUser { user_id })
    }
}
