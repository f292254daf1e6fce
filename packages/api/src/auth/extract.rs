//! Extractor that resolves the caller of a protected route.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use uuid::Uuid;

use crate::error::{ApiError, AuthError};
use crate::routes::ApiState;

/// Id of the user whose bearer token accompanied the request.
///
/// A missing or non-bearer `Authorization` header is [`AuthError::MissingToken`];
/// a token that fails verification is [`AuthError::InvalidToken`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser(pub Uuid);

impl FromRequestParts<ApiState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &ApiState) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or(AuthError::MissingToken)?;

        let user_id = state.tokens.verify(token)?;
        Ok(AuthUser(user_id))
    }
}
