//! Profile fields of the calling user.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;

use super::ApiState;
use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::models::{ProfileImageBody, ThemeBody, User, UsernameRequest, UsernameResponse};
use crate::validation;

fn found(user: Option<User>) -> ApiResult<User> {
    user.ok_or_else(|| ApiError::NotFound("User not found".to_string()))
}

pub async fn theme(
    State(state): State<ApiState>,
    AuthUser(id): AuthUser,
    payload: Result<Json<ThemeBody>, JsonRejection>,
) -> ApiResult<Json<ThemeBody>> {
    let Json(body) = payload?;
    let user = found(state.db.set_theme(id, body.theme).await?)?;
    Ok(Json(ThemeBody { theme: user.theme() }))
}

pub async fn profile_image(
    State(state): State<ApiState>,
    AuthUser(id): AuthUser,
    payload: Result<Json<ProfileImageBody>, JsonRejection>,
) -> ApiResult<Json<ProfileImageBody>> {
    let Json(body) = payload?;
    validation::profile_image(body.profile_image.as_deref())?;

    let user = found(state.db.set_profile_image(id, body.profile_image).await?)?;
    tracing::info!(user_id = %id, cleared = user.profile_image.is_none(), "Profile image updated");
    Ok(Json(ProfileImageBody {
        profile_image: user.profile_image,
    }))
}

pub async fn username(
    State(state): State<ApiState>,
    AuthUser(id): AuthUser,
    payload: Result<Json<UsernameRequest>, JsonRejection>,
) -> ApiResult<Json<UsernameResponse>> {
    let Json(body) = payload?;
    let username = validation::username(body.username.as_deref().unwrap_or_default())?;

    if state.db.username_taken(&username, id).await? {
        return Err(ApiError::conflict("Username already taken"));
    }

    let user = match state.db.set_username(id, &username).await {
        Ok(user) => found(user)?,
        Err(crate::db::DbError::Conflict) => return Err(ApiError::conflict("Username already taken")),
        Err(e) => return Err(e.into()),
    };

    tracing::info!(user_id = %id, "Username updated");
    Ok(Json(UsernameResponse {
        username: user.username.clone(),
        user: user.to_info(),
    }))
}
