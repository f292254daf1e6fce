//! Registration and login.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;

use super::ApiState;
use crate::error::{ApiError, ApiResult, AuthError};
use crate::models::{AuthResponse, LoginRequest, NewUser, RegisterRequest, User};
use crate::validation;

fn respond(state: &ApiState, user: &User) -> ApiResult<Json<AuthResponse>> {
    let token = state.tokens.issue(user.id).map_err(|e| {
        tracing::error!("Failed to sign token: {}", e);
        ApiError::internal("Internal server error")
    })?;
    Ok(Json(AuthResponse {
        token,
        user: user.to_info(),
    }))
}

pub async fn register(
    State(state): State<ApiState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> ApiResult<Json<AuthResponse>> {
    let Json(req) = payload?;
    let (Some(username), Some(email), Some(password)) = (
        validation::required(req.username),
        validation::required(req.email),
        req.password.filter(|p| !p.is_empty()),
    ) else {
        return Err(ApiError::validation("All fields are required"));
    };

    let username = validation::username(&username)?;
    let email = validation::email(&email);

    if state.db.user_exists(&username, &email).await? {
        tracing::info!("Registration rejected, user exists");
        return Err(ApiError::conflict("User with this email or username already exists"));
    }

    let password_hash = state.passwords.hash(password).await?;
    let user = state
        .db
        .create_user(NewUser {
            username,
            email,
            password_hash,
        })
        .await?;

    tracing::info!(user_id = %user.id, "User registered");
    respond(&state, &user)
}

pub async fn login(
    State(state): State<ApiState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<AuthResponse>> {
    let Json(req) = payload?;
    let (Some(email), Some(password)) = (
        validation::required(req.email),
        req.password.filter(|p| !p.is_empty()),
    ) else {
        return Err(ApiError::validation("Email and password are required"));
    };

    let email = validation::email(&email);
    let Some(user) = state.db.user_by_email(&email).await? else {
        tracing::info!("Login failed, unknown email");
        return Err(AuthError::InvalidCredentials.into());
    };

    if !state
        .passwords
        .verify(password, user.password_hash.clone())
        .await?
    {
        tracing::info!(user_id = %user.id, "Login failed, wrong password");
        return Err(AuthError::InvalidCredentials.into());
    }

    tracing::info!(user_id = %user.id, "User logged in");
    respond(&state, &user)
}
