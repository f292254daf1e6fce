//! # REST routes
//!
//! | Method | Path | Auth | Handler |
//! |--------|------|------|---------|
//! | POST | `/register` | no | [`auth::register`] |
//! | POST | `/login` | no | [`auth::login`] |
//! | GET | `/notes` | bearer | [`notes::list`] |
//! | POST | `/notes` | bearer | [`notes::create`] |
//! | PUT | `/notes/{id}` | bearer | [`notes::update`] |
//! | DELETE | `/notes/{id}` | bearer | [`notes::remove`] |
//! | PUT | `/user/theme` | bearer | [`user::theme`] |
//! | PUT | `/user/profile-image` | bearer | [`user::profile_image`] |
//! | PUT | `/user/username` | bearer | [`user::username`] |
//!
//! The binary nests this router under `/api`.

pub mod auth;
pub mod notes;
pub mod user;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::{Passwords, TokenIssuer};
use crate::db::Database;

/// Profile images travel as base64 inside JSON.
pub const BODY_LIMIT: usize = 10 * 1024 * 1024;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct ApiState {
    pub db: Arc<dyn Database>,
    pub tokens: Arc<TokenIssuer>,
    pub passwords: Passwords,
}

impl ApiState {
    pub fn new(db: Arc<dyn Database>, tokens: TokenIssuer, passwords: Passwords) -> Self {
        Self {
            db,
            tokens: Arc::new(tokens),
            passwords,
        }
    }
}

pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/notes", get(notes::list).post(notes::create))
        .route("/notes/{id}", put(notes::update).delete(notes::remove))
        .route("/user/theme", put(user::theme))
        .route("/user/profile-image", put(user::profile_image))
        .route("/user/username", put(user::username))
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
