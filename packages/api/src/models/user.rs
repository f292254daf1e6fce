//! # User model for registered accounts
//!
//! ## [`User`] (server only)
//!
//! The complete row of the `users` table. It derives [`sqlx::FromRow`] so it can be
//! loaded directly from queries and contains every column:
//!
//! - `id`: primary key (`UUID v4`).
//! - `username`: unique, 3 to 20 characters after trimming.
//! - `email`: unique, stored trimmed and lowercased.
//! - `password_hash`: Argon2id PHC string. Never leaves the server.
//! - `theme`: `"light"` or `"dark"`.
//! - `profile_image`: optional `data:image/…` URI.
//! - `created_at`: audit timestamp.
//!
//! [`User::to_info`] projects this into a [`UserInfo`], the only user shape that is
//! ever serialized to a client.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use store::models::{Theme, UserInfo};
use uuid::Uuid;

/// Full user record from the database.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub theme: String,
    pub profile_image: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Stored theme; rows with an unknown value fall back to the default.
    pub fn theme(&self) -> Theme {
        self.theme.parse().unwrap_or_default()
    }

    /// Convert to UserInfo for client consumption.
    pub fn to_info(&self) -> UserInfo {
        UserInfo {
            id: self.id.to_string(),
            username: self.username.clone(),
            email: self.email.clone(),
            theme: self.theme(),
            profile_image: self.profile_image.clone(),
        }
    }
}

/// Fields needed to create a user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}
