//! # Durable client session
//!
//! A [`Session`] is what survives a page reload: the bearer token and the public
//! projection of the signed-in user. The [`SessionStore`] trait abstracts where it
//! lives so the same controller code runs in the browser and in tests.
//!
//! | Implementation | Platform | Backing |
//! |----------------|----------|---------|
//! | [`crate::MemoryStore`] | any | process memory (tests, fallback) |
//! | [`crate::FileStore`] | native | `session.toml` in a data directory |
//! | [`crate::LocalStorageStore`] | web (`web` feature) | `window.localStorage` |
//!
//! The theme is stored separately because a signed-out visitor can still pick one.

use serde::{Deserialize, Serialize};

use crate::models::{Theme, UserInfo};

/// Token plus cached user projection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: UserInfo,
}

impl Session {
    pub fn new(token: impl Into<String>, user: UserInfo) -> Self {
        Self {
            token: token.into(),
            user,
        }
    }
}

/// Async interface for persisting the session between page loads.
///
/// Reads swallow storage errors and report "nothing stored"; a broken store
/// degrades to a signed-out client rather than a crash.
pub trait SessionStore {
    async fn load(&self) -> Option<Session>;

    async fn save(&self, session: &Session);

    async fn clear(&self);

    async fn load_theme(&self) -> Option<Theme>;

    async fn save_theme(&self, theme: Theme);
}
