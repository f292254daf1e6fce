//! # Browser session store
//!
//! [`LocalStorageStore`] keeps the session in `window.localStorage` under the same
//! keys the page has always used (`token`, `user`, `theme`), so a reload restores
//! the signed-in user.
//!
//! All errors are swallowed: private browsing or a full quota degrades to a
//! signed-out client.

use web_sys::Storage;

use crate::models::{Theme, UserInfo};
use crate::session::{Session, SessionStore};

const TOKEN_KEY: &str = "token";
const USER_KEY: &str = "user";
const THEME_KEY: &str = "theme";

/// `localStorage`-backed SessionStore for the web platform.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Option<Storage> {
        web_sys::window()?.local_storage().ok()?
    }

    fn get(key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    fn set(key: &str, value: &str) {
        if let Some(storage) = Self::storage() {
            if storage.set_item(key, value).is_err() {
                tracing::warn!("localStorage rejected {}", key);
            }
        }
    }

    fn remove(key: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(key);
        }
    }
}

impl SessionStore for LocalStorageStore {
    async fn load(&self) -> Option<Session> {
        let token = Self::get(TOKEN_KEY)?;
        let user: UserInfo = serde_json::from_str(&Self::get(USER_KEY)?).ok()?;
        Some(Session { token, user })
    }

    async fn save(&self, session: &Session) {
        Self::set(TOKEN_KEY, &session.token);
        match serde_json::to_string(&session.user) {
            Ok(user) => Self::set(USER_KEY, &user),
            Err(e) => tracing::warn!("Failed to encode user: {}", e),
        }
    }

    async fn clear(&self) {
        Self::remove(TOKEN_KEY);
        Self::remove(USER_KEY);
    }

    async fn load_theme(&self) -> Option<Theme> {
        Self::get(THEME_KEY)?.parse().ok()
    }

    async fn save_theme(&self, theme: Theme) {
        Self::set(THEME_KEY, theme.as_str());
    }
}
