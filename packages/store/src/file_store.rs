//! # Filesystem-backed session store
//!
//! [`FileStore`] is a [`SessionStore`] implementation that persists the session to
//! the local filesystem. It is used by native builds to stay signed in across
//! restarts.
//!
//! ## Layout
//!
//! ```text
//! <base_dir>/
//! ├── session.toml   # token + cached user
//! └── theme          # "light" or "dark"
//! ```

use std::path::PathBuf;

use crate::models::Theme;
use crate::session::{Session, SessionStore};

const SESSION_FILE: &str = "session.toml";
const THEME_FILE: &str = "theme";

/// Filesystem-backed SessionStore for native persistence.
#[derive(Clone, Debug)]
pub struct FileStore {
    base: PathBuf,
}

impl FileStore {
    pub fn new(base: PathBuf) -> Self {
        Self { base }
    }

    fn session_path(&self) -> PathBuf {
        self.base.join(SESSION_FILE)
    }

    fn theme_path(&self) -> PathBuf {
        self.base.join(THEME_FILE)
    }

    fn write(&self, path: PathBuf, contents: String) {
        if let Err(e) = std::fs::create_dir_all(&self.base).and_then(|_| std::fs::write(&path, contents)) {
            tracing::warn!("Failed to write {}: {}", path.display(), e);
        }
    }
}

impl SessionStore for FileStore {
    async fn load(&self) -> Option<Session> {
        let content = std::fs::read_to_string(self.session_path()).ok()?;
        match toml::from_str(&content) {
            Ok(session) => Some(session),
            Err(e) => {
                tracing::warn!("Ignoring unreadable session file: {}", e);
                None
            }
        }
    }

    async fn save(&self, session: &Session) {
        match toml::to_string(session) {
            Ok(content) => self.write(self.session_path(), content),
            Err(e) => tracing::warn!("Failed to encode session: {}", e),
        }
    }

    async fn clear(&self) {
        let _ = std::fs::remove_file(self.session_path());
    }

    async fn load_theme(&self) -> Option<Theme> {
        let content = std::fs::read_to_string(self.theme_path()).ok()?;
        content.trim().parse().ok()
    }

    async fn save_theme(&self, theme: Theme) {
        self.write(self.theme_path(), theme.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserInfo;

    #[tokio::test]
    async fn test_file_store_roundtrip() {
        let dir = std::env::temp_dir().join(format!("stickies_test_{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);

        let store = FileStore::new(dir.clone());
        let session = Session::new(
            "header.payload.signature",
            UserInfo {
                id: "u1".into(),
                username: "alice".into(),
                email: "alice@x.com".into(),
                theme: Theme::Dark,
                profile_image: Some("data:image/png;base64,AAAA".into()),
            },
        );
        store.save(&session).await;
        store.save_theme(Theme::Dark).await;

        // Re-open from same directory
        let reopened = FileStore::new(dir.clone());
        assert_eq!(reopened.load().await, Some(session));
        assert_eq!(reopened.load_theme().await, Some(Theme::Dark));

        reopened.clear().await;
        assert!(store.load().await.is_none());

        // Cleanup
        let _ = std::fs::remove_dir_all(&dir);
    }
}
