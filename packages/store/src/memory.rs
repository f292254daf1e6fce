use std::sync::{Arc, Mutex};

use crate::models::Theme;
use crate::session::{Session, SessionStore};

/// In-memory SessionStore for testing and as a fallback.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    session: Arc<Mutex<Option<Session>>>,
    theme: Arc<Mutex<Option<Theme>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    async fn load(&self) -> Option<Session> {
        self.session.lock().ok()?.clone()
    }

    async fn save(&self, session: &Session) {
        if let Ok(mut slot) = self.session.lock() {
            *slot = Some(session.clone());
        }
    }

    async fn clear(&self) {
        if let Ok(mut slot) = self.session.lock() {
            *slot = None;
        }
    }

    async fn load_theme(&self) -> Option<Theme> {
        *self.theme.lock().ok()?
    }

    async fn save_theme(&self, theme: Theme) {
        if let Ok(mut slot) = self.theme.lock() {
            *slot = Some(theme);
        }
    }
}
