//! Platform glue: where the session lives, where the API is, how to alert.
//!
//! - **Web** (WASM + `web` feature): `localStorage` via [`store::LocalStorageStore`],
//!   API on the page's own origin, native `alert`/`confirm`.
//! - **Native**: a TOML file under the platform data directory via
//!   [`store::FileStore`], API at `STICKIES_API_URL`, messages only logged.

/// Session store of the current platform.
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub type PlatformSessions = store::LocalStorageStore;
#[cfg(not(target_arch = "wasm32"))]
pub type PlatformSessions = store::FileStore;
#[cfg(all(target_arch = "wasm32", not(feature = "web")))]
pub type PlatformSessions = store::MemoryStore;

/// Create the platform-appropriate session store.
pub fn make_session_store() -> PlatformSessions {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        store::LocalStorageStore::new()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let base = dirs::data_dir()
            .unwrap_or_else(|| std::path::PathBuf::from("."))
            .join("stickies");
        store::FileStore::new(base)
    }
    #[cfg(all(target_arch = "wasm32", not(feature = "web")))]
    {
        store::MemoryStore::new()
    }
}

/// Base URL of the REST API, without a trailing slash.
pub fn api_base() -> String {
    #[cfg(target_arch = "wasm32")]
    {
        let origin = web_sys::window()
            .and_then(|w| w.location().origin().ok())
            .unwrap_or_default();
        format!("{origin}/api")
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        std::env::var("STICKIES_API_URL").unwrap_or_else(|_| "http://localhost:3000/api".to_string())
    }
}

/// Show a blocking message to the user.
pub fn alert(message: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(message);
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        tracing::warn!("{}", message);
    }
}

/// Ask a yes/no question. Without a browser the answer is yes.
pub fn confirm(message: &str) -> bool {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::window()
            .and_then(|w| w.confirm_with_message(message).ok())
            .unwrap_or(false)
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        tracing::info!("{}", message);
        true
    }
}

/// Size of the area new notes are placed in.
pub fn canvas_size() -> (f64, f64) {
    #[cfg(target_arch = "wasm32")]
    {
        let window = web_sys::window();
        let width = window
            .as_ref()
            .and_then(|w| w.inner_width().ok())
            .and_then(|v| v.as_f64());
        let height = window
            .as_ref()
            .and_then(|w| w.inner_height().ok())
            .and_then(|v| v.as_f64());
        (width.unwrap_or(1200.0), height.unwrap_or(800.0))
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        (1200.0, 800.0)
    }
}
