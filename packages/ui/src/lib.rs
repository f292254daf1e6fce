//! This crate contains all shared UI for the workspace.
//!
//! | Module | Role |
//! |--------|------|
//! | [`controller`] | binds [`store::AppState`] to the REST API and the session store |
//! | `app` | context provider and hooks |
//! | `platform` | session store, API location and dialogs per target |
//! | components | board, notes, pickers, dialogs, navbar, profile, auth form |

use dioxus::prelude::*;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub const STICKIES_CSS: Asset = asset!("/assets/stickies.css");

pub mod controller;
pub use controller::{ActionError, Controller, NotesBackend, StateCell};

mod platform;
pub use platform::{api_base, make_session_store, PlatformSessions};

mod app;
pub use app::{use_app_state, use_controller, use_restored, AppController, AppProvider};

mod modal_overlay;
pub use modal_overlay::ModalOverlay;

mod auth_form;
pub use auth_form::{AuthForm, AuthMode};

mod sticky_note;
pub use sticky_note::StickyNote;

mod emoji_picker;
pub use emoji_picker::EmojiPicker;

mod delete_dialog;
pub use delete_dialog::DeleteDialog;

mod board;
pub use board::Board;

mod profile;
pub use profile::ProfileModal;

mod navbar;
pub use navbar::{Avatar, Navbar};
