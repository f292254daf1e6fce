//! Client-side state for the sticky-notes board: domain models, the note store,
//! the application state machine and durable session storage.

pub mod drag;
pub mod emoji;
pub mod models;
pub mod notes;
pub mod session;
pub mod state;

mod memory;
pub use memory::MemoryStore;

#[cfg(not(target_arch = "wasm32"))]
mod file_store;
#[cfg(not(target_arch = "wasm32"))]
pub use file_store::FileStore;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod local_storage;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use local_storage::LocalStorageStore;

pub use drag::DragState;
pub use emoji::{EmojiCategory, Selection};
pub use models::{Note, NoteColor, NotePatch, NoteSize, NewNote, Position, Theme, UserInfo};
pub use notes::NoteStore;
pub use session::{Session, SessionStore};
pub use state::{AppState, AuthStatus, EmojiTarget, NoteField, PendingEdit};
