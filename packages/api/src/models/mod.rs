//! Data models for the application.

#[cfg(feature = "server")]
mod note;
pub mod payload;
#[cfg(feature = "server")]
mod user;

#[cfg(feature = "server")]
pub use note::NoteRow;
#[cfg(feature = "server")]
pub use user::{NewUser, User};

pub use payload::*;
pub use store::models::{Note, NotePatch, NewNote, UserInfo};
