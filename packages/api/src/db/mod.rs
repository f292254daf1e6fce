//! # Database module: persistence behind a trait
//!
//! Every handler talks to storage through the [`Database`] trait, held as an
//! `Arc<dyn Database>` in the router state. Two implementations exist:
//!
//! | Type | Backing | Used by |
//! |------|---------|---------|
//! | [`PgDatabase`] | PostgreSQL connection pool (`sqlx`), migrations embedded from `migrations/` | the server when `DATABASE_URL` is set |
//! | [`MemoryDatabase`] | mutex-guarded maps | tests, and local runs without a database |
//!
//! ## Ownership
//!
//! Note queries always take the caller's id next to the note id. A note owned by
//! somebody else is indistinguishable from a missing one: updates return `None`,
//! deletes report `false`.
//!
//! ## Uniqueness
//!
//! Usernames and emails are unique. Violations surface as [`DbError::Conflict`]
//! whether they are caught by a pre-check or by the database constraint.

mod memory;
mod pool;

pub use memory::MemoryDatabase;
pub use pool::PgDatabase;

use async_trait::async_trait;
use store::models::{NewNote, Note, NotePatch, Theme};
use uuid::Uuid;

use crate::models::{NewUser, User};

#[derive(thiserror::Error, Debug)]
pub enum DbError {
    #[error("unique constraint violated")]
    Conflict,
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
    #[error(transparent)]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

pub type DbResult<T> = Result<T, DbError>;

#[async_trait]
pub trait Database: Send + Sync + 'static {
    // --- users ---------------------------------------------------------

    /// Insert a user. [`DbError::Conflict`] if the username or email is taken.
    async fn create_user(&self, user: NewUser) -> DbResult<User>;

    async fn user_by_id(&self, id: Uuid) -> DbResult<Option<User>>;

    async fn user_by_email(&self, email: &str) -> DbResult<Option<User>>;

    /// Whether any user already holds `username` or `email`.
    async fn user_exists(&self, username: &str, email: &str) -> DbResult<bool>;

    /// Whether a user other than `except` holds `username`.
    async fn username_taken(&self, username: &str, except: Uuid) -> DbResult<bool>;

    async fn set_theme(&self, id: Uuid, theme: Theme) -> DbResult<Option<User>>;

    async fn set_profile_image(&self, id: Uuid, image: Option<String>) -> DbResult<Option<User>>;

    /// Rename a user. [`DbError::Conflict`] if another user holds the name.
    async fn set_username(&self, id: Uuid, username: &str) -> DbResult<Option<User>>;

    // --- notes ---------------------------------------------------------

    async fn list_notes(&self, owner: Uuid) -> DbResult<Vec<Note>>;

    async fn create_note(&self, owner: Uuid, note: NewNote) -> DbResult<Note>;

    /// Apply `patch` and refresh `updated_at`. `None` if the note does not
    /// exist or belongs to someone else.
    async fn update_note(&self, owner: Uuid, id: Uuid, patch: NotePatch) -> DbResult<Option<Note>>;

    /// Delete a note. Returns whether a row was removed.
    async fn delete_note(&self, owner: Uuid, id: Uuid) -> DbResult<bool>;
}
