//! In-memory implementation of [`Database`].

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use store::models::{NewNote, Note, NotePatch, Theme};
use uuid::Uuid;

use super::{Database, DbError, DbResult};
use crate::models::{NewUser, User};

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    /// Insertion order is kept so listings match the SQL `ORDER BY created_at`.
    notes: Vec<(Uuid, Note)>,
}

/// Database held entirely in process memory. Every call takes the single
/// lock, so a uniqueness check and the write that follows it are atomic.
#[derive(Default)]
pub struct MemoryDatabase {
    tables: Mutex<Tables>,
}

impl MemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        // A panic while holding the lock cannot leave the maps half-written.
        self.tables.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Tables {
    fn update_user(&mut self, id: Uuid, f: impl FnOnce(&mut User)) -> Option<User> {
        let user = self.users.get_mut(&id)?;
        f(user);
        Some(user.clone())
    }

    fn find_note(&mut self, owner: Uuid, id: Uuid) -> Option<usize> {
        let id = id.to_string();
        self.notes
            .iter()
            .position(|(note_owner, note)| *note_owner == owner && note.id == id)
    }
}

#[async_trait]
impl Database for MemoryDatabase {
    async fn create_user(&self, user: NewUser) -> DbResult<User> {
        let mut tables = self.lock();
        let taken = tables
            .users
            .values()
            .any(|u| u.username == user.username || u.email == user.email);
        if taken {
            return Err(DbError::Conflict);
        }
        let row = User {
            id: Uuid::new_v4(),
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            theme: Theme::default().as_str().to_string(),
            profile_image: None,
            created_at: Utc::now(),
        };
        tables.users.insert(row.id, row.clone());
        Ok(row)
    }

    async fn user_by_id(&self, id: Uuid) -> DbResult<Option<User>> {
        Ok(self.lock().users.get(&id).cloned())
    }

    async fn user_by_email(&self, email: &str) -> DbResult<Option<User>> {
        Ok(self.lock().users.values().find(|u| u.email == email).cloned())
    }

    async fn user_exists(&self, username: &str, email: &str) -> DbResult<bool> {
        Ok(self
            .lock()
            .users
            .values()
            .any(|u| u.username == username || u.email == email))
    }

    async fn username_taken(&self, username: &str, except: Uuid) -> DbResult<bool> {
        Ok(self
            .lock()
            .users
            .values()
            .any(|u| u.username == username && u.id != except))
    }

    async fn set_theme(&self, id: Uuid, theme: Theme) -> DbResult<Option<User>> {
        Ok(self
            .lock()
            .update_user(id, |u| u.theme = theme.as_str().to_string()))
    }

    async fn set_profile_image(&self, id: Uuid, image: Option<String>) -> DbResult<Option<User>> {
        Ok(self.lock().update_user(id, |u| u.profile_image = image))
    }

    async fn set_username(&self, id: Uuid, username: &str) -> DbResult<Option<User>> {
        let mut tables = self.lock();
        if tables
            .users
            .values()
            .any(|u| u.username == username && u.id != id)
        {
            return Err(DbError::Conflict);
        }
        Ok(tables.update_user(id, |u| u.username = username.to_string()))
    }

    async fn list_notes(&self, owner: Uuid) -> DbResult<Vec<Note>> {
        Ok(self
            .lock()
            .notes
            .iter()
            .filter(|(note_owner, _)| *note_owner == owner)
            .map(|(_, note)| note.clone())
            .collect())
    }

    async fn create_note(&self, owner: Uuid, note: NewNote) -> DbResult<Note> {
        let now = Utc::now();
        let row = Note {
            id: Uuid::new_v4().to_string(),
            owner_id: owner.to_string(),
            title: note.title_or_default().to_string(),
            content: note.content.unwrap_or_default(),
            color: note.color.unwrap_or_default(),
            size: note.size.unwrap_or_default(),
            position: note.position,
            created_at: now,
            updated_at: now,
        };
        self.lock().notes.push((owner, row.clone()));
        Ok(row)
    }

    async fn update_note(&self, owner: Uuid, id: Uuid, patch: NotePatch) -> DbResult<Option<Note>> {
        let mut tables = self.lock();
        let Some(index) = tables.find_note(owner, id) else {
            return Ok(None);
        };
        let note = &mut tables.notes[index].1;
        note.apply(&patch);
        note.updated_at = Utc::now();
        Ok(Some(note.clone()))
    }

    async fn delete_note(&self, owner: Uuid, id: Uuid) -> DbResult<bool> {
        let mut tables = self.lock();
        match tables.find_note(owner, id) {
            Some(index) => {
                tables.notes.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
