//! Note rows as stored in the `notes` table.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use store::models::{Note, Position};
use uuid::Uuid;

/// Full note record from the database. Position is split into two nullable
/// columns; a note either has both or neither.
#[derive(Debug, Clone, FromRow)]
pub struct NoteRow {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub content: String,
    pub color: String,
    pub size: String,
    pub position_x: Option<f64>,
    pub position_y: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NoteRow {
    /// Convert to the client-facing [`Note`]. Unknown tags read back as defaults.
    pub fn into_note(self) -> Note {
        let position = match (self.position_x, self.position_y) {
            (Some(x), Some(y)) => Some(Position::new(x, y)),
            _ => None,
        };
        Note {
            id: self.id.to_string(),
            owner_id: self.owner_id.to_string(),
            title: self.title,
            content: self.content,
            color: self.color.parse().unwrap_or_default(),
            size: self.size.parse().unwrap_or_default(),
            position,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
