//! Pointer tracking for a note being dragged across the board.

use crate::models::Position;

/// A drag in progress.
///
/// `offset` is where the pointer grabbed the note, relative to the note's
/// top-left corner, so the note does not jump under the cursor.
#[derive(Clone, Debug, PartialEq)]
pub struct DragState {
    pub note_id: String,
    pub offset: Position,
    pub current: Position,
}

impl DragState {
    /// Start dragging `note_id`, currently drawn at `origin`, from `pointer`.
    pub fn begin(note_id: impl Into<String>, origin: Position, pointer: Position) -> Self {
        Self {
            note_id: note_id.into(),
            offset: Position::new(pointer.x - origin.x, pointer.y - origin.y),
            current: origin,
        }
    }

    /// Follow the pointer. The note never leaves the non-negative canvas.
    pub fn move_to(&mut self, pointer: Position) -> Position {
        self.current = Position::new(pointer.x - self.offset.x, pointer.y - self.offset.y).clamped();
        self.current
    }

    /// Position to persist when the pointer is released.
    pub fn final_position(&self) -> Position {
        self.current.clamped().rounded()
    }
}
