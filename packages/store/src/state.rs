//! # Application state
//!
//! [`AppState`] is the single value the UI renders from. It owns the session, the
//! [`NoteStore`] and the short-lived interaction state (drag, emoji picker, delete
//! confirmation). Every change goes through a transition method; none of them
//! touch the network. The UI controller calls a transition, then persists what
//! it returned.
//!
//! ## Lifecycle
//!
//! ```text
//!   SignedOut ──sign_in──▶ SignedIn(session) ──sign_out──▶ SignedOut
//! ```
//!
//! Signing in or out always starts from an empty note list and no pending
//! interaction. The theme survives both.

use crate::drag::DragState;
use crate::emoji::{insert_at, EmojiCategory, Selection};
use crate::models::{NotePatch, Position, Theme, UserInfo};
use crate::notes::NoteStore;
use crate::session::Session;

/// Whether a user is signed in.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum AuthStatus {
    #[default]
    SignedOut,
    SignedIn(Session),
}

/// Text field of a note that can receive an emoji.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoteField {
    Title,
    Content,
}

impl NoteField {
    pub fn as_str(self) -> &'static str {
        match self {
            NoteField::Title => "title",
            NoteField::Content => "content",
        }
    }
}

/// Where the emoji picker will insert.
#[derive(Clone, Debug, PartialEq)]
pub struct EmojiTarget {
    pub note_id: String,
    pub field: NoteField,
    pub selection: Option<Selection>,
}

/// A local edit that still has to reach the server.
#[derive(Clone, Debug, PartialEq)]
pub struct PendingEdit {
    pub note_id: String,
    pub patch: NotePatch,
    pub revision: u64,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AppState {
    auth: AuthStatus,
    pub notes: NoteStore,
    theme: Theme,
    drag: Option<DragState>,
    emoji_target: Option<EmojiTarget>,
    emoji_category: EmojiCategory,
    pending_delete: Option<String>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    // --- session -------------------------------------------------------

    pub fn auth(&self) -> &AuthStatus {
        &self.auth
    }

    pub fn is_signed_in(&self) -> bool {
        matches!(self.auth, AuthStatus::SignedIn(_))
    }

    pub fn session(&self) -> Option<&Session> {
        match &self.auth {
            AuthStatus::SignedIn(session) => Some(session),
            AuthStatus::SignedOut => None,
        }
    }

    pub fn user(&self) -> Option<&UserInfo> {
        self.session().map(|s| &s.user)
    }

    pub fn token(&self) -> Option<&str> {
        self.session().map(|s| s.token.as_str())
    }

    pub fn sign_in(&mut self, session: Session) {
        self.theme = session.user.theme;
        self.auth = AuthStatus::SignedIn(session);
        self.reset_workspace();
    }

    pub fn sign_out(&mut self) {
        self.auth = AuthStatus::SignedOut;
        self.reset_workspace();
    }

    /// Replace the cached user after a profile change. Ignored when signed out.
    pub fn update_user(&mut self, user: UserInfo) {
        if let AuthStatus::SignedIn(session) = &mut self.auth {
            self.theme = user.theme;
            session.user = user;
        }
    }

    fn reset_workspace(&mut self) {
        self.notes.clear();
        self.drag = None;
        self.emoji_target = None;
        self.pending_delete = None;
    }

    // --- theme ---------------------------------------------------------

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        if let AuthStatus::SignedIn(session) = &mut self.auth {
            session.user.theme = theme;
        }
    }

    pub fn toggle_theme(&mut self) -> Theme {
        let theme = self.theme.toggled();
        self.set_theme(theme);
        theme
    }

    // --- editing -------------------------------------------------------

    /// Apply `patch` locally. `None` when the note is not on the board or the
    /// patch is empty.
    pub fn edit_note(&mut self, note_id: &str, patch: NotePatch) -> Option<PendingEdit> {
        if patch.is_empty() {
            return None;
        }
        let revision = self.notes.patch(note_id, &patch)?;
        Some(PendingEdit {
            note_id: note_id.to_string(),
            patch,
            revision,
        })
    }

    // --- drag ----------------------------------------------------------

    pub fn dragging(&self) -> Option<&DragState> {
        self.drag.as_ref()
    }

    /// Where a note should be drawn right now: the drag position while it is
    /// being dragged, its stored position otherwise.
    pub fn display_position(&self, note_id: &str) -> Option<Position> {
        match &self.drag {
            Some(drag) if drag.note_id == note_id => Some(drag.current),
            _ => self.notes.get(note_id).and_then(|n| n.position),
        }
    }

    /// Start dragging. Returns `false` if the note is unknown.
    pub fn begin_drag(&mut self, note_id: &str, pointer: Position) -> bool {
        let Some(note) = self.notes.get(note_id) else {
            return false;
        };
        let origin = note.position.unwrap_or_default();
        self.drag = Some(DragState::begin(note_id, origin, pointer));
        true
    }

    pub fn drag_to(&mut self, pointer: Position) -> Option<Position> {
        self.drag.as_mut().map(|drag| drag.move_to(pointer))
    }

    /// Release the dragged note: its rounded final position is applied locally
    /// and returned as the single edit to persist.
    pub fn end_drag(&mut self) -> Option<PendingEdit> {
        let drag = self.drag.take()?;
        self.edit_note(&drag.note_id, NotePatch::position(drag.final_position()))
    }

    // --- emoji picker --------------------------------------------------

    pub fn emoji_target(&self) -> Option<&EmojiTarget> {
        self.emoji_target.as_ref()
    }

    pub fn emoji_category(&self) -> EmojiCategory {
        self.emoji_category
    }

    pub fn set_emoji_category(&mut self, category: EmojiCategory) {
        self.emoji_category = category;
    }

    pub fn open_emoji_picker(&mut self, target: EmojiTarget) {
        if self.notes.contains(&target.note_id) {
            self.emoji_target = Some(target);
        }
    }

    pub fn close_emoji_picker(&mut self) {
        self.emoji_target = None;
    }

    /// Insert `emoji` at the picker target and close the picker. Returns the
    /// resulting edit and the UTF-16 caret offset just after the emoji.
    pub fn insert_emoji(&mut self, emoji: &str) -> Option<(PendingEdit, usize)> {
        let target = self.emoji_target.take()?;
        let note = self.notes.get(&target.note_id)?;
        let current = match target.field {
            NoteField::Title => &note.title,
            NoteField::Content => &note.content,
        };
        let (text, caret) = insert_at(current, target.selection, emoji);
        let patch = match target.field {
            NoteField::Title => NotePatch::title(text),
            NoteField::Content => NotePatch::content(text),
        };
        self.edit_note(&target.note_id, patch).map(|edit| (edit, caret))
    }

    // --- delete confirmation -------------------------------------------

    pub fn pending_delete(&self) -> Option<&str> {
        self.pending_delete.as_deref()
    }

    pub fn request_delete(&mut self, note_id: &str) {
        if self.notes.contains(note_id) {
            self.pending_delete = Some(note_id.to_string());
        }
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Take the note id awaiting confirmation.
    pub fn confirm_delete(&mut self) -> Option<String> {
        self.pending_delete.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Note, NoteColor, NoteSize};
    use chrono::Utc;

    fn user(theme: Theme) -> UserInfo {
        UserInfo {
            id: "u1".into(),
            username: "alice".into(),
            email: "alice@x.com".into(),
            theme,
            profile_image: None,
        }
    }

    fn note(id: &str) -> Note {
        let now = Utc::now();
        Note {
            id: id.to_string(),
            owner_id: "u1".into(),
            title: "New Note".into(),
            content: " ".into(),
            color: NoteColor::Yellow,
            size: NoteSize::Medium,
            position: Some(Position::new(100.0, 100.0)),
            created_at: now,
            updated_at: now,
        }
    }

    fn signed_in() -> AppState {
        let mut state = AppState::new();
        state.sign_in(Session::new("tok", user(Theme::Light)));
        state.notes.upsert(note("n1"));
        state
    }

    #[test]
    fn test_sign_in_and_out() {
        let mut state = AppState::new();
        assert!(!state.is_signed_in());

        state.sign_in(Session::new("tok", user(Theme::Dark)));
        assert_eq!(state.token(), Some("tok"));
        assert_eq!(state.theme(), Theme::Dark);

        state.notes.upsert(note("n1"));
        state.request_delete("n1");
        state.sign_out();

        assert!(!state.is_signed_in());
        assert!(state.notes.is_empty());
        assert!(state.pending_delete().is_none());
        assert_eq!(state.theme(), Theme::Dark);
    }

    #[test]
    fn test_toggle_theme_updates_cached_user() {
        let mut state = signed_in();
        assert_eq!(state.toggle_theme(), Theme::Dark);
        assert_eq!(state.user().unwrap().theme, Theme::Dark);
    }

    #[test]
    fn test_edit_note_is_local_and_returns_pending_edit() {
        let mut state = signed_in();
        let edit = state.edit_note("n1", NotePatch::color(NoteColor::Blue)).unwrap();
        assert_eq!(edit.revision, 1);
        assert_eq!(state.notes.get("n1").unwrap().color, NoteColor::Blue);

        assert!(state.edit_note("n1", NotePatch::default()).is_none());
        assert!(state.edit_note("ghost", NotePatch::title("x")).is_none());
    }

    #[test]
    fn test_drag_yields_single_rounded_edit() {
        let mut state = signed_in();
        assert!(state.begin_drag("n1", Position::new(110.0, 120.0)));

        state.drag_to(Position::new(150.4, 180.6));
        state.drag_to(Position::new(-500.0, 300.7));
        assert_eq!(state.display_position("n1"), Some(Position::new(0.0, 280.7)));

        let edit = state.end_drag().unwrap();
        assert_eq!(edit.patch, NotePatch::position(Position::new(0.0, 281.0)));
        assert_eq!(state.notes.get("n1").unwrap().position, Some(Position::new(0.0, 281.0)));

        assert!(state.end_drag().is_none());
        assert!(state.dragging().is_none());
    }

    #[test]
    fn test_begin_drag_unknown_note() {
        let mut state = signed_in();
        assert!(!state.begin_drag("ghost", Position::default()));
        assert!(state.drag_to(Position::new(1.0, 1.0)).is_none());
    }

    #[test]
    fn test_insert_emoji_into_content() {
        let mut state = signed_in();
        state.open_emoji_picker(EmojiTarget {
            note_id: "n1".into(),
            field: NoteField::Content,
            selection: Some(Selection::caret(0)),
        });

        let (edit, caret) = state.insert_emoji("🌻").unwrap();
        assert_eq!(edit.patch, NotePatch::content("🌻 "));
        assert_eq!(caret, 2);
        assert_eq!(state.notes.get("n1").unwrap().content, "🌻 ");
        assert!(state.emoji_target().is_none());
        assert!(state.insert_emoji("🌻").is_none());
    }

    #[test]
    fn test_delete_confirmation_flow() {
        let mut state = signed_in();
        state.request_delete("ghost");
        assert!(state.pending_delete().is_none());

        state.request_delete("n1");
        state.cancel_delete();
        assert!(state.confirm_delete().is_none());

        state.request_delete("n1");
        assert_eq!(state.confirm_delete().as_deref(), Some("n1"));
        assert!(state.pending_delete().is_none());
    }
}
