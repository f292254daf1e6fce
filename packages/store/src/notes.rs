//! Client-side source of truth for the signed-in user's notes.
//!
//! [`NoteStore`] keeps notes in display order and guarantees that an id appears at
//! most once. Local edits bump a per-note revision so that a late server response
//! can tell whether the user kept typing after the request left.

use std::collections::HashMap;

use crate::models::{Note, NotePatch, Position};

/// Ordered, id-unique collection of notes with local edit revisions.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NoteStore {
    notes: Vec<Note>,
    revisions: HashMap<String, u64>,
}

impl NoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Note> {
        self.notes.iter()
    }

    pub fn get(&self, id: &str) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Revision of the last local edit made to `id` (0 if never edited).
    pub fn revision(&self, id: &str) -> u64 {
        self.revisions.get(id).copied().unwrap_or(0)
    }

    /// Replace every note. When `notes` repeats an id, the last copy wins but
    /// keeps the slot of the first occurrence.
    pub fn replace_all(&mut self, notes: Vec<Note>) {
        self.notes.clear();
        self.revisions.clear();
        for note in notes {
            self.upsert(note);
        }
    }

    /// Insert `note`, or overwrite the note with the same id in place.
    pub fn upsert(&mut self, note: Note) {
        match self.notes.iter_mut().find(|n| n.id == note.id) {
            Some(existing) => *existing = note,
            None => self.notes.push(note),
        }
    }

    /// Apply a local edit and return the note's new revision, or `None` when
    /// no note has that id.
    pub fn patch(&mut self, id: &str, patch: &NotePatch) -> Option<u64> {
        let note = self.notes.iter_mut().find(|n| n.id == id)?;
        note.apply(patch);
        let revision = self.revisions.entry(id.to_string()).or_insert(0);
        *revision += 1;
        Some(*revision)
    }

    /// Merge a server copy of a note that answered the request sent at
    /// `revision`.
    ///
    /// If no local edit happened since, the server copy replaces the local
    /// one. Otherwise only the server-owned metadata is taken so newer local
    /// text is not overwritten. Returns `true` when the server copy was taken
    /// whole.
    pub fn reconcile(&mut self, server: Note, revision: u64) -> bool {
        let current = self.revision(&server.id);
        match self.notes.iter_mut().find(|n| n.id == server.id) {
            Some(local) if current > revision => {
                local.owner_id = server.owner_id;
                local.created_at = server.created_at;
                local.updated_at = server.updated_at;
                false
            }
            Some(local) => {
                let placed = local.position;
                *local = server;
                // Keep the fallback placement of notes the server never positioned.
                local.position = local.position.or(placed);
                true
            }
            // Deleted locally while the request was in flight.
            None => false,
        }
    }

    pub fn remove(&mut self, id: &str) -> Option<Note> {
        let index = self.notes.iter().position(|n| n.id == id)?;
        self.revisions.remove(id);
        Some(self.notes.remove(index))
    }

    pub fn clear(&mut self) {
        self.notes.clear();
        self.revisions.clear();
    }

    /// Give every note without a position one produced by `fallback`.
    ///
    /// This only touches local state; nothing is marked as edited.
    pub fn place_unpositioned(&mut self, mut fallback: impl FnMut() -> Position) {
        for note in self.notes.iter_mut().filter(|n| n.position.is_none()) {
            note.position = Some(fallback());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NoteColor, NoteSize};
    use chrono::{Duration, Utc};

    fn note(id: &str, title: &str) -> Note {
        let now = Utc::now();
        Note {
            id: id.to_string(),
            owner_id: "owner".to_string(),
            title: title.to_string(),
            content: String::new(),
            color: NoteColor::Yellow,
            size: NoteSize::Medium,
            position: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_upsert_never_duplicates() {
        let mut store = NoteStore::new();
        store.upsert(note("a", "first"));
        store.upsert(note("b", "second"));
        store.upsert(note("a", "first again"));

        assert_eq!(store.len(), 2);
        assert_eq!(store.get("a").unwrap().title, "first again");
        let order: Vec<_> = store.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(order, vec!["a", "b"]);
    }

    #[test]
    fn test_replace_all_drops_duplicate_ids() {
        let mut store = NoteStore::new();
        store.replace_all(vec![note("a", "one"), note("b", "two"), note("a", "three")]);

        assert_eq!(store.len(), 2);
        assert_eq!(store.get("a").unwrap().title, "three");
    }

    #[test]
    fn test_patch_bumps_revision() {
        let mut store = NoteStore::new();
        store.upsert(note("a", "title"));

        assert_eq!(store.revision("a"), 0);
        assert_eq!(store.patch("a", &NotePatch::color(NoteColor::Blue)), Some(1));
        assert_eq!(store.patch("a", &NotePatch::title("new")), Some(2));
        assert_eq!(store.get("a").unwrap().color, NoteColor::Blue);
        assert_eq!(store.patch("missing", &NotePatch::title("x")), None);
    }

    #[test]
    fn test_reconcile_takes_server_copy_when_current() {
        let mut store = NoteStore::new();
        store.upsert(note("a", "title"));
        let revision = store.patch("a", &NotePatch::title("typed")).unwrap();

        let mut server = note("a", "typed");
        server.updated_at = Utc::now() + Duration::seconds(5);
        assert!(store.reconcile(server.clone(), revision));
        assert_eq!(store.get("a").unwrap(), &server);
    }

    #[test]
    fn test_reconcile_keeps_newer_local_text() {
        let mut store = NoteStore::new();
        store.upsert(note("a", "t"));
        let first = store.patch("a", &NotePatch::title("ty")).unwrap();
        store.patch("a", &NotePatch::title("typ")).unwrap();

        let mut server = note("a", "ty");
        let stamp = Utc::now() + Duration::seconds(5);
        server.updated_at = stamp;
        assert!(!store.reconcile(server, first));

        let local = store.get("a").unwrap();
        assert_eq!(local.title, "typ");
        assert_eq!(local.updated_at, stamp);
    }

    #[test]
    fn test_reconcile_ignores_removed_note() {
        let mut store = NoteStore::new();
        store.upsert(note("a", "t"));
        let revision = store.patch("a", &NotePatch::title("x")).unwrap();
        store.remove("a");

        assert!(!store.reconcile(note("a", "x"), revision));
        assert!(store.is_empty());
    }

    #[test]
    fn test_place_unpositioned_only_fills_missing() {
        let mut store = NoteStore::new();
        let mut placed = note("a", "a");
        placed.position = Some(Position::new(5.0, 5.0));
        store.upsert(placed);
        store.upsert(note("b", "b"));

        store.place_unpositioned(|| Position::new(42.0, 24.0));

        assert_eq!(store.get("a").unwrap().position, Some(Position::new(5.0, 5.0)));
        assert_eq!(store.get("b").unwrap().position, Some(Position::new(42.0, 24.0)));
        assert_eq!(store.revision("b"), 0);
    }
}
