//! # Controller: binds [`AppState`] to the REST API and the session store
//!
//! Components never talk to the network directly. They call a [`Controller`]
//! method, which runs a state transition, persists what it produced and folds the
//! server's answer back in.
//!
//! ## Seams
//!
//! | Trait | Production | Tests |
//! |-------|-----------|-------|
//! | [`NotesBackend`] | [`ApiClient`] | an in-memory fake |
//! | [`SessionStore`] | `localStorage` / a data-dir file | [`store::MemoryStore`] |
//! | [`StateCell`] | `Signal<AppState>` | `Rc<RefCell<AppState>>` |
//!
//! ## Edits
//!
//! Text, color, size and position edits are optimistic: the local note changes
//! first, then a single `PUT` is issued. A failed `PUT` is logged and nothing is
//! rolled back. A successful one is merged with [`store::NoteStore::reconcile`], so
//! an answer that arrives after a newer keystroke only refreshes the timestamps.

use std::cell::RefCell;
use std::rc::Rc;

use api::models::{AuthResponse, LoginRequest, RegisterRequest, UsernameResponse};
use api::{ApiClient, ClientError, ClientResult};
use base64::Engine;
use dioxus::prelude::*;
use rand::Rng;
use store::models::DEFAULT_TITLE;
use store::{AppState, NewNote, Note, NoteColor, NotePatch, NoteSize, PendingEdit, Position, Session, SessionStore, Theme};

/// Notes the server never positioned land within this box from the origin.
const FALLBACK_SPREAD: (f64, f64) = (300.0, 200.0);

/// Room kept free right and below a new note so it starts fully visible.
const NEW_NOTE_MARGIN: f64 = 300.0;

/// Largest profile image accepted before encoding.
pub const PROFILE_IMAGE_MAX_BYTES: usize = 2 * 1024 * 1024;

/// Remote calls the controller needs. [`ApiClient`] is the real one.
pub trait NotesBackend {
    async fn register(&self, req: &RegisterRequest) -> ClientResult<AuthResponse>;
    async fn login(&self, req: &LoginRequest) -> ClientResult<AuthResponse>;
    async fn list_notes(&self, token: &str) -> ClientResult<Vec<Note>>;
    async fn create_note(&self, token: &str, note: &NewNote) -> ClientResult<Note>;
    async fn update_note(&self, token: &str, id: &str, patch: &NotePatch) -> ClientResult<Option<Note>>;
    async fn delete_note(&self, token: &str, id: &str) -> ClientResult<()>;
    async fn set_theme(&self, token: &str, theme: Theme) -> ClientResult<Theme>;
    async fn set_profile_image(&self, token: &str, image: Option<String>) -> ClientResult<Option<String>>;
    async fn set_username(&self, token: &str, username: &str) -> ClientResult<UsernameResponse>;
}

impl NotesBackend for ApiClient {
    async fn register(&self, req: &RegisterRequest) -> ClientResult<AuthResponse> {
        ApiClient::register(self, req).await
    }

    async fn login(&self, req: &LoginRequest) -> ClientResult<AuthResponse> {
        ApiClient::login(self, req).await
    }

    async fn list_notes(&self, token: &str) -> ClientResult<Vec<Note>> {
        ApiClient::list_notes(self, token).await
    }

    async fn create_note(&self, token: &str, note: &NewNote) -> ClientResult<Note> {
        ApiClient::create_note(self, token, note).await
    }

    async fn update_note(&self, token: &str, id: &str, patch: &NotePatch) -> ClientResult<Option<Note>> {
        ApiClient::update_note(self, token, id, patch).await
    }

    async fn delete_note(&self, token: &str, id: &str) -> ClientResult<()> {
        ApiClient::delete_note(self, token, id).await.map(|_| ())
    }

    async fn set_theme(&self, token: &str, theme: Theme) -> ClientResult<Theme> {
        ApiClient::set_theme(self, token, theme).await
    }

    async fn set_profile_image(&self, token: &str, image: Option<String>) -> ClientResult<Option<String>> {
        ApiClient::set_profile_image(self, token, image).await
    }

    async fn set_username(&self, token: &str, username: &str) -> ClientResult<UsernameResponse> {
        ApiClient::set_username(self, token, username).await
    }
}

/// Shared, interior-mutable home of the [`AppState`].
pub trait StateCell {
    fn view<R>(&self, f: impl FnOnce(&AppState) -> R) -> R;
    fn update<R>(&self, f: impl FnOnce(&mut AppState) -> R) -> R;
}

impl StateCell for Signal<AppState> {
    fn view<R>(&self, f: impl FnOnce(&AppState) -> R) -> R {
        f(&self.read())
    }

    fn update<R>(&self, f: impl FnOnce(&mut AppState) -> R) -> R {
        let mut signal = *self;
        let mut state = signal.write();
        f(&mut state)
    }
}

impl StateCell for Rc<RefCell<AppState>> {
    fn view<R>(&self, f: impl FnOnce(&AppState) -> R) -> R {
        f(&self.borrow())
    }

    fn update<R>(&self, f: impl FnOnce(&mut AppState) -> R) -> R {
        f(&mut self.borrow_mut())
    }
}

/// Why a user-initiated action did not happen. The message is shown as is.
#[derive(thiserror::Error, Debug)]
pub enum ActionError {
    #[error("{0}")]
    Invalid(String),
    #[error("Not signed in")]
    SignedOut,
    #[error(transparent)]
    Client(#[from] ClientError),
}

impl ActionError {
    fn invalid(message: impl Into<String>) -> Self {
        ActionError::Invalid(message.into())
    }

    fn is_unauthorized(&self) -> bool {
        matches!(self, ActionError::Client(e) if e.is_unauthorized())
    }
}

pub struct Controller<B, S, C> {
    backend: Rc<B>,
    sessions: Rc<S>,
    state: C,
}

impl<B, S, C: Clone> Clone for Controller<B, S, C> {
    fn clone(&self) -> Self {
        Self {
            backend: self.backend.clone(),
            sessions: self.sessions.clone(),
            state: self.state.clone(),
        }
    }
}

impl<B: NotesBackend, S: SessionStore, C: StateCell> Controller<B, S, C> {
    pub fn new(backend: B, sessions: S, state: C) -> Self {
        Self {
            backend: Rc::new(backend),
            sessions: Rc::new(sessions),
            state,
        }
    }

    pub fn state(&self) -> &C {
        &self.state
    }

    fn token(&self) -> Result<String, ActionError> {
        self.state
            .view(|s| s.token().map(str::to_string))
            .ok_or(ActionError::SignedOut)
    }

    /// Whether `token` still belongs to the signed-in session. Answers to
    /// requests made under an older session are dropped.
    fn still_signed_in(&self, token: &str) -> bool {
        self.state.view(|s| s.token() == Some(token))
    }

    async fn save_session(&self) {
        if let Some(session) = self.state.view(|s| s.session().cloned()) {
            self.sessions.save(&session).await;
        }
    }

    // --- session -------------------------------------------------------

    /// Bring back the session and theme stored by a previous visit.
    pub async fn restore(&self) {
        let theme = self.sessions.load_theme().await;
        let Some(session) = self.sessions.load().await else {
            if let Some(theme) = theme {
                self.state.update(|s| s.set_theme(theme));
            }
            return;
        };

        tracing::debug!(user_id = %session.user.id, "Restoring session");
        self.state.update(|s| s.sign_in(session));
        if let Err(e) = self.load_notes().await {
            tracing::warn!("Failed to load notes: {}", e);
            if e.is_unauthorized() {
                self.logout().await;
            }
        }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<(), ActionError> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(ActionError::invalid("Email and password are required"));
        }
        let auth = self.backend.login(&LoginRequest::new(email, password)).await?;
        self.start_session(auth).await;
        Ok(())
    }

    pub async fn register(&self, username: &str, email: &str, password: &str) -> Result<(), ActionError> {
        let (username, email) = (username.trim(), email.trim());
        if username.is_empty() || email.is_empty() || password.is_empty() {
            return Err(ActionError::invalid("All fields are required"));
        }
        let auth = self
            .backend
            .register(&RegisterRequest::new(username, email, password))
            .await?;
        self.start_session(auth).await;
        Ok(())
    }

    async fn start_session(&self, auth: AuthResponse) {
        let session = Session::new(auth.token, auth.user);
        self.sessions.save(&session).await;
        tracing::info!(user_id = %session.user.id, "Signed in");
        self.state.update(|s| s.sign_in(session));
        if let Err(e) = self.load_notes().await {
            tracing::error!("Failed to load notes: {}", e);
        }
    }

    /// Forget the session. The theme stays as the signed-out preference.
    pub async fn logout(&self) {
        self.sessions.clear().await;
        let theme = self.state.update(|s| {
            s.sign_out();
            s.theme()
        });
        self.sessions.save_theme(theme).await;
        tracing::info!("Signed out");
    }

    // --- notes ---------------------------------------------------------

    pub async fn load_notes(&self) -> Result<(), ActionError> {
        let token = self.token()?;
        let notes = self.backend.list_notes(&token).await?;
        if !self.still_signed_in(&token) {
            return Ok(());
        }
        let count = notes.len();
        self.state.update(|s| {
            s.notes.replace_all(notes);
            s.notes.place_unpositioned(fallback_position);
        });
        tracing::debug!(count, "Notes loaded");
        Ok(())
    }

    /// Create a note at a random spot of a canvas of the given size and
    /// return its id.
    pub async fn create_note(&self, canvas_width: f64, canvas_height: f64) -> Result<String, ActionError> {
        let token = self.token()?;
        let new_note = NewNote {
            title: Some(DEFAULT_TITLE.to_string()),
            content: Some(" ".to_string()),
            color: Some(NoteColor::default()),
            size: Some(NoteSize::default()),
            position: Some(new_note_position(canvas_width, canvas_height)),
        };
        let mut note = self.backend.create_note(&token, &new_note).await?;
        let id = note.id.clone();
        if note.position.is_none() {
            note.position = new_note.position;
        }
        if self.still_signed_in(&token) {
            self.state.update(|s| s.notes.upsert(note));
        }
        Ok(id)
    }

    /// Apply `patch` locally and persist it in the background of the caller.
    pub async fn edit_note(&self, note_id: &str, patch: NotePatch) {
        if let Some(edit) = self.state.update(|s| s.edit_note(note_id, patch)) {
            self.persist(edit).await;
        }
    }

    /// Send a local edit to the server and merge the answer.
    pub async fn persist(&self, edit: PendingEdit) {
        let Ok(token) = self.token() else {
            return;
        };
        match self
            .backend
            .update_note(&token, &edit.note_id, &edit.patch)
            .await
        {
            Ok(Some(note)) if self.still_signed_in(&token) => {
                let whole = self.state.update(|s| s.notes.reconcile(note, edit.revision));
                if !whole {
                    tracing::trace!(note_id = %edit.note_id, "Kept newer local edit");
                }
            }
            Ok(Some(_)) => {}
            Ok(None) => tracing::warn!(note_id = %edit.note_id, "Server has no such note"),
            Err(e) => tracing::error!(note_id = %edit.note_id, "Failed to update note: {}", e),
        }
    }

    /// Drop the dragged note and persist its final position once.
    pub async fn end_drag(&self) {
        if let Some(edit) = self.state.update(|s| s.end_drag()) {
            self.persist(edit).await;
        }
    }

    /// Delete the note awaiting confirmation. It leaves the board only once the
    /// server has accepted the delete.
    pub async fn delete_confirmed(&self) -> Result<(), ActionError> {
        let Some(id) = self.state.update(|s| s.confirm_delete()) else {
            return Ok(());
        };
        let token = self.token()?;
        self.backend.delete_note(&token, &id).await?;
        self.state.update(|s| s.notes.remove(&id));
        tracing::debug!(note_id = %id, "Note deleted");
        Ok(())
    }

    // --- profile -------------------------------------------------------

    /// Flip the theme. Signed in, it is saved on the account; signed out, on
    /// this device.
    pub async fn toggle_theme(&self) -> Theme {
        let (theme, token) = self
            .state
            .update(|s| (s.toggle_theme(), s.token().map(str::to_string)));
        match token {
            Some(token) => match self.backend.set_theme(&token, theme).await {
                Ok(_) => self.save_session().await,
                Err(e) => tracing::error!("Failed to update theme: {}", e),
            },
            None => self.sessions.save_theme(theme).await,
        }
        theme
    }

    /// Upload an image file as the profile picture.
    pub async fn upload_profile_image(&self, file_name: &str, bytes: &[u8]) -> Result<(), ActionError> {
        let uri = encode_profile_image(file_name, bytes)?;
        self.set_profile_image(Some(uri)).await
    }

    pub async fn remove_profile_image(&self) -> Result<(), ActionError> {
        self.set_profile_image(None).await
    }

    async fn set_profile_image(&self, image: Option<String>) -> Result<(), ActionError> {
        let token = self.token()?;
        let stored = self.backend.set_profile_image(&token, image).await?;
        self.state.update(|s| {
            if let Some(mut user) = s.user().cloned() {
                user.profile_image = stored;
                s.update_user(user);
            }
        });
        self.save_session().await;
        Ok(())
    }

    /// Change the username. `Ok(false)` when the name is unchanged and nothing
    /// was sent.
    pub async fn rename(&self, username: &str) -> Result<bool, ActionError> {
        let name = username.trim();
        match store::emoji::utf16_len(name) {
            0 => return Err(ActionError::invalid("Username cannot be empty")),
            1..=2 => return Err(ActionError::invalid("Username must be at least 3 characters long")),
            21.. => return Err(ActionError::invalid("Username must be less than 20 characters")),
            _ => {}
        }

        let current = self
            .state
            .view(|s| s.user().map(|u| u.username.clone()))
            .ok_or(ActionError::SignedOut)?;
        if name == current {
            return Ok(false);
        }

        let token = self.token()?;
        let response = self.backend.set_username(&token, name).await?;
        self.state.update(|s| s.update_user(response.user));
        self.save_session().await;
        Ok(true)
    }
}

/// Random spot near the origin for a note stored without a position.
pub fn fallback_position() -> Position {
    let mut rng = rand::thread_rng();
    Position::new(
        rng.gen::<f64>() * FALLBACK_SPREAD.0,
        rng.gen::<f64>() * FALLBACK_SPREAD.1,
    )
}

/// Random spot for a new note on a canvas of the given size.
pub fn new_note_position(canvas_width: f64, canvas_height: f64) -> Position {
    let mut rng = rand::thread_rng();
    Position::new(
        rng.gen::<f64>() * (canvas_width - NEW_NOTE_MARGIN).max(0.0),
        rng.gen::<f64>() * (canvas_height - NEW_NOTE_MARGIN).max(0.0),
    )
}

fn image_mime(file_name: &str) -> Option<&'static str> {
    let extension = file_name.rsplit_once('.')?.1.to_ascii_lowercase();
    match extension.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "svg" => Some("image/svg+xml"),
        "bmp" => Some("image/bmp"),
        "avif" => Some("image/avif"),
        _ => None,
    }
}

/// Check an image file and encode it as a `data:` URI.
pub fn encode_profile_image(file_name: &str, bytes: &[u8]) -> Result<String, ActionError> {
    let mime = image_mime(file_name).ok_or_else(|| ActionError::invalid("Please select a valid image file."))?;
    if bytes.len() > PROFILE_IMAGE_MAX_BYTES {
        return Err(ActionError::invalid("Image size must be less than 2MB."));
    }
    let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
    Ok(format!("data:{mime};base64,{encoded}"))
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use api::models::UserInfo;
    use chrono::Utc;
    use store::{EmojiTarget, MemoryStore, NoteField, Selection};

    use super::*;

    type Hook = Box<dyn FnOnce()>;

    #[derive(Default)]
    struct FakeBackend {
        notes: RefCell<Vec<Note>>,
        updates: RefCell<Vec<(String, NotePatch)>>,
        themes: RefCell<Vec<Theme>>,
        renames: Cell<usize>,
        reject_token: Cell<bool>,
        fail_deletes: Cell<bool>,
        during_update: RefCell<Option<Hook>>,
    }

    fn user() -> UserInfo {
        UserInfo {
            id: "u1".into(),
            username: "alice".into(),
            email: "alice@example.com".into(),
            theme: Theme::Light,
            profile_image: None,
        }
    }

    fn note(id: &str, position: Option<Position>) -> Note {
        let now = Utc::now();
        Note {
            id: id.into(),
            owner_id: "u1".into(),
            title: "New Note".into(),
            content: " ".into(),
            color: NoteColor::Yellow,
            size: NoteSize::Medium,
            position,
            created_at: now,
            updated_at: now,
        }
    }

    fn api_error(status: u16, message: &str) -> ClientError {
        ClientError::Api {
            status,
            message: message.into(),
        }
    }

    impl NotesBackend for FakeBackend {
        async fn register(&self, req: &RegisterRequest) -> ClientResult<AuthResponse> {
            let mut user = user();
            user.username = req.username.clone().unwrap_or_default();
            Ok(AuthResponse {
                token: "tok".into(),
                user,
            })
        }

        async fn login(&self, req: &LoginRequest) -> ClientResult<AuthResponse> {
            if req.password.as_deref() != Some("pw") {
                return Err(api_error(401, "Invalid credentials"));
            }
            Ok(AuthResponse {
                token: "tok".into(),
                user: user(),
            })
        }

        async fn list_notes(&self, _token: &str) -> ClientResult<Vec<Note>> {
            if self.reject_token.get() {
                return Err(api_error(403, "Invalid token"));
            }
            Ok(self.notes.borrow().clone())
        }

        async fn create_note(&self, _token: &str, new_note: &NewNote) -> ClientResult<Note> {
            let mut created = note("created", new_note.position);
            created.title = new_note.title_or_default().to_string();
            self.notes.borrow_mut().push(created.clone());
            Ok(created)
        }

        async fn update_note(&self, _token: &str, id: &str, patch: &NotePatch) -> ClientResult<Option<Note>> {
            self.updates.borrow_mut().push((id.to_string(), patch.clone()));
            if let Some(hook) = self.during_update.borrow_mut().take() {
                hook();
            }
            let mut notes = self.notes.borrow_mut();
            let Some(stored) = notes.iter_mut().find(|n| n.id == id) else {
                return Ok(None);
            };
            stored.apply(patch);
            stored.updated_at = Utc::now();
            Ok(Some(stored.clone()))
        }

        async fn delete_note(&self, _token: &str, id: &str) -> ClientResult<()> {
            if self.fail_deletes.get() {
                return Err(api_error(500, "Internal server error"));
            }
            self.notes.borrow_mut().retain(|n| n.id != id);
            Ok(())
        }

        async fn set_theme(&self, _token: &str, theme: Theme) -> ClientResult<Theme> {
            self.themes.borrow_mut().push(theme);
            Ok(theme)
        }

        async fn set_profile_image(&self, _token: &str, image: Option<String>) -> ClientResult<Option<String>> {
            Ok(image)
        }

        async fn set_username(&self, _token: &str, username: &str) -> ClientResult<UsernameResponse> {
            self.renames.set(self.renames.get() + 1);
            let mut user = user();
            user.username = username.to_string();
            Ok(UsernameResponse {
                username: username.to_string(),
                user,
            })
        }
    }

    type TestController = Controller<FakeBackend, MemoryStore, Rc<RefCell<AppState>>>;

    fn controller(backend: FakeBackend) -> (TestController, MemoryStore, Rc<RefCell<AppState>>) {
        let sessions = MemoryStore::new();
        let state = Rc::new(RefCell::new(AppState::new()));
        (Controller::new(backend, sessions.clone(), state.clone()), sessions, state)
    }

    async fn signed_in(notes: Vec<Note>) -> (TestController, MemoryStore, Rc<RefCell<AppState>>) {
        let backend = FakeBackend::default();
        *backend.notes.borrow_mut() = notes;
        let (ctrl, sessions, state) = controller(backend);
        ctrl.login("alice@example.com", "pw").await.unwrap();
        (ctrl, sessions, state)
    }

    #[tokio::test]
    async fn test_login_saves_session_and_places_notes() {
        let (_ctrl, sessions, state) = signed_in(vec![
            note("a", Some(Position::new(10.0, 20.0))),
            note("b", None),
        ])
        .await;

        assert_eq!(sessions.load().await.unwrap().token, "tok");
        let state = state.borrow();
        assert!(state.is_signed_in());
        assert_eq!(state.notes.len(), 2);
        assert_eq!(state.notes.get("a").unwrap().position, Some(Position::new(10.0, 20.0)));
        let placed = state.notes.get("b").unwrap().position.unwrap();
        assert!((0.0..300.0).contains(&placed.x));
        assert!((0.0..200.0).contains(&placed.y));
    }

    #[tokio::test]
    async fn test_login_failure_stays_signed_out() {
        let (ctrl, sessions, state) = controller(FakeBackend::default());
        let err = ctrl.login("alice@example.com", "wrong").await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid credentials");
        assert!(!state.borrow().is_signed_in());
        assert!(sessions.load().await.is_none());

        let err = ctrl.login("  ", "pw").await.unwrap_err();
        assert!(matches!(err, ActionError::Invalid(_)));
    }

    #[tokio::test]
    async fn test_register_requires_fields() {
        let (ctrl, _, state) = controller(FakeBackend::default());
        assert!(ctrl.register("bob", "", "pw").await.is_err());
        ctrl.register(" bob ", "bob@example.com", "pw").await.unwrap();
        assert_eq!(state.borrow().user().unwrap().username, "bob");
    }

    #[tokio::test]
    async fn test_restore_session() {
        let backend = FakeBackend::default();
        *backend.notes.borrow_mut() = vec![note("a", None)];
        let (ctrl, sessions, state) = controller(backend);
        sessions.save(&Session::new("tok", user())).await;

        ctrl.restore().await;
        assert!(state.borrow().is_signed_in());
        assert_eq!(state.borrow().notes.len(), 1);
    }

    #[tokio::test]
    async fn test_restore_with_rejected_token_signs_out() {
        let backend = FakeBackend::default();
        backend.reject_token.set(true);
        let (ctrl, sessions, state) = controller(backend);
        sessions.save(&Session::new("stale", user())).await;

        ctrl.restore().await;
        assert!(!state.borrow().is_signed_in());
        assert!(sessions.load().await.is_none());
    }

    #[tokio::test]
    async fn test_restore_signed_out_theme() {
        let (ctrl, sessions, state) = controller(FakeBackend::default());
        sessions.save_theme(Theme::Dark).await;
        ctrl.restore().await;
        assert_eq!(state.borrow().theme(), Theme::Dark);
    }

    #[tokio::test]
    async fn test_edit_is_local_then_persisted() {
        let (ctrl, _, state) = signed_in(vec![note("a", Some(Position::default()))]).await;

        ctrl.edit_note("a", NotePatch::color(NoteColor::Blue)).await;

        assert_eq!(state.borrow().notes.get("a").unwrap().color, NoteColor::Blue);
        let updates = ctrl.backend.updates.borrow();
        assert_eq!(updates.as_slice(), &[("a".to_string(), NotePatch::color(NoteColor::Blue))]);
    }

    #[tokio::test]
    async fn test_late_answer_keeps_newer_local_text() {
        let (ctrl, _, state) = signed_in(vec![note("a", Some(Position::default()))]).await;

        // The user keeps typing while the first PUT is in flight.
        let typing = state.clone();
        *ctrl.backend.during_update.borrow_mut() = Some(Box::new(move || {
            typing.borrow_mut().edit_note("a", NotePatch::content("hello world"));
        }));

        ctrl.edit_note("a", NotePatch::content("hello")).await;

        let state = state.borrow();
        let local = state.notes.get("a").unwrap();
        assert_eq!(local.content, "hello world");
        let server = ctrl.backend.notes.borrow();
        assert_eq!(local.updated_at, server[0].updated_at);
    }

    #[tokio::test]
    async fn test_edit_unknown_note_sends_nothing() {
        let (ctrl, _, _) = signed_in(vec![]).await;
        ctrl.edit_note("ghost", NotePatch::title("x")).await;
        assert!(ctrl.backend.updates.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_drag_sends_one_rounded_update() {
        let (ctrl, _, state) = signed_in(vec![note("a", Some(Position::new(100.0, 100.0)))]).await;

        {
            let mut state = state.borrow_mut();
            assert!(state.begin_drag("a", Position::new(110.0, 110.0)));
            state.drag_to(Position::new(50.3, 70.6));
            state.drag_to(Position::new(5.2, 30.7));
        }
        ctrl.end_drag().await;
        ctrl.end_drag().await;

        let updates = ctrl.backend.updates.borrow();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].1, NotePatch::position(Position::new(0.0, 21.0)));
        assert_eq!(
            state.borrow().notes.get("a").unwrap().position,
            Some(Position::new(0.0, 21.0))
        );
    }

    #[tokio::test]
    async fn test_emoji_insert_persists() {
        let (ctrl, _, state) = signed_in(vec![note("a", Some(Position::default()))]).await;
        state.borrow_mut().open_emoji_picker(EmojiTarget {
            note_id: "a".into(),
            field: NoteField::Title,
            selection: Some(Selection::caret(3)),
        });

        let (edit, caret) = state.borrow_mut().insert_emoji("😀").unwrap();
        ctrl.persist(edit).await;
        assert_eq!(caret, 5);
        assert_eq!(state.borrow().notes.get("a").unwrap().title, "New😀 Note");
        assert_eq!(ctrl.backend.updates.borrow().len(), 1);
    }

    #[tokio::test]
    async fn test_create_note() {
        let (ctrl, _, state) = signed_in(vec![]).await;
        let id = ctrl.create_note(1200.0, 800.0).await.unwrap();
        let state = state.borrow();
        let created = state.notes.get(&id).unwrap();
        assert_eq!(created.title, "New Note");
        let position = created.position.unwrap();
        assert!(position.x <= 900.0 && position.y <= 500.0);
    }

    #[tokio::test]
    async fn test_delete_waits_for_server() {
        let (ctrl, _, state) = signed_in(vec![note("a", None), note("b", None)]).await;

        ctrl.backend.fail_deletes.set(true);
        state.borrow_mut().request_delete("a");
        assert!(ctrl.delete_confirmed().await.is_err());
        assert!(state.borrow().notes.contains("a"));

        ctrl.backend.fail_deletes.set(false);
        state.borrow_mut().request_delete("a");
        ctrl.delete_confirmed().await.unwrap();
        assert!(!state.borrow().notes.contains("a"));
        assert!(state.borrow().pending_delete().is_none());

        // Nothing pending: a no-op.
        ctrl.delete_confirmed().await.unwrap();
    }

    #[tokio::test]
    async fn test_toggle_theme() {
        let (ctrl, sessions, _) = controller(FakeBackend::default());
        assert_eq!(ctrl.toggle_theme().await, Theme::Dark);
        assert_eq!(sessions.load_theme().await, Some(Theme::Dark));
        assert!(ctrl.backend.themes.borrow().is_empty());

        let (ctrl, sessions, _) = signed_in(vec![]).await;
        assert_eq!(ctrl.toggle_theme().await, Theme::Dark);
        assert_eq!(ctrl.backend.themes.borrow().as_slice(), &[Theme::Dark]);
        assert_eq!(sessions.load().await.unwrap().user.theme, Theme::Dark);
    }

    #[tokio::test]
    async fn test_rename() {
        let (ctrl, sessions, state) = signed_in(vec![]).await;

        assert!(ctrl.rename("  ").await.is_err());
        assert!(ctrl.rename("ab").await.is_err());
        assert!(ctrl.rename(&"a".repeat(21)).await.is_err());
        assert!(ctrl.rename(&format!("{}a", "😀".repeat(10))).await.is_err());
        assert!(!ctrl.rename(" alice ").await.unwrap());
        assert_eq!(ctrl.backend.renames.get(), 0);

        assert!(ctrl.rename("alicia").await.unwrap());
        assert_eq!(state.borrow().user().unwrap().username, "alicia");
        assert_eq!(sessions.load().await.unwrap().user.username, "alicia");
    }

    #[tokio::test]
    async fn test_profile_image() {
        let (ctrl, sessions, state) = signed_in(vec![]).await;
        ctrl.upload_profile_image("me.PNG", &[1, 2, 3]).await.unwrap();
        let image = state.borrow().user().unwrap().profile_image.clone().unwrap();
        assert_eq!(image, "data:image/png;base64,AQID");
        assert_eq!(sessions.load().await.unwrap().user.profile_image, Some(image));

        ctrl.remove_profile_image().await.unwrap();
        assert_eq!(state.borrow().user().unwrap().profile_image, None);
    }

    #[test]
    fn test_encode_profile_image_limits() {
        assert!(encode_profile_image("notes.txt", &[1]).is_err());
        assert!(encode_profile_image("noext", &[1]).is_err());
        let too_big = vec![0u8; PROFILE_IMAGE_MAX_BYTES + 1];
        assert!(encode_profile_image("a.jpg", &too_big).is_err());
        assert!(encode_profile_image("a.jpeg", &[0]).unwrap().starts_with("data:image/jpeg;base64,"));
    }

    #[tokio::test]
    async fn test_logout_clears_everything_but_theme() {
        let (ctrl, sessions, state) = signed_in(vec![note("a", None)]).await;
        ctrl.toggle_theme().await;
        ctrl.logout().await;

        assert!(!state.borrow().is_signed_in());
        assert!(state.borrow().notes.is_empty());
        assert!(sessions.load().await.is_none());
        assert_eq!(sessions.load_theme().await, Some(Theme::Dark));
    }
}
