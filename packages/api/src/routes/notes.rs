//! Note CRUD, scoped to the caller.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::Json;
use uuid::Uuid;

use super::ApiState;
use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::models::{MessageResponse, NewNote, Note, NotePatch};

pub async fn list(State(state): State<ApiState>, AuthUser(owner): AuthUser) -> ApiResult<Json<Vec<Note>>> {
    Ok(Json(state.db.list_notes(owner).await?))
}

pub async fn create(
    State(state): State<ApiState>,
    AuthUser(owner): AuthUser,
    payload: Result<Json<NewNote>, JsonRejection>,
) -> ApiResult<Json<Note>> {
    let Json(note) = payload?;
    let note = state.db.create_note(owner, note).await?;
    tracing::debug!(note_id = %note.id, user_id = %owner, "Note created");
    Ok(Json(note))
}

/// Returns `null` when the note does not exist or belongs to someone else.
pub async fn update(
    State(state): State<ApiState>,
    AuthUser(owner): AuthUser,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<NotePatch>, JsonRejection>,
) -> ApiResult<Json<Option<Note>>> {
    let Path(id) = id?;
    let Json(patch) = payload?;
    let note = state.db.update_note(owner, id, patch).await?;
    if note.is_none() {
        tracing::debug!(note_id = %id, user_id = %owner, "Update matched no note");
    }
    Ok(Json(note))
}

pub async fn remove(
    State(state): State<ApiState>,
    AuthUser(owner): AuthUser,
    id: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let Path(id) = id?;
    let removed = state.db.delete_note(owner, id).await?;
    tracing::debug!(note_id = %id, user_id = %owner, removed, "Note delete");
    Ok(Json(MessageResponse {
        message: "Note deleted".to_string(),
    }))
}
