//! REST routes for note CRUD.
//!
//! Mounted under both `/notes` and `/api/notes`.

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    routing::get,
};
use serde_json::{Map, Value};

use crate::AppState;
use crate::api::{ApiError, MessageResponse};
use crate::domain::{NewNote, Note, NotePatch};
use crate::service::NoteService;

type ApiResult<T> = Result<T, ApiError>;

/// Build the note router, relative to its mount point.
pub fn build_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_notes).post(create_note))
        .route(
            "/{id}",
            get(get_note).put(update_note).delete(delete_note),
        )
}

/// POST / - Create a note
async fn create_note(
    State(notes): State<NoteService>,
    payload: Result<Json<NewNote>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    let Json(draft) = payload?;
    let created = notes.create(draft).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Note saved successfully".to_string(),
            id: created.id().map(str::to_string),
        }),
    ))
}

/// GET / - List every note
async fn list_notes(State(notes): State<NoteService>) -> ApiResult<Json<Vec<Note>>> {
    Ok(Json(notes.list().await?))
}

/// GET /{id} - Fetch one note
async fn get_note(
    State(notes): State<NoteService>,
    Path(id): Path<String>,
) -> ApiResult<Json<Note>> {
    notes.get(&id).await?.map(Json).ok_or(ApiError::NotFound)
}

/// PUT /{id} - Merge fields into a note
async fn update_note(
    State(notes): State<NoteService>,
    Path(id): Path<String>,
    payload: Result<Json<Map<String, Value>>, JsonRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let Json(fields) = payload?;

    notes.update(&id, NotePatch::from(fields)).await?.ok_or(ApiError::NotFound)?;
    Ok(Json(MessageResponse::new("Note updated successfully")))
}

/// DELETE /{id} - Remove every note with the id
async fn delete_note(
    State(notes): State<NoteService>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    if notes.delete(&id).await? == 0 {
        return Err(ApiError::NotFound);
    }
    Ok(Json(MessageResponse::new("Note deleted successfully")))
}
