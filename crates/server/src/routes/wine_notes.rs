use axum::{
    extract::{Query, State},
    Json,
};
use models::wine_note::{WineNoteRequest, WineNoteResponse};
use serde::Deserialize;

use crate::{errors::ApiError, state::AppState};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteQuery {
    pub wine_id: Option<i32>,
    pub user: Option<String>,
}

pub async fn get_wine_notes(
    State(state): State<AppState>,
    Query(q): Query<NoteQuery>,
) -> Result<Json<WineNoteResponse>, ApiError> {
    let svc = &state.notes;
    let notes = match (q.wine_id, q.user.as_deref()) {
        (Some(wine_id), Some(user)) => svc.get_wine_notes_by_wine_id_by_user(wine_id, user).await?,
        (Some(wine_id), None) => svc.get_wine_notes_by_wine_id(wine_id).await?,
        (None, Some(user)) => svc.get_wine_notes_by_user(user).await?,
        (None, None) => svc.get_all_wine_notes().await?,
    };
    Ok(Json(notes))
}

/// Add new notes and apply upserts; responds with every note of the wine.
pub async fn add_wine_notes(
    State(state): State<AppState>,
    Json(input): Json<WineNoteRequest>,
) -> Result<Json<WineNoteResponse>, ApiError> {
    Ok(Json(state.notes.add_wine_notes(&input).await?))
}
