use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    Json,
};
use models::winery::{Winery, WineryRequest};
use serde::Deserialize;

use crate::{errors::ApiError, state::AppState};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WineryQuery {
    pub winery_id: Option<i32>,
}

pub async fn get_wineries(State(state): State<AppState>, Query(q): Query<WineryQuery>) -> Result<Response, ApiError> {
    let resp = match q.winery_id {
        Some(id) => Json(state.wineries.get_winery_by_id(id).await?).into_response(),
        None => Json(state.wineries.get_wineries().await?).into_response(),
    };
    Ok(resp)
}

pub async fn add_winery(State(state): State<AppState>, Json(input): Json<WineryRequest>) -> Result<Json<Winery>, ApiError> {
    Ok(Json(state.wineries.add_winery(&input).await?))
}
