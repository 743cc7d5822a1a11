use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    Json,
};
use models::wine::{Wine, WineRequest};
use serde::Deserialize;
use tracing::info;

use crate::{errors::ApiError, state::AppState};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WineQuery {
    pub wine_id: Option<i32>,
    pub winery_id: Option<i32>,
}

/// All wines, one wine (`wineId`), or one winery's wines by name (`wineryId`).
/// `wineId` wins when both are given.
pub async fn get_wines(State(state): State<AppState>, Query(q): Query<WineQuery>) -> Result<Response, ApiError> {
    let resp = match (q.wine_id, q.winery_id) {
        (Some(id), _) => Json(state.wines.get_wine(id).await?).into_response(),
        (None, Some(winery_id)) => Json(state.wines.get_wines_by_winery_id(winery_id).await?).into_response(),
        (None, None) => {
            let wines = state.wines.get_all_wines().await?;
            info!(count = wines.len(), "list wines");
            Json(wines).into_response()
        }
    };
    Ok(resp)
}

pub async fn add_wine(State(state): State<AppState>, Json(input): Json<WineRequest>) -> Result<Json<Wine>, ApiError> {
    Ok(Json(state.wines.add_wine(&input).await?))
}
