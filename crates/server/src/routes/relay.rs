use axum::{extract::State, Json};
use common::types::SUCCESS;
use service::relay::WineImageTransfer;

use crate::{errors::ApiError, state::AppState};

/// Publish the transfer to both routing keys; replies with a bare `success`.
pub async fn producer(State(state): State<AppState>, Json(transfer): Json<WineImageTransfer>) -> Result<&'static str, ApiError> {
    state.relay.send(&transfer).await?;
    Ok(SUCCESS)
}
