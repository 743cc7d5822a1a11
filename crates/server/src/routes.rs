use axum::{
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;

use crate::state::AppState;

pub mod relay;
pub mod wine_notes;
pub mod wine_ratings;
pub mod wineries;
pub mod wines;

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let api = Router::new()
        .route("/api/v1/wines", get(wines::get_wines).put(wines::add_wine))
        .route("/api/v1/wineries", get(wineries::get_wineries).put(wineries::add_winery))
        .route(
            "/api/v1/wineRatings",
            get(wine_ratings::get_wine_ratings)
                .put(wine_ratings::add_wine_rating)
                .post(wine_ratings::edit_wine_rating),
        )
        .route("/api/v1/wineRatings/friends", post(wine_ratings::get_friends_ratings))
        .route("/api/v1/wineNotes", get(wine_notes::get_wine_notes).put(wine_notes::add_wine_notes))
        .route("/api/v1/rabbit", post(relay::producer));

    Router::new()
        .route("/health", get(health))
        .merge(api)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx responses are logged at ERROR
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
