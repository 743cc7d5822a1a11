use axum::{
    extract::{Query, State},
    Json,
};
use models::wine_rating::{WineFriendsRequest, WineRating, WineRatingEditRequest, WineRatingRequest};
use serde::Deserialize;

use crate::{errors::ApiError, state::AppState};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingQuery {
    pub wine_id: Option<i32>,
    pub user: Option<String>,
}

pub async fn get_wine_ratings(
    State(state): State<AppState>,
    Query(q): Query<RatingQuery>,
) -> Result<Json<Vec<WineRating>>, ApiError> {
    let svc = &state.ratings;
    let ratings = match (q.wine_id, q.user.as_deref()) {
        (Some(wine_id), Some(user)) => svc.get_wine_ratings_by_wine_id_by_user(wine_id, user).await?,
        (Some(wine_id), None) => svc.get_wine_ratings_by_wine_id(wine_id).await?,
        (None, Some(user)) => svc.get_wine_ratings_by_user(user).await?,
        (None, None) => svc.get_all_wine_ratings().await?,
    };
    Ok(Json(ratings))
}

pub async fn get_friends_ratings(
    State(state): State<AppState>,
    Json(input): Json<WineFriendsRequest>,
) -> Result<Json<Vec<WineRating>>, ApiError> {
    Ok(Json(state.ratings.get_wine_ratings_by_users_by_wine_ids(&input).await?))
}

pub async fn add_wine_rating(
    State(state): State<AppState>,
    Json(input): Json<WineRatingRequest>,
) -> Result<Json<WineRating>, ApiError> {
    Ok(Json(state.ratings.add_wine_rating(&input).await?))
}

pub async fn edit_wine_rating(
    State(state): State<AppState>,
    Json(input): Json<WineRatingEditRequest>,
) -> Result<Json<WineRating>, ApiError> {
    Ok(Json(state.ratings.edit_wine_rating(&input).await?))
}
