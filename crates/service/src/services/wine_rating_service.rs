use std::sync::Arc;

use models::{
    wine_rating::{
        WineFriendsRequest, WineRating, WineRatingEditRequest, WineRatingRequest, PROPERTY_RATING, PROPERTY_USER,
        PROPERTY_WINE_ID,
    },
    ItemType,
};
use tracing::{debug, info, instrument};

use crate::errors::ServiceError;
use crate::gateway::RepositoryGateway;
use crate::query::{convert_all, ItemFilter, Predicate};

pub struct WineRatingService<R: RepositoryGateway + ?Sized = dyn RepositoryGateway> {
    repo: Arc<R>,
}

impl<R: RepositoryGateway + ?Sized> WineRatingService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    async fn filtered(&self, filter: ItemFilter) -> Result<Vec<WineRating>, ServiceError> {
        let items = self.repo.get_all_repository_items(ItemType::WineRating).await?;
        convert_all(&filter.apply(items))
    }

    pub async fn get_all_wine_ratings(&self) -> Result<Vec<WineRating>, ServiceError> {
        self.filtered(ItemFilter::all(vec![])).await
    }

    pub async fn get_wine_ratings_by_wine_id(&self, wine_id: i32) -> Result<Vec<WineRating>, ServiceError> {
        self.filtered(ItemFilter::all(vec![Predicate::equals(PROPERTY_WINE_ID, wine_id)])).await
    }

    pub async fn get_wine_ratings_by_user(&self, user: &str) -> Result<Vec<WineRating>, ServiceError> {
        self.filtered(ItemFilter::all(vec![Predicate::equals(PROPERTY_USER, user)])).await
    }

    pub async fn get_wine_ratings_by_wine_id_by_user(&self, wine_id: i32, user: &str) -> Result<Vec<WineRating>, ServiceError> {
        self.filtered(ItemFilter::all(vec![
            Predicate::equals(PROPERTY_WINE_ID, wine_id),
            Predicate::equals(PROPERTY_USER, user),
        ]))
        .await
    }

    /// Ratings matching any of the requested wines or any of the requested
    /// users. A leading `*` in `users` drops the user predicate.
    pub async fn get_wine_ratings_by_users_by_wine_ids(
        &self,
        request: &WineFriendsRequest,
    ) -> Result<Vec<WineRating>, ServiceError> {
        let mut predicates = vec![Predicate::any_of(PROPERTY_WINE_ID, request.wine_ids.iter().copied())];
        if !request.any_user() {
            predicates.push(Predicate::any_of(PROPERTY_USER, request.users.iter().map(String::as_str)));
        }
        debug!(wine_ids = request.wine_ids.len(), users = request.users.len(), any_user = request.any_user(), "friends query");
        self.filtered(ItemFilter::any(predicates)).await
    }

    #[instrument(skip(self, request), fields(wine_id = request.wine_id, user = %request.user))]
    pub async fn add_wine_rating(&self, request: &WineRatingRequest) -> Result<WineRating, ServiceError> {
        let mut item = self.repo.create_item(ItemType::WineRating);
        request.apply_to(&mut item);
        let added = self.repo.add_item(item).await?;
        let rating = WineRating::try_from(&added)?;
        info!(id = rating.id, "wine_rating_created");
        Ok(rating)
    }

    /// Replace the rating of an existing entry; other fields are untouched.
    #[instrument(skip(self, request), fields(id = request.id))]
    pub async fn edit_wine_rating(&self, request: &WineRatingEditRequest) -> Result<WineRating, ServiceError> {
        let mut item = self.repo.get_repository_item(request.id, ItemType::WineRating).await?;
        item.set_property(PROPERTY_RATING, request.rating.as_str());
        let updated = self.repo.update_item(item, PROPERTY_RATING).await?;
        info!(id = request.id, "wine_rating_updated");
        Ok(WineRating::try_from(&updated)?)
    }
}
