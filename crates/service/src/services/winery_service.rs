use std::sync::Arc;

use models::{
    winery::{Winery, WineryRequest},
    ItemType,
};
use tracing::{info, instrument};

use crate::errors::ServiceError;
use crate::gateway::RepositoryGateway;
use crate::query::convert_all;

pub struct WineryService<R: RepositoryGateway + ?Sized = dyn RepositoryGateway> {
    repo: Arc<R>,
}

impl<R: RepositoryGateway + ?Sized> WineryService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    pub async fn get_wineries(&self) -> Result<Vec<Winery>, ServiceError> {
        let items = self.repo.get_all_repository_items(ItemType::Winery).await?;
        convert_all(&items)
    }

    pub async fn get_winery_by_id(&self, id: i32) -> Result<Winery, ServiceError> {
        let item = self.repo.get_repository_item(id, ItemType::Winery).await?;
        Ok(Winery::try_from(&item)?)
    }

    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn add_winery(&self, request: &WineryRequest) -> Result<Winery, ServiceError> {
        let mut item = self.repo.create_item(ItemType::Winery);
        request.apply_to(&mut item);
        let added = self.repo.add_item(item).await?;
        let winery = Winery::try_from(&added)?;
        info!(id = winery.id, "winery_created");
        Ok(winery)
    }
}
