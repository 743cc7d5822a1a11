use std::sync::Arc;

use models::{
    wine::{Wine, WineRequest, PROPERTY_WINERY_ID},
    ItemType,
};
use tracing::{info, instrument};

use crate::errors::ServiceError;
use crate::gateway::RepositoryGateway;
use crate::query::{convert_all, ItemFilter, Predicate};

pub struct WineService<R: RepositoryGateway + ?Sized = dyn RepositoryGateway> {
    repo: Arc<R>,
}

impl<R: RepositoryGateway + ?Sized> WineService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    pub async fn get_all_wines(&self) -> Result<Vec<Wine>, ServiceError> {
        let items = self.repo.get_all_repository_items(ItemType::Wine).await?;
        convert_all(&items)
    }

    /// Wines of one winery, sorted by name ignoring case.
    pub async fn get_wines_by_winery_id(&self, winery_id: i32) -> Result<Vec<Wine>, ServiceError> {
        let items = self.repo.get_all_repository_items(ItemType::Wine).await?;
        let items = ItemFilter::all(vec![Predicate::equals(PROPERTY_WINERY_ID, winery_id)]).apply(items);
        let mut wines: Vec<Wine> = convert_all(&items)?;
        wines.sort_by_cached_key(|w| w.name.to_lowercase());
        Ok(wines)
    }

    pub async fn get_wine(&self, id: i32) -> Result<Wine, ServiceError> {
        let item = self.repo.get_repository_item(id, ItemType::Wine).await?;
        Ok(Wine::try_from(&item)?)
    }

    /// Store a new wine and return it with its assigned id.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use models::wine::WineRequest;
    /// use service::{gateway::InMemoryGateway, services::WineService};
    /// let svc = WineService::new(Arc::new(InMemoryGateway::new()));
    /// let req = WineRequest { winery_id: 1, name: "Barbera".into(), style: "red".into() };
    /// let wine = tokio_test::block_on(svc.add_wine(&req)).unwrap();
    /// assert_eq!(tokio_test::block_on(svc.get_wine(wine.id)).unwrap(), wine);
    /// ```
    #[instrument(skip(self, request), fields(winery_id = request.winery_id))]
    pub async fn add_wine(&self, request: &WineRequest) -> Result<Wine, ServiceError> {
        let mut item = self.repo.create_item(ItemType::Wine);
        request.apply_to(&mut item);
        let added = self.repo.add_item(item).await?;
        let wine = Wine::try_from(&added)?;
        info!(id = wine.id, name = %wine.name, "wine_created");
        Ok(wine)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::memory_gateway;

    fn req(winery_id: i32, name: &str) -> WineRequest {
        WineRequest { winery_id, name: name.into(), style: "red".into() }
    }

    #[tokio::test]
    async fn created_wine_reads_back_equal() -> Result<(), anyhow::Error> {
        let (_, gw) = memory_gateway();
        let svc = WineService::new(gw);
        let created = svc.add_wine(&req(3, "Dolcetto")).await?;
        assert_eq!(svc.get_wine(created.id).await?, created);
        assert_eq!(created.winery_id, 3);
        Ok(())
    }

    #[tokio::test]
    async fn winery_listing_is_filtered_and_sorted_case_insensitively() -> Result<(), anyhow::Error> {
        let (_, gw) = memory_gateway();
        let svc = WineService::new(gw);
        for (winery, name) in [(1, "barolo"), (2, "Arneis"), (1, "Albarossa"), (1, "Chardonnay"), (1, "brachetto")] {
            svc.add_wine(&req(winery, name)).await?;
        }
        let names: Vec<String> = svc.get_wines_by_winery_id(1).await?.into_iter().map(|w| w.name).collect();
        assert_eq!(names, vec!["Albarossa", "barolo", "brachetto", "Chardonnay"]);
        assert!(svc.get_wines_by_winery_id(9).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn list_all_keeps_gateway_order() -> Result<(), anyhow::Error> {
        let (_, gw) = memory_gateway();
        let svc = WineService::new(gw);
        svc.add_wine(&req(1, "Zibibbo")).await?;
        svc.add_wine(&req(2, "Aglianico")).await?;
        let names: Vec<String> = svc.get_all_wines().await?.into_iter().map(|w| w.name).collect();
        assert_eq!(names, vec!["Zibibbo", "Aglianico"]);
        Ok(())
    }

    #[tokio::test]
    async fn missing_wine_is_an_error() {
        let (_, gw) = memory_gateway();
        let svc = WineService::new(gw);
        assert!(matches!(svc.get_wine(404).await, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn malformed_item_aborts_listing() -> Result<(), anyhow::Error> {
        let (gw, shared) = memory_gateway();
        let svc = WineService::new(shared);
        svc.add_wine(&req(1, "Fine")).await?;
        let mut broken = gw.create_item(ItemType::Wine);
        broken.set_property(PROPERTY_WINERY_ID, 1);
        gw.add_item(broken).await?;
        assert!(matches!(svc.get_all_wines().await, Err(ServiceError::Model(_))));
        Ok(())
    }
}
