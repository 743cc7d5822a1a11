use std::collections::HashMap;

use async_trait::async_trait;
use models::{ItemType, RepositoryItem};
use tokio::sync::RwLock;
use tracing::debug;

use super::RepositoryGateway;
use crate::errors::ServiceError;

#[derive(Default)]
struct Inner {
    last_id: i32,
    items: HashMap<ItemType, Vec<RepositoryItem>>,
}

/// Process-local gateway. Ids come from one sequence shared by all types,
/// like rows of a single table.
#[derive(Default)]
pub struct InMemoryGateway {
    inner: RwLock<Inner>,
}

impl InMemoryGateway {
    pub fn new() -> Self { Self::default() }
}

#[async_trait]
impl RepositoryGateway for InMemoryGateway {
    async fn add_item(&self, mut item: RepositoryItem) -> Result<RepositoryItem, ServiceError> {
        let mut inner = self.inner.write().await;
        inner.last_id += 1;
        let id = inner.last_id;
        item.assign_id(id);
        inner.items.entry(item.item_type()).or_default().push(item.clone());
        debug!(id, item_type = %item.item_type(), "item added");
        Ok(item)
    }

    async fn get_repository_item(&self, id: i32, item_type: ItemType) -> Result<RepositoryItem, ServiceError> {
        let inner = self.inner.read().await;
        inner
            .items
            .get(&item_type)
            .and_then(|items| items.iter().find(|i| i.id() == Some(id)))
            .cloned()
            .ok_or_else(|| ServiceError::not_found(&format!("{item_type} {id}")))
    }

    async fn get_all_repository_items(&self, item_type: ItemType) -> Result<Vec<RepositoryItem>, ServiceError> {
        let inner = self.inner.read().await;
        Ok(inner.items.get(&item_type).cloned().unwrap_or_default())
    }

    async fn get_repository_items(
        &self,
        value: &str,
        property: &str,
        item_type: ItemType,
    ) -> Result<Vec<RepositoryItem>, ServiceError> {
        let inner = self.inner.read().await;
        Ok(inner
            .items
            .get(&item_type)
            .map(|items| items.iter().filter(|i| i.property_matches(property, value)).cloned().collect())
            .unwrap_or_default())
    }

    async fn update_item(&self, item: RepositoryItem, changed_property: &str) -> Result<RepositoryItem, ServiceError> {
        let id = item.require_id()?;
        let value = item
            .property(changed_property)
            .cloned()
            .ok_or_else(|| ServiceError::Validation(format!("item has no `{changed_property}` to update")))?;

        let mut inner = self.inner.write().await;
        let stored = inner
            .items
            .get_mut(&item.item_type())
            .and_then(|items| items.iter_mut().find(|i| i.id() == Some(id)))
            .ok_or_else(|| ServiceError::not_found(&format!("{} {id}", item.item_type())))?;
        stored.set_property(changed_property, value);
        debug!(id, property = changed_property, "item updated");
        Ok(stored.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn add_assigns_increasing_ids_across_types() -> Result<(), anyhow::Error> {
        let gw = InMemoryGateway::new();
        let a = gw.add_item(gw.create_item(ItemType::Wine)).await?;
        let b = gw.add_item(gw.create_item(ItemType::Winery)).await?;
        assert_eq!((a.id(), b.id()), (Some(1), Some(2)));
        assert_eq!(gw.get_all_repository_items(ItemType::Wine).await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn get_by_id_respects_type_and_reports_missing() -> Result<(), anyhow::Error> {
        let gw = InMemoryGateway::new();
        let wine = gw.add_item(gw.create_item(ItemType::Wine)).await?;
        let id = wine.id().unwrap();
        assert_eq!(gw.get_repository_item(id, ItemType::Wine).await?.id(), Some(id));
        assert!(matches!(gw.get_repository_item(id, ItemType::Winery).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(gw.get_repository_item(99, ItemType::Wine).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn update_writes_only_the_named_property() -> Result<(), anyhow::Error> {
        let gw = InMemoryGateway::new();
        let mut item = gw.create_item(ItemType::WineRating);
        item.set_property("rating", "3");
        item.set_property("user", "ana");
        let mut stored = gw.add_item(item).await?;

        stored.set_property("rating", "5");
        stored.set_property("user", "mallory");
        let updated = gw.update_item(stored, "rating").await?;
        assert_eq!(updated.text("rating")?, "5");
        assert_eq!(updated.text("user")?, "ana");
        Ok(())
    }

    #[tokio::test]
    async fn property_query_keeps_insertion_order() -> Result<(), anyhow::Error> {
        let gw = InMemoryGateway::new();
        for (wine_id, note) in [(1, "a"), (2, "b"), (1, "c")] {
            let mut item = gw.create_item(ItemType::WineNote);
            item.set_property("wineId", wine_id);
            item.set_property("note", note);
            gw.add_item(item).await?;
        }
        let notes: Vec<String> = gw
            .get_repository_items("1", "wineId", ItemType::WineNote)
            .await?
            .iter()
            .map(|i| i.text("note"))
            .collect::<Result<_, _>>()?;
        assert_eq!(notes, vec!["a", "c"]);
        Ok(())
    }
}
