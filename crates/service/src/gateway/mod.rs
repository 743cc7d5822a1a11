//! Repository gateway: the item store every entity service reads and writes.
//!
//! Items are generic property bags keyed by [`ItemType`]; the gateway assigns
//! identities on add and never interprets properties beyond equality lookups.

use std::sync::Arc;

use async_trait::async_trait;
use models::{ItemType, RepositoryItem};

use crate::errors::ServiceError;

pub mod memory;
pub mod seaorm;

pub use memory::InMemoryGateway;
pub use seaorm::SeaOrmGateway;

pub type SharedGateway = Arc<dyn RepositoryGateway>;

#[async_trait]
pub trait RepositoryGateway: Send + Sync {
    /// A new, unsaved item of the given type.
    fn create_item(&self, item_type: ItemType) -> RepositoryItem {
        RepositoryItem::new(item_type)
    }

    /// Persist a new item and return it with its assigned id.
    async fn add_item(&self, item: RepositoryItem) -> Result<RepositoryItem, ServiceError>;

    /// Fails with `NotFound` when no item of that type has the id.
    async fn get_repository_item(&self, id: i32, item_type: ItemType) -> Result<RepositoryItem, ServiceError>;

    /// All items of a type, in insertion order.
    async fn get_all_repository_items(&self, item_type: ItemType) -> Result<Vec<RepositoryItem>, ServiceError>;

    /// Items of a type whose `property` equals `value` in string form.
    async fn get_repository_items(
        &self,
        value: &str,
        property: &str,
        item_type: ItemType,
    ) -> Result<Vec<RepositoryItem>, ServiceError>;

    /// Write only `changed_property` of an existing item; returns the stored item.
    async fn update_item(&self, item: RepositoryItem, changed_property: &str) -> Result<RepositoryItem, ServiceError>;
}
