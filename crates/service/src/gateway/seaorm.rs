use async_trait::async_trait;
use chrono::Utc;
use models::{
    item::PROPERTY_ID,
    repository_item::{self, properties_to_json},
    ItemType, RepositoryItem,
};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Select, Set,
};
use tracing::debug;

use super::RepositoryGateway;
use crate::errors::ServiceError;

/// SeaORM-backed gateway over the `repository_item` table.
#[derive(Clone)]
pub struct SeaOrmGateway {
    pub db: DatabaseConnection,
}

impl SeaOrmGateway {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }

    fn of_type(item_type: ItemType) -> Select<repository_item::Entity> {
        repository_item::Entity::find()
            .filter(repository_item::Column::ItemType.eq(item_type.as_str()))
            .order_by_asc(repository_item::Column::Id)
    }

    /// Rows of `item_type` whose `property` equals `value`: text properties
    /// exactly, integer properties by parsed value, `id` against the key column.
    pub(crate) fn property_query(value: &str, property: &str, item_type: ItemType) -> Select<repository_item::Entity> {
        let parsed = value.trim().parse::<i32>().ok();
        if property == PROPERTY_ID {
            let cond = match parsed {
                Some(id) => repository_item::Column::Id.eq(id),
                None => Expr::value(false),
            };
            return Self::of_type(item_type).filter(cond);
        }
        // key stays a literal so the expression indexes on `properties ->> '<key>'` apply
        let key = property.replace('\'', "''");
        let mut cond = Condition::any().add(Expr::cust_with_values(
            format!("jsonb_typeof(properties -> '{key}') = 'string' AND properties ->> '{key}' = ?"),
            [value.to_string()],
        ));
        if let Some(n) = parsed {
            cond = cond.add(Expr::cust_with_values(
                format!("jsonb_typeof(properties -> '{key}') = 'number' AND properties ->> '{key}' = ?"),
                [n.to_string()],
            ));
        }
        Self::of_type(item_type).filter(cond)
    }

    async fn load(&self, select: Select<repository_item::Entity>) -> Result<Vec<RepositoryItem>, ServiceError> {
        let rows = select.all(&self.db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
        rows.into_iter()
            .map(|row| RepositoryItem::try_from(row).map_err(ServiceError::from))
            .collect()
    }

    async fn find_row(&self, id: i32, item_type: ItemType) -> Result<repository_item::Model, ServiceError> {
        repository_item::Entity::find_by_id(id)
            .filter(repository_item::Column::ItemType.eq(item_type.as_str()))
            .one(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?
            .ok_or_else(|| ServiceError::not_found(&format!("{item_type} {id}")))
    }
}

#[async_trait]
impl RepositoryGateway for SeaOrmGateway {
    async fn add_item(&self, item: RepositoryItem) -> Result<RepositoryItem, ServiceError> {
        let now = Utc::now().into();
        let am = repository_item::ActiveModel {
            id: NotSet,
            item_type: Set(item.item_type().as_str().to_string()),
            properties: Set(properties_to_json(&item)?),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let row = am.insert(&self.db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
        debug!(id = row.id, item_type = %item.item_type(), "item inserted");
        Ok(RepositoryItem::try_from(row)?)
    }

    async fn get_repository_item(&self, id: i32, item_type: ItemType) -> Result<RepositoryItem, ServiceError> {
        let row = self.find_row(id, item_type).await?;
        Ok(RepositoryItem::try_from(row)?)
    }

    async fn get_all_repository_items(&self, item_type: ItemType) -> Result<Vec<RepositoryItem>, ServiceError> {
        self.load(Self::of_type(item_type)).await
    }

    async fn get_repository_items(
        &self,
        value: &str,
        property: &str,
        item_type: ItemType,
    ) -> Result<Vec<RepositoryItem>, ServiceError> {
        self.load(Self::property_query(value, property, item_type)).await
    }

    async fn update_item(&self, item: RepositoryItem, changed_property: &str) -> Result<RepositoryItem, ServiceError> {
        let id = item.require_id()?;
        let value = item
            .property(changed_property)
            .cloned()
            .ok_or_else(|| ServiceError::Validation(format!("item has no `{changed_property}` to update")))?;

        let row = self.find_row(id, item.item_type()).await?;
        let mut stored = RepositoryItem::try_from(row.clone())?;
        stored.set_property(changed_property, value);

        let mut am: repository_item::ActiveModel = row.into();
        am.properties = Set(properties_to_json(&stored)?);
        am.updated_at = Set(Utc::now().into());
        let updated = am.update(&self.db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
        debug!(id, property = changed_property, "item updated");
        Ok(RepositoryItem::try_from(updated)?)
    }
}
