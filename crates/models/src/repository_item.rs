//! Persisted form of [`RepositoryItem`]: one row per item, properties as JSON.

use std::collections::BTreeMap;

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::item::{ItemType, PropertyValue, RepositoryItem};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "repository_item")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub item_type: String,
    pub properties: Json,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub fn properties_to_json(item: &RepositoryItem) -> Result<Json, ModelError> {
    serde_json::to_value(item.properties()).map_err(|e| ModelError::Db(e.to_string()))
}

impl TryFrom<Model> for RepositoryItem {
    type Error = ModelError;

    fn try_from(row: Model) -> Result<Self, Self::Error> {
        let item_type: ItemType = row.item_type.parse()?;
        let properties: BTreeMap<String, PropertyValue> =
            serde_json::from_value(row.properties).map_err(|e| ModelError::Db(e.to_string()))?;
        Ok(RepositoryItem::with_id(item_type, row.id, properties))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn row_converts_back_into_item() {
        let mut item = RepositoryItem::new(ItemType::WineNote);
        item.set_property("wineId", 3);
        item.set_property("note", "tar");
        let now = Utc::now().into();
        let row = Model {
            id: 41,
            item_type: "wineNote".into(),
            properties: properties_to_json(&item).unwrap(),
            created_at: now,
            updated_at: now,
        };
        let back = RepositoryItem::try_from(row).unwrap();
        assert_eq!(back.id(), Some(41));
        assert_eq!(back.int("wineId").unwrap(), 3);
        assert_eq!(back.text("note").unwrap(), "tar");
    }

    #[test]
    fn unknown_type_column_is_rejected() {
        let now = Utc::now().into();
        let row = Model { id: 1, item_type: "barrel".into(), properties: serde_json::json!({}), created_at: now, updated_at: now };
        assert!(matches!(RepositoryItem::try_from(row), Err(ModelError::UnknownItemType(_))));
    }
}
