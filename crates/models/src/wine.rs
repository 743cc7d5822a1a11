use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::item::{ItemType, RepositoryItem};

pub const PROPERTY_WINERY_ID: &str = "wineryId";
pub const PROPERTY_NAME: &str = "name";
pub const PROPERTY_STYLE: &str = "style";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wine {
    pub id: i32,
    pub winery_id: i32,
    pub name: String,
    pub style: String,
}

/// Body of `PUT /api/v1/wines`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WineRequest {
    pub winery_id: i32,
    pub name: String,
    pub style: String,
}

impl WineRequest {
    pub fn apply_to(&self, item: &mut RepositoryItem) {
        item.set_property(PROPERTY_WINERY_ID, self.winery_id);
        item.set_property(PROPERTY_NAME, self.name.as_str());
        item.set_property(PROPERTY_STYLE, self.style.as_str());
    }
}

impl TryFrom<&RepositoryItem> for Wine {
    type Error = ModelError;

    fn try_from(item: &RepositoryItem) -> Result<Self, Self::Error> {
        item.expect_type(ItemType::Wine)?;
        Ok(Self {
            id: item.require_id()?,
            winery_id: item.int(PROPERTY_WINERY_ID)?,
            name: item.text(PROPERTY_NAME)?,
            style: item.text(PROPERTY_STYLE)?,
        })
    }
}
