use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::item::{ItemType, RepositoryItem};

pub const PROPERTY_NAME: &str = "name";
pub const PROPERTY_LOCATION: &str = "location";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Winery {
    pub id: i32,
    pub name: String,
    pub location: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WineryRequest {
    pub name: String,
    pub location: String,
}

impl WineryRequest {
    pub fn apply_to(&self, item: &mut RepositoryItem) {
        item.set_property(PROPERTY_NAME, self.name.as_str());
        item.set_property(PROPERTY_LOCATION, self.location.as_str());
    }
}

impl TryFrom<&RepositoryItem> for Winery {
    type Error = ModelError;

    fn try_from(item: &RepositoryItem) -> Result<Self, Self::Error> {
        item.expect_type(ItemType::Winery)?;
        Ok(Self {
            id: item.require_id()?,
            name: item.text(PROPERTY_NAME)?,
            location: item.text(PROPERTY_LOCATION)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_location_fails_conversion() {
        let mut item = RepositoryItem::new(ItemType::Winery);
        item.assign_id(1);
        item.set_property(PROPERTY_NAME, "Vietti");
        assert!(matches!(Winery::try_from(&item), Err(ModelError::MissingProperty { .. })));

        item.set_property(PROPERTY_LOCATION, "Castiglione Falletto");
        assert_eq!(Winery::try_from(&item).unwrap().location, "Castiglione Falletto");
    }
}
