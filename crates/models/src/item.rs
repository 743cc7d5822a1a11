//! Generic property-bag item exchanged with the repository gateway.
//!
//! Entity services never read these directly; each entity module converts
//! items into its typed record with `TryFrom<&RepositoryItem>`.

use std::{collections::BTreeMap, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// Name of the identity property assigned by the gateway.
pub const PROPERTY_ID: &str = "id";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemType {
    Wine,
    Winery,
    WineRating,
    WineNote,
}

impl ItemType {
    pub const ALL: [ItemType; 4] = [ItemType::Wine, ItemType::Winery, ItemType::WineRating, ItemType::WineNote];

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Wine => "wine",
            ItemType::Winery => "winery",
            ItemType::WineRating => "wineRating",
            ItemType::WineNote => "wineNote",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ItemType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ModelError::UnknownItemType(s.to_string()))
    }
}

/// A single stored property value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Int(i32),
    Text(String),
}

impl PropertyValue {
    /// Compare against the string form used by property queries, so that
    /// `Int(7)` matches `"7"`.
    pub fn matches_str(&self, value: &str) -> bool {
        match self {
            PropertyValue::Int(n) => value.trim().parse::<i32>().map(|v| v == *n).unwrap_or(false),
            PropertyValue::Text(s) => s == value,
        }
    }
}

impl From<i32> for PropertyValue {
    fn from(v: i32) -> Self { PropertyValue::Int(v) }
}

impl From<String> for PropertyValue {
    fn from(v: String) -> Self { PropertyValue::Text(v) }
}

impl From<&str> for PropertyValue {
    fn from(v: &str) -> Self { PropertyValue::Text(v.to_string()) }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RepositoryItem {
    id: Option<i32>,
    item_type: ItemType,
    properties: BTreeMap<String, PropertyValue>,
}

impl RepositoryItem {
    /// A fresh item with no identity; the gateway assigns one on add.
    pub fn new(item_type: ItemType) -> Self {
        Self { id: None, item_type, properties: BTreeMap::new() }
    }

    pub fn with_id(item_type: ItemType, id: i32, properties: BTreeMap<String, PropertyValue>) -> Self {
        Self { id: Some(id), item_type, properties }
    }

    pub fn id(&self) -> Option<i32> { self.id }

    pub fn item_type(&self) -> ItemType { self.item_type }

    pub fn properties(&self) -> &BTreeMap<String, PropertyValue> { &self.properties }

    pub fn assign_id(&mut self, id: i32) { self.id = Some(id); }

    pub fn property(&self, name: &str) -> Option<&PropertyValue> {
        if name == PROPERTY_ID {
            return None;
        }
        self.properties.get(name)
    }

    pub fn set_property(&mut self, name: &str, value: impl Into<PropertyValue>) {
        self.properties.insert(name.to_string(), value.into());
    }

    /// Whether the named property (or `id`) equals `value` in string form.
    pub fn property_matches(&self, name: &str, value: &str) -> bool {
        if name == PROPERTY_ID {
            return self.id.map(|id| PropertyValue::Int(id).matches_str(value)).unwrap_or(false);
        }
        self.properties.get(name).map(|v| v.matches_str(value)).unwrap_or(false)
    }

    pub fn require_id(&self) -> Result<i32, ModelError> {
        self.id.ok_or_else(|| self.missing(PROPERTY_ID))
    }

    pub fn int(&self, name: &str) -> Result<i32, ModelError> {
        match self.properties.get(name) {
            Some(PropertyValue::Int(v)) => Ok(*v),
            Some(PropertyValue::Text(_)) => Err(ModelError::TypeMismatch { property: name.to_string(), expected: "integer" }),
            None => Err(self.missing(name)),
        }
    }

    pub fn text(&self, name: &str) -> Result<String, ModelError> {
        match self.properties.get(name) {
            Some(PropertyValue::Text(v)) => Ok(v.clone()),
            Some(PropertyValue::Int(_)) => Err(ModelError::TypeMismatch { property: name.to_string(), expected: "string" }),
            None => Err(self.missing(name)),
        }
    }

    pub fn expect_type(&self, expected: ItemType) -> Result<(), ModelError> {
        if self.item_type != expected {
            return Err(ModelError::WrongItemType { expected: expected.as_str(), found: self.item_type.as_str() });
        }
        Ok(())
    }

    fn missing(&self, property: &str) -> ModelError {
        ModelError::MissingProperty { item_type: self.item_type.as_str(), property: property.to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_type_names_round_trip() {
        for t in ItemType::ALL {
            assert_eq!(t.as_str().parse::<ItemType>().unwrap(), t);
        }
        assert!(matches!("cellar".parse::<ItemType>(), Err(ModelError::UnknownItemType(_))));
    }

    #[test]
    fn typed_accessors_report_missing_and_mismatched_properties() {
        let mut item = RepositoryItem::new(ItemType::Wine);
        item.set_property("wineryId", 3);
        item.set_property("name", "Barolo");

        assert_eq!(item.int("wineryId").unwrap(), 3);
        assert_eq!(item.text("name").unwrap(), "Barolo");
        assert!(matches!(item.text("wineryId"), Err(ModelError::TypeMismatch { .. })));
        assert!(matches!(item.int("style"), Err(ModelError::MissingProperty { .. })));
        assert!(matches!(item.require_id(), Err(ModelError::MissingProperty { .. })));
        assert!(item.expect_type(ItemType::Winery).is_err());
    }

    #[test]
    fn property_matching_uses_string_form() {
        let mut item = RepositoryItem::new(ItemType::WineNote);
        item.assign_id(12);
        item.set_property("wineId", 7);
        item.set_property("user", "ana");

        assert!(item.property_matches("wineId", "7"));
        assert!(!item.property_matches("wineId", "07x"));
        assert!(item.property_matches("user", "ana"));
        assert!(!item.property_matches("user", "Ana"));
        assert!(item.property_matches("id", "12"));
        assert!(!item.property_matches("ordinal", "0"));
    }

    #[test]
    fn properties_serialize_as_plain_json_values() {
        let mut item = RepositoryItem::new(ItemType::Winery);
        item.set_property("name", "Vietti");
        item.set_property("rank", 2);
        let json = serde_json::to_value(item.properties()).unwrap();
        assert_eq!(json, serde_json::json!({"name": "Vietti", "rank": 2}));
    }
}
