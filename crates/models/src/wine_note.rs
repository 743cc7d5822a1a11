use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::item::{ItemType, RepositoryItem};

pub const PROPERTY_WINE_ID: &str = "wineId";
pub const PROPERTY_USER: &str = "user";
pub const PROPERTY_DATE: &str = "date";
pub const PROPERTY_NOTE: &str = "note";
pub const PROPERTY_ORDINAL: &str = "ordinal";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WineNote {
    pub id: i32,
    pub wine_id: i32,
    pub user: String,
    pub date: String,
    pub note: String,
    pub ordinal: i32,
}

/// Replacement text for an existing note, addressed by id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WineNoteUpsert {
    pub id: String,
    pub note: String,
}

impl WineNoteUpsert {
    pub fn parsed_id(&self) -> Result<i32, ModelError> {
        self.id
            .trim()
            .parse::<i32>()
            .map_err(|_| ModelError::Validation(format!("upsert id `{}` is not an integer", self.id)))
    }
}

/// Batch request: new note texts plus replacements for existing notes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WineNoteRequest {
    pub wine_id: i32,
    pub user: String,
    pub date: String,
    #[serde(default)]
    pub wine_notes: Vec<String>,
    #[serde(default)]
    pub upsert: Vec<WineNoteUpsert>,
}

impl WineNoteRequest {
    /// Fill a fresh note item for `note` at `ordinal`.
    pub fn apply_to(&self, item: &mut RepositoryItem, note: &str, ordinal: i32) {
        item.set_property(PROPERTY_WINE_ID, self.wine_id);
        item.set_property(PROPERTY_USER, self.user.as_str());
        item.set_property(PROPERTY_DATE, self.date.as_str());
        item.set_property(PROPERTY_NOTE, note);
        item.set_property(PROPERTY_ORDINAL, ordinal);
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WineNoteResponse {
    pub wine_notes: Vec<WineNote>,
}

impl TryFrom<&RepositoryItem> for WineNote {
    type Error = ModelError;

    fn try_from(item: &RepositoryItem) -> Result<Self, Self::Error> {
        item.expect_type(ItemType::WineNote)?;
        Ok(Self {
            id: item.require_id()?,
            wine_id: item.int(PROPERTY_WINE_ID)?,
            user: item.text(PROPERTY_USER)?,
            date: item.text(PROPERTY_DATE)?,
            note: item.text(PROPERTY_NOTE)?,
            ordinal: item.int(PROPERTY_ORDINAL)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_lists_default_to_empty() {
        let req: WineNoteRequest =
            serde_json::from_str(r#"{"wineId":5,"user":"u","date":"2024-01-01"}"#).unwrap();
        assert!(req.wine_notes.is_empty());
        assert!(req.upsert.is_empty());
    }

    #[test]
    fn upsert_id_must_be_numeric() {
        let ok = WineNoteUpsert { id: " 14".into(), note: "x".into() };
        assert_eq!(ok.parsed_id().unwrap(), 14);
        let bad = WineNoteUpsert { id: "abc".into(), note: "x".into() };
        assert!(matches!(bad.parsed_id(), Err(ModelError::Validation(_))));
    }

    #[test]
    fn note_item_converts_with_ordinal() {
        let req: WineNoteRequest =
            serde_json::from_str(r#"{"wineId":5,"user":"u","date":"d","wineNotes":["cherry"]}"#).unwrap();
        let mut item = RepositoryItem::new(ItemType::WineNote);
        req.apply_to(&mut item, &req.wine_notes[0], 3);
        item.assign_id(1);
        let note = WineNote::try_from(&item).unwrap();
        assert_eq!((note.ordinal, note.note.as_str(), note.wine_id), (3, "cherry", 5));
    }
}
