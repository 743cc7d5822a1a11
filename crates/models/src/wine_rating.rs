use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::item::{ItemType, RepositoryItem};

pub const PROPERTY_WINE_ID: &str = "wineId";
pub const PROPERTY_USER: &str = "user";
pub const PROPERTY_DATE: &str = "date";
pub const PROPERTY_RATING: &str = "rating";

/// Users token that disables the user filter of a friends query.
pub const ANY_USER: &str = "*";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WineRating {
    pub id: i32,
    pub wine_id: i32,
    pub user: String,
    pub date: String,
    pub rating: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WineRatingRequest {
    pub wine_id: i32,
    pub user: String,
    pub date: String,
    pub rating: String,
}

impl WineRatingRequest {
    pub fn apply_to(&self, item: &mut RepositoryItem) {
        item.set_property(PROPERTY_WINE_ID, self.wine_id);
        item.set_property(PROPERTY_USER, self.user.as_str());
        item.set_property(PROPERTY_DATE, self.date.as_str());
        item.set_property(PROPERTY_RATING, self.rating.as_str());
    }
}

/// Only the rating of an existing entry may change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WineRatingEditRequest {
    pub id: i32,
    pub rating: String,
}

/// Ratings for any of `wine_ids` or by any of `users`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WineFriendsRequest {
    #[serde(default)]
    pub wine_ids: Vec<i32>,
    #[serde(default)]
    pub users: Vec<String>,
}

impl WineFriendsRequest {
    /// A leading `*` means any user.
    pub fn any_user(&self) -> bool {
        self.users.first().map(|u| u == ANY_USER).unwrap_or(false)
    }
}

impl TryFrom<&RepositoryItem> for WineRating {
    type Error = ModelError;

    fn try_from(item: &RepositoryItem) -> Result<Self, Self::Error> {
        item.expect_type(ItemType::WineRating)?;
        Ok(Self {
            id: item.require_id()?,
            wine_id: item.int(PROPERTY_WINE_ID)?,
            user: item.text(PROPERTY_USER)?,
            date: item.text(PROPERTY_DATE)?,
            rating: item.text(PROPERTY_RATING)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wildcard_only_counts_in_first_position() {
        let req = WineFriendsRequest { wine_ids: vec![1], users: vec!["*".into()] };
        assert!(req.any_user());
        let req = WineFriendsRequest { wine_ids: vec![1], users: vec!["bo".into(), "*".into()] };
        assert!(!req.any_user());
        let req = WineFriendsRequest { wine_ids: vec![1], users: vec![] };
        assert!(!req.any_user());
    }

    #[test]
    fn friends_request_accepts_camel_case() {
        let req: WineFriendsRequest = serde_json::from_str(r#"{"wineIds":[3,4],"users":["a"]}"#).unwrap();
        assert_eq!(req.wine_ids, vec![3, 4]);
    }

    #[test]
    fn rating_stays_a_string() {
        let mut item = RepositoryItem::new(ItemType::WineRating);
        WineRatingRequest { wine_id: 2, user: "u".into(), date: "2024-05-01".into(), rating: "4.5".into() }
            .apply_to(&mut item);
        item.assign_id(9);
        let rating = WineRating::try_from(&item).unwrap();
        assert_eq!(rating.rating, "4.5");
        assert_eq!(rating.wine_id, 2);
    }
}
