//! Entity models for the wine service.
//! - `item`: generic property-bag item exchanged with the repository gateway.
//! - `wine`, `winery`, `wine_rating`, `wine_note`: typed records, request
//!   shapes and the conversions to and from items.
//! - `repository_item`: SeaORM entity storing items as JSON rows.

pub mod errors;
pub mod db;
pub mod item;
pub mod repository_item;
pub mod wine;
pub mod winery;
pub mod wine_rating;
pub mod wine_note;

pub use item::{ItemType, PropertyValue, RepositoryItem};
