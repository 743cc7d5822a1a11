//! Entity services: one per item type, all sharing the gateway passed in at
//! construction.

pub mod wine_service;
pub mod winery_service;
pub mod wine_rating_service;
pub mod wine_note_service;

pub use wine_note_service::WineNoteService;
pub use wine_rating_service::WineRatingService;
pub use wine_service::WineService;
pub use winery_service::WineryService;
