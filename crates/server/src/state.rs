use std::sync::Arc;

use service::{
    gateway::SharedGateway,
    relay::MessageRelaySender,
    services::{WineNoteService, WineRatingService, WineService, WineryService},
};

/// Shared handler state; every service holds the same gateway.
#[derive(Clone)]
pub struct AppState {
    pub wines: Arc<WineService>,
    pub wineries: Arc<WineryService>,
    pub ratings: Arc<WineRatingService>,
    pub notes: Arc<WineNoteService>,
    pub relay: Arc<MessageRelaySender>,
}

impl AppState {
    pub fn new(gateway: SharedGateway, relay: MessageRelaySender) -> Self {
        Self {
            wines: Arc::new(WineService::new(Arc::clone(&gateway))),
            wineries: Arc::new(WineryService::new(Arc::clone(&gateway))),
            ratings: Arc::new(WineRatingService::new(Arc::clone(&gateway))),
            notes: Arc::new(WineNoteService::new(gateway)),
            relay: Arc::new(relay),
        }
    }
}
