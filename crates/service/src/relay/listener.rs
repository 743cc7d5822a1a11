use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use chrono::{DateTime, Utc};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use super::broker::{Delivery, MessageBroker, MessageHandler};
use super::domain::WineImageTransfer;
use crate::errors::ServiceError;

const RECENT_CAPACITY: usize = 64;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReceivedTransfer {
    pub queue: String,
    pub transfer: WineImageTransfer,
    pub published_at: DateTime<Utc>,
}

/// Consumes both relay queues and logs every transfer. The most recent
/// receipts are kept for inspection.
pub struct MessageRelayListener {
    recent: Arc<Mutex<VecDeque<ReceivedTransfer>>>,
    handles: Vec<JoinHandle<()>>,
}

impl MessageRelayListener {
    pub async fn start(broker: Arc<dyn MessageBroker>, cfg: &configs::BrokerConfig) -> Result<Self, ServiceError> {
        let recent = Arc::new(Mutex::new(VecDeque::with_capacity(RECENT_CAPACITY)));
        let handles = vec![
            broker.subscribe(&cfg.queue, handler(&cfg.queue, "received transfer", &recent)).await?,
            broker.subscribe(&cfg.queue2, handler(&cfg.queue2, "queue 2 received transfer", &recent)).await?,
        ];
        info!(queue = %cfg.queue, queue2 = %cfg.queue2, "relay listener started");
        Ok(Self { recent, handles })
    }

    /// Receipts in arrival order, oldest first.
    pub fn recent(&self) -> Vec<ReceivedTransfer> {
        match self.recent.lock() {
            Ok(guard) => guard.iter().cloned().collect(),
            Err(poisoned) => poisoned.into_inner().iter().cloned().collect(),
        }
    }

    pub fn stop(self) {
        for h in self.handles {
            h.abort();
        }
    }
}

fn handler(queue: &str, message: &'static str, recent: &Arc<Mutex<VecDeque<ReceivedTransfer>>>) -> MessageHandler {
    let queue = queue.to_string();
    let recent = Arc::clone(recent);
    Arc::new(move |delivery: Delivery| {
        let transfer: WineImageTransfer = match serde_json::from_slice(&delivery.payload) {
            Ok(t) => t,
            Err(e) => {
                warn!(%queue, id = %delivery.id, error = %e, "undecodable transfer dropped");
                return;
            }
        };
        info!(%queue, id = %delivery.id, "{message} {transfer}");
        let mut guard = match recent.lock() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        };
        if guard.len() == RECENT_CAPACITY {
            guard.pop_front();
        }
        guard.push_back(ReceivedTransfer { queue: queue.clone(), transfer, published_at: delivery.published_at });
    })
}
