use std::sync::Arc;

use tracing::{info, instrument};

use super::broker::MessageBroker;
use super::domain::WineImageTransfer;
use crate::errors::ServiceError;

/// Publishes each transfer to the first routing key as-is and a mutated
/// copy to the second, both on one exchange.
pub struct MessageRelaySender {
    broker: Arc<dyn MessageBroker>,
    exchange: String,
    routing_key: String,
    routing_key2: String,
}

impl MessageRelaySender {
    pub fn new(broker: Arc<dyn MessageBroker>, cfg: &configs::BrokerConfig) -> Self {
        Self {
            broker,
            exchange: cfg.exchange.clone(),
            routing_key: cfg.routing_key.clone(),
            routing_key2: cfg.routing_key2.clone(),
        }
    }

    #[instrument(skip(self, transfer), fields(exchange = %self.exchange))]
    pub async fn send(&self, transfer: &WineImageTransfer) -> Result<(), ServiceError> {
        self.broker.publish(&self.exchange, &self.routing_key, encode(transfer)?).await?;
        self.broker.publish(&self.exchange, &self.routing_key2, encode(&transfer.mutate())?).await?;
        info!(%transfer, "transfer_sent");
        Ok(())
    }
}

fn encode(transfer: &WineImageTransfer) -> Result<Vec<u8>, ServiceError> {
    serde_json::to_vec(transfer).map_err(|e| ServiceError::Publish(e.to_string()))
}
