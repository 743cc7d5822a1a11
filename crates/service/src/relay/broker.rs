//! Broker abstraction with AMQP-style routing: publishers target an exchange
//! and a routing key, bindings map `(exchange, routing key)` to queues, and
//! each queue feeds one subscriber.

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::{
    sync::{mpsc, RwLock},
    task::JoinHandle,
};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::errors::ServiceError;

/// A message as handed to a subscriber.
#[derive(Clone, Debug)]
pub struct Delivery {
    pub id: Uuid,
    pub exchange: String,
    pub routing_key: String,
    pub payload: Vec<u8>,
    pub published_at: DateTime<Utc>,
}

pub type MessageHandler = Arc<dyn Fn(Delivery) + Send + Sync>;

#[async_trait]
pub trait MessageBroker: Send + Sync {
    /// Route `payload` to every queue bound to `(exchange, routing_key)`.
    async fn publish(&self, exchange: &str, routing_key: &str, payload: Vec<u8>) -> Result<(), ServiceError>;

    /// Start consuming `queue`; `handler` runs once per delivery on a
    /// dedicated task.
    async fn subscribe(&self, queue: &str, handler: MessageHandler) -> Result<JoinHandle<()>, ServiceError>;
}

struct Queue {
    tx: mpsc::UnboundedSender<Delivery>,
    rx: Option<mpsc::UnboundedReceiver<Delivery>>,
}

#[derive(Default)]
struct Topology {
    // exchange -> routing key -> queue names
    bindings: HashMap<String, HashMap<String, Vec<String>>>,
    queues: HashMap<String, Queue>,
}

/// Broker living inside the process. Queues buffer until subscribed; a
/// routing key without bindings drops the message.
#[derive(Default)]
pub struct InMemoryBroker {
    topology: RwLock<Topology>,
}

impl InMemoryBroker {
    pub fn new() -> Self { Self::default() }

    /// Broker with the exchange, both queues and both bindings from config.
    pub async fn with_topology(cfg: &configs::BrokerConfig) -> Result<Arc<Self>, ServiceError> {
        let broker = Arc::new(Self::new());
        broker.declare_exchange(&cfg.exchange).await;
        broker.declare_queue(&cfg.queue).await;
        broker.declare_queue(&cfg.queue2).await;
        broker.bind(&cfg.queue, &cfg.exchange, &cfg.routing_key).await?;
        broker.bind(&cfg.queue2, &cfg.exchange, &cfg.routing_key2).await?;
        Ok(broker)
    }

    pub async fn declare_exchange(&self, exchange: &str) {
        let mut topo = self.topology.write().await;
        topo.bindings.entry(exchange.to_string()).or_default();
    }

    pub async fn declare_queue(&self, queue: &str) {
        let mut topo = self.topology.write().await;
        topo.queues.entry(queue.to_string()).or_insert_with(|| {
            let (tx, rx) = mpsc::unbounded_channel();
            Queue { tx, rx: Some(rx) }
        });
    }

    pub async fn bind(&self, queue: &str, exchange: &str, routing_key: &str) -> Result<(), ServiceError> {
        let mut topo = self.topology.write().await;
        if !topo.queues.contains_key(queue) {
            return Err(ServiceError::Broker(format!("queue `{queue}` is not declared")));
        }
        let keys = topo
            .bindings
            .get_mut(exchange)
            .ok_or_else(|| ServiceError::Broker(format!("exchange `{exchange}` is not declared")))?;
        let queues = keys.entry(routing_key.to_string()).or_default();
        if !queues.iter().any(|q| q == queue) {
            queues.push(queue.to_string());
        }
        debug!(%queue, %exchange, %routing_key, "queue bound");
        Ok(())
    }
}

#[async_trait]
impl MessageBroker for InMemoryBroker {
    async fn publish(&self, exchange: &str, routing_key: &str, payload: Vec<u8>) -> Result<(), ServiceError> {
        let topo = self.topology.read().await;
        let keys = topo
            .bindings
            .get(exchange)
            .ok_or_else(|| ServiceError::Publish(format!("exchange `{exchange}` is not declared")))?;
        let Some(queues) = keys.get(routing_key) else {
            warn!(%exchange, %routing_key, "no queue bound; message dropped");
            return Ok(());
        };
        let delivery = Delivery {
            id: Uuid::new_v4(),
            exchange: exchange.to_string(),
            routing_key: routing_key.to_string(),
            payload,
            published_at: Utc::now(),
        };
        for name in queues {
            let queue = topo
                .queues
                .get(name)
                .ok_or_else(|| ServiceError::Publish(format!("queue `{name}` vanished")))?;
            queue
                .tx
                .send(delivery.clone())
                .map_err(|_| ServiceError::Publish(format!("queue `{name}` is closed")))?;
        }
        debug!(id = %delivery.id, %exchange, %routing_key, queues = queues.len(), "published");
        Ok(())
    }

    async fn subscribe(&self, queue: &str, handler: MessageHandler) -> Result<JoinHandle<()>, ServiceError> {
        let mut rx = {
            let mut topo = self.topology.write().await;
            let slot = topo
                .queues
                .get_mut(queue)
                .ok_or_else(|| ServiceError::Broker(format!("queue `{queue}` is not declared")))?;
            slot.rx
                .take()
                .ok_or_else(|| ServiceError::Broker(format!("queue `{queue}` already has a consumer")))?
        };
        let queue = queue.to_string();
        Ok(tokio::spawn(async move {
            while let Some(delivery) = rx.recv().await {
                handler(delivery);
            }
            debug!(%queue, "consumer stopped");
        }))
    }
}
