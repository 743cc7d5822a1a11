//! Image transfer relay: a sender that fans one payload out to two routing
//! keys and a listener that logs what arrives on the two bound queues.
//! The broker is either in-process or AMQP, behind [`MessageBroker`].

pub mod amqp;
pub mod broker;
pub mod domain;
pub mod listener;
pub mod sender;

pub use amqp::AmqpBroker;
pub use broker::{Delivery, InMemoryBroker, MessageBroker, MessageHandler};
pub use domain::WineImageTransfer;
pub use listener::{MessageRelayListener, ReceivedTransfer};
pub use sender::MessageRelaySender;
