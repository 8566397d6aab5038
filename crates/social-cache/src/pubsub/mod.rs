//! Redis Pub/Sub for document change events.
//!
//! Stores publish every committed change to the channel of its collection;
//! the trigger worker subscribes to all of them.

mod channels;
mod publisher;
mod subscriber;

pub use channels::{PubSubChannel, DOCUMENTS_CHANNEL_PREFIX};
pub use publisher::{PubSubEvent, Publisher};
pub use subscriber::{
    ReceivedMessage, Subscriber, SubscriberBuilder, SubscriberConfig, SubscriberError,
    SubscriberResult,
};
