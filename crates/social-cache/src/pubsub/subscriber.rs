//! Redis Pub/Sub subscriber.
//!
//! Holds a dedicated Pub/Sub connection, queues received document changes
//! for a single consumer and reconnects (resubscribing) when Redis drops.
//! The queue is unbounded so a busy consumer never loses messages.

use futures_util::StreamExt;
use redis::Client;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, RwLock};

use social_core::events::DocumentChange;

use crate::pubsub::{PubSubChannel, PubSubEvent};

/// Error type for subscriber operations
#[derive(Debug, thiserror::Error)]
pub enum SubscriberError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Failed to parse event: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Channel closed")]
    ChannelClosed,
}

/// Result type for subscriber operations
pub type SubscriberResult<T> = Result<T, SubscriberError>;

/// Message received from Pub/Sub
#[derive(Debug, Clone)]
pub struct ReceivedMessage {
    /// Channel the message was received on
    pub channel: PubSubChannel,
    /// Parsed envelope (if valid JSON)
    pub event: Option<PubSubEvent>,
    /// Raw payload
    pub payload: String,
}

impl ReceivedMessage {
    /// Create from raw Redis message
    fn from_redis(channel_name: &str, payload: String) -> Self {
        Self {
            channel: PubSubChannel::parse(channel_name),
            event: serde_json::from_str(&payload).ok(),
            payload,
        }
    }

    /// Decode the document change carried by this message
    pub fn change(&self) -> SubscriberResult<DocumentChange> {
        let change = match &self.event {
            Some(event) => event.to_change()?,
            None => serde_json::from_str::<PubSubEvent>(&self.payload)?.to_change()?,
        };
        Ok(change)
    }
}

/// Subscriber configuration
#[derive(Debug, Clone)]
pub struct SubscriberConfig {
    /// Redis connection URL
    pub redis_url: String,
    /// Reconnection delay in milliseconds
    pub reconnect_delay_ms: u64,
}

impl Default for SubscriberConfig {
    fn default() -> Self {
        Self {
            redis_url: "redis://127.0.0.1:6379".to_string(),
            reconnect_delay_ms: 1000,
        }
    }
}

#[derive(Debug)]
enum Command {
    Subscribe(Vec<String>),
    Shutdown,
}

/// Redis Pub/Sub subscriber
pub struct Subscriber {
    subscribed: Arc<RwLock<HashSet<String>>>,
    messages: Option<mpsc::UnboundedReceiver<ReceivedMessage>>,
    control_tx: mpsc::Sender<Command>,
}

impl Subscriber {
    /// Create a new subscriber and start the background listener
    pub fn new(config: SubscriberConfig) -> Self {
        let (message_tx, message_rx) = mpsc::unbounded_channel();
        let (control_tx, control_rx) = mpsc::channel(32);
        let subscribed = Arc::new(RwLock::new(HashSet::new()));

        tokio::spawn(listener_loop(
            config,
            subscribed.clone(),
            message_tx,
            control_rx,
        ));

        Self {
            subscribed,
            messages: Some(message_rx),
            control_tx,
        }
    }

    /// Subscribe to channels
    pub async fn subscribe(&self, channels: &[PubSubChannel]) -> SubscriberResult<()> {
        let names = channels.iter().map(PubSubChannel::name).collect();
        // Recorded up front so a connection made later picks them up too
        self.subscribed
            .write()
            .await
            .extend(channels.iter().map(PubSubChannel::name));

        self.control_tx
            .send(Command::Subscribe(names))
            .await
            .map_err(|_| SubscriberError::ChannelClosed)
    }

    /// Take the message queue; `None` once it has been taken
    pub fn take_receiver(&mut self) -> Option<mpsc::UnboundedReceiver<ReceivedMessage>> {
        self.messages.take()
    }

    /// Get currently subscribed channels
    pub async fn subscribed_channels(&self) -> Vec<String> {
        self.subscribed.read().await.iter().cloned().collect()
    }

    /// Shutdown the subscriber
    pub async fn shutdown(&self) -> SubscriberResult<()> {
        self.control_tx
            .send(Command::Shutdown)
            .await
            .map_err(|_| SubscriberError::ChannelClosed)
    }
}

async fn listener_loop(
    config: SubscriberConfig,
    subscribed: Arc<RwLock<HashSet<String>>>,
    message_tx: mpsc::UnboundedSender<ReceivedMessage>,
    mut control_rx: mpsc::Receiver<Command>,
) {
    loop {
        match run_listener(&config, &subscribed, &message_tx, &mut control_rx).await {
            Ok(true) => {
                tracing::info!("Subscriber shutting down");
                break;
            }
            Ok(false) => {}
            Err(e) => {
                tracing::error!(error = %e, "Subscriber error, reconnecting...");
                tokio::time::sleep(Duration::from_millis(config.reconnect_delay_ms)).await;
            }
        }
    }
}

/// Run until error, end of stream (`Ok(false)`), shutdown or a dropped
/// consumer (`Ok(true)`)
async fn run_listener(
    config: &SubscriberConfig,
    subscribed: &RwLock<HashSet<String>>,
    message_tx: &mpsc::UnboundedSender<ReceivedMessage>,
    control_rx: &mut mpsc::Receiver<Command>,
) -> SubscriberResult<bool> {
    let client = Client::open(config.redis_url.as_str())?;
    let mut pubsub = client.get_async_pubsub().await?;

    let channels: Vec<String> = subscribed.read().await.iter().cloned().collect();
    for channel in &channels {
        pubsub.subscribe(channel).await?;
    }

    tracing::info!(channels = channels.len(), "Subscriber connected to Redis");

    let mut stream = pubsub.on_message();

    loop {
        tokio::select! {
            msg = stream.next() => {
                let Some(msg) = msg else {
                    tracing::warn!("Pub/Sub stream ended");
                    return Ok(false);
                };
                let channel_name = msg.get_channel_name().to_string();
                let payload: String = msg.get_payload().unwrap_or_default();

                tracing::trace!(channel = %channel_name, "Received Pub/Sub message");

                if message_tx
                    .send(ReceivedMessage::from_redis(&channel_name, payload))
                    .is_err()
                {
                    tracing::warn!("Message consumer dropped");
                    return Ok(true);
                }
            }

            cmd = control_rx.recv() => match cmd {
                Some(Command::Subscribe(channels)) => {
                    drop(stream);
                    for channel in &channels {
                        pubsub.subscribe(channel).await?;
                        tracing::debug!(channel = %channel, "Subscribed to channel");
                    }
                    stream = pubsub.on_message();
                }
                Some(Command::Shutdown) | None => return Ok(true),
            },
        }
    }
}

/// Builder for subscriber
pub struct SubscriberBuilder {
    config: SubscriberConfig,
    initial_channels: Vec<PubSubChannel>,
}

impl SubscriberBuilder {
    /// Create a new builder
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: SubscriberConfig::default(),
            initial_channels: Vec::new(),
        }
    }

    /// Set Redis URL
    #[must_use]
    pub fn redis_url(mut self, url: impl Into<String>) -> Self {
        self.config.redis_url = url.into();
        self
    }

    /// Set reconnection delay
    #[must_use]
    pub fn reconnect_delay_ms(mut self, delay: u64) -> Self {
        self.config.reconnect_delay_ms = delay;
        self
    }

    /// Add initial channel subscription
    #[must_use]
    pub fn subscribe(mut self, channel: PubSubChannel) -> Self {
        self.initial_channels.push(channel);
        self
    }

    /// Add several initial channel subscriptions
    #[must_use]
    pub fn subscribe_all(mut self, channels: impl IntoIterator<Item = PubSubChannel>) -> Self {
        self.initial_channels.extend(channels);
        self
    }

    /// Build and start the subscriber
    pub async fn build(self) -> SubscriberResult<Subscriber> {
        let subscriber = Subscriber::new(self.config);

        if !self.initial_channels.is_empty() {
            subscriber.subscribe(&self.initial_channels).await?;
        }

        Ok(subscriber)
    }
}

impl Default for SubscriberBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use social_core::{Collection, DocumentId};

    #[test]
    fn test_received_change() {
        let change = DocumentChange::created(
            Collection::Comments,
            DocumentId::parse("c1").unwrap(),
            serde_json::json!({ "postId": "p1" }).as_object().cloned().unwrap(),
        );
        let payload = PubSubEvent::from_change(&change).unwrap().to_json().unwrap();

        let msg = ReceivedMessage::from_redis("documents:comments", payload);
        assert_eq!(msg.channel, PubSubChannel::Documents(Collection::Comments));
        assert_eq!(msg.change().unwrap(), change);
    }

    #[test]
    fn test_received_invalid_json() {
        let msg = ReceivedMessage::from_redis("documents:likes", "invalid".to_string());

        assert!(msg.event.is_none());
        assert_eq!(msg.payload, "invalid");
        assert!(matches!(msg.change(), Err(SubscriberError::ParseError(_))));
    }

    #[test]
    fn test_subscriber_builder() {
        let builder = SubscriberBuilder::new()
            .redis_url("redis://localhost:6380")
            .reconnect_delay_ms(500)
            .subscribe_all(PubSubChannel::all_documents());

        assert_eq!(builder.config.redis_url, "redis://localhost:6380");
        assert_eq!(builder.config.reconnect_delay_ms, 500);
        assert_eq!(builder.initial_channels.len(), Collection::ALL.len());
    }

    #[tokio::test]
    async fn test_subscribe_records_channels() {
        // Points at a closed port; the listener keeps retrying in the background
        let mut subscriber = SubscriberBuilder::new()
            .redis_url("redis://127.0.0.1:1")
            .reconnect_delay_ms(10_000)
            .subscribe(PubSubChannel::documents(Collection::Posts))
            .build()
            .await
            .unwrap();

        assert_eq!(subscriber.subscribed_channels().await, vec!["documents:posts"]);
        assert!(subscriber.take_receiver().is_some());
        assert!(subscriber.take_receiver().is_none());
    }
}
