//! Worker loops feeding changes to the dispatcher
//!
//! Changes are handled one at a time in arrival order, so a post's
//! delete cascade never races the notification for a like on it.

use std::sync::Arc;
use std::time::Duration;

use social_cache::{LocalChangeFeed, ReceivedMessage, Subscriber};
use social_core::events::DocumentChange;
use social_core::traits::DocumentStore;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::dispatcher::TriggerDispatcher;

/// How often expired event ids are dropped
const PURGE_INTERVAL: Duration = Duration::from_secs(60);

/// Consume change events published to Redis until the subscriber closes
///
/// The subscriber stays alive for as long as the loop runs.
pub async fn run_redis(dispatcher: Arc<TriggerDispatcher>, mut subscriber: Subscriber) {
    let Some(mut receiver) = subscriber.take_receiver() else {
        tracing::error!("Subscriber queue already taken");
        return;
    };
    let mut purge = tokio::time::interval(PURGE_INTERVAL);

    loop {
        tokio::select! {
            msg = receiver.recv() => match msg {
                Some(msg) => handle_message(&dispatcher, &msg).await,
                None => {
                    tracing::warn!("Change subscription closed");
                    break;
                }
            },
            _ = purge.tick() => purge_expired(&dispatcher),
        }
    }

    tracing::info!("Trigger worker stopped");
}

async fn handle_message(dispatcher: &TriggerDispatcher, msg: &ReceivedMessage) {
    match msg.change() {
        Ok(change) => {
            dispatcher.handle(&change).await;
        }
        Err(e) => {
            tracing::warn!(channel = %msg.channel, error = %e, "Ignoring undecodable message");
        }
    }
}

/// Consume changes from an in-process feed until every sender is gone
pub async fn run_local(
    dispatcher: Arc<TriggerDispatcher>,
    mut receiver: mpsc::UnboundedReceiver<DocumentChange>,
) {
    let mut purge = tokio::time::interval(PURGE_INTERVAL);

    loop {
        tokio::select! {
            change = receiver.recv() => match change {
                Some(change) => {
                    dispatcher.handle(&change).await;
                }
                None => break,
            },
            _ = purge.tick() => purge_expired(&dispatcher),
        }
    }

    tracing::info!("Embedded trigger worker stopped");
}

fn purge_expired(dispatcher: &TriggerDispatcher) {
    let purged = dispatcher.purge_expired();
    if purged > 0 {
        tracing::debug!(purged, "Expired event ids dropped");
    }
}

/// Run triggers inside the current process against `store`
///
/// The receiver is taken before returning, so changes committed after this
/// call are never missed.
pub fn spawn_embedded(
    store: Arc<dyn DocumentStore>,
    feed: &LocalChangeFeed,
    dedup_ttl: Duration,
) -> JoinHandle<()> {
    let dispatcher = Arc::new(TriggerDispatcher::new(store, dedup_ttl));
    let receiver = feed.subscribe();
    tracing::info!("Embedded trigger worker started");
    tokio::spawn(run_local(dispatcher, receiver))
}
