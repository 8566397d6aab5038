//! In-process change feed.
//!
//! Used when triggers run inside the API process: stores publish into
//! unbounded tokio mpsc queues instead of Redis. Every subscriber gets its
//! own queue, so a slow consumer delays changes but never loses them.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::mpsc;

use social_core::events::DocumentChange;
use social_core::traits::{ChangePublisher, RepoResult};

/// Queue-backed `ChangePublisher`
#[derive(Debug, Clone, Default)]
pub struct LocalChangeFeed {
    subscribers: Arc<Mutex<Vec<mpsc::UnboundedSender<DocumentChange>>>>,
}

impl LocalChangeFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// New receiver; sees changes published after this call
    pub fn subscribe(&self) -> mpsc::UnboundedReceiver<DocumentChange> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.lock().push(tx);
        rx
    }

    pub fn receiver_count(&self) -> usize {
        let mut subscribers = self.subscribers.lock();
        subscribers.retain(|tx| !tx.is_closed());
        subscribers.len()
    }
}

#[async_trait]
impl ChangePublisher for LocalChangeFeed {
    async fn publish(&self, change: &DocumentChange) -> RepoResult<()> {
        let mut subscribers = self.subscribers.lock();
        // Dropped receivers are forgotten
        subscribers.retain(|tx| tx.send(change.clone()).is_ok());
        if subscribers.is_empty() {
            tracing::trace!(event_type = %change.event_type(), "No change feed receivers");
        }
        Ok(())
    }
}
