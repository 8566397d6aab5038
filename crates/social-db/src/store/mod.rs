//! Document store implementations
//!
//! Both stores apply every write (single or batched) atomically and then
//! hand one [`DocumentChange`] per touched document to their
//! [`ChangePublisher`]. Publishing happens after commit; a failed publish
//! is logged and does not fail the write.

mod memory;
mod postgres;

use async_trait::async_trait;
use std::sync::Arc;

use social_core::events::DocumentChange;
use social_core::traits::{ChangePublisher, RepoResult};

pub use memory::MemoryDocumentStore;
pub use postgres::PgDocumentStore;

/// Publisher that drops every change
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopPublisher;

#[async_trait]
impl ChangePublisher for NoopPublisher {
    async fn publish(&self, _change: &DocumentChange) -> RepoResult<()> {
        Ok(())
    }
}

pub(crate) fn noop_publisher() -> Arc<dyn ChangePublisher> {
    Arc::new(NoopPublisher)
}

/// Publish committed changes in order
pub(crate) async fn publish_changes(publisher: &dyn ChangePublisher, changes: &[DocumentChange]) {
    for change in changes {
        if let Err(e) = publisher.publish(change).await {
            tracing::warn!(
                event_id = %change.event_id,
                event_type = %change.event_type(),
                document_id = %change.document_id,
                error = %e,
                "Failed to publish document change"
            );
        }
    }
}
