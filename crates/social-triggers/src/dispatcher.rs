//! Trigger dispatcher
//!
//! Routes each document change to the trigger that reacts to it. Changes
//! are handled once per event id; a failed trigger is logged and not
//! retried.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use social_core::document::Collection;
use social_core::entities::NotificationType;
use social_core::events::{ChangeKind, DocumentChange};
use social_core::traits::DocumentStore;

use crate::dedup::IdempotencyGuard;
use crate::error::TriggerResult;
use crate::handlers::{self, TriggerContext};

/// What happened to a single change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// A trigger ran and wrote this many documents
    Applied(usize),
    /// The event id was seen before
    Duplicate,
    /// No trigger listens for this change
    Ignored,
    /// The trigger failed
    Failed,
}

/// Counters since startup
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DispatcherStats {
    pub processed: u64,
    pub duplicates: u64,
    pub ignored: u64,
    pub failed: u64,
}

#[derive(Default)]
struct Counters {
    processed: AtomicU64,
    duplicates: AtomicU64,
    ignored: AtomicU64,
    failed: AtomicU64,
}

/// Runs triggers against the document store
pub struct TriggerDispatcher {
    ctx: TriggerContext,
    guard: IdempotencyGuard,
    counters: Counters,
}

impl TriggerDispatcher {
    pub fn new(store: Arc<dyn DocumentStore>, dedup_ttl: Duration) -> Self {
        Self {
            ctx: TriggerContext::new(store),
            guard: IdempotencyGuard::new(dedup_ttl),
            counters: Counters::default(),
        }
    }

    /// Handle one change
    pub async fn handle(&self, change: &DocumentChange) -> DispatchOutcome {
        if !self.guard.first_delivery(&change.event_id) {
            tracing::debug!(event_id = %change.event_id, "Duplicate change, skipping");
            self.counters.duplicates.fetch_add(1, Ordering::Relaxed);
            return DispatchOutcome::Duplicate;
        }

        let outcome = match self.dispatch(change).await {
            Ok(Some(written)) => {
                self.counters.processed.fetch_add(1, Ordering::Relaxed);
                DispatchOutcome::Applied(written)
            }
            Ok(None) => {
                self.counters.ignored.fetch_add(1, Ordering::Relaxed);
                DispatchOutcome::Ignored
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    event_type = %change.event_type(),
                    document_id = %change.document_id,
                    "Trigger failed"
                );
                self.counters.failed.fetch_add(1, Ordering::Relaxed);
                DispatchOutcome::Failed
            }
        };

        tracing::trace!(event_type = %change.event_type(), ?outcome, "Change handled");
        outcome
    }

    /// Run the matching trigger; `None` when nothing listens
    async fn dispatch(&self, change: &DocumentChange) -> TriggerResult<Option<usize>> {
        let ctx = &self.ctx;
        let written = match (change.collection, change.kind) {
            (Collection::Likes, ChangeKind::Created) => {
                handlers::notify_post_author(ctx, change, NotificationType::Like).await?
            }
            (Collection::Comments, ChangeKind::Created) => {
                handlers::notify_post_author(ctx, change, NotificationType::Comment).await?
            }
            (Collection::Likes | Collection::Comments, ChangeKind::Deleted) => {
                handlers::delete_notification(ctx, change).await?
            }
            (Collection::Users, ChangeKind::Updated) => {
                handlers::propagate_user_image(ctx, change).await?
            }
            (Collection::Posts, ChangeKind::Deleted) => {
                handlers::cascade_post_delete(ctx, change).await?
            }
            _ => return Ok(None),
        };
        Ok(Some(written))
    }

    /// Drop expired event ids
    pub fn purge_expired(&self) -> usize {
        self.guard.purge_expired()
    }

    pub fn stats(&self) -> DispatcherStats {
        DispatcherStats {
            processed: self.counters.processed.load(Ordering::Relaxed),
            duplicates: self.counters.duplicates.load(Ordering::Relaxed),
            ignored: self.counters.ignored.load(Ordering::Relaxed),
            failed: self.counters.failed.load(Ordering::Relaxed),
        }
    }
}
