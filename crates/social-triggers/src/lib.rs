//! # social-triggers
//!
//! Reactive triggers over document change events.
//!
//! Every committed write produces a [`DocumentChange`](social_core::DocumentChange).
//! The [`TriggerDispatcher`] routes each change to the trigger for its
//! collection and kind:
//!
//! | Change | Trigger |
//! |---|---|
//! | like created / comment created | notify the post author |
//! | like deleted / comment deleted | delete the notification |
//! | user `imageUrl` updated | copy the image onto the user's posts and comments |
//! | post deleted | delete its comments, likes and notifications |
//!
//! Changes arrive either from Redis pub/sub ([`worker::run_redis`], the
//! standalone worker) or from an in-process feed ([`spawn_embedded`]).

pub mod dedup;
pub mod dispatcher;
pub mod error;
pub mod handlers;
pub mod server;
pub mod worker;

pub use dedup::IdempotencyGuard;
pub use dispatcher::{DispatchOutcome, DispatcherStats, TriggerDispatcher};
pub use error::{TriggerError, TriggerResult};
pub use server::{create_router, run};
pub use worker::spawn_embedded;
