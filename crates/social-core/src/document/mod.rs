//! Document model - collections, field maps, queries, and write batches
//!
//! Documents are schemaless JSON objects grouped into named collections.
//! Typed entities are encoded into and decoded from this representation by
//! the storage layer.

mod batch;
mod collection;
mod fields;
mod query;
pub mod timestamp;

pub use batch::{WriteBatch, WriteOp};
pub use collection::{Collection, UnknownCollection};
pub use fields::{apply_updates, to_fields, Document, FieldUpdate, Fields};
pub use query::{compare_values, Direction, Filter, OrderBy, Query};
