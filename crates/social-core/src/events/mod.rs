//! Change events emitted by the document store

mod document_change;

pub use document_change::{ChangeKind, DocumentChange};
