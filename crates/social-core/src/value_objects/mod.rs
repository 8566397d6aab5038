//! Value objects - immutable domain primitives

mod document_id;

pub use document_id::{DocumentId, DocumentIdParseError};
