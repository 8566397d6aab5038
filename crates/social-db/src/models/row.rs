//! Row model for the documents table

use chrono::{DateTime, Utc};
use social_core::document::Fields;
use sqlx::types::Json;
use sqlx::FromRow;

/// Database model for the documents table
#[derive(Debug, Clone, FromRow)]
pub struct DocumentRow {
    pub id: String,
    pub data: Json<Fields>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
