use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::DomainError;
use crate::value_objects::DocumentId;

/// Field map of a single document
pub type Fields = Map<String, Value>;

/// A stored document: its id plus its fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    pub fields: Fields,
}

impl Document {
    pub fn new(id: DocumentId, fields: Fields) -> Self {
        Self { id, fields }
    }

    /// Build a document by serializing a value into a field map
    pub fn from_value<T: Serialize>(id: DocumentId, value: &T) -> Result<Self, DomainError> {
        Ok(Self::new(id, to_fields(value)?))
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.fields.get(field).and_then(Value::as_str)
    }

    pub fn get_i64(&self, field: &str) -> Option<i64> {
        self.fields.get(field).and_then(Value::as_i64)
    }

    /// Decode the field map into a typed model
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, DomainError> {
        Ok(serde_json::from_value(Value::Object(self.fields.clone()))?)
    }
}

/// Serialize a value that must encode as a JSON object
pub fn to_fields<T: Serialize>(value: &T) -> Result<Fields, DomainError> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        other => Err(DomainError::SerializationError(format!(
            "expected a JSON object, got {other}"
        ))),
    }
}

/// A single field mutation applied by an update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum FieldUpdate {
    /// Overwrite a field
    Set { field: String, value: Value },
    /// Add `by` to an integer field (missing or non-integer counts as 0)
    Increment { field: String, by: i64 },
}

impl FieldUpdate {
    pub fn set(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Set {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn increment(field: impl Into<String>, by: i64) -> Self {
        Self::Increment {
            field: field.into(),
            by,
        }
    }

    pub fn field(&self) -> &str {
        match self {
            Self::Set { field, .. } | Self::Increment { field, .. } => field,
        }
    }
}

/// Apply updates in order to a field map
pub fn apply_updates(fields: &mut Fields, updates: &[FieldUpdate]) {
    for update in updates {
        match update {
            FieldUpdate::Set { field, value } => {
                fields.insert(field.clone(), value.clone());
            }
            FieldUpdate::Increment { field, by } => {
                let current = fields.get(field).and_then(Value::as_i64).unwrap_or(0);
                fields.insert(field.clone(), Value::from(current.saturating_add(*by)));
            }
        }
    }
}
