//! Collections, documents and snapshots.

use std::fmt;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{StoreError, StoreResult};

/// Field map of a document.
pub type Fields = Map<String, Value>;

/// Named collections held by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Collection {
    /// User accounts.
    Users,
    /// Menu templates keyed by weekday (`0` = Sunday).
    WeeklyMenu,
    /// Per-user-per-day meal confirmations.
    Confirmations,
}

impl Collection {
    /// All collections.
    pub const ALL: [Collection; 3] = [
        Collection::Users,
        Collection::WeeklyMenu,
        Collection::Confirmations,
    ];

    /// Returns the collection name.
    pub fn name(&self) -> &'static str {
        match self {
            Collection::Users => "users",
            Collection::WeeklyMenu => "weeklyMenu",
            Collection::Confirmations => "confirmations",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A stored document.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Document ID, unique within its collection.
    pub id: String,
    /// Document fields.
    pub fields: Fields,
}

impl Document {
    /// Creates a document from raw fields.
    pub fn new(id: impl Into<String>, fields: Fields) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    /// Deserializes the document fields into a typed value.
    ///
    /// Fields of the wrong shape give [`StoreError::InvalidDocument`].
    pub fn parse<T: DeserializeOwned>(&self) -> StoreResult<T> {
        serde_json::from_value(Value::Object(self.fields.clone())).map_err(|e| {
            StoreError::InvalidDocument {
                id: self.id.clone(),
                reason: e.to_string(),
            }
        })
    }

    /// Shallow-merges fields into this document, overwriting existing keys.
    pub fn merge(&mut self, fields: Fields) {
        self.fields.extend(fields);
    }
}

/// Serializes a value into a document field map.
///
/// The value must serialize to a JSON object.
pub fn to_fields<T: Serialize>(id: &str, value: &T) -> StoreResult<Fields> {
    match serde_json::to_value(value)? {
        Value::Object(fields) => Ok(fields),
        other => Err(StoreError::InvalidDocument {
            id: id.to_string(),
            reason: format!("expected an object, got {}", kind_of(&other)),
        }),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Full contents of a collection at one point in time.
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// Collection the snapshot was taken from.
    pub collection: Collection,
    /// All documents, ordered by ID.
    pub documents: Vec<Document>,
}

impl Snapshot {
    /// Number of documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Returns true if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}
