//! The in-memory mirror of the persisted JSON document.

use crate::{StoreError, ID_FIELD};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One open-schema record: a JSON object keyed by field name.
pub type Record = Map<String, Value>;

/// Root of the persisted structure: collection name -> ordered records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document(Map<String, Value>);

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse serialized bytes. The root must be a JSON object.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, StoreError> {
        let value: Value =
            serde_json::from_slice(bytes).map_err(|e| StoreError::Corrupt(e.to_string()))?;
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(StoreError::Corrupt(format!(
                "document root must be an object, found {}",
                kind_of(&other)
            ))),
        }
    }

    /// Serialize as 2-space indented JSON.
    pub fn to_vec_pretty(&self) -> Result<Vec<u8>, StoreError> {
        serde_json::to_vec_pretty(&self.0).map_err(|e| StoreError::Encode(e.to_string()))
    }

    /// Add an empty collection under `name` unless one already exists.
    /// Returns `true` when the collection was added.
    pub fn ensure_collection(&mut self, name: &str) -> bool {
        if self.0.contains_key(name) {
            return false;
        }
        self.0.insert(name.to_string(), Value::Array(Vec::new()));
        true
    }

    pub fn collection_names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// All records of a collection in stored order. Absent collections are
    /// empty; entries that are not JSON objects are skipped.
    pub fn records(&self, name: &str) -> Result<Vec<Record>, StoreError> {
        match self.0.get(name) {
            None => Ok(Vec::new()),
            Some(Value::Array(items)) => Ok(items
                .iter()
                .filter_map(|v| v.as_object().cloned())
                .collect()),
            Some(other) => Err(StoreError::InvalidCollection {
                name: name.to_string(),
                found: kind_of(other),
            }),
        }
    }

    /// First record whose `id` field is the string `id`.
    pub fn find(&self, name: &str, id: &str) -> Result<Option<&Record>, StoreError> {
        match self.0.get(name) {
            None => Ok(None),
            Some(Value::Array(items)) => Ok(items
                .iter()
                .filter_map(Value::as_object)
                .find(|record| has_id(record, id))),
            Some(other) => Err(StoreError::InvalidCollection {
                name: name.to_string(),
                found: kind_of(other),
            }),
        }
    }

    /// Mutable view of a collection, creating it when absent.
    pub(crate) fn items_mut(&mut self, name: &str) -> Result<&mut Vec<Value>, StoreError> {
        let entry = self
            .0
            .entry(name.to_string())
            .or_insert_with(|| Value::Array(Vec::new()));
        match entry {
            Value::Array(items) => Ok(items),
            other => Err(StoreError::InvalidCollection {
                name: name.to_string(),
                found: kind_of(other),
            }),
        }
    }
}

/// Overlay `patch` onto `target`. Patch fields replace existing ones, fields
/// the patch leaves out are kept, and `id` is never touched.
pub fn shallow_merge(target: &mut Record, patch: &Record) {
    for (key, value) in patch {
        if key == ID_FIELD {
            continue;
        }
        target.insert(key.clone(), value.clone());
    }
}

pub(crate) fn has_id(record: &Record, id: &str) -> bool {
    matches!(record.get(ID_FIELD), Some(Value::String(s)) if s == id)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
