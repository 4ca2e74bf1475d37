//! Dynamic table record

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

use super::value::{NULL, PathSegment, parse_path};
use super::{TableRow, Value};
use crate::error::{Result, TableError};

/// A dynamic row with an explicit key and named fields.
///
/// Records are the ready-made [`TableRow`] for data that arrives as JSON or
/// is assembled at runtime. Field paths descend into nested maps and lists.
///
/// # Example
///
/// ```
/// use datatable::model::Record;
///
/// let record = Record::new("1")
///     .set("name", "Contoso")
///     .set("revenue", 1_000_000i64);
///
/// assert_eq!(record.get("name").and_then(|v| v.as_str()), Some("Contoso"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// The unique identifier of the record.
    key: String,

    /// The field values.
    fields: BTreeMap<String, Value>,
}

impl Record {
    /// Creates a new empty record with the given key.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Builds a record from a JSON object, taking its identity from `key_field`.
    ///
    /// String and numeric keys are accepted. The key field stays available as
    /// a regular field.
    pub fn from_json(key_field: &str, json: serde_json::Value) -> Result<Self> {
        let serde_json::Value::Object(object) = json else {
            return Err(TableError::InvalidRecord(format!(
                "expected a JSON object, got {}",
                json_type_name(&json)
            )));
        };

        let key = match object.get(key_field) {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(serde_json::Value::Number(n)) => n.to_string(),
            Some(serde_json::Value::Null) | None => return Err(TableError::missing_key(key_field)),
            Some(other) => {
                return Err(TableError::InvalidRecord(format!(
                    "key field '{}' must be a string or number, got {}",
                    key_field,
                    json_type_name(other)
                )));
            }
        };

        let fields = object
            .into_iter()
            .map(|(name, value)| (name, Value::from(value)))
            .collect();

        Ok(Self { key, fields })
    }

    /// Builds records from a JSON array of objects.
    pub fn many_from_json(key_field: &str, json: serde_json::Value) -> Result<Vec<Self>> {
        match json {
            serde_json::Value::Array(items) => items
                .into_iter()
                .map(|item| Self::from_json(key_field, item))
                .collect(),
            other => Err(TableError::InvalidRecord(format!(
                "expected a JSON array, got {}",
                json_type_name(&other)
            ))),
        }
    }

    /// Returns the record key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns a reference to the field value, if it exists.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Resolves a field path, returning [`Value::Null`] on any miss.
    pub fn get_path(&self, path: &str) -> &Value {
        let segments = parse_path(path);
        let Some((PathSegment::Key(first), rest)) = segments.split_first() else {
            return &NULL;
        };
        match self.fields.get(*first) {
            Some(root) => root.get_segments(rest),
            None => &NULL,
        }
    }

    /// Returns a reference to all fields.
    pub fn fields(&self) -> &BTreeMap<String, Value> {
        &self.fields
    }

    /// Sets a field value (builder pattern).
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Inserts a field value.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Removes a field and returns its value.
    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.fields.remove(field)
    }
}

impl TableRow for Record {
    type Key = String;

    fn key(&self) -> String {
        self.key.clone()
    }

    fn field(&self, path: &str) -> Value {
        self.get_path(path).clone()
    }
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
