//! Dynamic value tree produced by decoding a save against a schema.
//!
//! The shape of a decoded save is determined entirely by the schema that
//! decoded it, so values are an owned tree rather than fixed structs. A
//! field that is absent from the wire string is simply absent from its
//! record; a present-but-empty block decodes to [`SaveValue::Null`].

use std::collections::BTreeMap;

/// One decoded value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveValue {
    /// A block that was present but empty on the wire.
    Null,
    /// A raw scalar. Leaf blocks are never parsed further.
    Scalar(String),
    /// An array-shaped composite.
    List(Vec<SaveValue>),
    /// An object-shaped composite.
    Record(SaveRecord),
}

impl SaveValue {
    /// Borrow the scalar payload, if this is a scalar.
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            SaveValue::Scalar(s) => Some(s),
            _ => None,
        }
    }

    /// Borrow the list payload, if this is a list.
    pub fn as_list(&self) -> Option<&[SaveValue]> {
        match self {
            SaveValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Borrow the record payload, if this is a record.
    pub fn as_record(&self) -> Option<&SaveRecord> {
        match self {
            SaveValue::Record(record) => Some(record),
            _ => None,
        }
    }

    /// Convert to a `serde_json::Value` for display or export.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            SaveValue::Null => serde_json::Value::Null,
            SaveValue::Scalar(s) => serde_json::Value::String(s.clone()),
            SaveValue::List(items) => {
                serde_json::Value::Array(items.iter().map(SaveValue::to_json).collect())
            }
            SaveValue::Record(record) => record.to_json(),
        }
    }

    /// Build from a `serde_json::Value`. Numbers and booleans are rendered
    /// as their string form, since the wire format only carries strings.
    pub fn from_json(value: &serde_json::Value) -> SaveValue {
        match value {
            serde_json::Value::Null => SaveValue::Null,
            serde_json::Value::String(s) => SaveValue::Scalar(s.clone()),
            serde_json::Value::Number(n) => SaveValue::Scalar(n.to_string()),
            serde_json::Value::Bool(b) => SaveValue::Scalar(b.to_string()),
            serde_json::Value::Array(items) => {
                SaveValue::List(items.iter().map(SaveValue::from_json).collect())
            }
            serde_json::Value::Object(map) => {
                let mut record = SaveRecord::new();
                for (key, value) in map {
                    record.insert(key.clone(), SaveValue::from_json(value));
                }
                SaveValue::Record(record)
            }
        }
    }
}

/// An ordered field-name → value map. Field absence models the wire's
/// missing-block case.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaveRecord {
    fields: BTreeMap<String, SaveValue>,
}

impl SaveRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field value, replacing any previous value.
    pub fn insert(&mut self, field: impl Into<String>, value: SaveValue) {
        self.fields.insert(field.into(), value);
    }

    /// Look up a field.
    pub fn get(&self, field: &str) -> Option<&SaveValue> {
        self.fields.get(field)
    }

    /// Remove and return a field.
    pub fn remove(&mut self, field: &str) -> Option<SaveValue> {
        self.fields.remove(field)
    }

    /// Whether the field is present (a `Null` value counts as present).
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Number of present fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over present fields.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SaveValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Convenience: the scalar value of a field, if it is a present scalar.
    pub fn scalar(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(SaveValue::as_scalar)
    }

    /// Convert to a JSON object.
    pub fn to_json(&self) -> serde_json::Value {
        let map = self
            .fields
            .iter()
            .map(|(k, v)| (k.clone(), v.to_json()))
            .collect();
        serde_json::Value::Object(map)
    }
}

impl FromIterator<(String, SaveValue)> for SaveRecord {
    fn from_iter<I: IntoIterator<Item = (String, SaveValue)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}
