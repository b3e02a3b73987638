//! Stored record representation
//!
//! A record is a bag of named JSON fields plus the two store-assigned
//! attributes every kind carries: `_id` and `createdAt`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field map of a record body
pub type Fields = Map<String, Value>;

/// One document of a given kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub fields: Fields,
}

impl Record {
    pub fn new(id: impl Into<String>, created_at: DateTime<Utc>, fields: Fields) -> Self {
        Self {
            id: id.into(),
            created_at,
            fields,
        }
    }

    /// Field value by name, if present.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Field value as a string slice, if present and a string.
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.fields.get(field).and_then(Value::as_str)
    }

    /// Drop the named fields from the body.
    pub fn without(mut self, excluded: &[&str]) -> Self {
        for field in excluded {
            self.fields.remove(*field);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Record {
        let fields = json!({"name": "John Smith", "status": "unread"})
            .as_object()
            .cloned()
            .unwrap();
        Record::new("abc", Utc::now(), fields)
    }

    #[test]
    fn serializes_flat_with_store_attributes() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["_id"], "abc");
        assert_eq!(value["name"], "John Smith");
        assert!(value["createdAt"].is_string());
        assert!(value.get("fields").is_none());
    }

    #[test]
    fn deserializes_what_it_serializes() {
        let record = sample();
        let text = serde_json::to_string(&record).unwrap();
        let back: Record = serde_json::from_str(&text).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn without_strips_fields() {
        let record = sample().without(&["status", "missing"]);
        assert!(record.get("status").is_none());
        assert_eq!(record.get_str("name"), Some("John Smith"));
    }
}
