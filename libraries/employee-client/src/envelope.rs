//! Response envelope handling.
//!
//! The backend may answer with a bare value or wrap it under `user`,
//! `employee`, `users` or `employees`.

use crate::types::Record;
use serde_json::{Map, Value};

const RECORD_KEYS: [&str; 2] = ["user", "employee"];
const LIST_KEYS: [&str; 2] = ["users", "employees"];

/// Parse a body that may be empty or not JSON at all. Both yield `{}`.
pub fn parse_lenient(text: &str) -> Value {
    if text.is_empty() {
        return Value::Object(Map::new());
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::Object(Map::new()))
}

/// Extract a single record, returning `None` unless it is usable.
pub fn unwrap_record(value: Value) -> Option<Record> {
    let inner = match value {
        Value::Object(mut map) => RECORD_KEYS
            .iter()
            .find_map(|key| map.remove(*key).filter(|v| !v.is_null()))
            .unwrap_or(Value::Object(map)),
        other => other,
    };

    Record::from_value(inner).filter(Record::is_usable)
}

/// Extract a record list from a bare array or a wrapper object.
///
/// Anything else is an empty list. Entries that are not objects are skipped.
pub fn unwrap_list(value: Value) -> Vec<Record> {
    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => LIST_KEYS
            .iter()
            .find_map(|key| match map.remove(*key) {
                Some(Value::Array(items)) => Some(items),
                _ => None,
            })
            .unwrap_or_default(),
        _ => Vec::new(),
    };

    items.into_iter().filter_map(Record::from_value).collect()
}
