//! Field helpers for metadata derivation.

use serde_json::{Map, Value};

/// Non-empty string at a JSON pointer.
pub fn text(record: &Value, pointer: &str) -> Option<String> {
    record
        .pointer(pointer)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
}

/// First non-empty string among `pointers`, in order.
pub fn first_text(record: &Value, pointers: &[&str]) -> Option<String> {
    pointers.iter().find_map(|p| text(record, p))
}

/// Object made of the non-null fields listed in `keys`, or `None` if all are absent.
pub fn pick(record: &Value, keys: &[&str]) -> Option<Value> {
    let picked: Map<String, Value> = keys
        .iter()
        .filter_map(|k| match record.get(*k) {
            Some(Value::Null) | None => None,
            Some(v) => Some((k.to_string(), v.clone())),
        })
        .collect();

    (!picked.is_empty()).then_some(Value::Object(picked))
}

/// First element of a JSON array, if it is a non-null value.
pub fn first_record(items: &Value) -> Option<&Value> {
    items.as_array()?.first().filter(|r| !r.is_null())
}
