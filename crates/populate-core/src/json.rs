//! Conversion of populated values to JSON.
//!
//! The JSON form is what the CLI writes out and what typed population goes
//! through: any `serde::Deserialize` type whose shape matches the schema can
//! be read back from it.
//!
//! Conversion rules:
//! - integers and floats map to JSON numbers (non-finite floats become `null`)
//! - decimals, UUIDs, ULIDs and temporal values map to their string forms
//! - durations map to `{"secs": .., "nanos": ..}`, the serde form of
//!   `std::time::Duration`
//! - maps whose keys are all scalars become JSON objects, with numbers,
//!   booleans and identifiers written as strings the way `serde_json` writes
//!   map keys; maps with composite or container keys become arrays of
//!   `[key, value]` pairs
//! - records become JSON objects keyed by field name

use crate::values::Value;
use serde_json::{json, Map, Number, Value as JsonValue};

impl Value {
    /// Convert this value to a JSON value.
    pub fn to_json(&self) -> JsonValue {
        JsonValue::from(self)
    }
}

impl From<&Value> for JsonValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => JsonValue::Null,
            Value::Bool(b) => JsonValue::Bool(*b),
            Value::Int8(i) => JsonValue::from(*i),
            Value::Int16(i) => JsonValue::from(*i),
            Value::Int32(i) => JsonValue::from(*i),
            Value::Int64(i) => JsonValue::from(*i),
            Value::UInt8(i) => JsonValue::from(*i),
            Value::UInt16(i) => JsonValue::from(*i),
            Value::UInt32(i) => JsonValue::from(*i),
            Value::UInt64(i) => JsonValue::from(*i),
            Value::Float32(f) => float_to_json(*f as f64),
            Value::Float64(f) => float_to_json(*f),
            Value::Decimal { value, .. } => JsonValue::String(value.clone()),
            Value::Char(c) => JsonValue::String(c.to_string()),
            Value::String(s) => JsonValue::String(s.clone()),
            Value::Bytes(bytes) => JsonValue::Array(bytes.iter().map(|b| json!(b)).collect()),
            Value::Uuid(u) => JsonValue::String(u.to_string()),
            Value::Ulid(u) => JsonValue::String(u.to_string()),
            Value::Date(d) => JsonValue::String(d.format("%Y-%m-%d").to_string()),
            Value::Time(t) => JsonValue::String(t.format("%H:%M:%S").to_string()),
            Value::DateTime(dt) => JsonValue::String(dt.to_rfc3339()),
            Value::Duration(d) => json!({ "secs": d.as_secs(), "nanos": d.subsec_nanos() }),
            Value::Array(items) | Value::Set(items) => {
                JsonValue::Array(items.iter().map(JsonValue::from).collect())
            }
            Value::Map(entries) => map_to_json(entries),
            Value::Object(record) => {
                let fields: Map<String, JsonValue> = record
                    .fields
                    .iter()
                    .map(|(name, value)| (name.clone(), JsonValue::from(value)))
                    .collect();
                JsonValue::Object(fields)
            }
        }
    }
}

impl From<Value> for JsonValue {
    fn from(value: Value) -> Self {
        JsonValue::from(&value)
    }
}

fn float_to_json(f: f64) -> JsonValue {
    Number::from_f64(f)
        .map(JsonValue::Number)
        .unwrap_or(JsonValue::Null)
}

fn map_to_json(entries: &[(Value, Value)]) -> JsonValue {
    let object: Option<Map<String, JsonValue>> = entries
        .iter()
        .map(|(key, value)| string_key(key).map(|key| (key, JsonValue::from(value))))
        .collect();

    match object {
        Some(object) => JsonValue::Object(object),
        None => JsonValue::Array(
            entries
                .iter()
                .map(|(key, value)| JsonValue::Array(vec![key.into(), value.into()]))
                .collect(),
        ),
    }
}

fn string_key(key: &Value) -> Option<String> {
    match JsonValue::from(key) {
        JsonValue::String(s) => Some(s),
        JsonValue::Number(n) => Some(n.to_string()),
        JsonValue::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
