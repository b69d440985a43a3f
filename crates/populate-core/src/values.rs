//! Value representations for the graph-populate framework.
//!
//! This module defines `Value`, the type-agnostic tree produced by the
//! populator, and `Record`, the populated form of a composite type.

use crate::types::TypeRef;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use std::collections::BTreeMap;
use std::time::Duration;
use ulid::Ulid;
use uuid::Uuid;

/// A populated value.
///
/// `Value` holds the raw data produced by randomizers and assembled by the
/// populator. Absent optional values are represented by [`Value::Null`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absent value
    Null,

    /// Boolean value
    Bool(bool),

    /// 8-bit signed integer
    Int8(i8),
    /// 16-bit signed integer
    Int16(i16),
    /// 32-bit signed integer
    Int32(i32),
    /// 64-bit signed integer
    Int64(i64),

    /// 8-bit unsigned integer
    UInt8(u8),
    /// 16-bit unsigned integer
    UInt16(u16),
    /// 32-bit unsigned integer
    UInt32(u32),
    /// 64-bit unsigned integer
    UInt64(u64),

    /// 32-bit floating point
    Float32(f32),
    /// 64-bit floating point
    Float64(f64),

    /// Decimal value stored as string with precision info
    Decimal {
        /// String representation of the decimal value
        value: String,
        /// Total number of digits
        precision: u8,
        /// Number of digits after decimal point
        scale: u8,
    },

    /// Single character
    Char(char),

    /// String value
    String(String),

    /// Binary data
    Bytes(Vec<u8>),

    /// UUID value
    Uuid(Uuid),

    /// ULID value
    Ulid(Ulid),

    /// Date without time
    Date(NaiveDate),

    /// Time of day
    Time(NaiveTime),

    /// Date/time in UTC
    DateTime(DateTime<Utc>),

    /// Duration
    Duration(Duration),

    /// Ordered sequence (arrays and lists)
    Array(Vec<Value>),

    /// Sequence of distinct values
    Set(Vec<Value>),

    /// Key/value pairs in insertion order
    Map(Vec<(Value, Value)>),

    /// Populated composite type
    Object(Record),
}

impl Value {
    /// Create a new decimal value.
    pub fn decimal(value: impl Into<String>, precision: u8, scale: u8) -> Self {
        Self::Decimal {
            value: value.into(),
            precision,
            scale,
        }
    }

    /// The default value of a type.
    ///
    /// Used for fields that are excluded or not settable, and as the terminal
    /// value when recursion stops. Named and optional types default to
    /// [`Value::Null`]; everything else gets its zero value.
    pub fn default_for(type_ref: &TypeRef) -> Self {
        match type_ref {
            TypeRef::Bool => Self::Bool(false),
            TypeRef::Int8 => Self::Int8(0),
            TypeRef::Int16 => Self::Int16(0),
            TypeRef::Int32 => Self::Int32(0),
            TypeRef::Int64 => Self::Int64(0),
            TypeRef::UInt8 => Self::UInt8(0),
            TypeRef::UInt16 => Self::UInt16(0),
            TypeRef::UInt32 => Self::UInt32(0),
            TypeRef::UInt64 => Self::UInt64(0),
            TypeRef::Float32 => Self::Float32(0.0),
            TypeRef::Float64 => Self::Float64(0.0),
            TypeRef::Decimal { precision, scale } => Self::Decimal {
                value: format!("{:.*}", *scale as usize, 0.0),
                precision: *precision,
                scale: *scale,
            },
            TypeRef::Char => Self::Char('\0'),
            TypeRef::String => Self::String(String::new()),
            TypeRef::Bytes => Self::Bytes(Vec::new()),
            TypeRef::Uuid => Self::Uuid(Uuid::nil()),
            TypeRef::Ulid => Self::Ulid(Ulid::nil()),
            TypeRef::Date => Self::Date(NaiveDate::default()),
            TypeRef::Time => Self::Time(NaiveTime::default()),
            TypeRef::DateTime => Self::DateTime(DateTime::<Utc>::default()),
            TypeRef::Duration => Self::Duration(Duration::ZERO),
            TypeRef::Array { .. } | TypeRef::List { .. } => Self::Array(Vec::new()),
            TypeRef::Set { .. } => Self::Set(Vec::new()),
            TypeRef::Map { .. } => Self::Map(Vec::new()),
            TypeRef::Optional { .. } | TypeRef::Named(_) => Self::Null,
        }
    }

    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Try to get this value as a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get this value as an i64, widening smaller integers.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int8(i) => Some(*i as i64),
            Self::Int16(i) => Some(*i as i64),
            Self::Int32(i) => Some(*i as i64),
            Self::Int64(i) => Some(*i),
            Self::UInt8(i) => Some(*i as i64),
            Self::UInt16(i) => Some(*i as i64),
            Self::UInt32(i) => Some(*i as i64),
            Self::UInt64(i) => i64::try_from(*i).ok(),
            _ => None,
        }
    }

    /// Try to get this value as an f64.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float64(f) => Some(*f),
            Self::Float32(f) => Some(*f as f64),
            _ => None,
        }
    }

    /// Try to get this value as a string reference.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get this value as a character.
    pub fn as_char(&self) -> Option<char> {
        match self {
            Self::Char(c) => Some(*c),
            _ => None,
        }
    }

    /// Try to get this value as a UUID.
    pub fn as_uuid(&self) -> Option<&Uuid> {
        match self {
            Self::Uuid(u) => Some(u),
            _ => None,
        }
    }

    /// Try to get this value as a DateTime.
    pub fn as_datetime(&self) -> Option<&DateTime<Utc>> {
        match self {
            Self::DateTime(dt) => Some(dt),
            _ => None,
        }
    }

    /// Try to get this value as a sequence (arrays, lists and sets).
    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Self::Array(arr) | Self::Set(arr) => Some(arr),
            _ => None,
        }
    }

    /// Try to get this value as map entries.
    pub fn as_map(&self) -> Option<&Vec<(Value, Value)>> {
        match self {
            Self::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Try to get this value as a populated composite.
    pub fn as_object(&self) -> Option<&Record> {
        match self {
            Self::Object(record) => Some(record),
            _ => None,
        }
    }

    /// Number of elements for container values, `None` otherwise.
    pub fn container_len(&self) -> Option<usize> {
        match self {
            Self::Array(items) | Self::Set(items) => Some(items.len()),
            Self::Map(entries) => Some(entries.len()),
            _ => None,
        }
    }
}

/// Populated composite type.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Name of the composite type this record was populated from
    pub type_name: String,

    /// Field values keyed by field name
    pub fields: BTreeMap<String, Value>,
}

impl Record {
    /// Create an empty record for the given type.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Get a field value by name.
    pub fn get_field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Set a field value, replacing any previous value.
    pub fn set_field(&mut self, name: impl Into<String>, value: Value) {
        self.fields.insert(name.into(), value);
    }

    /// Iterate over field names and values.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_for_scalars() {
        assert_eq!(Value::default_for(&TypeRef::Int32), Value::Int32(0));
        assert_eq!(Value::default_for(&TypeRef::Bool), Value::Bool(false));
        assert_eq!(
            Value::default_for(&TypeRef::String),
            Value::String(String::new())
        );
        assert_eq!(
            Value::default_for(&TypeRef::decimal(10, 2)),
            Value::decimal("0.00", 10, 2)
        );
        assert_eq!(Value::default_for(&TypeRef::Uuid), Value::Uuid(Uuid::nil()));
    }

    #[test]
    fn test_default_for_references_is_null() {
        assert!(Value::default_for(&TypeRef::named("Person")).is_null());
        assert!(Value::default_for(&TypeRef::optional(TypeRef::Int32)).is_null());
    }

    #[test]
    fn test_default_for_containers_is_empty() {
        assert_eq!(
            Value::default_for(&TypeRef::list(TypeRef::Int32)).container_len(),
            Some(0)
        );
        assert_eq!(
            Value::default_for(&TypeRef::map(TypeRef::String, TypeRef::Int32)).container_len(),
            Some(0)
        );
    }

    #[test]
    fn test_numeric_accessors() {
        assert_eq!(Value::Int8(-3).as_i64(), Some(-3));
        assert_eq!(Value::UInt64(u64::MAX).as_i64(), None);
        assert_eq!(Value::Float32(1.5).as_f64(), Some(1.5));
        assert_eq!(Value::String("x".into()).as_i64(), None);
    }

    #[test]
    fn test_record_fields() {
        let mut record = Record::new("Address");
        record.set_field("city", Value::String("Paris".into()));
        record.set_field("city", Value::String("Tunis".into()));

        assert_eq!(record.type_name, "Address");
        assert_eq!(record.get_field("city").and_then(Value::as_str), Some("Tunis"));
        assert!(record.get_field("zip").is_none());
        assert_eq!(record.iter().count(), 1);
    }
}
