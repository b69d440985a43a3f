//! Type descriptors for the graph-populate framework.
//!
//! This module defines `TypeRef`, the type universe the populator knows how to
//! fill, and `TypeDescriptor`, which pairs a `TypeRef` with the field it is
//! being populated for.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

/// Type representation understood by the populator.
///
/// Scalars are filled by randomizers, container shapes by the collection
/// populator, and `Named` types are looked up in the [`TypeSchema`]
/// (composites, interfaces and enums).
///
/// # YAML Format
///
/// Simple types can be specified as strings. A string that is not a known
/// scalar name refers to a named type in the schema:
/// ```yaml
/// type: uuid
/// type: int
/// type: Address
/// ```
///
/// Parameterised types use object format:
/// ```yaml
/// type:
///   type: list
///   element: string
/// type:
///   type: map
///   key: string
///   value: int
/// type:
///   type: optional
///   inner: Address
/// ```
///
/// [`TypeSchema`]: crate::TypeSchema
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    /// Boolean value
    Bool,

    // Signed integers
    /// 8-bit signed integer
    Int8,
    /// 16-bit signed integer
    Int16,
    /// 32-bit signed integer
    Int32,
    /// 64-bit signed integer
    Int64,

    // Unsigned integers
    /// 8-bit unsigned integer
    UInt8,
    /// 16-bit unsigned integer
    UInt16,
    /// 32-bit unsigned integer
    UInt32,
    /// 64-bit unsigned integer
    UInt64,

    // Floating point
    /// 32-bit IEEE 754 floating point
    Float32,
    /// 64-bit IEEE 754 floating point
    Float64,

    /// Exact decimal with specified precision and scale
    Decimal {
        /// Total number of digits
        precision: u8,
        /// Number of digits after the decimal point
        scale: u8,
    },

    // Text
    /// Single character
    Char,
    /// Unbounded string
    String,

    /// Binary data
    Bytes,

    // Identifiers
    /// UUID (128-bit)
    Uuid,
    /// ULID (Universally Unique Lexicographically Sortable Identifier)
    Ulid,

    // Temporal
    /// Date only (YYYY-MM-DD)
    Date,
    /// Time only (HH:MM:SS)
    Time,
    /// Timestamp in UTC
    DateTime,
    /// Time duration
    Duration,

    // Container shapes
    /// Fixed-shape array of elements (random length per population)
    Array {
        /// Element type
        element: Box<TypeRef>,
    },
    /// Ordered list of elements
    List {
        /// Element type
        element: Box<TypeRef>,
    },
    /// Set of distinct elements
    Set {
        /// Element type
        element: Box<TypeRef>,
    },
    /// Key/value map
    Map {
        /// Key type
        key: Box<TypeRef>,
        /// Value type
        value: Box<TypeRef>,
    },

    /// Value that may be absent
    Optional {
        /// Type of the value when present
        inner: Box<TypeRef>,
    },

    /// Reference to a type defined in the schema
    Named(String),
}

// Custom serialization/deserialization for TypeRef
// Supports both simple string format ("uuid", "Person") and object format ({"type": "list", "element": "int"})

impl Serialize for TypeRef {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeMap;

        match self {
            Self::Decimal { precision, scale } => {
                let mut map = serializer.serialize_map(Some(3))?;
                map.serialize_entry("type", "decimal")?;
                map.serialize_entry("precision", precision)?;
                map.serialize_entry("scale", scale)?;
                map.end()
            }
            Self::Array { element } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", "array")?;
                map.serialize_entry("element", element)?;
                map.end()
            }
            Self::List { element } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", "list")?;
                map.serialize_entry("element", element)?;
                map.end()
            }
            Self::Set { element } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", "set")?;
                map.serialize_entry("element", element)?;
                map.end()
            }
            Self::Map { key, value } => {
                let mut map = serializer.serialize_map(Some(3))?;
                map.serialize_entry("type", "map")?;
                map.serialize_entry("key", key)?;
                map.serialize_entry("value", value)?;
                map.end()
            }
            Self::Optional { inner } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", "optional")?;
                map.serialize_entry("inner", inner)?;
                map.end()
            }
            Self::Named(name) => serializer.serialize_str(name),
            scalar => serializer.serialize_str(scalar.scalar_name().unwrap_or("unknown")),
        }
    }
}

impl<'de> Deserialize<'de> for TypeRef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{Error, MapAccess, Visitor};

        struct TypeRefVisitor;

        impl<'de> Visitor<'de> for TypeRefVisitor {
            type Value = TypeRef;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string or map representing a TypeRef")
            }

            // Handle string format: "uuid", "int", "Address"
            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: Error,
            {
                if value.is_empty() {
                    return Err(E::custom("empty type name"));
                }
                Ok(TypeRef::from_simple_name(value)
                    .unwrap_or_else(|| TypeRef::Named(value.to_string())))
            }

            // Handle map format: {"type": "list", "element": "int"}
            fn visit_map<M>(self, mut map: M) -> Result<Self::Value, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut type_name: Option<String> = None;
                let mut fields: HashMap<String, serde_yaml::Value> = HashMap::new();

                while let Some(key) = map.next_key::<String>()? {
                    if key == "type" {
                        type_name = Some(map.next_value()?);
                    } else {
                        fields.insert(key, map.next_value()?);
                    }
                }

                let type_name = type_name.ok_or_else(|| M::Error::missing_field("type"))?;

                match type_name.as_str() {
                    "decimal" => {
                        let precision = get_field(&fields, "precision").unwrap_or(10);
                        let scale = get_field(&fields, "scale").unwrap_or(2);
                        Ok(TypeRef::Decimal { precision, scale })
                    }
                    "array" => {
                        let element: TypeRef = get_field_required::<_, M::Error>(&fields, "element")?;
                        Ok(TypeRef::array(element))
                    }
                    "list" => {
                        let element: TypeRef = get_field_required::<_, M::Error>(&fields, "element")?;
                        Ok(TypeRef::list(element))
                    }
                    "set" => {
                        let element: TypeRef = get_field_required::<_, M::Error>(&fields, "element")?;
                        Ok(TypeRef::set(element))
                    }
                    "map" => {
                        let key: TypeRef = get_field_required::<_, M::Error>(&fields, "key")?;
                        let value: TypeRef = get_field_required::<_, M::Error>(&fields, "value")?;
                        Ok(TypeRef::map(key, value))
                    }
                    "optional" => {
                        let inner: TypeRef = get_field_required::<_, M::Error>(&fields, "inner")?;
                        Ok(TypeRef::optional(inner))
                    }
                    "named" => {
                        let name: String = get_field_required::<_, M::Error>(&fields, "name")?;
                        Ok(TypeRef::Named(name))
                    }
                    other => Ok(TypeRef::from_simple_name(other)
                        .unwrap_or_else(|| TypeRef::Named(other.to_string()))),
                }
            }
        }

        deserializer.deserialize_any(TypeRefVisitor)
    }
}

// Helper functions for deserialization
fn get_field<T: for<'de> Deserialize<'de>>(
    fields: &HashMap<String, serde_yaml::Value>,
    key: &str,
) -> Option<T> {
    fields
        .get(key)
        .and_then(|v| serde_yaml::from_value(v.clone()).ok())
}

fn get_field_required<T: for<'de> Deserialize<'de>, E: serde::de::Error>(
    fields: &HashMap<String, serde_yaml::Value>,
    key: &'static str,
) -> Result<T, E> {
    let value = fields.get(key).ok_or_else(|| E::missing_field(key))?;
    serde_yaml::from_value(value.clone())
        .map_err(|e| E::custom(format!("invalid field '{key}': {e}")))
}

impl TypeRef {
    /// Parse a scalar type from its simple name.
    ///
    /// Returns `None` for names that are not built-in scalars; callers treat
    /// those as references to named types.
    pub fn from_simple_name(name: &str) -> Option<Self> {
        let ty = match name {
            "bool" | "boolean" => Self::Bool,
            "int8" | "tiny_int" | "tinyint" => Self::Int8,
            "int16" | "small_int" | "smallint" => Self::Int16,
            "int" | "int32" => Self::Int32,
            "int64" | "big_int" | "bigint" | "long" => Self::Int64,
            "uint8" | "byte" => Self::UInt8,
            "uint16" => Self::UInt16,
            "uint32" => Self::UInt32,
            "uint64" => Self::UInt64,
            "float" | "float32" => Self::Float32,
            "double" | "float64" => Self::Float64,
            "decimal" => Self::Decimal {
                precision: 10,
                scale: 2,
            },
            "char" => Self::Char,
            "string" | "text" => Self::String,
            "bytes" => Self::Bytes,
            "uuid" => Self::Uuid,
            "ulid" => Self::Ulid,
            "date" => Self::Date,
            "time" => Self::Time,
            "date_time" | "datetime" | "timestamp" => Self::DateTime,
            "duration" => Self::Duration,
            _ => return None,
        };
        Some(ty)
    }

    /// Canonical simple name of a scalar type, `None` for composite shapes.
    pub fn scalar_name(&self) -> Option<&'static str> {
        let name = match self {
            Self::Bool => "bool",
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Int32 => "int",
            Self::Int64 => "int64",
            Self::UInt8 => "uint8",
            Self::UInt16 => "uint16",
            Self::UInt32 => "uint32",
            Self::UInt64 => "uint64",
            Self::Float32 => "float",
            Self::Float64 => "double",
            Self::Decimal { .. } => "decimal",
            Self::Char => "char",
            Self::String => "string",
            Self::Bytes => "bytes",
            Self::Uuid => "uuid",
            Self::Ulid => "ulid",
            Self::Date => "date",
            Self::Time => "time",
            Self::DateTime => "date_time",
            Self::Duration => "duration",
            _ => return None,
        };
        Some(name)
    }

    /// Create a new Decimal type with the given precision and scale.
    pub fn decimal(precision: u8, scale: u8) -> Self {
        Self::Decimal { precision, scale }
    }

    /// Create a new Array type with the given element type.
    pub fn array(element: TypeRef) -> Self {
        Self::Array {
            element: Box::new(element),
        }
    }

    /// Create a new List type with the given element type.
    pub fn list(element: TypeRef) -> Self {
        Self::List {
            element: Box::new(element),
        }
    }

    /// Create a new Set type with the given element type.
    pub fn set(element: TypeRef) -> Self {
        Self::Set {
            element: Box::new(element),
        }
    }

    /// Create a new Map type with the given key and value types.
    pub fn map(key: TypeRef, value: TypeRef) -> Self {
        Self::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    /// Create a new Optional type wrapping the given type.
    pub fn optional(inner: TypeRef) -> Self {
        Self::Optional {
            inner: Box::new(inner),
        }
    }

    /// Create a reference to a named schema type.
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// Name of the referenced schema type, if this is a `Named` type.
    pub fn as_named(&self) -> Option<&str> {
        match self {
            Self::Named(name) => Some(name),
            _ => None,
        }
    }

    /// Check if this type is a built-in scalar.
    pub fn is_scalar(&self) -> bool {
        self.scalar_name().is_some()
    }

    /// Check if this type is a container shape (array, list, set or map).
    pub fn is_container(&self) -> bool {
        matches!(
            self,
            Self::Array { .. } | Self::List { .. } | Self::Set { .. } | Self::Map { .. }
        )
    }

    /// Check if this type may be absent.
    pub fn is_optional(&self) -> bool {
        matches!(self, Self::Optional { .. })
    }

    /// Check if this type represents a numeric type.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Self::Int8
                | Self::Int16
                | Self::Int32
                | Self::Int64
                | Self::UInt8
                | Self::UInt16
                | Self::UInt32
                | Self::UInt64
                | Self::Float32
                | Self::Float64
                | Self::Decimal { .. }
        )
    }

    /// Check if this type represents a textual type.
    pub fn is_textual(&self) -> bool {
        matches!(self, Self::Char | Self::String)
    }

    /// Check if this type represents a temporal type.
    pub fn is_temporal(&self) -> bool {
        matches!(self, Self::Date | Self::Time | Self::DateTime | Self::Duration)
    }

    /// Collect every named type referenced by this type, including nested ones.
    pub fn referenced_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_names(&mut names);
        names
    }

    fn collect_names<'a>(&'a self, names: &mut Vec<&'a str>) {
        match self {
            Self::Named(name) => names.push(name),
            Self::Array { element } | Self::List { element } | Self::Set { element } => {
                element.collect_names(names)
            }
            Self::Map { key, value } => {
                key.collect_names(names);
                value.collect_names(names);
            }
            Self::Optional { inner } => inner.collect_names(names),
            _ => {}
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decimal { precision, scale } => write!(f, "decimal({precision}, {scale})"),
            Self::Array { element } => write!(f, "array<{element}>"),
            Self::List { element } => write!(f, "list<{element}>"),
            Self::Set { element } => write!(f, "set<{element}>"),
            Self::Map { key, value } => write!(f, "map<{key}, {value}>"),
            Self::Optional { inner } => write!(f, "optional<{inner}>"),
            Self::Named(name) => f.write_str(name),
            scalar => f.write_str(scalar.scalar_name().unwrap_or("unknown")),
        }
    }
}

/// A type to populate, together with the field it is populated for.
///
/// The field context is what allows field-level overrides and exclusions to
/// target `Person.name` without affecting every other `string`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeDescriptor {
    /// The type to populate
    pub type_ref: TypeRef,

    /// Name of the composite type declaring the field, if any
    pub declaring_type: Option<String>,

    /// Name of the field, if any
    pub field_name: Option<String>,
}

impl TypeDescriptor {
    /// Descriptor for a type populated outside of any field.
    pub fn of(type_ref: TypeRef) -> Self {
        Self {
            type_ref,
            declaring_type: None,
            field_name: None,
        }
    }

    /// Descriptor for a named schema type.
    pub fn named(name: impl Into<String>) -> Self {
        Self::of(TypeRef::Named(name.into()))
    }

    /// Descriptor for a field declared on a composite type.
    pub fn field(
        declaring_type: impl Into<String>,
        field_name: impl Into<String>,
        type_ref: TypeRef,
    ) -> Self {
        Self {
            type_ref,
            declaring_type: Some(declaring_type.into()),
            field_name: Some(field_name.into()),
        }
    }

    /// Descriptor for a value nested inside this one (container element,
    /// map key/value, optional inner value).
    ///
    /// Nested values keep no field context, so field-level overrides apply
    /// to the field itself and not to its elements.
    pub fn nested(&self, type_ref: TypeRef) -> Self {
        Self::of(type_ref)
    }

    /// Same field context, different type (used when following bindings).
    pub fn with_type(&self, type_ref: TypeRef) -> Self {
        Self {
            type_ref,
            declaring_type: self.declaring_type.clone(),
            field_name: self.field_name.clone(),
        }
    }

    /// `(declaring_type, field_name)` when this descriptor targets a field.
    pub fn field_key(&self) -> Option<(&str, &str)> {
        match (&self.declaring_type, &self.field_name) {
            (Some(owner), Some(field)) => Some((owner.as_str(), field.as_str())),
            _ => None,
        }
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.field_key() {
            Some((owner, field)) => write!(f, "{owner}.{field}: {}", self.type_ref),
            None => write!(f, "{}", self.type_ref),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_ref_constructors() {
        assert_eq!(
            TypeRef::list(TypeRef::Int32),
            TypeRef::List {
                element: Box::new(TypeRef::Int32)
            }
        );
        assert_eq!(
            TypeRef::decimal(10, 2),
            TypeRef::Decimal {
                precision: 10,
                scale: 2
            }
        );
        assert_eq!(TypeRef::named("Person").as_named(), Some("Person"));
    }

    #[test]
    fn test_type_categories() {
        assert!(TypeRef::Int32.is_numeric());
        assert!(TypeRef::decimal(10, 2).is_numeric());
        assert!(!TypeRef::String.is_numeric());

        assert!(TypeRef::String.is_textual());
        assert!(TypeRef::Char.is_textual());

        assert!(TypeRef::Date.is_temporal());
        assert!(!TypeRef::Int32.is_temporal());

        assert!(TypeRef::set(TypeRef::Int32).is_container());
        assert!(!TypeRef::optional(TypeRef::Int32).is_container());
        assert!(TypeRef::optional(TypeRef::Int32).is_optional());

        assert!(TypeRef::Uuid.is_scalar());
        assert!(!TypeRef::named("Person").is_scalar());
    }

    #[test]
    fn test_deserialize_simple_string() {
        let parsed: TypeRef = serde_yaml::from_str("uuid").unwrap();
        assert_eq!(parsed, TypeRef::Uuid);

        let parsed: TypeRef = serde_yaml::from_str("int").unwrap();
        assert_eq!(parsed, TypeRef::Int32);

        let parsed: TypeRef = serde_yaml::from_str("text").unwrap();
        assert_eq!(parsed, TypeRef::String);

        let parsed: TypeRef = serde_yaml::from_str("Address").unwrap();
        assert_eq!(parsed, TypeRef::named("Address"));
    }

    #[test]
    fn test_deserialize_complex_types() {
        let yaml = r#"
type: map
key: string
value:
  type: list
  element: Address
"#;
        let parsed: TypeRef = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            parsed,
            TypeRef::map(TypeRef::String, TypeRef::list(TypeRef::named("Address")))
        );

        let yaml = r#"
type: optional
inner: int64
"#;
        let parsed: TypeRef = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(parsed, TypeRef::optional(TypeRef::Int64));

        let yaml = r#"
type: decimal
precision: 12
scale: 4
"#;
        let parsed: TypeRef = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(parsed, TypeRef::decimal(12, 4));
    }

    #[test]
    fn test_deserialize_missing_element_fails() {
        let yaml = r#"
type: list
"#;
        let parsed: Result<TypeRef, _> = serde_yaml::from_str(yaml);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_serialize_deserialize_roundtrip() {
        let types = vec![
            TypeRef::Bool,
            TypeRef::UInt16,
            TypeRef::decimal(8, 3),
            TypeRef::set(TypeRef::Char),
            TypeRef::map(TypeRef::Uuid, TypeRef::optional(TypeRef::named("Node"))),
        ];

        for ty in types {
            let yaml = serde_yaml::to_string(&ty).unwrap();
            let parsed: TypeRef = serde_yaml::from_str(&yaml).unwrap();
            assert_eq!(ty, parsed);
        }
    }

    #[test]
    fn test_referenced_names() {
        let ty = TypeRef::map(
            TypeRef::named("Key"),
            TypeRef::list(TypeRef::optional(TypeRef::named("Node"))),
        );
        assert_eq!(ty.referenced_names(), vec!["Key", "Node"]);
        assert!(TypeRef::String.referenced_names().is_empty());
    }

    #[test]
    fn test_descriptor_display() {
        let field = TypeDescriptor::field("Person", "tags", TypeRef::list(TypeRef::String));
        assert_eq!(field.to_string(), "Person.tags: list<string>");
        assert_eq!(field.field_key(), Some(("Person", "tags")));

        let element = field.nested(TypeRef::String);
        assert_eq!(element.to_string(), "string");
        assert!(element.field_key().is_none());
    }
}
