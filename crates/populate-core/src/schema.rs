//! Schema definitions for the graph-populate framework.
//!
//! Rust has no runtime reflection, so the structure of every type the
//! populator can build is declared up front as a [`TypeDef`] and cached in a
//! [`TypeSchema`]. Schemas are usually loaded from YAML:
//!
//! ```yaml
//! version: 1
//! types:
//!   - name: Person
//!     kind: struct
//!     fields:
//!       - name: name
//!         type: string
//!       - name: address
//!         type: Address
//!       - name: nickname
//!         type:
//!           type: optional
//!           inner: string
//!         optional_percent: 30
//!   - name: Address
//!     fields:
//!       - name: city
//!         type: string
//!   - name: Shape
//!     kind: interface
//!   - name: Color
//!     kind: enum
//!     variants: [Red, Green, Blue]
//! ```
//!
//! This module also defines [`RandomizerConfig`], the declarative randomizer
//! vocabulary used for type and field overrides.

use crate::types::TypeRef;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

// ============================================================================
// Error Types
// ============================================================================

/// Error type for schema operations.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// Error reading schema file
    #[error("Failed to read schema file: {0}")]
    IoError(#[from] std::io::Error),

    /// Error parsing YAML
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Type not found in schema
    #[error("Type not found: {0}")]
    TypeNotFound(String),

    /// Field not found in composite type
    #[error("Field '{field}' not found in type '{type_name}'")]
    FieldNotFound { type_name: String, field: String },

    /// The same type name is defined more than once
    #[error("Type '{0}' is defined more than once")]
    DuplicateType(String),

    /// The same field name appears more than once in one type
    #[error("Field '{field}' is defined more than once in type '{type_name}'")]
    DuplicateField { type_name: String, field: String },
}

// ============================================================================
// Type Definitions
// ============================================================================

/// Kind of a named type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    /// Composite type populated field by field
    #[default]
    Struct,

    /// Abstract type that must be bound to a concrete type
    Interface,

    /// Finite set of named variants
    Enum,
}

fn default_true() -> bool {
    true
}

/// Field of a composite type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldDef {
    /// Field name
    pub name: String,

    /// Field type
    #[serde(rename = "type")]
    pub field_type: TypeRef,

    /// Whether the populator may assign this field
    #[serde(default = "default_true")]
    pub settable: bool,

    /// Whether this field is always left at its default value
    #[serde(default)]
    pub exclude: bool,

    /// Presence probability for optional fields, overriding the global one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optional_percent: Option<i32>,
}

impl FieldDef {
    /// Create a new settable field.
    pub fn new(name: impl Into<String>, field_type: TypeRef) -> Self {
        Self {
            name: name.into(),
            field_type,
            settable: true,
            exclude: false,
            optional_percent: None,
        }
    }

    /// Mark this field as not settable (e.g. computed or read-only).
    pub fn read_only(mut self) -> Self {
        self.settable = false;
        self
    }

    /// Mark this field as excluded from population.
    pub fn excluded(mut self) -> Self {
        self.exclude = true;
        self
    }

    /// Set the presence probability used when this field is optional.
    pub fn with_optional_percent(mut self, percent: i32) -> Self {
        self.optional_percent = Some(percent);
        self
    }

    /// Whether the populator should generate a value for this field.
    pub fn is_populated(&self) -> bool {
        self.settable && !self.exclude
    }
}

/// Definition of a named type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TypeDef {
    /// Type name
    pub name: String,

    /// Kind of type
    #[serde(default)]
    pub kind: TypeKind,

    /// Fields, in population order (structs only)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldDef>,

    /// Variant names (enums only)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variants: Vec<String>,

    /// Whether an empty instance can be allocated (structs only)
    #[serde(default = "default_true")]
    pub constructible: bool,
}

impl TypeDef {
    /// Create a composite type with the given fields.
    pub fn composite(name: impl Into<String>, fields: Vec<FieldDef>) -> Self {
        Self {
            name: name.into(),
            kind: TypeKind::Struct,
            fields,
            variants: Vec::new(),
            constructible: true,
        }
    }

    /// Create an interface type.
    pub fn interface(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: TypeKind::Interface,
            fields: Vec::new(),
            variants: Vec::new(),
            constructible: false,
        }
    }

    /// Create an enum type with the given variants.
    pub fn enumeration(name: impl Into<String>, variants: Vec<String>) -> Self {
        Self {
            name: name.into(),
            kind: TypeKind::Enum,
            fields: Vec::new(),
            variants,
            constructible: true,
        }
    }

    /// Mark this type as having no construction path.
    pub fn non_constructible(mut self) -> Self {
        self.constructible = false;
        self
    }

    /// Get a field by name.
    pub fn get_field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Get all field names.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }
}

fn default_version() -> u32 {
    1
}

/// Collection of named type definitions.
///
/// The name lookup is computed once when the schema is built and reused by
/// every population call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TypeSchema {
    /// Schema version
    #[serde(default = "default_version")]
    pub version: u32,

    /// Type definitions
    #[serde(default)]
    pub types: Vec<TypeDef>,

    /// Cached type lookup (not serialized)
    #[serde(skip)]
    type_map: HashMap<String, usize>,
}

impl TypeSchema {
    /// Create a schema from a list of type definitions.
    pub fn new(types: Vec<TypeDef>) -> Result<Self, SchemaError> {
        let mut schema = Self {
            version: default_version(),
            types,
            type_map: HashMap::new(),
        };
        schema.build_type_map()?;
        Ok(schema)
    }

    /// Load schema from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SchemaError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse schema from YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, SchemaError> {
        let mut schema: TypeSchema = serde_yaml::from_str(yaml)?;
        schema.build_type_map()?;
        Ok(schema)
    }

    /// Build the internal type lookup map.
    fn build_type_map(&mut self) -> Result<(), SchemaError> {
        let mut type_map = HashMap::with_capacity(self.types.len());
        for (idx, def) in self.types.iter().enumerate() {
            if type_map.insert(def.name.clone(), idx).is_some() {
                return Err(SchemaError::DuplicateType(def.name.clone()));
            }
            check_unique_fields(def)?;
        }
        self.type_map = type_map;
        Ok(())
    }

    /// Add a type to the schema.
    pub fn add_type(&mut self, def: TypeDef) -> Result<(), SchemaError> {
        if self.type_map.contains_key(&def.name) {
            return Err(SchemaError::DuplicateType(def.name));
        }
        check_unique_fields(&def)?;
        self.type_map.insert(def.name.clone(), self.types.len());
        self.types.push(def);
        Ok(())
    }

    /// Get a type definition by name.
    pub fn get_type(&self, name: &str) -> Option<&TypeDef> {
        self.type_map.get(name).and_then(|&idx| self.types.get(idx))
    }

    /// Get the type of a field in a specific composite type.
    pub fn get_field_type(&self, type_name: &str, field: &str) -> Result<&TypeRef, SchemaError> {
        let def = self
            .get_type(type_name)
            .ok_or_else(|| SchemaError::TypeNotFound(type_name.to_string()))?;

        def.get_field(field)
            .map(|f| &f.field_type)
            .ok_or_else(|| SchemaError::FieldNotFound {
                type_name: type_name.to_string(),
                field: field.to_string(),
            })
    }

    /// Get all type names in the schema.
    pub fn type_names(&self) -> Vec<&str> {
        self.types.iter().map(|t| t.name.as_str()).collect()
    }

    /// Named references that do not resolve to a type in this schema.
    ///
    /// Returns `(location, missing_name)` pairs where location is
    /// `Type.field`.
    pub fn unknown_references(&self) -> Vec<(String, String)> {
        let mut missing = Vec::new();
        for def in &self.types {
            for field in &def.fields {
                for name in field.field_type.referenced_names() {
                    if self.get_type(name).is_none() {
                        missing.push((format!("{}.{}", def.name, field.name), name.to_string()));
                    }
                }
            }
        }
        missing
    }
}

// ============================================================================
// Randomizer Configuration
// ============================================================================

/// Declarative randomizer configuration.
///
/// Used for type and field overrides in YAML configuration files. Each
/// variant maps to one randomizer in the `populate-randomizers` crate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RandomizerConfig {
    /// Generate UUIDs (v4)
    UuidV4,

    /// Generate strings using a pattern with placeholders
    Pattern {
        /// Pattern string (supports {uuid} and {rand:N})
        pattern: String,
    },

    /// Generate random integers in a range
    IntRange {
        /// Minimum value (inclusive)
        min: i64,
        /// Maximum value (inclusive)
        max: i64,
    },

    /// Generate random floats in a range
    FloatRange {
        /// Minimum value (inclusive)
        min: f64,
        /// Maximum value (inclusive)
        max: f64,
    },

    /// Generate random decimals in a range
    DecimalRange {
        /// Minimum value (inclusive)
        min: f64,
        /// Maximum value (inclusive)
        max: f64,
    },

    /// Generate strings with a length in a range, using the configured charset
    StringLength {
        /// Minimum length (inclusive)
        min: usize,
        /// Maximum length (inclusive)
        max: usize,
    },

    /// Generate timestamps in a range
    TimestampRange {
        /// Start timestamp (ISO 8601)
        start: String,
        /// End timestamp (ISO 8601)
        end: String,
    },

    /// Generate weighted boolean values
    WeightedBool {
        /// Weight for true value (0.0 to 1.0)
        true_weight: f64,
    },

    /// Generate random selection from a pool of values
    OneOf {
        /// Pool of values to select from
        values: Vec<serde_yaml::Value>,
    },

    /// Generate arrays by sampling from a pool
    SampleArray {
        /// Pool of values to sample from
        pool: Vec<String>,
        /// Minimum array length
        #[serde(default)]
        min_length: usize,
        /// Maximum array length
        max_length: usize,
    },

    /// Generate a static value
    Static {
        /// The static value to use
        value: serde_yaml::Value,
    },

    /// Generate null values
    Null,

    /// Generate random durations in a range (in seconds)
    DurationRange {
        /// Minimum duration in seconds (inclusive)
        min_secs: u64,
        /// Maximum duration in seconds (inclusive)
        max_secs: u64,
    },
}

fn check_unique_fields(def: &TypeDef) -> Result<(), SchemaError> {
    let mut seen = HashSet::with_capacity(def.fields.len());
    for field in &def.fields {
        if !seen.insert(field.name.as_str()) {
            return Err(SchemaError::DuplicateField {
                type_name: def.name.clone(),
                field: field.name.clone(),
            });
        }
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_SCHEMA: &str = r#"
version: 1

types:
  - name: Person
    kind: struct
    fields:
      - name: name
        type: string
      - name: age
        type: int
      - name: address
        type: Address
      - name: nickname
        type:
          type: optional
          inner: string
        optional_percent: 30
      - name: id
        type: uuid
        settable: false

  - name: Address
    fields:
      - name: city
        type: string
      - name: zip
        type: string

  - name: Shape
    kind: interface

  - name: Color
    kind: enum
    variants: [Red, Green, Blue]
"#;

    #[test]
    fn test_parse_schema() {
        let schema = TypeSchema::from_yaml(SAMPLE_SCHEMA).unwrap();

        assert_eq!(schema.version, 1);
        assert_eq!(schema.types.len(), 4);

        let person = schema.get_type("Person").unwrap();
        assert_eq!(person.kind, TypeKind::Struct);
        assert!(person.constructible);
        assert_eq!(
            person.field_names(),
            vec!["name", "age", "address", "nickname", "id"]
        );

        let address = schema.get_type("Address").unwrap();
        assert_eq!(address.kind, TypeKind::Struct);

        let shape = schema.get_type("Shape").unwrap();
        assert_eq!(shape.kind, TypeKind::Interface);

        let color = schema.get_type("Color").unwrap();
        assert_eq!(color.variants, vec!["Red", "Green", "Blue"]);
    }

    #[test]
    fn test_field_flags() {
        let schema = TypeSchema::from_yaml(SAMPLE_SCHEMA).unwrap();
        let person = schema.get_type("Person").unwrap();

        let nickname = person.get_field("nickname").unwrap();
        assert_eq!(nickname.optional_percent, Some(30));
        assert!(nickname.is_populated());

        let id = person.get_field("id").unwrap();
        assert!(!id.settable);
        assert!(!id.is_populated());
    }

    #[test]
    fn test_get_field_type() {
        let schema = TypeSchema::from_yaml(SAMPLE_SCHEMA).unwrap();

        let address_type = schema.get_field_type("Person", "address").unwrap();
        assert_eq!(address_type, &TypeRef::named("Address"));

        let age_type = schema.get_field_type("Person", "age").unwrap();
        assert_eq!(age_type, &TypeRef::Int32);
    }

    #[test]
    fn test_type_not_found() {
        let schema = TypeSchema::from_yaml(SAMPLE_SCHEMA).unwrap();

        let result = schema.get_field_type("Nope", "field");
        assert!(matches!(result, Err(SchemaError::TypeNotFound(_))));
    }

    #[test]
    fn test_field_not_found() {
        let schema = TypeSchema::from_yaml(SAMPLE_SCHEMA).unwrap();

        let result = schema.get_field_type("Person", "nope");
        assert!(matches!(result, Err(SchemaError::FieldNotFound { .. })));
    }

    #[test]
    fn test_duplicate_type_rejected() {
        let yaml = r#"
types:
  - name: A
  - name: A
"#;
        let result = TypeSchema::from_yaml(yaml);
        assert!(matches!(result, Err(SchemaError::DuplicateType(name)) if name == "A"));

        let mut schema = TypeSchema::new(vec![TypeDef::composite("B", vec![])]).unwrap();
        assert!(schema.add_type(TypeDef::interface("B")).is_err());
        assert!(schema.add_type(TypeDef::interface("C")).is_ok());
        assert!(schema.get_type("C").is_some());
    }

    #[test]
    fn test_duplicate_field_rejected() {
        let yaml = r#"
types:
  - name: Person
    fields:
      - name: name
        type: string
      - name: name
        type: int
"#;
        let result = TypeSchema::from_yaml(yaml);
        assert!(matches!(
            result,
            Err(SchemaError::DuplicateField { type_name, field })
                if type_name == "Person" && field == "name"
        ));

        let mut schema = TypeSchema::new(vec![]).unwrap();
        let twice = TypeDef::composite(
            "Point",
            vec![
                FieldDef::new("x", TypeRef::Int32),
                FieldDef::new("x", TypeRef::Int32),
            ],
        );
        assert!(schema.add_type(twice).is_err());
        assert!(schema.get_type("Point").is_none());
    }

    #[test]
    fn test_unknown_references() {
        let schema = TypeSchema::new(vec![TypeDef::composite(
            "Order",
            vec![
                FieldDef::new("lines", TypeRef::list(TypeRef::named("OrderLine"))),
                FieldDef::new("customer", TypeRef::named("Order")),
            ],
        )])
        .unwrap();

        assert_eq!(
            schema.unknown_references(),
            vec![("Order.lines".to_string(), "OrderLine".to_string())]
        );
    }

    #[test]
    fn test_randomizer_configs() {
        let yaml = r#"
- type: int_range
  min: 18
  max: 80
- type: one_of
  values: ["active", "inactive"]
- type: static
  value: { "version": 1 }
- type: string_length
  min: 3
  max: 8
- type: "null"
"#;
        let configs: Vec<RandomizerConfig> = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(configs.len(), 5);
        assert!(matches!(
            configs[0],
            RandomizerConfig::IntRange { min: 18, max: 80 }
        ));
        assert!(matches!(
            configs[3],
            RandomizerConfig::StringLength { min: 3, max: 8 }
        ));
        assert!(matches!(configs[4], RandomizerConfig::Null));
    }

    #[test]
    fn test_type_def_builders() {
        let def = TypeDef::composite(
            "Account",
            vec![
                FieldDef::new("balance", TypeRef::decimal(12, 2)),
                FieldDef::new("secret", TypeRef::String).excluded(),
                FieldDef::new("note", TypeRef::optional(TypeRef::String)).with_optional_percent(0),
            ],
        )
        .non_constructible();

        assert!(!def.constructible);
        assert!(!def.get_field("secret").unwrap().is_populated());
        assert_eq!(def.get_field("note").unwrap().optional_percent, Some(0));

        let yaml = serde_yaml::to_string(&def).unwrap();
        let parsed: TypeDef = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(def, parsed);
    }
}
