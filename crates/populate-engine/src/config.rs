//! Population configuration.
//!
//! A [`PopulationConfig`] is loaded from YAML or assembled through
//! [`crate::PopulatorBuilder`], validated once, and then shared read-only by
//! every population call.
//!
//! ```yaml
//! seed: 42
//! max_depth: 5
//! collection_size_range: { min: 2, max: 4 }
//! optional_percent: 80
//! charset: alphanumeric
//! string_length_range: { min: 3, max: 12 }
//! date_range: { start: 2020-01-01, end: 2024-12-31 }
//! bindings:
//!   Shape: Circle
//! exclusions:
//!   - type: Secret
//!   - declaring_type: Person
//!     field: password
//! type_overrides:
//!   - type: uuid
//!     randomizer:
//!       type: uuid_v4
//! field_overrides:
//!   - declaring_type: Person
//!     field: age
//!     randomizer:
//!       type: int_range
//!       min: 18
//!       max: 80
//! ```

use crate::error::PopulateError;
use chrono::{NaiveDate, NaiveTime};
use populate_core::{RandomizerConfig, TypeDescriptor, TypeRef};
use populate_randomizers::{config_problem, Charset, RandomizerSettings};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Default maximum recursion depth.
pub const DEFAULT_MAX_DEPTH: usize = 10;

/// Default presence probability for optional values.
pub const DEFAULT_OPTIONAL_PERCENT: i32 = 100;

/// Inclusive size range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeRange {
    /// Minimum size (inclusive)
    pub min: usize,
    /// Maximum size (inclusive)
    pub max: usize,
}

impl SizeRange {
    /// Create a new size range.
    pub fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    /// Whether `size` lies within the range.
    pub fn contains(&self, size: usize) -> bool {
        (self.min..=self.max).contains(&size)
    }

    fn collection_default() -> Self {
        Self::new(1, 5)
    }

    fn string_default() -> Self {
        Self::new(1, 32)
    }
}

/// Inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First date (inclusive)
    pub start: NaiveDate,
    /// Last date (inclusive)
    pub end: NaiveDate,
}

/// Inclusive time-of-day range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    /// Earliest time (inclusive)
    pub start: NaiveTime,
    /// Latest time (inclusive)
    pub end: NaiveTime,
}

/// Declarative exclusion rule.
///
/// Every criterion that is set must match; a rule with only `field` matches
/// that field name on any type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExclusionRule {
    /// Exclude every field of this type (also matches `optional<type>`)
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_ref: Option<TypeRef>,

    /// Only fields declared on this type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub declaring_type: Option<String>,

    /// Only fields with this name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ExclusionRule {
    /// Exclude every field of the given type.
    pub fn of_type(type_ref: TypeRef) -> Self {
        Self {
            type_ref: Some(type_ref),
            ..Self::default()
        }
    }

    /// Exclude one field of one type.
    pub fn of_field(declaring_type: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            declaring_type: Some(declaring_type.into()),
            field: Some(field.into()),
            ..Self::default()
        }
    }

    /// Whether the rule sets no criterion at all.
    pub fn is_empty(&self) -> bool {
        self.type_ref.is_none() && self.declaring_type.is_none() && self.field.is_none()
    }

    /// Whether the rule matches the given field descriptor.
    pub fn matches(&self, descriptor: &TypeDescriptor) -> bool {
        if self.is_empty() {
            return false;
        }

        let type_matches = self.type_ref.as_ref().map_or(true, |ty| {
            descriptor.type_ref == *ty
                || matches!(&descriptor.type_ref, TypeRef::Optional { inner } if **inner == *ty)
        });
        let owner_matches = self
            .declaring_type
            .as_deref()
            .map_or(true, |owner| descriptor.declaring_type.as_deref() == Some(owner));
        let field_matches = self
            .field
            .as_deref()
            .map_or(true, |field| descriptor.field_name.as_deref() == Some(field));

        type_matches && owner_matches && field_matches
    }
}

/// Declarative randomizer override for every occurrence of a type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeOverride {
    /// Type whose values the randomizer produces
    #[serde(rename = "type")]
    pub type_ref: TypeRef,

    /// Randomizer configuration
    pub randomizer: RandomizerConfig,
}

/// Declarative randomizer override for one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldOverride {
    /// Type declaring the field
    pub declaring_type: String,

    /// Field name
    pub field: String,

    /// Randomizer configuration
    pub randomizer: RandomizerConfig,
}

/// Configuration of a population run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopulationConfig {
    /// Seed for the run's random source; `None` draws a fresh seed per call
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    /// Inclusive size range for arrays, lists, sets and maps
    pub collection_size_range: SizeRange,

    /// Maximum nesting depth of named types
    pub max_depth: usize,

    /// Global presence probability (0-100) for optional values
    pub optional_percent: i32,

    /// Characters used for generated chars and strings
    pub charset: Charset,

    /// Inclusive length range for generated strings and byte strings
    pub string_length_range: SizeRange,

    /// Bounds for generated dates and timestamps
    pub date_range: DateRange,

    /// Bounds for generated times of day
    pub time_range: TimeRange,

    /// Interface name to concrete type name
    pub bindings: BTreeMap<String, String>,

    /// Fields that are left at their default value
    pub exclusions: Vec<ExclusionRule>,

    /// Randomizers replacing the default for a type
    pub type_overrides: Vec<TypeOverride>,

    /// Randomizers replacing the default for one field
    pub field_overrides: Vec<FieldOverride>,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        let settings = RandomizerSettings::default();
        Self {
            seed: None,
            collection_size_range: SizeRange::collection_default(),
            max_depth: DEFAULT_MAX_DEPTH,
            optional_percent: DEFAULT_OPTIONAL_PERCENT,
            charset: settings.charset,
            string_length_range: SizeRange::string_default(),
            date_range: DateRange {
                start: settings.date_range.0,
                end: settings.date_range.1,
            },
            time_range: TimeRange {
                start: settings.time_range.0,
                end: settings.time_range.1,
            },
            bindings: BTreeMap::new(),
            exclusions: Vec::new(),
            type_overrides: Vec::new(),
            field_overrides: Vec::new(),
        }
    }
}

impl PopulationConfig {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, PopulateError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            PopulateError::Config(format!("Failed to read {}: {e}", path.display()))
        })?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, PopulateError> {
        let config: PopulationConfig = serde_yaml::from_str(yaml)
            .map_err(|e| PopulateError::Config(format!("Failed to parse YAML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration for internal consistency.
    ///
    /// References to schema types are checked when the populator is built.
    pub fn validate(&self) -> Result<(), PopulateError> {
        let invalid = |msg: String| -> Result<(), PopulateError> { Err(PopulateError::Config(msg)) };

        if self.collection_size_range.min > self.collection_size_range.max {
            return invalid(format!(
                "collection_size_range min {} is greater than max {}",
                self.collection_size_range.min, self.collection_size_range.max
            ));
        }
        if self.string_length_range.min > self.string_length_range.max {
            return invalid(format!(
                "string_length_range min {} is greater than max {}",
                self.string_length_range.min, self.string_length_range.max
            ));
        }
        if self.max_depth == 0 {
            return invalid("max_depth must be at least 1".to_string());
        }
        if self.date_range.start > self.date_range.end {
            return invalid(format!(
                "date_range start {} is after end {}",
                self.date_range.start, self.date_range.end
            ));
        }
        if self.time_range.start > self.time_range.end {
            return invalid(format!(
                "time_range start {} is after end {}",
                self.time_range.start, self.time_range.end
            ));
        }
        if self.exclusions.iter().any(ExclusionRule::is_empty) {
            return invalid("exclusion rule must set type, declaring_type or field".to_string());
        }
        for o in &self.type_overrides {
            if let Some(problem) = config_problem(&o.randomizer) {
                return invalid(format!("type override for {}: {problem}", o.type_ref));
            }
        }
        for o in &self.field_overrides {
            if let Some(problem) = config_problem(&o.randomizer) {
                return invalid(format!(
                    "field override for {}.{}: {problem}",
                    o.declaring_type, o.field
                ));
            }
        }

        Ok(())
    }

    /// Settings for the built-in scalar randomizers.
    pub fn randomizer_settings(&self) -> RandomizerSettings {
        RandomizerSettings {
            charset: self.charset.clone(),
            string_length: (self.string_length_range.min, self.string_length_range.max),
            date_range: (self.date_range.start, self.date_range.end),
            time_range: (self.time_range.start, self.time_range.end),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_CONFIG: &str = r#"
seed: 42
max_depth: 5
collection_size_range:
  min: 2
  max: 4
optional_percent: 30
charset:
  custom: abc
date_range:
  start: 2020-01-01
  end: 2020-12-31
bindings:
  Shape: Circle
exclusions:
  - type: Secret
  - declaring_type: Person
    field: password
  - field: id
type_overrides:
  - type: uuid
    randomizer:
      type: uuid_v4
field_overrides:
  - declaring_type: Person
    field: age
    randomizer:
      type: int_range
      min: 18
      max: 80
"#;

    #[test]
    fn test_parse_config() {
        let config = PopulationConfig::from_yaml(SAMPLE_CONFIG).unwrap();

        assert_eq!(config.seed, Some(42));
        assert_eq!(config.max_depth, 5);
        assert_eq!(config.collection_size_range, SizeRange::new(2, 4));
        assert_eq!(config.optional_percent, 30);
        assert_eq!(config.charset, Charset::Custom("abc".to_string()));
        assert_eq!(config.bindings.get("Shape").map(String::as_str), Some("Circle"));
        assert_eq!(config.exclusions.len(), 3);
        assert_eq!(config.type_overrides[0].type_ref, TypeRef::Uuid);
        assert_eq!(
            config.field_overrides[0].randomizer,
            RandomizerConfig::IntRange { min: 18, max: 80 }
        );
        // Unset options keep their defaults
        assert_eq!(config.string_length_range, SizeRange::new(1, 32));
    }

    #[test]
    fn test_defaults() {
        let config = PopulationConfig::from_yaml("{}").unwrap();

        assert_eq!(config.seed, None);
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
        assert_eq!(config.optional_percent, DEFAULT_OPTIONAL_PERCENT);
        assert_eq!(config.collection_size_range, SizeRange::new(1, 5));
        assert_eq!(config.charset, Charset::Alphanumeric);
    }

    #[test]
    fn test_invalid_ranges_are_rejected() {
        let err = PopulationConfig::from_yaml("collection_size_range: { min: 5, max: 1 }")
            .unwrap_err();
        assert!(matches!(err, PopulateError::Config(_)));

        assert!(PopulationConfig::from_yaml("max_depth: 0").is_err());
        assert!(PopulationConfig::from_yaml(
            "date_range: { start: 2020-01-01, end: 2019-01-01 }"
        )
        .is_err());
    }

    #[test]
    fn test_invalid_override_is_rejected() {
        let yaml = r#"
field_overrides:
  - declaring_type: Person
    field: age
    randomizer:
      type: int_range
      min: 80
      max: 18
"#;
        let err = PopulationConfig::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("Person.age"));
    }

    #[test]
    fn test_overflowing_float_range_is_rejected() {
        let yaml = r#"
type_overrides:
  - type: double
    randomizer:
      type: float_range
      min: -1.0e308
      max: 1.0e308
"#;
        let err = PopulationConfig::from_yaml(yaml).unwrap_err();
        assert!(matches!(err, PopulateError::Config(_)));
        assert!(err.to_string().contains("wider than f64"));
    }

    #[test]
    fn test_empty_exclusion_is_rejected() {
        assert!(PopulationConfig::from_yaml("exclusions: [{}]").is_err());
    }

    #[test]
    fn test_exclusion_rule_matching() {
        let name = TypeDescriptor::field("Person", "name", TypeRef::String);
        let nickname = TypeDescriptor::field("Person", "nickname", TypeRef::optional(TypeRef::String));
        let city = TypeDescriptor::field("Address", "name", TypeRef::String);

        let by_type = ExclusionRule::of_type(TypeRef::String);
        assert!(by_type.matches(&name));
        assert!(by_type.matches(&nickname));

        let by_field = ExclusionRule::of_field("Person", "name");
        assert!(by_field.matches(&name));
        assert!(!by_field.matches(&nickname));
        assert!(!by_field.matches(&city));

        let by_name = ExclusionRule {
            field: Some("name".to_string()),
            ..ExclusionRule::default()
        };
        assert!(by_name.matches(&name));
        assert!(by_name.matches(&city));

        assert!(!ExclusionRule::default().matches(&name));
    }
}
