//! Static, one-of, null and sampled-array randomizers, plus YAML to [`Value`]
//! conversion.

use crate::numeric::{float_to_typed_value, int_to_typed_value};
use crate::temporal::{datetime_to_typed_value, parse_date, parse_time, parse_timestamp};
use crate::Randomizer;
use populate_core::{TypeRef, Value};
use rand::seq::SliceRandom;
use rand::{Rng, RngCore};
use serde_yaml::Value as YamlValue;

/// Convert a YAML value to a [`Value`].
pub fn yaml_to_value(yaml: &YamlValue) -> Value {
    match yaml {
        YamlValue::Null => Value::Null,
        YamlValue::Bool(b) => Value::Bool(*b),
        YamlValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Int64(i)
            } else if let Some(u) = n.as_u64() {
                Value::UInt64(u)
            } else if let Some(f) = n.as_f64() {
                Value::Float64(f)
            } else {
                Value::String(n.to_string())
            }
        }
        YamlValue::String(s) => Value::String(s.clone()),
        YamlValue::Sequence(arr) => Value::Array(arr.iter().map(yaml_to_value).collect()),
        YamlValue::Mapping(map) => Value::Map(
            map.iter()
                .filter_map(|(k, v)| {
                    let key = k.as_str()?.to_string();
                    Some((Value::String(key), yaml_to_value(v)))
                })
                .collect(),
        ),
        YamlValue::Tagged(tagged) => yaml_to_value(&tagged.value),
    }
}

/// Convert a YAML value to a [`Value`] shaped like the target type.
///
/// Values that cannot be converted keep their untyped form.
pub fn yaml_to_typed_value(yaml: &YamlValue, target: &TypeRef) -> Value {
    if let TypeRef::Optional { inner } = target {
        return yaml_to_typed_value(yaml, inner);
    }

    match yaml {
        YamlValue::Null => Value::Null,
        YamlValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                int_to_typed_value(i, target)
            } else if let Some(f) = n.as_f64() {
                float_to_typed_value(f, target)
            } else {
                yaml_to_value(yaml)
            }
        }
        YamlValue::String(s) => string_to_typed_value(s, target),
        YamlValue::Sequence(items) => match target {
            TypeRef::Array { element } | TypeRef::List { element } => Value::Array(
                items
                    .iter()
                    .map(|item| yaml_to_typed_value(item, element))
                    .collect(),
            ),
            TypeRef::Set { element } => {
                let mut values: Vec<Value> = Vec::with_capacity(items.len());
                for item in items {
                    let value = yaml_to_typed_value(item, element);
                    if !values.contains(&value) {
                        values.push(value);
                    }
                }
                Value::Set(values)
            }
            _ => yaml_to_value(yaml),
        },
        YamlValue::Mapping(map) => match target {
            TypeRef::Map { key, value } => Value::Map(
                map.iter()
                    .map(|(k, v)| (yaml_to_typed_value(k, key), yaml_to_typed_value(v, value)))
                    .collect(),
            ),
            _ => yaml_to_value(yaml),
        },
        YamlValue::Tagged(tagged) => yaml_to_typed_value(&tagged.value, target),
        YamlValue::Bool(_) => yaml_to_value(yaml),
    }
}

/// Convert a string to the value variant of the target type.
pub fn string_to_typed_value(s: &str, target: &TypeRef) -> Value {
    let parsed = match target {
        TypeRef::Int8
        | TypeRef::Int16
        | TypeRef::Int32
        | TypeRef::Int64
        | TypeRef::UInt8
        | TypeRef::UInt16
        | TypeRef::UInt32 => s.parse::<i64>().ok().map(|i| int_to_typed_value(i, target)),
        TypeRef::UInt64 => s.parse::<u64>().ok().map(Value::UInt64),
        TypeRef::Float32 | TypeRef::Float64 => {
            s.parse::<f64>().ok().map(|f| float_to_typed_value(f, target))
        }
        TypeRef::Decimal { precision, scale } => s
            .parse::<f64>()
            .ok()
            .map(|_| Value::decimal(s, *precision, *scale)),
        TypeRef::Bool => match s.to_lowercase().as_str() {
            "true" | "1" | "yes" => Some(Value::Bool(true)),
            "false" | "0" | "no" => Some(Value::Bool(false)),
            _ => None,
        },
        TypeRef::Char => {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some(Value::Char(c)),
                _ => None,
            }
        }
        TypeRef::Uuid => uuid::Uuid::parse_str(s).ok().map(Value::Uuid),
        TypeRef::Ulid => ulid::Ulid::from_string(s).ok().map(Value::Ulid),
        TypeRef::Date => parse_date(s).map(Value::Date),
        TypeRef::Time => parse_time(s).map(Value::Time),
        TypeRef::DateTime => parse_timestamp(s).map(|dt| datetime_to_typed_value(dt, target)),
        TypeRef::Bytes => Some(Value::Bytes(s.as_bytes().to_vec())),
        _ => None,
    };

    parsed.unwrap_or_else(|| Value::String(s.to_string()))
}

/// Always returns the same value.
#[derive(Debug, Clone)]
pub struct StaticRandomizer {
    value: Value,
}

impl StaticRandomizer {
    /// Create a new static randomizer.
    pub fn new(value: Value) -> Self {
        Self { value }
    }
}

impl Randomizer for StaticRandomizer {
    fn generate(&self, _rng: &mut dyn RngCore) -> Value {
        self.value.clone()
    }
}

/// Always returns the absent value.
#[derive(Debug, Clone, Default)]
pub struct NullRandomizer;

impl Randomizer for NullRandomizer {
    fn generate(&self, _rng: &mut dyn RngCore) -> Value {
        Value::Null
    }
}

/// Picks one value of a pool uniformly at random.
///
/// An empty pool yields the absent value.
#[derive(Debug, Clone)]
pub struct OneOfRandomizer {
    values: Vec<Value>,
}

impl OneOfRandomizer {
    /// Create a new one-of randomizer.
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }
}

impl Randomizer for OneOfRandomizer {
    fn generate(&self, rng: &mut dyn RngCore) -> Value {
        self.values.choose(rng).cloned().unwrap_or(Value::Null)
    }
}

/// Builds arrays by sampling from a pool of values (with repetition).
///
/// When the target is a set, duplicates are dropped, so the result may be
/// shorter than the drawn length.
#[derive(Debug, Clone)]
pub struct SampleArrayRandomizer {
    pool: Vec<Value>,
    min_length: usize,
    max_length: usize,
    as_set: bool,
}

impl SampleArrayRandomizer {
    /// Create a sampler whose pool entries are converted to the element type
    /// of `target`.
    pub fn new(pool: &[String], min_length: usize, max_length: usize, target: &TypeRef) -> Self {
        let target = match target {
            TypeRef::Optional { inner } => inner.as_ref(),
            other => other,
        };
        let fallback = TypeRef::String;
        let (element, as_set) = match target {
            TypeRef::Array { element } | TypeRef::List { element } => (element.as_ref(), false),
            TypeRef::Set { element } => (element.as_ref(), true),
            _ => (&fallback, false),
        };

        Self {
            pool: pool
                .iter()
                .map(|item| string_to_typed_value(item, element))
                .collect(),
            min_length: min_length.min(max_length),
            max_length: min_length.max(max_length),
            as_set,
        }
    }
}

impl Randomizer for SampleArrayRandomizer {
    fn generate(&self, rng: &mut dyn RngCore) -> Value {
        if self.pool.is_empty() || self.max_length == 0 {
            return if self.as_set {
                Value::Set(Vec::new())
            } else {
                Value::Array(Vec::new())
            };
        }

        let length = rng.gen_range(self.min_length..=self.max_length);
        let mut items: Vec<Value> = Vec::with_capacity(length);
        for _ in 0..length {
            if let Some(item) = self.pool.choose(rng) {
                if !self.as_set || !items.contains(item) {
                    items.push(item.clone());
                }
            }
        }

        if self.as_set {
            Value::Set(items)
        } else {
            Value::Array(items)
        }
    }
}
