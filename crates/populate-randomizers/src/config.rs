//! Construction of randomizers from declarative configuration.

use crate::defaults::RandomizerSettings;
use crate::identifier::UuidRandomizer;
use crate::numeric::{BoolRandomizer, DecimalRandomizer, FloatRandomizer, IntRangeRandomizer};
use crate::pattern::PatternRandomizer;
use crate::static_value::{
    yaml_to_typed_value, NullRandomizer, OneOfRandomizer, SampleArrayRandomizer, StaticRandomizer,
};
use crate::temporal::{parse_timestamp, DateTimeRandomizer, DurationRandomizer};
use crate::text::StringRandomizer;
use crate::SharedRandomizer;
use chrono::NaiveTime;
use populate_core::{RandomizerConfig, TypeRef};
use std::sync::Arc;

/// Build the randomizer described by `config`, producing values shaped for
/// `target`.
///
/// Unparseable timestamp bounds fall back to the configured date range; use
/// [`config_problem`] to reject such configurations up front.
pub fn from_config(
    config: &RandomizerConfig,
    target: &TypeRef,
    settings: &RandomizerSettings,
) -> SharedRandomizer {
    match config {
        RandomizerConfig::UuidV4 => Arc::new(UuidRandomizer::new(target)),
        RandomizerConfig::Pattern { pattern } => Arc::new(PatternRandomizer::new(pattern.clone())),
        RandomizerConfig::IntRange { min, max } => {
            Arc::new(IntRangeRandomizer::new(*min, *max, target.clone()))
        }
        RandomizerConfig::FloatRange { min, max } => {
            Arc::new(FloatRandomizer::range(*min, *max, target.clone()))
        }
        RandomizerConfig::DecimalRange { min, max } => {
            let (precision, scale) = match target {
                TypeRef::Decimal { precision, scale } => (*precision, *scale),
                TypeRef::Optional { inner } => match inner.as_ref() {
                    TypeRef::Decimal { precision, scale } => (*precision, *scale),
                    _ => (10, 2),
                },
                _ => (10, 2),
            };
            Arc::new(DecimalRandomizer::range(*min, *max, precision, scale))
        }
        RandomizerConfig::StringLength { min, max } => {
            Arc::new(StringRandomizer::new(&settings.charset, *min, *max))
        }
        RandomizerConfig::TimestampRange { start, end } => {
            let (start_date, end_date) = settings.date_range;
            let start = parse_timestamp(start)
                .unwrap_or_else(|| start_date.and_time(NaiveTime::MIN).and_utc());
            let end = parse_timestamp(end)
                .unwrap_or_else(|| end_date.and_time(settings.time_range.1).and_utc());
            Arc::new(DateTimeRandomizer::new(start, end, target.clone()))
        }
        RandomizerConfig::WeightedBool { true_weight } => {
            Arc::new(BoolRandomizer::new(*true_weight))
        }
        RandomizerConfig::OneOf { values } => Arc::new(OneOfRandomizer::new(
            values
                .iter()
                .map(|value| yaml_to_typed_value(value, target))
                .collect(),
        )),
        RandomizerConfig::SampleArray {
            pool,
            min_length,
            max_length,
        } => Arc::new(SampleArrayRandomizer::new(
            pool,
            *min_length,
            *max_length,
            target,
        )),
        RandomizerConfig::Static { value } => {
            Arc::new(StaticRandomizer::new(yaml_to_typed_value(value, target)))
        }
        RandomizerConfig::Null => Arc::new(NullRandomizer),
        RandomizerConfig::DurationRange { min_secs, max_secs } => {
            Arc::new(DurationRandomizer::new(*min_secs, *max_secs))
        }
    }
}

/// Describe what is wrong with a randomizer configuration, if anything.
pub fn config_problem(config: &RandomizerConfig) -> Option<String> {
    match config {
        RandomizerConfig::IntRange { min, max } if min > max => {
            Some(format!("int_range min {min} is greater than max {max}"))
        }
        RandomizerConfig::FloatRange { min, max } | RandomizerConfig::DecimalRange { min, max }
            if !(min.is_finite() && max.is_finite()) || min > max =>
        {
            Some(format!("invalid range [{min}, {max}]"))
        }
        RandomizerConfig::FloatRange { min, max } | RandomizerConfig::DecimalRange { min, max }
            if !(max - min).is_finite() =>
        {
            Some(format!("range [{min}, {max}] is wider than f64 can represent"))
        }
        RandomizerConfig::StringLength { min, max } if min > max => {
            Some(format!("string_length min {min} is greater than max {max}"))
        }
        RandomizerConfig::TimestampRange { start, end } => {
            match (parse_timestamp(start), parse_timestamp(end)) {
                (None, _) => Some(format!("invalid timestamp '{start}'")),
                (_, None) => Some(format!("invalid timestamp '{end}'")),
                (Some(s), Some(e)) if s > e => {
                    Some(format!("timestamp range start '{start}' is after end '{end}'"))
                }
                _ => None,
            }
        }
        RandomizerConfig::WeightedBool { true_weight }
            if !(0.0..=1.0).contains(true_weight) =>
        {
            Some(format!("true_weight {true_weight} is outside [0, 1]"))
        }
        RandomizerConfig::SampleArray {
            min_length,
            max_length,
            ..
        } if min_length > max_length => Some(format!(
            "sample_array min_length {min_length} is greater than max_length {max_length}"
        )),
        RandomizerConfig::DurationRange { min_secs, max_secs } if min_secs > max_secs => Some(
            format!("duration_range min_secs {min_secs} is greater than max_secs {max_secs}"),
        ),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use populate_core::Value;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn parse(yaml: &str) -> RandomizerConfig {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_int_range_from_yaml() {
        let config = parse("type: int_range\nmin: 18\nmax: 80");
        let randomizer = from_config(&config, &TypeRef::Int32, &RandomizerSettings::default());
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..20 {
            match randomizer.generate(&mut rng) {
                Value::Int32(v) => assert!((18..=80).contains(&v)),
                other => panic!("Expected Int32, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_static_is_typed() {
        let config = parse("type: static\nvalue: 7");
        let randomizer = from_config(&config, &TypeRef::UInt8, &RandomizerSettings::default());
        let mut rng = StdRng::seed_from_u64(42);

        assert_eq!(randomizer.generate(&mut rng), Value::UInt8(7));
    }

    #[test]
    fn test_one_of_strings() {
        let config = parse("type: one_of\nvalues: [red, green]");
        let randomizer = from_config(&config, &TypeRef::String, &RandomizerSettings::default());
        let mut rng = StdRng::seed_from_u64(42);

        let value = randomizer.generate(&mut rng);
        assert!(value.as_str() == Some("red") || value.as_str() == Some("green"));
    }

    #[test]
    fn test_timestamp_range_for_date_target() {
        let config = parse("type: timestamp_range\nstart: \"2020-01-01\"\nend: \"2020-12-31\"");
        let randomizer = from_config(&config, &TypeRef::Date, &RandomizerSettings::default());
        let mut rng = StdRng::seed_from_u64(42);

        assert!(matches!(randomizer.generate(&mut rng), Value::Date(_)));
    }

    #[test]
    fn test_null_config() {
        let config = parse("type: \"null\"");
        let randomizer = from_config(&config, &TypeRef::String, &RandomizerSettings::default());
        let mut rng = StdRng::seed_from_u64(42);

        assert_eq!(randomizer.generate(&mut rng), Value::Null);
    }

    #[test]
    fn test_config_problems() {
        assert!(config_problem(&RandomizerConfig::IntRange { min: 5, max: 1 }).is_some());
        assert!(config_problem(&RandomizerConfig::IntRange { min: 1, max: 5 }).is_none());
        assert!(config_problem(&RandomizerConfig::TimestampRange {
            start: "not a date".to_string(),
            end: "2020-01-01".to_string(),
        })
        .is_some());
        assert!(config_problem(&RandomizerConfig::WeightedBool { true_weight: 1.5 }).is_some());
        assert!(config_problem(&RandomizerConfig::UuidV4).is_none());
    }

    #[test]
    fn test_float_range_span_overflow_is_a_problem() {
        let config = parse("type: float_range\nmin: -1.0e308\nmax: 1.0e308");
        assert!(config_problem(&config)
            .unwrap()
            .contains("wider than f64"));

        let config = parse("type: decimal_range\nmin: -1.0e308\nmax: 1.0e308");
        assert!(config_problem(&config).is_some());

        let config = parse("type: float_range\nmin: -1.0e300\nmax: 1.0e300");
        assert!(config_problem(&config).is_none());
    }
}
