//! Built-in randomizers for every scalar type.

use crate::identifier::{UlidRandomizer, UuidRandomizer};
use crate::numeric::{BoolRandomizer, DecimalRandomizer, FloatRandomizer, IntegerRandomizer};
use crate::temporal::{DateRandomizer, DateTimeRandomizer, DurationRandomizer, TimeRandomizer};
use crate::text::{BytesRandomizer, CharRandomizer, Charset, StringRandomizer};
use crate::SharedRandomizer;
use chrono::{NaiveDate, NaiveTime};
use populate_core::TypeRef;
use std::sync::Arc;

/// Settings that shape the built-in scalar randomizers.
#[derive(Debug, Clone, PartialEq)]
pub struct RandomizerSettings {
    /// Characters used for chars and strings
    pub charset: Charset,

    /// Inclusive string (and byte string) length range
    pub string_length: (usize, usize),

    /// Inclusive range for dates and timestamps
    pub date_range: (NaiveDate, NaiveDate),

    /// Inclusive range for times of day
    pub time_range: (NaiveTime, NaiveTime),
}

impl Default for RandomizerSettings {
    fn default() -> Self {
        Self {
            charset: Charset::Alphanumeric,
            string_length: (1, 32),
            date_range: (
                NaiveDate::from_ymd_opt(2000, 1, 1).unwrap_or_default(),
                NaiveDate::from_ymd_opt(2030, 12, 31).unwrap_or_default(),
            ),
            time_range: (
                NaiveTime::MIN,
                NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN),
            ),
        }
    }
}

/// Default randomizer for a scalar type.
///
/// Returns `None` for containers, optionals and named types, which the
/// population engine handles structurally.
pub fn default_randomizer(
    type_ref: &TypeRef,
    settings: &RandomizerSettings,
) -> Option<SharedRandomizer> {
    let (min_len, max_len) = settings.string_length;
    let (start_date, end_date) = settings.date_range;

    let randomizer: SharedRandomizer = match type_ref {
        TypeRef::Bool => Arc::new(BoolRandomizer::default()),
        TypeRef::Int8
        | TypeRef::Int16
        | TypeRef::Int32
        | TypeRef::Int64
        | TypeRef::UInt8
        | TypeRef::UInt16
        | TypeRef::UInt32
        | TypeRef::UInt64 => Arc::new(IntegerRandomizer::new(type_ref)?),
        TypeRef::Float32 | TypeRef::Float64 => Arc::new(FloatRandomizer::unit(type_ref.clone())),
        TypeRef::Decimal { precision, scale } => {
            Arc::new(DecimalRandomizer::new(*precision, *scale))
        }
        TypeRef::Char => Arc::new(CharRandomizer::new(&settings.charset)),
        TypeRef::String => Arc::new(StringRandomizer::new(&settings.charset, min_len, max_len)),
        TypeRef::Bytes => Arc::new(BytesRandomizer::new(min_len, max_len)),
        TypeRef::Uuid => Arc::new(UuidRandomizer::new(type_ref)),
        TypeRef::Ulid => Arc::new(UlidRandomizer),
        TypeRef::Date => Arc::new(DateRandomizer::new(start_date, end_date)),
        TypeRef::Time => Arc::new(TimeRandomizer::new(
            settings.time_range.0,
            settings.time_range.1,
        )),
        TypeRef::DateTime => Arc::new(DateTimeRandomizer::new(
            start_date.and_time(NaiveTime::MIN).and_utc(),
            end_date.and_time(settings.time_range.1).and_utc(),
            TypeRef::DateTime,
        )),
        TypeRef::Duration => Arc::new(DurationRandomizer::default()),
        TypeRef::Array { .. }
        | TypeRef::List { .. }
        | TypeRef::Set { .. }
        | TypeRef::Map { .. }
        | TypeRef::Optional { .. }
        | TypeRef::Named(_) => return None,
    };

    Some(randomizer)
}
