//! Date, time, timestamp and duration randomizers.

use crate::Randomizer;
use chrono::{DateTime, Duration as ChronoDuration, NaiveDate, NaiveTime, Utc};
use populate_core::{TypeRef, Value};
use rand::{Rng, RngCore};
use std::time::Duration;

/// Parse a timestamp string in various formats.
///
/// Accepts RFC 3339 timestamps and plain `YYYY-MM-DD` dates (midnight UTC).
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    // Try RFC 3339 / ISO 8601
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    // Try common date-only format
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }

    None
}

/// Parse a date string in `YYYY-MM-DD` form.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Parse a time string in `HH:MM:SS` or `HH:MM` form.
pub fn parse_time(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .ok()
}

/// Generate a random timestamp (whole seconds) between `start` and `end`.
pub fn generate_timestamp_range<R: Rng + ?Sized>(
    rng: &mut R,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> DateTime<Utc> {
    let start_ts = start.timestamp();
    let end_ts = end.timestamp();

    if start_ts >= end_ts {
        start
    } else {
        let random_ts = rng.gen_range(start_ts..=end_ts);
        DateTime::from_timestamp(random_ts, 0).unwrap_or(start)
    }
}

/// Convert a timestamp to the value variant of the target type.
pub fn datetime_to_typed_value(dt: DateTime<Utc>, target: &TypeRef) -> Value {
    match target {
        TypeRef::Date => Value::Date(dt.date_naive()),
        TypeRef::Time => Value::Time(dt.time()),
        TypeRef::String => Value::String(dt.to_rfc3339()),
        TypeRef::Int64 => Value::Int64(dt.timestamp()),
        TypeRef::Optional { inner } => datetime_to_typed_value(dt, inner),
        _ => Value::DateTime(dt),
    }
}

/// Timestamps in an inclusive range.
#[derive(Debug, Clone)]
pub struct DateTimeRandomizer {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    target: TypeRef,
}

impl DateTimeRandomizer {
    /// Create a new timestamp randomizer producing values of `target`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>, target: TypeRef) -> Self {
        Self { start, end, target }
    }
}

impl Randomizer for DateTimeRandomizer {
    fn generate(&self, rng: &mut dyn RngCore) -> Value {
        let dt = generate_timestamp_range(rng, self.start, self.end);
        datetime_to_typed_value(dt, &self.target)
    }
}

/// Calendar dates in an inclusive range.
#[derive(Debug, Clone)]
pub struct DateRandomizer {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRandomizer {
    /// Create a new date randomizer; bounds are swapped if reversed.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }
}

impl Randomizer for DateRandomizer {
    fn generate(&self, rng: &mut dyn RngCore) -> Value {
        let span = (self.end - self.start).num_days();
        let offset = rng.gen_range(0..=span);
        let date = self
            .start
            .checked_add_signed(ChronoDuration::days(offset))
            .unwrap_or(self.start);
        Value::Date(date)
    }
}

/// Times of day (whole seconds) in an inclusive range.
#[derive(Debug, Clone)]
pub struct TimeRandomizer {
    start: NaiveTime,
    end: NaiveTime,
}

impl TimeRandomizer {
    /// Create a new time randomizer; bounds are swapped if reversed.
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }
}

impl Randomizer for TimeRandomizer {
    fn generate(&self, rng: &mut dyn RngCore) -> Value {
        let span = (self.end - self.start).num_seconds();
        let offset = rng.gen_range(0..=span);
        let (time, _) = self
            .start
            .overflowing_add_signed(ChronoDuration::seconds(offset));
        Value::Time(time)
    }
}

/// Durations with a whole number of seconds in an inclusive range.
#[derive(Debug, Clone)]
pub struct DurationRandomizer {
    min_secs: u64,
    max_secs: u64,
}

impl DurationRandomizer {
    /// Create a new duration randomizer; bounds are swapped if reversed.
    pub fn new(min_secs: u64, max_secs: u64) -> Self {
        Self {
            min_secs: min_secs.min(max_secs),
            max_secs: min_secs.max(max_secs),
        }
    }
}

impl Default for DurationRandomizer {
    /// Durations up to one day.
    fn default() -> Self {
        Self::new(0, 86_400)
    }
}

impl Randomizer for DurationRandomizer {
    fn generate(&self, rng: &mut dyn RngCore) -> Value {
        Value::Duration(Duration::from_secs(
            rng.gen_range(self.min_secs..=self.max_secs),
        ))
    }
}
