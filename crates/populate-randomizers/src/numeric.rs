//! Numeric value randomizers.

use crate::Randomizer;
use populate_core::{TypeRef, Value};
use rand::{Rng, RngCore};

/// Generate a random integer in the given range (inclusive).
pub fn generate_int_range<R: Rng + ?Sized>(rng: &mut R, min: i64, max: i64) -> i64 {
    let (min, max) = ordered(min, max);
    rng.gen_range(min..=max)
}

/// Generate a random float in the given range (inclusive).
///
/// Ranges wider than `f64::MAX` are sampled in two half-steps from `min`.
pub fn generate_float_range<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64) -> f64 {
    let (min, max) = if min <= max { (min, max) } else { (max, min) };
    if min == max {
        return min;
    }
    if (max - min).is_finite() {
        return rng.gen_range(min..=max);
    }
    let half = rng.gen::<f64>() * (max / 2.0 - min / 2.0);
    (min + half + half).min(max)
}

/// Generate a random decimal in the given range, formatted with `scale`
/// fractional digits.
pub fn generate_decimal_range<R: Rng + ?Sized>(
    rng: &mut R,
    min: f64,
    max: f64,
    precision: u8,
    scale: u8,
) -> Value {
    let value = generate_float_range(rng, min, max);
    Value::Decimal {
        value: format!("{value:.*}", scale as usize),
        precision,
        scale,
    }
}

fn ordered(a: i64, b: i64) -> (i64, i64) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Convert an integer to the value variant of the target type.
///
/// Out-of-range integers are clamped to the target width.
pub fn int_to_typed_value(v: i64, target: &TypeRef) -> Value {
    match target {
        TypeRef::Int8 => Value::Int8(v.clamp(i8::MIN as i64, i8::MAX as i64) as i8),
        TypeRef::Int16 => Value::Int16(v.clamp(i16::MIN as i64, i16::MAX as i64) as i16),
        TypeRef::Int32 => Value::Int32(v.clamp(i32::MIN as i64, i32::MAX as i64) as i32),
        TypeRef::UInt8 => Value::UInt8(v.clamp(0, u8::MAX as i64) as u8),
        TypeRef::UInt16 => Value::UInt16(v.clamp(0, u16::MAX as i64) as u16),
        TypeRef::UInt32 => Value::UInt32(v.clamp(0, u32::MAX as i64) as u32),
        TypeRef::UInt64 => Value::UInt64(v.max(0) as u64),
        TypeRef::Float32 => Value::Float32(v as f32),
        TypeRef::Float64 => Value::Float64(v as f64),
        TypeRef::Decimal { precision, scale } => Value::Decimal {
            value: format!("{:.*}", *scale as usize, v as f64),
            precision: *precision,
            scale: *scale,
        },
        TypeRef::String => Value::String(v.to_string()),
        TypeRef::Optional { inner } => int_to_typed_value(v, inner),
        _ => Value::Int64(v),
    }
}

/// Convert a float to the value variant of the target type.
pub fn float_to_typed_value(v: f64, target: &TypeRef) -> Value {
    match target {
        TypeRef::Float32 => Value::Float32(v as f32),
        TypeRef::Decimal { precision, scale } => Value::Decimal {
            value: format!("{v:.*}", *scale as usize),
            precision: *precision,
            scale: *scale,
        },
        TypeRef::Optional { inner } => float_to_typed_value(v, inner),
        _ => Value::Float64(v),
    }
}

/// Integers over the natural range of their type.
#[derive(Debug, Clone)]
pub struct IntegerRandomizer {
    type_ref: TypeRef,
}

impl IntegerRandomizer {
    /// Create a randomizer for an integer type; `None` for non-integer types.
    pub fn new(type_ref: &TypeRef) -> Option<Self> {
        match type_ref {
            TypeRef::Int8
            | TypeRef::Int16
            | TypeRef::Int32
            | TypeRef::Int64
            | TypeRef::UInt8
            | TypeRef::UInt16
            | TypeRef::UInt32
            | TypeRef::UInt64 => Some(Self {
                type_ref: type_ref.clone(),
            }),
            _ => None,
        }
    }
}

impl Randomizer for IntegerRandomizer {
    fn generate(&self, rng: &mut dyn RngCore) -> Value {
        match self.type_ref {
            TypeRef::Int8 => Value::Int8(rng.gen()),
            TypeRef::Int16 => Value::Int16(rng.gen()),
            TypeRef::Int32 => Value::Int32(rng.gen()),
            TypeRef::UInt8 => Value::UInt8(rng.gen()),
            TypeRef::UInt16 => Value::UInt16(rng.gen()),
            TypeRef::UInt32 => Value::UInt32(rng.gen()),
            TypeRef::UInt64 => Value::UInt64(rng.gen()),
            _ => Value::Int64(rng.gen()),
        }
    }
}

/// Integers in an inclusive range, converted to the target type.
#[derive(Debug, Clone)]
pub struct IntRangeRandomizer {
    min: i64,
    max: i64,
    target: TypeRef,
}

impl IntRangeRandomizer {
    /// Create a new range randomizer producing values of `target`.
    pub fn new(min: i64, max: i64, target: TypeRef) -> Self {
        let (min, max) = ordered(min, max);
        Self { min, max, target }
    }
}

impl Randomizer for IntRangeRandomizer {
    fn generate(&self, rng: &mut dyn RngCore) -> Value {
        int_to_typed_value(generate_int_range(rng, self.min, self.max), &self.target)
    }
}

/// Floats in an inclusive range, converted to the target type.
///
/// The default float randomizer draws from `[0, 1)`.
#[derive(Debug, Clone)]
pub struct FloatRandomizer {
    min: f64,
    max: f64,
    target: TypeRef,
}

impl FloatRandomizer {
    /// Floats in `[0, 1)`.
    pub fn unit(target: TypeRef) -> Self {
        Self {
            min: 0.0,
            max: 1.0,
            target,
        }
    }

    /// Floats in `[min, max]`.
    pub fn range(min: f64, max: f64, target: TypeRef) -> Self {
        Self { min, max, target }
    }
}

impl Randomizer for FloatRandomizer {
    fn generate(&self, rng: &mut dyn RngCore) -> Value {
        let v = if self.min == 0.0 && self.max == 1.0 {
            rng.gen::<f64>()
        } else {
            generate_float_range(rng, self.min, self.max)
        };
        float_to_typed_value(v, &self.target)
    }
}

/// Decimals with the given precision and scale.
///
/// Without an explicit range, the integral part spans every value that fits
/// in `precision - scale` digits (capped at 15 digits).
#[derive(Debug, Clone)]
pub struct DecimalRandomizer {
    precision: u8,
    scale: u8,
    range: Option<(f64, f64)>,
}

impl DecimalRandomizer {
    /// Decimals spanning the full precision.
    pub fn new(precision: u8, scale: u8) -> Self {
        Self {
            precision,
            scale,
            range: None,
        }
    }

    /// Decimals in `[min, max]`.
    pub fn range(min: f64, max: f64, precision: u8, scale: u8) -> Self {
        Self {
            precision,
            scale,
            range: Some((min, max)),
        }
    }
}

impl Randomizer for DecimalRandomizer {
    fn generate(&self, rng: &mut dyn RngCore) -> Value {
        if let Some((min, max)) = self.range {
            return generate_decimal_range(rng, min, max, self.precision, self.scale);
        }

        let int_digits = self.precision.saturating_sub(self.scale).clamp(1, 15) as u32;
        let scale = self.scale.min(9) as u32;
        let integral = rng.gen_range(0..10u64.pow(int_digits));
        let value = if scale == 0 {
            integral.to_string()
        } else {
            let fraction = rng.gen_range(0..10u64.pow(scale));
            format!("{integral}.{fraction:0width$}", width = scale as usize)
        };

        Value::Decimal {
            value,
            precision: self.precision,
            scale: self.scale,
        }
    }
}

/// Booleans that are `true` with the given probability.
#[derive(Debug, Clone)]
pub struct BoolRandomizer {
    true_weight: f64,
}

impl BoolRandomizer {
    /// Create a new weighted boolean randomizer; the weight is clamped to
    /// `[0, 1]`.
    pub fn new(true_weight: f64) -> Self {
        let true_weight = if true_weight.is_nan() {
            0.5
        } else {
            true_weight.clamp(0.0, 1.0)
        };
        Self { true_weight }
    }
}

impl Default for BoolRandomizer {
    fn default() -> Self {
        Self::new(0.5)
    }
}

impl Randomizer for BoolRandomizer {
    fn generate(&self, rng: &mut dyn RngCore) -> Value {
        Value::Bool(rng.gen_bool(self.true_weight))
    }
}
