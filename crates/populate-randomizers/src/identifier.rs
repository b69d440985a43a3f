//! UUID and ULID randomizers.

use crate::Randomizer;
use populate_core::{TypeRef, Value};
use rand::{Rng, RngCore};
use ulid::Ulid;
use uuid::Uuid;

/// Generate a random UUID v4 using the provided RNG.
pub fn generate_uuid_v4<R: Rng + ?Sized>(rng: &mut R) -> Uuid {
    // Generate 16 random bytes
    let mut bytes = [0u8; 16];
    rng.fill(&mut bytes);

    // Set version (4) and variant (RFC 4122) bits
    bytes[6] = (bytes[6] & 0x0f) | 0x40; // Version 4
    bytes[8] = (bytes[8] & 0x3f) | 0x80; // Variant RFC 4122

    Uuid::from_bytes(bytes)
}

/// Generate a random ULID using the provided RNG.
///
/// The timestamp part is random too, so ULIDs from the same seed are equal.
pub fn generate_ulid<R: Rng + ?Sized>(rng: &mut R) -> Ulid {
    let timestamp_ms = rng.gen_range(0..(1u64 << 48));
    let random: u128 = rng.gen::<u128>() & ((1u128 << 80) - 1);
    Ulid::from_parts(timestamp_ms, random)
}

/// UUID v4 values, or their string form when the target is textual.
#[derive(Debug, Clone)]
pub struct UuidRandomizer {
    as_string: bool,
}

impl UuidRandomizer {
    /// Create a new UUID randomizer for the target type.
    pub fn new(target: &TypeRef) -> Self {
        Self {
            as_string: target.is_textual(),
        }
    }
}

impl Randomizer for UuidRandomizer {
    fn generate(&self, rng: &mut dyn RngCore) -> Value {
        let uuid = generate_uuid_v4(rng);
        if self.as_string {
            Value::String(uuid.to_string())
        } else {
            Value::Uuid(uuid)
        }
    }
}

/// ULID values.
#[derive(Debug, Clone, Default)]
pub struct UlidRandomizer;

impl Randomizer for UlidRandomizer {
    fn generate(&self, rng: &mut dyn RngCore) -> Value {
        Value::Ulid(generate_ulid(rng))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generate_uuid_v4() {
        let mut rng = StdRng::seed_from_u64(42);
        let value = generate_uuid_v4(&mut rng);
        assert_eq!(value.get_version_num(), 4);

        // Ensure uniqueness
        let value2 = generate_uuid_v4(&mut rng);
        assert_ne!(value, value2);
    }

    #[test]
    fn test_uuid_deterministic() {
        let mut rng1 = StdRng::seed_from_u64(42);
        let mut rng2 = StdRng::seed_from_u64(42);

        assert_eq!(generate_uuid_v4(&mut rng1), generate_uuid_v4(&mut rng2));
    }

    #[test]
    fn test_uuid_randomizer_string_target() {
        let mut rng = StdRng::seed_from_u64(42);
        let randomizer = UuidRandomizer::new(&TypeRef::String);

        let value = randomizer.generate(&mut rng);
        let s = value.as_str().unwrap();
        assert_eq!(s.len(), 36);
        assert!(Uuid::parse_str(s).is_ok());
    }

    #[test]
    fn test_ulid_deterministic() {
        let mut rng1 = StdRng::seed_from_u64(3);
        let mut rng2 = StdRng::seed_from_u64(3);

        let a = UlidRandomizer.generate(&mut rng1);
        let b = UlidRandomizer.generate(&mut rng2);
        assert_eq!(a, b);
        assert!(matches!(a, Value::Ulid(_)));
    }
}
