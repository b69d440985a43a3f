//! Pattern-based string randomizer.
//!
//! Supports placeholders:
//! - `{uuid}` - random UUID
//! - `{rand:N}` - random N-digit number

use crate::identifier::generate_uuid_v4;
use crate::Randomizer;
use populate_core::Value;
use rand::{Rng, RngCore};

/// Generate a string based on a pattern with placeholders.
pub fn generate_pattern<R: Rng + ?Sized>(pattern: &str, rng: &mut R) -> String {
    let mut result = pattern.to_string();

    // Replace {uuid}
    while result.contains("{uuid}") {
        let uuid = generate_uuid_v4(rng).to_string();
        result = result.replacen("{uuid}", &uuid, 1);
    }

    // Replace {rand:N} patterns
    let mut search_from = 0;
    while let Some(offset) = result[search_from..].find("{rand:") {
        let start = search_from + offset;
        let Some(len) = result[start..].find('}') else {
            break;
        };
        let end = start + len;
        match result[start + 6..end].parse::<usize>() {
            Ok(digits) => {
                let random_num = generate_random_digits(rng, digits);
                result = format!("{}{}{}", &result[..start], random_num, &result[end + 1..]);
                search_from = start + random_num.len();
            }
            // Invalid format, leave it in place
            Err(_) => search_from = end + 1,
        }
    }

    result
}

/// Generate a random number with exactly N digits.
fn generate_random_digits<R: Rng + ?Sized>(rng: &mut R, digits: usize) -> String {
    if digits == 0 {
        return String::new();
    }

    let mut result = String::with_capacity(digits);

    // First digit should be 1-9 to avoid leading zeros
    result.push(char::from(b'0' + rng.gen_range(1..10u8)));

    // Remaining digits can be 0-9
    for _ in 1..digits {
        result.push(char::from(b'0' + rng.gen_range(0..10u8)));
    }

    result
}

/// Strings rendered from a pattern.
#[derive(Debug, Clone)]
pub struct PatternRandomizer {
    pattern: String,
}

impl PatternRandomizer {
    /// Create a new pattern randomizer.
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
        }
    }
}

impl Randomizer for PatternRandomizer {
    fn generate(&self, rng: &mut dyn RngCore) -> Value {
        Value::String(generate_pattern(&self.pattern, rng))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generate_pattern_uuid() {
        let mut rng = StdRng::seed_from_u64(42);
        let s = generate_pattern("id-{uuid}", &mut rng);

        assert!(s.starts_with("id-"));
        assert_eq!(s.len(), 3 + 36); // "id-" + UUID
    }

    #[test]
    fn test_generate_pattern_uuid_is_seeded() {
        let mut rng1 = StdRng::seed_from_u64(42);
        let mut rng2 = StdRng::seed_from_u64(42);

        assert_eq!(
            generate_pattern("{uuid}/{uuid}", &mut rng1),
            generate_pattern("{uuid}/{uuid}", &mut rng2)
        );
    }

    #[test]
    fn test_generate_pattern_random_digits() {
        let mut rng = StdRng::seed_from_u64(42);
        let s = generate_pattern("code-{rand:6}", &mut rng);

        assert!(s.starts_with("code-"));
        assert_eq!(s.len(), 5 + 6); // "code-" + 6 digits
        let random_part = &s[5..];
        assert!(random_part.chars().all(|c| c.is_ascii_digit()));
        assert!(!random_part.starts_with('0'));
    }

    #[test]
    fn test_generate_pattern_invalid_placeholder_is_kept() {
        let mut rng = StdRng::seed_from_u64(42);
        let s = generate_pattern("{rand:x}-{rand:2}", &mut rng);

        assert!(s.starts_with("{rand:x}-"));
        assert_eq!(s.len(), 9 + 2);
    }

    #[test]
    fn test_pattern_randomizer() {
        let mut rng = StdRng::seed_from_u64(42);
        let randomizer = PatternRandomizer::new("user_{rand:4}@example.com");

        let value = randomizer.generate(&mut rng);
        let s = value.as_str().unwrap();
        assert!(s.starts_with("user_"));
        assert!(s.ends_with("@example.com"));
        assert_eq!(s.len(), 5 + 4 + 12);
    }
}
