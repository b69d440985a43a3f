//! Character, string and byte randomizers.

use crate::Randomizer;
use populate_core::Value;
use rand::seq::SliceRandom;
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

const ALPHANUMERIC: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
const LETTERS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Character set that generated characters and strings are drawn from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Charset {
    /// `A-Z`, `a-z` and `0-9`
    #[default]
    Alphanumeric,

    /// `A-Z` and `a-z`
    Letters,

    /// Printable ASCII (`0x20..=0x7E`)
    Ascii,

    /// Printable ASCII plus the printable Latin-1 supplement
    Latin1,

    /// Exactly the characters of the given string
    Custom(String),
}

impl Charset {
    /// The characters of this set.
    ///
    /// An empty custom set falls back to alphanumeric characters.
    pub fn alphabet(&self) -> Vec<char> {
        match self {
            Charset::Alphanumeric => ALPHANUMERIC.chars().collect(),
            Charset::Letters => LETTERS.chars().collect(),
            Charset::Ascii => (0x20u8..=0x7E).map(char::from).collect(),
            Charset::Latin1 => (0x20u8..=0x7E).chain(0xA0u8..=0xFF).map(char::from).collect(),
            Charset::Custom(chars) if chars.is_empty() => ALPHANUMERIC.chars().collect(),
            Charset::Custom(chars) => chars.chars().collect(),
        }
    }
}

fn pick_char<R: Rng + ?Sized>(rng: &mut R, alphabet: &[char]) -> char {
    alphabet.choose(rng).copied().unwrap_or('a')
}

/// Generate a random string of `min..=max` characters from `alphabet`.
pub fn generate_string<R: Rng + ?Sized>(
    rng: &mut R,
    alphabet: &[char],
    min: usize,
    max: usize,
) -> String {
    let (min, max) = if min <= max { (min, max) } else { (max, min) };
    let length = rng.gen_range(min..=max);
    (0..length).map(|_| pick_char(rng, alphabet)).collect()
}

/// Single characters from a charset.
#[derive(Debug, Clone)]
pub struct CharRandomizer {
    alphabet: Vec<char>,
}

impl CharRandomizer {
    /// Create a new character randomizer.
    pub fn new(charset: &Charset) -> Self {
        Self {
            alphabet: charset.alphabet(),
        }
    }
}

impl Randomizer for CharRandomizer {
    fn generate(&self, rng: &mut dyn RngCore) -> Value {
        Value::Char(pick_char(rng, &self.alphabet))
    }
}

/// Strings with a length in an inclusive range, drawn from a charset.
#[derive(Debug, Clone)]
pub struct StringRandomizer {
    alphabet: Vec<char>,
    min_length: usize,
    max_length: usize,
}

impl StringRandomizer {
    /// Create a new string randomizer.
    pub fn new(charset: &Charset, min_length: usize, max_length: usize) -> Self {
        Self {
            alphabet: charset.alphabet(),
            min_length,
            max_length,
        }
    }
}

impl Randomizer for StringRandomizer {
    fn generate(&self, rng: &mut dyn RngCore) -> Value {
        Value::String(generate_string(
            rng,
            &self.alphabet,
            self.min_length,
            self.max_length,
        ))
    }
}

/// Byte strings with a length in an inclusive range.
#[derive(Debug, Clone)]
pub struct BytesRandomizer {
    min_length: usize,
    max_length: usize,
}

impl BytesRandomizer {
    /// Create a new byte string randomizer.
    pub fn new(min_length: usize, max_length: usize) -> Self {
        let (min_length, max_length) = if min_length <= max_length {
            (min_length, max_length)
        } else {
            (max_length, min_length)
        };
        Self {
            min_length,
            max_length,
        }
    }
}

impl Randomizer for BytesRandomizer {
    fn generate(&self, rng: &mut dyn RngCore) -> Value {
        let length = rng.gen_range(self.min_length..=self.max_length);
        let mut bytes = vec![0u8; length];
        rng.fill_bytes(&mut bytes);
        Value::Bytes(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_string_length_in_range() {
        let mut rng = StdRng::seed_from_u64(42);
        let randomizer = StringRandomizer::new(&Charset::Alphanumeric, 3, 7);

        for _ in 0..100 {
            let value = randomizer.generate(&mut rng);
            let s = value.as_str().unwrap();
            assert!((3..=7).contains(&s.chars().count()));
            assert!(s.chars().all(|c| c.is_ascii_alphanumeric()));
        }
    }

    #[test]
    fn test_custom_charset_restricts_characters() {
        let mut rng = StdRng::seed_from_u64(42);
        let charset = Charset::Custom("abc".to_string());
        let strings = StringRandomizer::new(&charset, 10, 10);
        let chars = CharRandomizer::new(&charset);

        for _ in 0..50 {
            let value = strings.generate(&mut rng);
            assert!(value.as_str().unwrap().chars().all(|c| "abc".contains(c)));

            let c = chars.generate(&mut rng).as_char().unwrap();
            assert!("abc".contains(c));
        }
    }

    #[test]
    fn test_empty_custom_charset_falls_back() {
        let alphabet = Charset::Custom(String::new()).alphabet();
        assert_eq!(alphabet.len(), 62);
    }

    #[test]
    fn test_latin1_alphabet() {
        let alphabet = Charset::Latin1.alphabet();
        assert!(alphabet.contains(&'é'));
        assert!(alphabet.contains(&'~'));
        assert!(!alphabet.contains(&'\u{7F}'));
    }

    #[test]
    fn test_charset_from_yaml() {
        let charset: Charset = serde_yaml::from_str("letters").unwrap();
        assert_eq!(charset, Charset::Letters);

        let charset: Charset = serde_yaml::from_str("custom: xyz").unwrap();
        assert_eq!(charset, Charset::Custom("xyz".to_string()));
    }

    #[test]
    fn test_bytes_length() {
        let mut rng = StdRng::seed_from_u64(42);
        let randomizer = BytesRandomizer::new(4, 4);

        if let Value::Bytes(bytes) = randomizer.generate(&mut rng) {
            assert_eq!(bytes.len(), 4);
        } else {
            panic!("Expected Bytes value");
        }
    }

    #[test]
    fn test_deterministic_generation() {
        let randomizer = StringRandomizer::new(&Charset::Ascii, 1, 32);
        let mut rng1 = StdRng::seed_from_u64(7);
        let mut rng2 = StdRng::seed_from_u64(7);

        assert_eq!(randomizer.generate(&mut rng1), randomizer.generate(&mut rng2));
    }
}
