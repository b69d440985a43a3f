//! Per-call randomization context.

use crate::config::SizeRange;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Mutable state of one top-level population call.
///
/// Holds the seeded random source shared by every randomizer in the call and
/// the active path of named types currently being populated. The path is
/// what breaks cycles: a type is never entered twice on the same path.
#[derive(Debug)]
pub struct RandomizationContext {
    rng: StdRng,
    active: Vec<String>,
    size_range: SizeRange,
}

impl RandomizationContext {
    /// Create a new context.
    ///
    /// Without a seed the random source is seeded from OS entropy.
    pub fn new(seed: Option<u64>, size_range: SizeRange) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            rng,
            active: Vec::new(),
            size_range,
        }
    }

    /// Push a type onto the active path.
    ///
    /// Returns `false` and leaves the path unchanged when the type is
    /// already being populated.
    pub fn enter(&mut self, type_name: &str) -> bool {
        if self.is_active(type_name) {
            return false;
        }
        self.active.push(type_name.to_string());
        true
    }

    /// Pop a type from the active path.
    pub fn exit(&mut self, type_name: &str) {
        if let Some(pos) = self.active.iter().rposition(|name| name == type_name) {
            self.active.remove(pos);
        }
    }

    /// Whether the type is on the active path.
    pub fn is_active(&self, type_name: &str) -> bool {
        self.active.iter().any(|name| name == type_name)
    }

    /// Number of named types on the active path.
    pub fn depth(&self) -> usize {
        self.active.len()
    }

    /// The active path, outermost type first.
    pub fn active_path(&self) -> &[String] {
        &self.active
    }

    /// Draw the size of the next container from the configured range.
    pub fn next_container_size(&mut self) -> usize {
        self.rng.gen_range(self.size_range.min..=self.size_range.max)
    }

    /// The random source for this call.
    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enter_exit_balance() {
        let mut ctx = RandomizationContext::new(Some(42), SizeRange::new(1, 5));

        assert!(ctx.enter("Person"));
        assert!(ctx.enter("Address"));
        assert_eq!(ctx.depth(), 2);

        // Re-entering a type on the path is refused
        assert!(!ctx.enter("Person"));
        assert_eq!(ctx.depth(), 2);

        ctx.exit("Address");
        ctx.exit("Person");
        assert_eq!(ctx.depth(), 0);
        assert!(ctx.active_path().is_empty());
    }

    #[test]
    fn test_container_size_in_range() {
        let mut ctx = RandomizationContext::new(Some(42), SizeRange::new(2, 4));

        for _ in 0..100 {
            let size = ctx.next_container_size();
            assert!((2..=4).contains(&size));
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = RandomizationContext::new(Some(7), SizeRange::new(0, 100));
        let mut b = RandomizationContext::new(Some(7), SizeRange::new(0, 100));

        let sizes_a: Vec<usize> = (0..10).map(|_| a.next_container_size()).collect();
        let sizes_b: Vec<usize> = (0..10).map(|_| b.next_container_size()).collect();
        assert_eq!(sizes_a, sizes_b);
    }
}
