//! Random Text Input
//!
//! Inputs are strings drawn uniformly from `a-z A-Z 0-9` and space. The
//! generator owns its seeded RNG, so the same seed always yields the same
//! sequence of inputs.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Characters inputs are drawn from
pub const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789 ";

/// Seeded random text generator
#[derive(Debug, Clone)]
pub struct TextGenerator {
    rng: StdRng,
}

impl TextGenerator {
    /// Create a generator from a seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generate a string of exactly `len` characters
    pub fn generate(&mut self, len: usize) -> String {
        (0..len)
            .map(|_| char::from(ALPHABET[self.rng.gen_range(0..ALPHABET.len())]))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_and_alphabet() {
        let mut generator = TextGenerator::new(42);
        let text = generator.generate(5000);

        assert_eq!(text.len(), 5000);
        assert!(text.bytes().all(|b| ALPHABET.contains(&b)));
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = TextGenerator::new(7);
        let mut b = TextGenerator::new(7);

        for len in [10, 100, 1000] {
            assert_eq!(a.generate(len), b.generate(len));
        }
    }

    #[test]
    fn test_different_seeds_differ() {
        let mut a = TextGenerator::new(1);
        let mut b = TextGenerator::new(2);
        assert_ne!(a.generate(256), b.generate(256));
    }

    #[test]
    fn test_empty() {
        assert!(TextGenerator::new(42).generate(0).is_empty());
    }
}
