//! Duel seeding.
//!
//! The engine accepts either a single legacy 32-bit seed or an extended
//! eight-word seed. When a scenario does not pin a seed, one is drawn from
//! a ChaCha8 stream seeded from OS entropy.
//!
//! ```
//! use duel_harness::core::DuelSeed;
//!
//! // Same u64 produces the same extended seed
//! assert_eq!(DuelSeed::from_u64(42), DuelSeed::from_u64(42));
//! assert_ne!(DuelSeed::from_u64(42), DuelSeed::from_u64(43));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Number of words in an extended seed.
pub const EXTENDED_SEED_WORDS: usize = 8;

/// Seed handed to the engine when a duel is created.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DuelSeed {
    /// Single-word seed for the legacy creation entry point.
    Legacy(u32),
    /// Eight-word seed for the extended creation entry point.
    Extended([u32; EXTENDED_SEED_WORDS]),
}

impl DuelSeed {
    /// Draw a fresh extended seed from OS entropy.
    #[must_use]
    pub fn random() -> Self {
        Self::from_rng(&mut ChaCha8Rng::from_entropy())
    }

    /// Derive a deterministic extended seed from one `u64`.
    #[must_use]
    pub fn from_u64(seed: u64) -> Self {
        Self::from_rng(&mut ChaCha8Rng::seed_from_u64(seed))
    }

    fn from_rng(rng: &mut ChaCha8Rng) -> Self {
        let mut words = [0u32; EXTENDED_SEED_WORDS];
        for word in &mut words {
            *word = rng.gen();
        }
        Self::Extended(words)
    }
}

impl From<u32> for DuelSeed {
    fn from(seed: u32) -> Self {
        Self::Legacy(seed)
    }
}

impl From<[u32; EXTENDED_SEED_WORDS]> for DuelSeed {
    fn from(words: [u32; EXTENDED_SEED_WORDS]) -> Self {
        Self::Extended(words)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_u64_is_deterministic() {
        let a = DuelSeed::from_u64(7);
        let b = DuelSeed::from_u64(7);
        assert_eq!(a, b);
        assert!(matches!(a, DuelSeed::Extended(_)));
    }

    #[test]
    fn test_random_is_extended() {
        assert!(matches!(DuelSeed::random(), DuelSeed::Extended(_)));
    }

    #[test]
    fn test_legacy_conversion() {
        assert_eq!(DuelSeed::from(5u32), DuelSeed::Legacy(5));
    }
}
