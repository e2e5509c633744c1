//! Random source - injectable randomness for dealing and drawing
//!
//! The game never touches a global generator; every draw goes through a
//! `RandomSource` so tests can substitute a deterministic one.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::domain::value_objects::Card;

/// Source of card draws
pub trait RandomSource: Send {
    /// Pick `amount` distinct cards from `pool` (without replacement).
    /// Returns fewer cards when the pool is smaller than `amount`.
    fn sample(&mut self, pool: &[Card], amount: usize) -> Vec<Card>;

    /// Pick one card uniformly from `pool`, `None` when empty
    fn choose(&mut self, pool: &[Card]) -> Option<Card>;
}

/// ChaCha8-backed random source
pub struct ChaChaRandomSource {
    rng: ChaCha8Rng,
}

impl ChaChaRandomSource {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => ChaCha8Rng::seed_from_u64(s),
            None => ChaCha8Rng::from_entropy(),
        };
        Self { rng }
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(Some(seed))
    }
}

impl Default for ChaChaRandomSource {
    fn default() -> Self {
        Self::new(None)
    }
}

impl RandomSource for ChaChaRandomSource {
    fn sample(&mut self, pool: &[Card], amount: usize) -> Vec<Card> {
        pool.choose_multiple(&mut self.rng, amount).copied().collect()
    }

    fn choose(&mut self, pool: &[Card]) -> Option<Card> {
        pool.choose(&mut self.rng).copied()
    }
}
