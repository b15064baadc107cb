//! Injectable randomness for route generation.
//!
//! The generator never touches a global random generator. It draws through
//! [`RandomSource`], so a seeded [`SessionRng`] or a scripted
//! [`FixedSequence`] makes every route reproducible.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A source of uniform random draws.
pub trait RandomSource {
    /// Returns a uniformly distributed index in `0..bound`.
    ///
    /// `bound` is always at least 1.
    fn next_index(&mut self, bound: usize) -> usize;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_index(&mut self, bound: usize) -> usize {
        (**self).next_index(bound)
    }
}

impl RandomSource for StdRng {
    fn next_index(&mut self, bound: usize) -> usize {
        self.random_range(0..bound)
    }
}

/// Seeded random source that remembers its seed.
///
/// Logging the seed is enough to replay every route a session produced.
#[derive(Debug, Clone)]
pub struct SessionRng {
    rng: StdRng,
    seed: u64,
}

impl SessionRng {
    /// Creates a generator from a fixed seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Creates a generator from a seed drawn from the thread-local generator.
    #[must_use]
    pub fn from_random() -> Self {
        let seed: u64 = rand::rng().random();
        Self::new(seed)
    }

    /// Creates a generator from `seed` if given, otherwise from a random seed.
    #[must_use]
    pub fn from_seed_or_random(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_random, Self::new)
    }

    /// Returns the seed this generator was created with.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SessionRng {
    fn next_index(&mut self, bound: usize) -> usize {
        self.rng.random_range(0..bound)
    }
}

/// Scripted random source that replays a fixed list of draws.
///
/// Each draw is reduced modulo the requested bound. Once the list is used up
/// it starts over from the beginning; an empty list always yields 0.
#[derive(Debug, Clone, Default)]
pub struct FixedSequence {
    draws: Vec<usize>,
    position: usize,
}

impl FixedSequence {
    /// Creates a source that replays `draws`.
    #[must_use]
    pub fn new(draws: impl Into<Vec<usize>>) -> Self {
        Self {
            draws: draws.into(),
            position: 0,
        }
    }

    /// Returns how many draws have been consumed so far.
    #[must_use]
    pub const fn consumed(&self) -> usize {
        self.position
    }
}

impl RandomSource for FixedSequence {
    fn next_index(&mut self, bound: usize) -> usize {
        if self.draws.is_empty() {
            self.position += 1;
            return 0;
        }
        let draw = self.draws[self.position % self.draws.len()];
        self.position += 1;
        draw % bound.max(1)
    }
}
