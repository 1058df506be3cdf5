//! Random sources used to shake the pen.
//!
//! Nothing in the sketch code reaches for a global generator; every
//! [`crate::sketch::Sketch`] is handed a [`RandomSource`] instead, so a frame
//! can be reseeded, replayed, or driven by a fixed source in tests.
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Anything that can hand out uniform floats.
pub trait RandomSource {
    /// A uniform value in `[min, max]`. Degenerate ranges (`min >= max`)
    /// return `min`.
    fn uniform(&mut self, min: f64, max: f64) -> f64;

    /// Restart the sequence from `seed`. Call once per rendering unit
    /// (usually a frame) to get reproducible output.
    fn reseed(&mut self, seed: u64);
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn uniform(&mut self, min: f64, max: f64) -> f64 {
        (**self).uniform(min, max)
    }

    fn reseed(&mut self, seed: u64) {
        (**self).reseed(seed)
    }
}

/// The usual source: a fast, seedable, non-cryptographic generator.
#[derive(Clone, Debug)]
pub struct SeededRandom {
    seed: u64,
    rng: SmallRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> SeededRandom {
        SeededRandom {
            seed,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Picks a random seed. Grab it with [`SeededRandom::seed`] if you like
    /// the result and want it back later.
    pub fn from_entropy() -> SeededRandom {
        SeededRandom::new(rand::random::<u64>())
    }

    /// The seed this sequence started from.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Default for SeededRandom {
    fn default() -> Self {
        SeededRandom::from_entropy()
    }
}

impl RandomSource for SeededRandom {
    fn uniform(&mut self, min: f64, max: f64) -> f64 {
        if !(min < max) {
            return min;
        }
        self.rng.gen_range(min..=max)
    }

    fn reseed(&mut self, seed: u64) {
        self.seed = seed;
        self.rng = SmallRng::seed_from_u64(seed);
    }
}

/// Always returns the same fraction of the requested range:
/// `min + (max - min) * t`. `FixedRandom(0.5)` centers every draw, which
/// turns all jitter off for symmetric ranges.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedRandom(pub f64);

impl FixedRandom {
    pub fn centered() -> FixedRandom {
        FixedRandom(0.5)
    }
}

impl RandomSource for FixedRandom {
    fn uniform(&mut self, min: f64, max: f64) -> f64 {
        if !(min < max) {
            return min;
        }
        min + (max - min) * self.0
    }

    fn reseed(&mut self, _seed: u64) {}
}
