//! Deterministic simulation RNG.
//!
//! # Determinism strategy
//!
//! A run draws every random number (service durations, the food decision)
//! from one `SimRng`, in the order the engine dispatches events.  Since the
//! dispatch order is itself fixed by `(time, seq)`, a fixed seed reproduces
//! the full sample sequence.
//!
//! Independent streams (one per replication, for parallel sweeps) come from
//! [`SimRng::for_stream`]:
//!
//!   seed = master_seed XOR (stream * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive stream numbers across the seed space.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Simulation-level RNG.
///
/// Used only from the single thread that runs the owning simulation.  For
/// parallel work give each worker its own stream via [`SimRng::for_stream`].
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Independent stream `stream` of the master seed.
    ///
    /// Depends only on `(master_seed, stream)`, never on how many other
    /// streams were created before, so results do not depend on execution
    /// order.
    pub fn for_stream(master_seed: u64, stream: u64) -> Self {
        let seed = master_seed ^ stream.wrapping_mul(MIXING_CONSTANT);
        SimRng(SmallRng::seed_from_u64(seed))
    }

    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }
}
