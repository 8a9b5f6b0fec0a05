//! RNG module - injectable randomness for tile spawning
//!
//! The spawner never reaches for a global generator. It draws through the
//! [`RandomSource`] trait so tests can script exact draws and games can be
//! replayed from a seed.
//!
//! Also provides a simple LCG for deterministic play.

/// Source of uniform random draws used by the tile spawner.
pub trait RandomSource {
    /// Uniform draw in `[0, 1)`.
    fn next_f64(&mut self) -> f64;

    /// Uniform index in `[0, len)`. `len` must be non-zero.
    fn next_index(&mut self, len: usize) -> usize {
        let idx = (self.next_f64() * len as f64) as usize;
        idx.min(len - 1)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }

    fn next_index(&mut self, len: usize) -> usize {
        (**self).next_index(len)
    }
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Current generator state (reseeding with it continues the same sequence)
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

impl RandomSource for SimpleRng {
    fn next_f64(&mut self) -> f64 {
        // High bits of an LCG are the well-mixed ones.
        (self.next_u32() >> 8) as f64 / (1u32 << 24) as f64
    }
}

/// Replays a fixed list of draws, cycling when exhausted.
///
/// Used to pin spawn positions and values in tests and benchmarks.
#[derive(Debug, Clone)]
pub struct ScriptedRng {
    draws: Vec<f64>,
    cursor: usize,
}

impl ScriptedRng {
    /// # Panics
    ///
    /// Panics if `draws` is empty or any draw is outside `[0, 1)`.
    pub fn new(draws: impl Into<Vec<f64>>) -> Self {
        let draws = draws.into();
        assert!(!draws.is_empty(), "scripted rng needs at least one draw");
        assert!(
            draws.iter().all(|d| (0.0..1.0).contains(d)),
            "scripted draws must lie in [0, 1)"
        );
        Self { draws, cursor: 0 }
    }
}

impl RandomSource for ScriptedRng {
    fn next_f64(&mut self) -> f64 {
        let v = self.draws[self.cursor % self.draws.len()];
        self.cursor += 1;
        v
    }
}
