//! RNG module - seeded color generation
//!
//! Every spawned pair takes two independent, uniformly distributed colors from
//! the `1..=K` palette. A simple LCG keeps the stream deterministic per seed,
//! which makes sessions reproducible for tests and headless runs.

use crate::types::Cell;

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

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // The high bits of an LCG are far better distributed than the low ones.
        (self.next_u32() >> 16) % max.max(1)
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Color stream for new pairs
#[derive(Debug, Clone)]
pub struct ColorSource {
    colors: u8,
    rng: SimpleRng,
    /// Pair that the next `draw()` returns
    next: (Cell, Cell),
}

impl ColorSource {
    /// Create a color source over a `colors`-entry palette
    pub fn new(seed: u32, colors: u8) -> Self {
        let mut rng = SimpleRng::new(seed);
        let next = Self::roll(&mut rng, colors);
        Self { colors, rng, next }
    }

    fn roll(rng: &mut SimpleRng, colors: u8) -> (Cell, Cell) {
        let a = rng.next_range(colors as u32) as Cell + 1;
        let b = rng.next_range(colors as u32) as Cell + 1;
        (a, b)
    }

    /// Peek at the next pair of colors without consuming it
    pub fn peek(&self) -> (Cell, Cell) {
        self.next
    }

    /// Draw the next `(axis, satellite)` colors
    pub fn draw(&mut self) -> (Cell, Cell) {
        let out = self.next;
        self.next = Self::roll(&mut self.rng, self.colors);
        out
    }

    /// Get the current RNG state (for restarting with a continuing sequence)
    pub fn seed(&self) -> u32 {
        self.rng.state()
    }
}
