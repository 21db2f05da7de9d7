//! RNG module - seedable source for piece selection
//!
//! A small LCG keeps the engine deterministic: the same seed produces the same
//! piece sequence, so scenario tests can pin the sequence down. The generator
//! is a plain value stored inside the session state, which keeps transitions
//! pure (state in, state out).

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
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
    ///
    /// Uses the high bits; the low bits of an LCG cycle with short periods.
    pub fn next_range(&mut self, max: u32) -> u32 {
        debug_assert!(max > 0);
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Resume from a value returned by [`Self::state`]
    ///
    /// Unlike [`Self::new`], zero is kept as is; the generator passes through
    /// it like any other state.
    pub fn from_state(state: u32) -> Self {
        Self { state }
    }

    /// Current generator state; [`Self::from_state`] continues the sequence
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}
