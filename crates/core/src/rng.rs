//! RNG module - repeat-avoiding random piece generation
//!
//! Pieces are drawn uniformly at random with one rule: a kind is never
//! generated twice in a row. Instead of resampling until the result differs,
//! the generator samples directly from the six kinds that differ from the
//! previous one, so every draw costs exactly one RNG step.
//!
//! Also provides a simple LCG so that a session is reproducible from its seed.

use crate::types::PieceKind;

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
    ///
    /// Uses the high bits; the low bits of a power-of-two LCG cycle quickly.
    pub fn next_range(&mut self, max: u32) -> u32 {
        (((self.next_u32() >> 16) as u64 * max as u64) >> 16) as u32
    }

    /// Current internal state (usable as a seed to continue the stream)
    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Pick a kind uniformly, never returning `previous`.
///
/// With no previous kind all seven are candidates.
pub fn next_random_kind(rng: &mut SimpleRng, previous: Option<PieceKind>) -> PieceKind {
    match previous {
        None => PieceKind::ALL[rng.next_range(7) as usize],
        Some(prev) => {
            // Draw from the six others by skipping over the previous index.
            let mut idx = rng.next_range(6) as usize;
            if idx >= prev.index() {
                idx += 1;
            }
            PieceKind::ALL[idx]
        }
    }
}

/// Stateful generator remembering the last kind it produced
#[derive(Debug, Clone)]
pub struct PieceGenerator {
    rng: SimpleRng,
    previous: Option<PieceKind>,
}

impl PieceGenerator {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
            previous: None,
        }
    }

    /// Generate the next kind (never equal to the previously generated one)
    pub fn next_kind(&mut self) -> PieceKind {
        let kind = next_random_kind(&mut self.rng, self.previous);
        self.previous = Some(kind);
        kind
    }

    /// The last kind generated, if any
    pub fn previous(&self) -> Option<PieceKind> {
        self.previous
    }

    /// Current RNG state (for restarting with a continued sequence)
    pub fn seed(&self) -> u32 {
        self.rng.state()
    }
}

impl Default for PieceGenerator {
    fn default() -> Self {
        Self::new(1)
    }
}
