//! RNG module - where catalog draws come from
//!
//! The engine asks a [`PieceSource`] for the next catalog index. Games use the
//! seeded [`SimpleRng`] for uniform draws; tests plug in a [`SequenceSource`]
//! to script exact piece orders.

/// Supplies catalog indices for spawning.
pub trait PieceSource {
    /// Next index in `0..len`. `len` is always nonzero.
    fn next_index(&mut self, len: usize) -> usize;
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

    /// Uniform value in `[0, max)`.
    ///
    /// Scales by the full 32-bit output instead of taking a modulus: the low
    /// bits of an LCG cycle with short periods.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Current internal state (restarting from it replays the sequence)
    pub fn seed(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

impl PieceSource for SimpleRng {
    fn next_index(&mut self, len: usize) -> usize {
        self.next_range(len as u32) as usize
    }
}

/// Replays a fixed list of indices, wrapping around at the end.
///
/// Each index is reduced modulo the catalog size; an empty list yields 0.
#[derive(Debug, Clone, Default)]
pub struct SequenceSource {
    indices: Vec<usize>,
    cursor: usize,
}

impl SequenceSource {
    pub fn new(indices: impl IntoIterator<Item = usize>) -> Self {
        Self {
            indices: indices.into_iter().collect(),
            cursor: 0,
        }
    }

    /// Number of draws served so far
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl PieceSource for SequenceSource {
    fn next_index(&mut self, len: usize) -> usize {
        if self.indices.is_empty() || len == 0 {
            return 0;
        }
        let value = self.indices[self.cursor % self.indices.len()];
        self.cursor += 1;
        value % len
    }
}

impl<S: PieceSource + ?Sized> PieceSource for &mut S {
    fn next_index(&mut self, len: usize) -> usize {
        (**self).next_index(len)
    }
}

impl<S: PieceSource + ?Sized> PieceSource for Box<S> {
    fn next_index(&mut self, len: usize) -> usize {
        (**self).next_index(len)
    }
}
