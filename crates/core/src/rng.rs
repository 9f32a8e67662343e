//! RNG module - 7-bag piece source
//!
//! Implements the "7-bag" randomization: each bag holds every piece kind
//! exactly once in a shuffled order. Pieces are drawn from the bag until it is
//! empty, then the next bag is shuffled in.
//!
//! Also provides a small LCG so a whole game can be replayed from its seed.

use arrayvec::ArrayVec;

use crate::piece::Piece;
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
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // The high bits of an LCG are far better distributed than the low ones.
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }
}

/// Unending bag-shuffled sequence of pieces
#[derive(Debug, Clone)]
pub struct PieceSource {
    /// Remaining kinds of the current bag, next draw last
    queue: ArrayVec<PieceKind, 7>,
    rng: SimpleRng,
}

impl PieceSource {
    /// Create a new piece source with the given seed
    pub fn new(seed: u32) -> Self {
        Self {
            queue: ArrayVec::new(),
            rng: SimpleRng::new(seed),
        }
    }

    fn shuffled_bag(rng: &mut SimpleRng) -> [PieceKind; 7] {
        let mut bag = PieceKind::ALL;
        rng.shuffle(&mut bag);
        bag
    }

    /// Append one shuffled permutation of all seven kinds
    fn refill(&mut self) {
        let bag = Self::shuffled_bag(&mut self.rng);
        self.queue.extend(bag.into_iter().rev());
    }

    /// Draw the kind of the next piece
    pub fn next_kind(&mut self) -> PieceKind {
        if self.queue.is_empty() {
            self.refill();
        }
        match self.queue.pop() {
            Some(kind) => kind,
            // refill always leaves seven kinds behind
            None => unreachable!("piece bag empty after refill"),
        }
    }

    /// Draw the next piece in its spawn orientation
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Piece {
        Piece::new(self.next_kind())
    }

    /// Peek at the next kind without consuming it.
    ///
    /// When the bag is exhausted this previews the following bag with a copy
    /// of the RNG, so the sequence `next()` produces is unaffected.
    pub fn peek(&self) -> PieceKind {
        if let Some(&kind) = self.queue.last() {
            return kind;
        }
        let mut preview_rng = self.rng.clone();
        Self::shuffled_bag(&mut preview_rng)[0]
    }

    /// Kinds left in the current bag (for testing/debugging)
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl Default for PieceSource {
    fn default() -> Self {
        Self::new(1)
    }
}
