//! RNG module - bag randomizer with one bag of lookahead
//!
//! Two bags are kept: `current` is dealt from the front, `next` is already
//! shuffled and visible as a preview. When `current` runs dry it takes over
//! `next` and a fresh bag is shuffled in behind it, so every 7 draws from one
//! bag contain each shape exactly once.
//!
//! Shuffling uses a seeded LCG so a session is reproducible from its seed.

use arrayvec::ArrayVec;

use crate::types::Shape;

/// One permutation of the seven shapes
pub type Bag = ArrayVec<Shape, 7>;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Seed 0 is treated as 1
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Value in `[0, max)`.
    ///
    /// Uses the high bits: the low bits of a power-of-two LCG cycle with a
    /// short period.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Fisher-Yates shuffle
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}

/// 7-bag shape generator with a visible next bag
#[derive(Debug, Clone)]
pub struct BagRandomizer {
    /// Front is the next shape to deal. Never empty between draws.
    current: Bag,
    /// Pre-shuffled lookahead.
    next: Bag,
    rng: SimpleRng,
}

impl BagRandomizer {
    pub fn new(seed: u32) -> Self {
        let mut rng = SimpleRng::new(seed);
        let current = create_bag(&mut rng);
        let next = create_bag(&mut rng);
        Self { current, next, rng }
    }

    /// Deal the front shape, rolling over to the next bag when the current one empties.
    pub fn draw(&mut self) -> Shape {
        let shape = self.current.remove(0);
        if self.current.is_empty() {
            let fresh = create_bag(&mut self.rng);
            self.current = std::mem::replace(&mut self.next, fresh);
        }
        shape
    }

    /// The shape the next `draw` returns
    pub fn peek(&self) -> Shape {
        self.current[0]
    }

    pub fn current_bag(&self) -> &[Shape] {
        &self.current
    }

    pub fn next_bag(&self) -> &[Shape] {
        &self.next
    }

    /// `current ++ next`: everything a player may see ahead.
    pub fn preview(&self) -> impl Iterator<Item = Shape> + '_ {
        self.current.iter().chain(self.next.iter()).copied()
    }

    /// Current RNG state (seeding a new randomizer with it continues the stream)
    pub fn seed(&self) -> u32 {
        self.rng.state()
    }
}

impl Default for BagRandomizer {
    fn default() -> Self {
        Self::new(1)
    }
}

/// A uniformly shuffled permutation of all seven shapes.
pub fn create_bag(rng: &mut SimpleRng) -> Bag {
    let mut bag: Bag = Shape::ALL.into_iter().collect();
    rng.shuffle(&mut bag);
    bag
}
