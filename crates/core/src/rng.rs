//! RNG module - 7-bag random piece generation
//!
//! Implements the "7-bag" randomization algorithm used in modern Tetris.
//! Each bag contains one of each piece (I, O, T, S, Z, J, L), shuffled.
//! Draws from the bag until empty, then generates a new bag.
//!
//! Shuffling uses a seeded PCG generator so a seed always reproduces the
//! same piece sequence.

use std::collections::VecDeque;

use rand::seq::SliceRandom;
use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg32;

use crate::types::{PieceKind, PREVIEW_LEN};

/// 7-bag piece generator
#[derive(Debug, Clone)]
pub struct RandomBag {
    /// Remaining pieces of the current bag; popped from the back
    bag: Vec<PieceKind>,
    rng: Pcg32,
    seed: u64,
}

impl RandomBag {
    /// Create a new bag with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            bag: Vec::with_capacity(PieceKind::ALL.len()),
            rng: Pcg32::seed_from_u64(seed),
            seed,
        }
    }

    /// Create a bag seeded from OS entropy
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// Draw the next piece, refilling with a fresh shuffle when empty
    pub fn next(&mut self) -> PieceKind {
        loop {
            if let Some(kind) = self.bag.pop() {
                return kind;
            }
            self.refill();
        }
    }

    fn refill(&mut self) {
        self.bag.clear();
        self.bag.extend_from_slice(&PieceKind::ALL);
        self.bag.shuffle(&mut self.rng);
    }

    /// Drop the current bag and restart from `seed`
    pub fn reseed(&mut self, seed: u64) {
        *self = Self::new(seed);
    }

    /// Derive a new seed from this bag's generator
    pub fn next_seed(&mut self) -> u64 {
        self.rng.next_u64()
    }

    /// Seed this bag was created with
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Pieces left in the current bag
    pub fn remaining(&self) -> usize {
        self.bag.len()
    }
}

/// Upcoming pieces, replenished from a [`RandomBag`] so at least
/// [`PREVIEW_LEN`] kinds are always visible.
#[derive(Debug, Clone)]
pub struct PieceQueue {
    upcoming: VecDeque<PieceKind>,
    bag: RandomBag,
}

impl PieceQueue {
    /// Create a new piece queue with the given seed
    pub fn new(seed: u64) -> Self {
        let mut queue = Self {
            upcoming: VecDeque::with_capacity(PREVIEW_LEN + 1),
            bag: RandomBag::new(seed),
        };
        queue.replenish();
        queue
    }

    /// Create a queue fed by an entropy-seeded bag
    pub fn from_entropy() -> Self {
        let mut queue = Self {
            upcoming: VecDeque::with_capacity(PREVIEW_LEN + 1),
            bag: RandomBag::from_entropy(),
        };
        queue.replenish();
        queue
    }

    fn replenish(&mut self) {
        while self.upcoming.len() < PREVIEW_LEN {
            self.upcoming.push_back(self.bag.next());
        }
    }

    /// Take the front piece and top the queue back up
    pub fn draw(&mut self) -> PieceKind {
        let kind = match self.upcoming.pop_front() {
            Some(kind) => kind,
            None => self.bag.next(),
        };
        self.replenish();
        kind
    }

    /// Peek at the next piece without removing it
    pub fn peek(&self) -> Option<PieceKind> {
        self.upcoming.front().copied()
    }

    /// Peek at the next 5 pieces (for the preview).
    ///
    /// This is stack-only and does not allocate.
    pub fn peek_5(&self) -> [PieceKind; PREVIEW_LEN] {
        let mut out = [PieceKind::I; PREVIEW_LEN];
        for (slot, kind) in out.iter_mut().zip(self.upcoming.iter()) {
            *slot = *kind;
        }
        out
    }

    /// Number of queued pieces
    pub fn len(&self) -> usize {
        self.upcoming.len()
    }

    pub fn is_empty(&self) -> bool {
        self.upcoming.is_empty()
    }

    /// Restart the queue from a fresh bag seeded with `seed`
    pub fn reseed(&mut self, seed: u64) {
        self.upcoming.clear();
        self.bag.reseed(seed);
        self.replenish();
    }

    /// Derive a seed for the next run from the current generator
    pub fn next_seed(&mut self) -> u64 {
        self.bag.next_seed()
    }

    /// Seed of the bag feeding this queue
    pub fn seed(&self) -> u64 {
        self.bag.seed()
    }
}

impl Default for PieceQueue {
    fn default() -> Self {
        Self::new(1)
    }
}
