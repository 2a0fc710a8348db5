//! RNG module - piece kind selection
//!
//! Each spawn picks one of the seven kinds uniformly at random, independent of
//! previous picks. Seeding makes a game reproducible.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::types::PieceKind;

/// Supplies the kind of every newly spawned piece.
pub trait PieceSource {
    fn next_kind(&mut self) -> PieceKind;
}

/// Uniform random choice among the seven kinds.
#[derive(Debug, Clone)]
pub struct UniformRandomizer {
    rng: StdRng,
}

impl UniformRandomizer {
    /// Deterministic sequence for the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Seeded from operating system entropy
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl PieceSource for UniformRandomizer {
    fn next_kind(&mut self) -> PieceKind {
        PieceKind::ALL[self.rng.gen_range(0..PieceKind::ALL.len())]
    }
}

impl Default for UniformRandomizer {
    fn default() -> Self {
        Self::from_entropy()
    }
}
