use ahash::{AHasher, RandomState};
use core::hash::BuildHasher;

// arbitrary, fixed expansion constants for single-seed construction
const SEED_1: u64 = 0x243f_6a88_85a3_08d3;
const SEED_2: u64 = 0x1319_8a2e_0370_7344;
const SEED_3: u64 = 0xa409_3822_299f_31d0;

/// `BuildHasher` shared by the right-side index and the result map.
///
/// Randomly seeded by default. A seeded instance produces the same hashes (and therefore
/// the same map iteration order) across runs, which is handy for snapshot style tests.
#[derive(Clone, Debug)]
pub struct JoinHasher(RandomState);

impl Default for JoinHasher {
    fn default() -> Self {
        Self(RandomState::new())
    }
}

impl BuildHasher for JoinHasher {
    type Hasher = AHasher;

    fn build_hasher(&self) -> Self::Hasher {
        self.0.build_hasher()
    }
}

impl JoinHasher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed(seed: u64) -> Self {
        Self(RandomState::with_seeds(
            seed,
            seed ^ SEED_1,
            seed.rotate_left(32) ^ SEED_2,
            !seed ^ SEED_3,
        ))
    }

    pub fn deterministic() -> Self {
        Self(RandomState::with_seeds(0, 0, 0, 0))
    }

    pub(crate) fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::with_seed(seed),
            None => Self::new(),
        }
    }
}
