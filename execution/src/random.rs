//! Randomness source for commitments and the computer's choices.
//!
//! The source is injected into [`crate::FairRandom`] so tests can replace the
//! operating system generator with a scripted one (see `mocks`).

use rand::{rngs::OsRng, Rng, RngCore};

use crate::rng_pipeline::KEY_LEN;

/// Cryptographically strong, unbiased randomness.
pub trait RandomSource {
    /// A fresh commitment key.
    fn secret_key(&mut self) -> [u8; KEY_LEN];

    /// A uniformly distributed integer in `[0, max]` (inclusive).
    fn uniform(&mut self, max: u64) -> u64;
}

/// Operating system CSPRNG.
///
/// `uniform` relies on `rand`'s range sampling, which rejects out-of-zone
/// samples instead of reducing modulo the range.
#[derive(Clone, Copy, Debug, Default)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn secret_key(&mut self) -> [u8; KEY_LEN] {
        let mut key = [0u8; KEY_LEN];
        OsRng.fill_bytes(&mut key);
        key
    }

    fn uniform(&mut self, max: u64) -> u64 {
        OsRng.gen_range(0..=max)
    }
}
