//! Injected randomness for shuffling, plus a small seedable generator.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::{Error, Rng, RngCore};

/// Source of uniform indices. `below(bound)` must return a value in
/// `[0, bound)`; `bound` is always at least 1.
pub trait RandomSource {
    fn below(&mut self, bound: usize) -> usize;
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn below(&mut self, bound: usize) -> usize {
        self.gen_range(0..bound)
    }
}

const GOLDEN_GAMMA: u64 = 0x9e3779b97f4a7c15;

/// SplitMix64 generator. Deterministic for a given seed, which keeps
/// shuffles reproducible in tests and under a configured seed.
#[derive(Debug, Clone)]
pub struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    pub fn new(seed: u64) -> Self {
        SplitMix64 {
            state: splitmix_seed(seed),
        }
    }

    /// Seeds from the wall clock.
    pub fn from_clock() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(GOLDEN_GAMMA);
        Self::new(nanos)
    }
}

impl RngCore for SplitMix64 {
    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(GOLDEN_GAMMA);
        mix(self.state)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = self.next_u64().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

/// Mixes a 64-bit value using SplitMix64 algorithm.
fn mix(z: u64) -> u64 {
    let mut z = z;
    z ^= z >> 30;
    z = z.wrapping_mul(0xbf58476d1ce4e5b9);
    z ^= z >> 27;
    z = z.wrapping_mul(0x94d049bb133111eb);
    z ^= z >> 31;
    z
}

/// Turns a seed into a decent 64-bit starting state.
fn splitmix_seed(seed: u64) -> u64 {
    let z = mix(seed.wrapping_add(GOLDEN_GAMMA));
    if z == 0 {
        GOLDEN_GAMMA
    } else {
        z
    }
}
