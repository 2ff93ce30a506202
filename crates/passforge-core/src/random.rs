//! Secure randomness capability.
//!
//! Every random draw made by the generators goes through [`SecureRandom`],
//! so the source can be swapped for a seeded generator in tests. Production
//! callers use [`CryptoRandom::os`], backed by the OS CSPRNG.

use rand::rngs::OsRng;
use rand::{CryptoRng, Rng, RngCore};

/// A source of uniformly distributed integers in an inclusive range.
///
/// Implementations must be cryptographically secure when used outside tests.
pub trait SecureRandom {
    /// Return a uniform integer in `min..=max`.
    ///
    /// When `max <= min`, returns `min`.
    fn next_in_range(&mut self, min: usize, max: usize) -> usize;
}

/// Adapter from any cryptographic `rand` generator to [`SecureRandom`].
///
/// `rand`'s uniform sampler rejects and re-samples out-of-zone values, so
/// draws carry no modulo bias.
#[derive(Debug, Clone)]
pub struct CryptoRandom<R> {
    rng: R,
}

impl CryptoRandom<OsRng> {
    /// OS-backed CSPRNG (`getrandom`).
    #[must_use]
    pub const fn os() -> Self {
        Self { rng: OsRng }
    }
}

impl<R: RngCore + CryptoRng> CryptoRandom<R> {
    /// Wrap an existing cryptographic generator (e.g. a seeded `StdRng`).
    #[must_use]
    pub const fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: RngCore + CryptoRng> SecureRandom for CryptoRandom<R> {
    fn next_in_range(&mut self, min: usize, max: usize) -> usize {
        if max <= min {
            return min;
        }
        self.rng.gen_range(min..=max)
    }
}

/// Fisher-Yates shuffle driven by a [`SecureRandom`] source.
///
/// Walks from the last index down to 1, swapping each position with a draw
/// from `0..=i`. Produces every permutation with equal probability given a
/// uniform source.
pub fn shuffle<T, R: SecureRandom + ?Sized>(items: &mut [T], rng: &mut R) {
    let mut i = items.len();
    while i > 1 {
        i = i.saturating_sub(1);
        let j = rng.next_in_range(0, i);
        items.swap(i, j);
    }
}
