//! Where the book gets its clock and its dice.
//!
//! The navigator never reads the time itself; callers pass an instant taken
//! from an [`Environment`]. Effects draw their randomness from the same
//! place, so a virtual clock plus a seeded generator replays a session
//! exactly.

use std::time::Duration;

/// Time and randomness supplied to the book.
///
/// `now()` must not go backwards. Nothing here can fail: randomness only
/// picks glyphs and positions, so an implementation without entropy fills
/// with zeros.
pub trait Environment: Clone + Send + Sync + 'static {
    /// `std::time::Instant` in the terminal, a virtual instant under test.
    type Instant: Copy + Ord + Send + Sync + std::fmt::Debug + std::ops::Sub<Output = Duration>;

    /// Current instant.
    fn now(&self) -> Self::Instant;

    /// Fill `buffer` with random bytes.
    fn random_bytes(&self, buffer: &mut [u8]);

    /// Eight random bytes, big-endian.
    fn random_u64(&self) -> u64 {
        let mut bytes = [0u8; 8];
        self.random_bytes(&mut bytes);
        u64::from_be_bytes(bytes)
    }

    /// Random index in `0..len`. Returns 0 when `len` is 0.
    fn random_index(&self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        (self.random_u64() % len as u64) as usize
    }

    /// Uniform value in `[0.0, 1.0)`.
    fn random_unit(&self) -> f64 {
        (self.random_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Returns `true` with the given probability (clamped to `0.0..=1.0`).
    fn chance(&self, probability: f64) -> bool {
        self.random_unit() < probability.clamp(0.0, 1.0)
    }
}
