//! Wall-clock time and OS entropy for the terminal viewer.

use keepsake_core::Environment;

/// The real clock and `getrandom`.
///
/// Randomness only decorates the screen (heart glyphs, sparkle placement), so
/// an RNG failure is logged and the buffer is zero-filled rather than
/// stopping the application.
#[derive(Clone, Default)]
pub struct SystemEnv;

impl SystemEnv {
    /// Environment backed by the host.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Environment for SystemEnv {
    type Instant = std::time::Instant;

    #[allow(clippy::disallowed_methods)]
    fn now(&self) -> Self::Instant {
        std::time::Instant::now()
    }

    fn random_bytes(&self, buffer: &mut [u8]) {
        if let Err(e) = getrandom::fill(buffer) {
            tracing::warn!("OS RNG unavailable, using zeros: {e}");
            buffer.fill(0);
        }
    }
}
