//! Manual clock environment for unit tests.

use std::{
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

use keepsake_core::Environment;

/// Clock advanced by hand; randomness is a counter.
#[derive(Clone, Default)]
pub(crate) struct ManualEnv {
    millis: Arc<AtomicU64>,
    counter: Arc<AtomicU64>,
}

impl ManualEnv {
    pub(crate) fn advance(&self, by: Duration) {
        self.millis.fetch_add(by.as_millis() as u64, Ordering::SeqCst);
    }
}

impl Environment for ManualEnv {
    type Instant = Duration;

    fn now(&self) -> Self::Instant {
        Duration::from_millis(self.millis.load(Ordering::SeqCst))
    }

    fn random_bytes(&self, buffer: &mut [u8]) {
        let n = self.counter.fetch_add(0x9E37_79B9_7F4A_7C15, Ordering::SeqCst);
        for (dst, src) in buffer.iter_mut().zip(n.to_be_bytes().iter().cycle()) {
            *dst = *src;
        }
    }
}
