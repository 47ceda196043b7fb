use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Single-slot guard allowing at most one processor run per source.
///
/// Clones share the slot. A request that finds it taken should be dropped,
/// not queued.
#[derive(Clone, Debug, Default)]
pub struct ProcessingToken {
    busy: Arc<AtomicBool>,
}

impl ProcessingToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the slot, or `None` if a run is already in flight.
    pub fn try_acquire(&self) -> Option<TokenGuard> {
        self.busy
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .ok()
            .map(|_| TokenGuard {
                busy: Arc::clone(&self.busy),
            })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

/// Holds the processing slot; releases it on drop.
#[derive(Debug)]
pub struct TokenGuard {
    busy: Arc<AtomicBool>,
}

impl Drop for TokenGuard {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}
