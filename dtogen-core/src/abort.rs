//! Advisory cancellation for batch synthesis.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared flag checked between units of work.
///
/// Cancellation is advisory: the synthesizer polls the flag between requests
/// and between properties, finishing or discarding the current step rather
/// than interrupting it. Clones share the same flag.
#[derive(Debug, Clone, Default)]
pub struct AbortFlag(Arc<AtomicBool>);

impl AbortFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Safe to call from any thread.
    pub fn set(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_clear() {
        assert!(!AbortFlag::new().is_set());
    }

    #[test]
    fn clones_share_state() {
        let flag = AbortFlag::new();
        let observer = flag.clone();

        flag.set();

        assert!(observer.is_set());
    }
}
