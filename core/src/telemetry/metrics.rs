use std::sync::{Mutex, PoisonError};

/// Running totals of poll outcomes.
pub struct PollMetrics {
    inner: Mutex<Metrics>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Metrics {
    pub succeeded: usize,
    pub failed: usize,
}

impl PollMetrics {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Metrics::default()),
        }
    }

    pub fn record_success(&self) {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .succeeded += 1;
    }

    pub fn record_failure(&self) {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .failed += 1;
    }

    pub fn snapshot(&self) -> Metrics {
        *self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for PollMetrics {
    fn default() -> Self {
        Self::new()
    }
}
