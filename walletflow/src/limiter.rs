use std::future::Future;
use std::sync::Arc;

use tokio::sync::Semaphore;

/// Admits at most `n` futures at a time; the rest wait in FIFO order.
///
/// A slot is released when the admitted future completes, fails, or is dropped,
/// so a cancelled caller never leaks capacity.
#[derive(Debug, Clone)]
pub struct ConcurrencyLimiter {
    permits: Arc<Semaphore>,
    limit: usize,
}

impl ConcurrencyLimiter {
    /// Create a limiter admitting `n` concurrent tasks (`0` is treated as `1`).
    #[must_use]
    pub fn new(n: usize) -> Self {
        let limit = n.clamp(1, Semaphore::MAX_PERMITS);
        Self {
            permits: Arc::new(Semaphore::new(limit)),
            limit,
        }
    }

    /// Configured ceiling.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.limit
    }

    /// Number of tasks currently admitted.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.limit - self.permits.available_permits()
    }

    /// Run `task` once a slot is free and return its output.
    pub async fn limit<F>(&self, task: F) -> F::Output
    where
        F: Future,
    {
        // The semaphore is never closed, so acquire cannot fail.
        let _permit = self.permits.acquire().await;
        task.await
    }
}
