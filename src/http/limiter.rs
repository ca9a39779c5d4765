use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::{AcquireError, Semaphore, SemaphorePermit};

/// Counting admission gate with a fixed capacity.
///
/// Tracks how many permits are currently held and the highest value seen,
/// so a run can report (and tests can assert) its effective concurrency.
#[derive(Debug)]
pub struct ConcurrencyLimiter {
    semaphore: Semaphore,
    capacity: usize,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

impl ConcurrencyLimiter {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.clamp(1, Semaphore::MAX_PERMITS);
        Self {
            semaphore: Semaphore::new(capacity),
            capacity,
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        }
    }

    /// Waits for a free slot. The slot is released when the permit drops.
    ///
    /// # Errors
    ///
    /// Returns an error only if the underlying semaphore was closed.
    pub async fn acquire(&self) -> Result<LimiterPermit<'_>, AcquireError> {
        let permit = self.semaphore.acquire().await?;
        let current = self.in_flight.fetch_add(1, Ordering::AcqRel).saturating_add(1);
        self.peak.fetch_max(current, Ordering::AcqRel);
        Ok(LimiterPermit {
            _permit: permit,
            in_flight: &self.in_flight,
        })
    }

    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::Acquire)
    }

    #[must_use]
    pub fn peak_in_flight(&self) -> usize {
        self.peak.load(Ordering::Acquire)
    }
}

/// A held slot. Dropping it (on any exit path, unwinding included) frees the slot.
#[derive(Debug)]
pub struct LimiterPermit<'limiter> {
    _permit: SemaphorePermit<'limiter>,
    in_flight: &'limiter AtomicUsize,
}

impl Drop for LimiterPermit<'_> {
    fn drop(&mut self) {
        // Runs before the semaphore permit field is released.
        loop {
            let current = self.in_flight.load(Ordering::Acquire);
            let Some(next) = current.checked_sub(1) else {
                break;
            };
            if self
                .in_flight
                .compare_exchange(current, next, Ordering::AcqRel, Ordering::Acquire)
                .is_ok()
            {
                break;
            }
        }
    }
}
