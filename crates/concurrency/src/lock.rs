//! Named mutual-exclusion lock
//!
//! Binary state {free, held}. [`ExclusiveLock::acquire`] blocks while the lock
//! is held elsewhere and returns a guard; dropping the guard releases the lock
//! on every exit path, including unwinding. Waiter ordering is left to
//! `parking_lot` and is not relied upon.

use parking_lot::{Mutex, MutexGuard};
use std::fmt;

/// Scoped acquisition of an [`ExclusiveLock`].
pub type LockGuard<'a> = MutexGuard<'a, ()>;

/// A mutex protecting no data of its own, identified by name for logging.
pub struct ExclusiveLock {
    name: String,
    inner: Mutex<()>,
}

impl ExclusiveLock {
    /// Create a free lock.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            inner: Mutex::new(()),
        }
    }

    /// Display name, e.g. "Lock A".
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Block until the lock is free, then hold it until the guard drops.
    pub fn acquire(&self) -> LockGuard<'_> {
        self.inner.lock()
    }

    /// Acquire without blocking.
    pub fn try_acquire(&self) -> Option<LockGuard<'_>> {
        self.inner.try_lock()
    }

    /// Whether some owner currently holds the lock.
    ///
    /// Only a hint under concurrency; the answer may be stale on return.
    pub fn is_held(&self) -> bool {
        self.inner.is_locked()
    }
}

impl fmt::Debug for ExclusiveLock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExclusiveLock")
            .field("name", &self.name)
            .field("held", &self.is_held())
            .finish()
    }
}
