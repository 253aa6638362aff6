//! Per-category lock
//!
//! A spin lock in normal builds; `loom::sync::Mutex` under the `loom`
//! feature so the create/delete protocol can be model-checked.

#[cfg(not(feature = "loom"))]
pub(crate) struct CategoryLock<T> {
    inner: spin::Mutex<T>,
}

#[cfg(not(feature = "loom"))]
impl<T> CategoryLock<T> {
    pub(crate) fn new(value: T) -> Self {
        Self {
            inner: spin::Mutex::new(value),
        }
    }

    /// Run `f` with the lock held
    pub(crate) fn with<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let mut guard = self.inner.lock();
        f(&mut guard)
    }
}

#[cfg(feature = "loom")]
pub(crate) struct CategoryLock<T> {
    inner: loom::sync::Mutex<T>,
}

#[cfg(feature = "loom")]
impl<T> CategoryLock<T> {
    pub(crate) fn new(value: T) -> Self {
        Self {
            inner: loom::sync::Mutex::new(value),
        }
    }

    /// Run `f` with the lock held
    pub(crate) fn with<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        // A panic while holding the lock is fatal anyway; keep the data.
        let mut guard = match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        f(&mut guard)
    }
}
