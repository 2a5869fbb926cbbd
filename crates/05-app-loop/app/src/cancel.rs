//! Scoped release of everything tied to one screen session.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::info;
use parking_lot::Mutex;

/// Something that can be released when its owner goes away.
pub trait Cancellable: Send + Sync {
    /// Releases the registration. Must tolerate being called more than once.
    fn cancel(&self);
}

/// Collects registrations and releases them together.
///
/// Releasing happens on [`CancelBag::cancel`] or on drop, whichever comes
/// first. Registrations added after release are cancelled immediately.
#[derive(Default)]
pub struct CancelBag {
    entries: Mutex<Vec<Arc<dyn Cancellable>>>,
    cancelled: AtomicBool,
}

impl CancelBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `entry` for release with the rest of the bag.
    pub fn insert(&self, entry: Arc<dyn Cancellable>) {
        {
            let mut entries = self.entries.lock();
            if !self.cancelled.load(Ordering::Acquire) {
                entries.push(entry);
                return;
            }
        }
        entry.cancel();
    }

    /// Releases every registration.
    pub fn cancel(&self) {
        let entries = {
            let mut entries = self.entries.lock();
            if self.cancelled.swap(true, Ordering::AcqRel) {
                return;
            }
            std::mem::take(&mut *entries)
        };
        info!("releasing {} registration(s)", entries.len());
        for entry in entries {
            entry.cancel();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    /// Number of registrations waiting for release.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Drop for CancelBag {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Shared flag that turns false when its bag is released.
///
/// Callbacks hold a clone instead of owning their target, and do nothing once
/// the token is dead.
#[derive(Clone, Debug)]
pub struct Liveness {
    alive: Arc<AtomicBool>,
}

impl Liveness {
    pub fn new() -> Self {
        Self {
            alive: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }
}

impl Default for Liveness {
    fn default() -> Self {
        Self::new()
    }
}

impl Cancellable for Liveness {
    fn cancel(&self) {
        self.alive.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drop_releases_registrations() {
        let token = Liveness::new();
        {
            let bag = CancelBag::new();
            bag.insert(Arc::new(token.clone()));
            assert_eq!(bag.len(), 1);
            assert!(token.is_alive());
        }
        assert!(!token.is_alive());
    }

    #[test]
    fn cancel_is_idempotent_and_late_inserts_are_released() {
        let bag = CancelBag::new();
        let early = Liveness::new();
        bag.insert(Arc::new(early.clone()));

        bag.cancel();
        bag.cancel();
        assert!(bag.is_cancelled());
        assert!(bag.is_empty());
        assert!(!early.is_alive());

        let late = Liveness::new();
        bag.insert(Arc::new(late.clone()));
        assert!(!late.is_alive());
        assert!(bag.is_empty());
    }
}
