#![deny(missing_docs)]
//! Shared report queue for the in-process services.
//!
//! The attendance and poke services behave the same way when their report
//! queues reach capacity. This crate centralises that flow so the concrete
//! services focus on command handling and report construction.

use parking_lot::Mutex;
use service_abi::{SubmitOutcome, SubmitPolicy};
use smallvec::SmallVec;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};

mod script;

pub use script::{Scripted, ScriptedSequence};

/// Bounded, policy-aware report queue.
///
/// Reports are produced by command handlers or pushed by upstream handles on
/// other threads, and drained by the scheduler thread.
pub struct ReportQueue<Rep> {
    inner: Mutex<VecDeque<Rep>>,
    capacity: usize,
    closed: AtomicBool,
}

impl<Rep: Send + 'static> ReportQueue<Rep> {
    /// Creates a new queue with the requested capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
            closed: AtomicBool::new(false),
        }
    }

    /// Maximum number of queued reports.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of reports currently waiting to be drained.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Returns `true` when no report is waiting.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Marks the queue closed; later submissions report [`SubmitOutcome::Closed`].
    pub fn close(&self) {
        self.closed.store(true, Ordering::Release);
    }

    /// Returns whether [`ReportQueue::close`] has been called.
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Attempts to push `needed` reports following the provided policy.
    ///
    /// `materialise` only runs once room has been secured, so handlers never
    /// build reports that would be thrown away. Under `Coalesce`, `replaces`
    /// marks the queued reports of the same kind; only those may be evicted.
    pub fn try_submit<P, F>(
        &self,
        policy: SubmitPolicy,
        needed: usize,
        replaces: P,
        materialise: F,
    ) -> SubmitOutcome
    where
        P: Fn(&Rep) -> bool,
        F: FnOnce() -> SmallVec<[Rep; 8]>,
    {
        if self.is_closed() {
            return SubmitOutcome::Closed;
        }

        let mut inner = self.inner.lock();
        match policy {
            SubmitPolicy::BestEffort => {
                if inner.len() + needed > self.capacity {
                    return SubmitOutcome::Dropped;
                }
            }
            SubmitPolicy::Coalesce => {
                let overflow = (inner.len() + needed).saturating_sub(self.capacity);
                if overflow > 0 && inner.iter().filter(|rep| replaces(*rep)).count() < overflow {
                    return SubmitOutcome::WouldBlock;
                }

                let coalesced = overflow > 0;
                for _ in 0..overflow {
                    if let Some(pos) = inner.iter().position(|rep| replaces(rep)) {
                        inner.remove(pos);
                    }
                }

                inner.extend(materialise());
                return if coalesced {
                    SubmitOutcome::Coalesced
                } else {
                    SubmitOutcome::Accepted
                };
            }
            SubmitPolicy::Must | SubmitPolicy::Lossless => {
                if inner.len() + needed > self.capacity {
                    return SubmitOutcome::WouldBlock;
                }
            }
        }

        inner.extend(materialise());
        SubmitOutcome::Accepted
    }

    /// Drains up to `max` reports in arrival order.
    pub fn drain(&self, max: usize) -> SmallVec<[Rep; 8]> {
        if max == 0 {
            return SmallVec::new();
        }

        let mut inner = self.inner.lock();
        let limit = max.min(inner.len());
        inner.drain(..limit).collect()
    }
}
