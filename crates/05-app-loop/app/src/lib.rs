//! Single-owner event loop for the attendance screen.
//!
//! The [`Scheduler`] owns the [`AttendanceWorld`], pops intents by priority,
//! submits their work to the [`ServicesHub`], and pumps service reports back
//! through the report reducer. Every emission lands in the shared [`Output`].

pub mod cancel;
pub mod config;
pub mod output;
pub mod priority;
mod session;

use std::sync::Arc;

use hub::{
    Intent, IntentPriority, IntentReducer, ReportReducer, ServicesHub, SubmitOutcome, SubmitPolicy,
};
use log::{debug, warn};
use world::AttendanceWorld;

pub use crate::cancel::{CancelBag, Cancellable, Liveness};
pub use crate::config::SessionConfig;
pub use crate::output::{EventStream, Output, StateCell, Subscription};
pub use crate::priority::PQueues;
pub use crate::session::Session;

pub struct Scheduler {
    world: AttendanceWorld,
    hub: ServicesHub,
    output: Arc<Output>,
    intents: PQueues<Intent>,
    liveness: Liveness,
    intent_budget: usize,
    report_budget: usize,
}

impl Scheduler {
    pub fn new(
        world: AttendanceWorld,
        hub: ServicesHub,
        output: Arc<Output>,
        config: &SessionConfig,
    ) -> Self {
        Self {
            world,
            hub,
            output,
            intents: PQueues::with_capacity(16),
            liveness: Liveness::new(),
            intent_budget: config.intent_budget,
            report_budget: config.report_budget,
        }
    }

    /// Registers the scheduler's liveness and its output with `bag`.
    ///
    /// Once the bag is released the scheduler stops doing work and every
    /// subscription on the output disconnects.
    pub fn register(&self, bag: &CancelBag) {
        bag.insert(Arc::new(self.liveness.clone()));
        bag.insert(Arc::clone(&self.output) as Arc<dyn Cancellable>);
    }

    /// Queues `intent` at its own priority.
    pub fn enqueue_intent(&mut self, intent: Intent) {
        let priority = intent.priority();
        self.enqueue_intent_at(priority, intent);
    }

    pub fn enqueue_intent_at(&mut self, priority: IntentPriority, intent: Intent) {
        if self.is_cancelled() {
            debug!("dropping {intent:?}: scheduler released");
            return;
        }
        self.intents.enqueue(priority, intent);
    }

    pub fn enqueue_front_p0(&mut self, intent: Intent) {
        if self.is_cancelled() {
            debug!("dropping {intent:?}: scheduler released");
            return;
        }
        self.intents.enqueue_front_p0(intent);
    }

    pub fn pending_intents(&self) -> [usize; 3] {
        self.intents.len_per_priority()
    }

    pub fn world(&self) -> &AttendanceWorld {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut AttendanceWorld {
        &mut self.world
    }

    pub fn output(&self) -> &Arc<Output> {
        &self.output
    }

    pub fn hub(&self) -> &ServicesHub {
        &self.hub
    }

    pub fn is_cancelled(&self) -> bool {
        !self.liveness.is_alive()
    }

    fn process_intents(&mut self) -> usize {
        let mut processed = 0;
        while processed < self.intent_budget {
            let Some(intent) = self.intents.pop_next() else {
                break;
            };
            processed += 1;
            let effects = self.world.reduce_intent(intent.clone());

            for emission in effects.emissions {
                self.output.apply(emission);
            }

            let mut needs_retry_front = false;
            for cmd in effects.work {
                let policy = cmd.default_policy();
                let outcome = self.hub.try_submit_work(cmd);
                match outcome {
                    SubmitOutcome::WouldBlock | SubmitOutcome::Closed
                        if matches!(policy, SubmitPolicy::Must | SubmitPolicy::Lossless) =>
                    {
                        needs_retry_front = true;
                        break;
                    }
                    SubmitOutcome::Closed => warn!("service closed; {intent:?} work dropped"),
                    SubmitOutcome::WouldBlock | SubmitOutcome::Dropped => {
                        warn!("{policy:?} work for {intent:?} dropped: {outcome:?}")
                    }
                    SubmitOutcome::Accepted | SubmitOutcome::Coalesced => {}
                }
            }

            if needs_retry_front {
                debug!("requeueing {intent:?} at the front of P0");
                self.intents.enqueue_front_p0(intent);
                break;
            }
        }
        processed
    }

    fn process_reports(&mut self) -> usize {
        let reports = self.hub.drain_reports(self.report_budget);
        let processed = reports.len();
        for report in reports {
            let follow_ups = self.world.reduce_report(report);
            for emission in follow_ups.emissions {
                self.output.apply(emission);
            }
            for (priority, intent) in follow_ups.deferred_intents {
                self.intents.enqueue(priority, intent);
            }
        }
        processed
    }

    /// Runs one pass: budgeted intents, then budgeted reports.
    ///
    /// Returns the number of intents and reports handled, which is zero once
    /// the scheduler has been released.
    pub fn run_once(&mut self) -> usize {
        if self.is_cancelled() {
            if !self.intents.is_empty() {
                self.intents.clear();
            }
            return 0;
        }
        self.process_intents() + self.process_reports()
    }

    /// Repeats [`Scheduler::run_once`] until a pass does nothing or
    /// `max_rounds` passes have run. Returns the total handled.
    pub fn run_until_idle(&mut self, max_rounds: usize) -> usize {
        let mut total = 0;
        for _ in 0..max_rounds {
            let processed = self.run_once();
            if processed == 0 {
                break;
            }
            total += processed;
        }
        total
    }
}
